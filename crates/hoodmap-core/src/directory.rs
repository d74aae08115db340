//! Neighbourhood directory: the fixed table of service-area records.
//!
//! The directory is immutable configuration. It is built once (from the
//! compiled-in table or a manifest) before any map layer is constructed and
//! is only read afterwards.

use crate::geometry::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One neighbourhood in the service area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighbourhoodRecord {
    /// Unique, URL-safe, stable key
    pub slug: String,
    /// Display name, also the correlation key into the boundary geometry
    pub name: String,
    /// Marker position
    pub center: LatLng,
    /// One-line summary shown in the popover
    #[serde(default)]
    pub tagline: String,
    /// Average price display string, e.g. "$1.2M"
    pub avg_price: String,
    /// Signed year-over-year change display string, e.g. "+4.3%"
    pub price_change: String,
}

impl NeighbourhoodRecord {
    /// Create a record.
    #[must_use]
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        center: LatLng,
        avg_price: impl Into<String>,
        price_change: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            center,
            tagline: String::new(),
            avg_price: avg_price.into(),
            price_change: price_change.into(),
        }
    }

    /// Set the tagline.
    #[must_use]
    pub fn tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = tagline.into();
        self
    }

    /// Direction of the price change, read from its sign.
    #[must_use]
    pub fn trend(&self) -> PriceTrend {
        PriceTrend::from_display(&self.price_change)
    }
}

/// Direction of a displayed price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTrend {
    /// Prices rising
    Up,
    /// Prices falling
    Down,
    /// Unchanged or unsigned
    Flat,
}

impl PriceTrend {
    /// Classify a display string such as "+4.3%" or "-1.1%".
    #[must_use]
    pub fn from_display(change: &str) -> Self {
        match change.trim_start().chars().next() {
            Some('+') => Self::Up,
            Some('-' | '\u{2212}') => Self::Down,
            _ => Self::Flat,
        }
    }
}

/// Error raised when a set of records breaks a directory invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Two records share a slug
    #[error("duplicate slug '{0}'")]
    DuplicateSlug(String),
    /// Two records share a name
    #[error("duplicate neighbourhood name '{0}'")]
    DuplicateName(String),
    /// Slug is empty or not URL-safe
    #[error("slug '{0}' is not URL-safe (expected lowercase letters, digits and inner dashes)")]
    InvalidSlug(String),
    /// Center is outside the WGS84 range
    #[error("neighbourhood '{0}' has an out-of-range center")]
    InvalidCenter(String),
}

/// Check a slug is non-empty `[a-z0-9-]` without leading or trailing dashes.
#[must_use]
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Ordered, immutable table of neighbourhood records.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Directory {
    records: Vec<NeighbourhoodRecord>,
}

impl Directory {
    /// Build a directory, enforcing slug and name uniqueness.
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation found, in record order.
    pub fn new(records: Vec<NeighbourhoodRecord>) -> Result<Self, DirectoryError> {
        let mut slugs = HashSet::new();
        let mut names = HashSet::new();
        for record in &records {
            if !is_url_safe_slug(&record.slug) {
                return Err(DirectoryError::InvalidSlug(record.slug.clone()));
            }
            if !record.center.is_valid() {
                return Err(DirectoryError::InvalidCenter(record.slug.clone()));
            }
            if !slugs.insert(record.slug.as_str()) {
                return Err(DirectoryError::DuplicateSlug(record.slug.clone()));
            }
            if !names.insert(record.name.as_str()) {
                return Err(DirectoryError::DuplicateName(record.name.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The compiled-in service-area table.
    #[must_use]
    pub fn builtin() -> Self {
        let records = BUILTIN
            .iter()
            .map(|&(slug, name, (lat, lng), tagline, avg_price, price_change)| {
                NeighbourhoodRecord::new(slug, name, LatLng::new(lat, lng), avg_price, price_change)
                    .tagline(tagline)
            })
            .collect();
        Self { records }
    }

    /// All records, in display order.
    #[must_use]
    pub fn all(&self) -> &[NeighbourhoodRecord] {
        &self.records
    }

    /// Look a record up by slug.
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&NeighbourhoodRecord> {
        self.records.iter().find(|r| r.slug == slug)
    }

    /// Look a record up by display name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&NeighbourhoodRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Display names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bounding box of every marker position.
    #[must_use]
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_coords(self.records.iter().map(|r| &r.center))
    }
}

type BuiltinRow = (
    &'static str,
    &'static str,
    (f64, f64),
    &'static str,
    &'static str,
    &'static str,
);

// Prices are illustrative marketing copy, not listing data.
const BUILTIN: &[BuiltinRow] = &[
    (
        "oakridge",
        "Oakridge",
        (49.2305, -123.1170),
        "Transit-connected living around the new Oakridge Park",
        "$1.2M",
        "+4.3%",
    ),
    (
        "marpole",
        "Marpole",
        (49.2098, -123.1300),
        "Riverside village with some of the west side's best value",
        "$985K",
        "+2.1%",
    ),
    (
        "kerrisdale",
        "Kerrisdale",
        (49.2331, -123.1557),
        "Tree-lined streets and a classic high-street shopping village",
        "$2.4M",
        "+1.8%",
    ),
    (
        "shaughnessy",
        "Shaughnessy",
        (49.2468, -123.1393),
        "Heritage estates on quiet crescents",
        "$4.1M",
        "-0.6%",
    ),
    (
        "south-cambie",
        "South Cambie",
        (49.2459, -123.1217),
        "Canada Line convenience next to Queen Elizabeth Park",
        "$1.6M",
        "+3.2%",
    ),
    (
        "riley-park",
        "Riley Park",
        (49.2447, -123.1030),
        "Main Street character homes and farmers' market weekends",
        "$1.7M",
        "+2.7%",
    ),
    (
        "kitsilano",
        "Kitsilano",
        (49.2684, -123.1683),
        "Beaches, West 4th cafés and a short hop downtown",
        "$1.5M",
        "+0.9%",
    ),
    (
        "dunbar-southlands",
        "Dunbar-Southlands",
        (49.2378, -123.1853),
        "Family streets between Pacific Spirit Park and the Fraser",
        "$2.9M",
        "-1.2%",
    ),
    (
        "arbutus-ridge",
        "Arbutus Ridge",
        (49.2457, -123.1623),
        "Greenway living along the Arbutus corridor",
        "$2.6M",
        "0.0%",
    ),
    (
        "mount-pleasant",
        "Mount Pleasant",
        (49.2636, -123.0978),
        "Breweries, studios and character conversions",
        "$1.1M",
        "+5.0%",
    ),
];
