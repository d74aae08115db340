//! The rendering capability: everything the map layers need from an engine.
//!
//! Layers never own the surface. They hold an `Rc<dyn MapSurface>` and pair
//! every registration with a release: features added are removed, markers
//! placed are removed, listeners are detached through their
//! [`Subscription`].

use crate::event::{EventClass, Handler, MarkerHandle, Subscription};
use crate::feature::{BoundaryFeature, GeometryError};
use crate::geometry::LatLng;
use crate::popover::PopoverCard;
use crate::style::PaintStyle;
use crate::tooltip::FeatureTooltip;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pending boundary geometry load.
pub type GeometryFuture = LocalBoxFuture<'static, Result<Vec<BoundaryFeature>, GeometryError>>;

/// Where the boundary FeatureCollection lives (URL or site-relative path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometrySource(String);

impl GeometrySource {
    /// Create a source.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Location string.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeometrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marker placement request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Directory slug the marker stands for
    pub slug: String,
    /// Accessible label (the display name)
    pub label: String,
    /// Where to place it
    pub position: LatLng,
    /// Whether the engine may cluster this marker with its neighbours
    pub clustered: bool,
}

/// Rendering engine driven by the map layers.
///
/// All methods take `&self`; implementations use interior mutability.
/// Implementations must tolerate handlers calling back into the surface
/// while an event is being dispatched.
pub trait MapSurface {
    /// Start loading boundary geometry.
    fn load_geometry(&self, source: &GeometrySource) -> GeometryFuture;

    /// Install boundary features.
    fn add_features(&self, features: &[BoundaryFeature]);

    /// Restyle every installed feature by name.
    fn set_feature_style(&self, styler: &dyn Fn(&str) -> PaintStyle);

    /// Remove every installed feature.
    fn remove_all_features(&self);

    /// Register a handler for one class of events.
    fn on(&self, class: EventClass, handler: Handler) -> Subscription;

    /// Show (or move) the hover tooltip.
    fn show_tooltip(&self, tooltip: &FeatureTooltip);

    /// Hide the hover tooltip.
    fn hide_tooltip(&self);

    /// Place a marker.
    fn place_marker(&self, spec: &MarkerSpec) -> MarkerHandle;

    /// Remove a marker. Unknown handles are ignored.
    fn remove_marker(&self, marker: MarkerHandle);

    /// Open the popover at `position`, replacing any open popover.
    fn open_popover(&self, position: LatLng, card: &PopoverCard);

    /// Close the popover.
    fn close_popover(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_source() {
        let source = GeometrySource::new("/data/vancouver.geojson");
        assert_eq!(source.location(), "/data/vancouver.geojson");
        assert_eq!(source.to_string(), "/data/vancouver.geojson");
    }

    #[test]
    fn test_marker_spec_json() {
        let spec = MarkerSpec {
            slug: "oakridge".into(),
            label: "Oakridge".into(),
            position: LatLng::new(49.2305, -123.117),
            clustered: true,
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["slug"], "oakridge");
        assert_eq!(value["clustered"], true);
    }
}
