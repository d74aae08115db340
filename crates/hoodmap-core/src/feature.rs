//! Boundary features and GeoJSON parsing.

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Property carrying the correlation name on every feature.
pub const NAME_PROPERTY: &str = "name";

/// One neighbourhood polygon or multi-polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    /// Correlation key into the directory
    pub name: String,
    /// Polygon or multi-polygon geometry
    pub geometry: Geometry,
}

impl BoundaryFeature {
    /// Create a feature.
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
        }
    }

    /// Convert back to a GeoJSON feature with only the name property.
    #[must_use]
    pub fn to_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert(NAME_PROPERTY.to_string(), JsonValue::from(self.name.clone()));
        Feature {
            bbox: None,
            geometry: Some(self.geometry.clone()),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Failure to obtain or understand the boundary geometry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// Network or transport failure
    #[error("geometry fetch failed: {0}")]
    Fetch(String),
    /// Server answered with a non-success status
    #[error("geometry fetch returned HTTP {0}")]
    Status(u16),
    /// Body is not valid GeoJSON
    #[error("invalid GeoJSON: {0}")]
    Parse(String),
    /// Valid GeoJSON but not a FeatureCollection
    #[error("geometry must be a FeatureCollection")]
    NotFeatureCollection,
}

/// Parse a GeoJSON FeatureCollection into boundary features.
///
/// Features without geometry, with a non-polygonal geometry, or without a
/// string `name` property are skipped. When a name repeats, the first
/// feature wins.
///
/// # Errors
///
/// Returns an error if the text is not GeoJSON or not a FeatureCollection.
pub fn parse_feature_collection(text: &str) -> Result<Vec<BoundaryFeature>, GeometryError> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| GeometryError::Parse(e.to_string()))?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeometryError::NotFeatureCollection);
    };

    let mut seen = HashSet::new();
    let mut features = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(name) = feature
            .property(NAME_PROPERTY)
            .and_then(JsonValue::as_str)
            .map(str::to_string)
        else {
            warn!(index, "skipping boundary feature without a name property");
            continue;
        };
        let Some(geometry) = feature.geometry else {
            debug!(%name, "skipping boundary feature without geometry");
            continue;
        };
        if !matches!(geometry.value, Value::Polygon(_) | Value::MultiPolygon(_)) {
            debug!(%name, "skipping non-polygonal boundary feature");
            continue;
        }
        if !seen.insert(name.clone()) {
            warn!(%name, "duplicate boundary name, keeping the first feature");
            continue;
        }
        features.push(BoundaryFeature { name, geometry });
    }
    Ok(features)
}

/// Serialize features as a GeoJSON FeatureCollection string.
#[must_use]
pub fn to_feature_collection(features: &[BoundaryFeature]) -> String {
    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features: features.iter().map(BoundaryFeature::to_feature).collect(),
        foreign_members: None,
    })
    .to_string()
}
