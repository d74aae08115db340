//! Shared test data.

use hoodmap_core::{parse_feature_collection, BoundaryFeature, Directory, FocusSet};

/// Boundaries for Oakridge and Marpole plus Strathcona, which has no
/// directory entry and so is background context only.
pub const BOUNDARIES_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {"name": "Oakridge"},
     "geometry": {"type": "Polygon", "coordinates":
       [[[-123.131,49.219],[-123.103,49.219],[-123.103,49.242],
        [-123.131,49.242],[-123.131,49.219]]]}},
    {"type": "Feature", "properties": {"name": "Marpole"},
     "geometry": {"type": "Polygon", "coordinates":
       [[[-123.150,49.199],[-123.106,49.199],[-123.106,49.219],
        [-123.150,49.219],[-123.150,49.199]]]}},
    {"type": "Feature", "properties": {"name": "Strathcona"},
     "geometry": {"type": "Polygon", "coordinates":
       [[[-123.100,49.270],[-123.077,49.270],[-123.077,49.284],
        [-123.100,49.284],[-123.100,49.270]]]}}
  ]
}"#;

/// A minimal manifest with an overview boundary layer.
pub const MANIFEST_YAML: &str = r"
hoodmap: '0.1'
title: Vancouver West Side
boundaries:
  source: /data/vancouver.geojson
  focus: [Oakridge]
";

/// The built-in directory.
pub fn directory() -> Directory {
    Directory::builtin()
}

/// Features parsed from [`BOUNDARIES_GEOJSON`].
///
/// # Panics
///
/// Panics if the fixture text stops parsing.
pub fn boundary_features() -> Vec<BoundaryFeature> {
    parse_feature_collection(BOUNDARIES_GEOJSON).expect("fixture GeoJSON parses")
}

/// Focus set containing only Oakridge.
pub fn oakridge_focus() -> FocusSet {
    ["Oakridge"].into_iter().collect()
}
