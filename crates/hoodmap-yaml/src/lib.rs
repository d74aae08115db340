//! YAML map manifest for the hoodmap neighbourhood map.
//!
//! A `map.yaml` describes one map instance: where the boundary geometry
//! lives, how boundaries are rendered, the detail route prefix and
//! optionally a replacement neighbourhood table.
//!
//! ```
//! use hoodmap_yaml::MapManifest;
//!
//! let manifest = MapManifest::load(
//!     "hoodmap: '0.1'\nboundaries:\n  source: /data/vancouver.geojson\n",
//! )
//! .unwrap();
//! let directory = manifest.directory().unwrap();
//! assert_eq!(manifest.focus_set(&directory).len(), directory.len());
//! ```

mod error;
mod manifest;

pub use error::ManifestError;
pub use manifest::{
    BoundaryConfig, MapManifest, MarkerConfig, ModeKind, Viewport, DEFAULT_PLACEHOLDER,
    MANIFEST_VERSION,
};
