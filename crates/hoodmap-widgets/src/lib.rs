//! Map layers for the hoodmap neighbourhood map.
//!
//! - [`BoundaryLayer`]: neighbourhood polygons with hover, click and focus modes
//! - [`MarkerLayer`]: one marker per neighbourhood with a summary popover
//! - [`NeighbourhoodMap`]: both layers behind the access gate, from a manifest

pub mod boundary_layer;
pub mod context;
pub mod map_view;
pub mod markers;

pub use boundary_layer::{BoundaryLayer, BoundaryMessage, BoundaryOptions, HoverState};
pub use context::MapContext;
pub use map_view::{usable_credential, MapRender, MountedMap, NeighbourhoodMap, Placeholder};
pub use markers::{MarkerLayer, MarkerMessage, SelectionState};
