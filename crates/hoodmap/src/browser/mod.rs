//! Browser runtime for hoodmap.
//!
//! The map engine lives in JavaScript. [`BridgeSurface`] turns layer calls
//! into JSON [`SurfaceCommand`]s for the engine and feeds engine events back
//! to the layers.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod spawner;

// Cross-platform modules
pub mod bridge;
pub mod fetch;
pub mod router;

#[cfg(target_arch = "wasm32")]
pub use app::MapApp;
pub use bridge::{BridgeSurface, CommandSink, GeometryLoader, SurfaceCommand};
pub use fetch::decode_geometry_response;
#[cfg(target_arch = "wasm32")]
pub use fetch::fetch_geometry;
pub use router::BrowserRouter;
#[cfg(target_arch = "wasm32")]
pub use spawner::WasmSpawner;
