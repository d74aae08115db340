//! Hoodmap: interactive neighbourhood map for property listing sites.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { MapApp } from './hoodmap.js';
//!
//! async function main() {
//!     await init();
//!     const app = new MapApp(manifestYaml);
//!     const live = app.mount(token, (json) => engine.apply(JSON.parse(json)));
//!     engine.onEvent((event) => app.dispatch(JSON.stringify(event)));
//! }
//! ```

#![allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::use_self,
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::derive_partial_eq_without_eq,
    clippy::needless_raw_string_hashes,
    unreachable_pub
)]

pub use hoodmap_core::*;
pub use hoodmap_widgets as widgets;
pub use hoodmap_yaml as yaml;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::MapApp;

pub use browser::{BridgeSurface, BrowserRouter, CommandSink, SurfaceCommand};
