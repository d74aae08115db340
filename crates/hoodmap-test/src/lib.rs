#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::new_without_default)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::return_self_not_must_use)]
//! Test support for hoodmap.
//!
//! - [`FakeSurface`]: in-memory [`hoodmap_core::MapSurface`] with a call log
//!   and test-controlled geometry loads
//! - [`RecordingNavigator`], [`RecordingLeads`]: collaborators that record
//! - [`Harness`]: the above plus a `LocalPool`, with chainable interactions
//! - [`fixtures`]: shared GeoJSON, manifest and directory data

pub mod fixtures;
mod harness;
mod recorders;
mod surface;

pub use harness::Harness;
pub use recorders::{RecordingLeads, RecordingNavigator};
pub use surface::{FakeSurface, SurfaceCall};
