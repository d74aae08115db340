//! Core types and traits for the hoodmap neighbourhood map.
//!
//! This crate provides everything the map layers share:
//! - Data: [`Directory`], [`NeighbourhoodRecord`], [`BoundaryFeature`]
//! - Correlation between geometry names and slugs: [`NameIndex`]
//! - The boundary style engine: [`style_for`], [`Palette`], [`PaintStyle`]
//! - Capabilities the host supplies: [`MapSurface`], [`Navigator`], [`LeadCapture`]
//! - Events, layer state and lifecycle: [`MapEvent`], [`State`], [`Command`], [`LayerPhase`]

mod color;
mod correlation;
mod directory;
mod event;
mod feature;
mod geometry;
mod lifecycle;
mod markup;
mod navigation;
mod popover;
mod state;
mod style;
mod surface;
mod tooltip;

pub use color::{Color, ColorParseError};
pub use correlation::{AliasError, NameIndex};
pub use directory::{is_url_safe_slug, Directory, DirectoryError, NeighbourhoodRecord, PriceTrend};
pub use event::{
    EventClass, Handler, ListenerRegistry, MapEvent, MarkerHandle, PopoverAction, Subscription,
};
pub use feature::{
    parse_feature_collection, to_feature_collection, BoundaryFeature, GeometryError, NAME_PROPERTY,
};
pub use geometry::{LatLng, LatLngBounds, Point};
pub use lifecycle::{LayerPhase, Liveness, LivenessToken};
pub use markup::escape_html;
pub use navigation::{DetailRoutes, LeadCapture, Navigator, DEFAULT_ROUTE_PREFIX};
pub use popover::{PopoverCard, REQUEST_REPORT_LABEL, VIEW_DETAILS_LABEL};
pub use state::{Command, State};
pub use style::{
    style_for, FocusSet, InteractionState, PaintStyle, Palette, RenderMode,
    BACKGROUND_FILL_OPACITY, BACKGROUND_STROKE_OPACITY, BACKGROUND_STROKE_WEIGHT,
    HOVER_FILL_OPACITY, HOVER_STROKE_OPACITY, HOVER_STROKE_WEIGHT, MEMBER_FILL_OPACITY,
    MEMBER_STROKE_OPACITY, MEMBER_STROKE_WEIGHT, TARGET_FILL_OPACITY, TARGET_STROKE_OPACITY,
    TARGET_STROKE_WEIGHT,
};
pub use surface::{GeometryFuture, GeometrySource, MapSurface, MarkerSpec};
pub use tooltip::{FeatureTooltip, TooltipPlacement, EXPLORE_HINT};

/// The geojson crate, re-exported for geometry construction.
pub use geojson;
