//! JSON bridge between the map layers and a JavaScript map engine.
//!
//! Layer calls become [`SurfaceCommand`]s handed to a [`CommandSink`].
//! Engine events arrive as JSON [`MapEvent`]s through
//! [`BridgeSurface::dispatch_json`].

use futures::FutureExt;
use hoodmap_core::geojson::FeatureCollection;
use hoodmap_core::{
    BoundaryFeature, EventClass, FeatureTooltip, GeometryFuture, GeometrySource, Handler, LatLng,
    ListenerRegistry, MapEvent, MapSurface, MarkerHandle, MarkerSpec, PaintStyle, PopoverCard,
    Subscription,
};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Instruction for the map engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceCommand {
    /// Draw boundary polygons
    AddFeatures {
        /// Features with only their `name` property
        collection: FeatureCollection,
    },
    /// Restyle drawn polygons by name
    SetFeatureStyle {
        /// Style of every drawn polygon
        styles: BTreeMap<String, PaintStyle>,
    },
    /// Remove every polygon
    RemoveAllFeatures,
    /// Show or move the hover tooltip
    ShowTooltip {
        /// Tooltip content and placement
        tooltip: FeatureTooltip,
        /// Escaped HTML rendering
        html: String,
    },
    /// Hide the hover tooltip
    HideTooltip,
    /// Add a marker
    PlaceMarker {
        /// Handle the engine reports back in `marker_click`
        marker: MarkerHandle,
        /// What to place
        spec: MarkerSpec,
    },
    /// Remove a marker
    RemoveMarker {
        /// Handle from `place_marker`
        marker: MarkerHandle,
    },
    /// Open the popover
    OpenPopover {
        /// Anchor
        position: LatLng,
        /// Card content
        card: PopoverCard,
        /// Escaped HTML rendering
        html: String,
    },
    /// Close the popover
    ClosePopover,
}

/// Receiver of surface commands.
pub trait CommandSink {
    /// Deliver one command.
    fn send(&self, command: &SurfaceCommand);
}

impl<F: Fn(&SurfaceCommand)> CommandSink for F {
    fn send(&self, command: &SurfaceCommand) {
        self(command);
    }
}

/// Starts a geometry download.
pub type GeometryLoader = Box<dyn Fn(&GeometrySource) -> GeometryFuture>;

/// [`MapSurface`] speaking JSON to an engine outside Rust.
pub struct BridgeSurface {
    sink: Rc<dyn CommandSink>,
    loader: GeometryLoader,
    registry: ListenerRegistry,
    features: RefCell<Vec<String>>,
    markers: RefCell<BTreeSet<MarkerHandle>>,
    next_marker: Cell<u64>,
}

impl BridgeSurface {
    /// Bridge sending commands to `sink` and loading geometry with `loader`.
    pub fn new(sink: Rc<dyn CommandSink>, loader: GeometryLoader) -> Self {
        Self {
            sink,
            loader,
            registry: ListenerRegistry::new(),
            features: RefCell::new(Vec::new()),
            markers: RefCell::new(BTreeSet::new()),
            next_marker: Cell::new(1),
        }
    }

    /// Bridge whose loads complete with a fixed result.
    pub fn with_static_geometry(
        sink: Rc<dyn CommandSink>,
        geometry: Result<Vec<BoundaryFeature>, hoodmap_core::GeometryError>,
    ) -> Self {
        Self::new(
            sink,
            Box::new(move |_: &GeometrySource| {
                futures::future::ready(geometry.clone()).boxed_local()
            }),
        )
    }

    /// Deliver an engine event to the layers. Returns handlers run.
    pub fn dispatch(&self, event: &MapEvent) -> usize {
        self.registry.dispatch(event)
    }

    /// Parse and deliver an engine event.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a map event.
    pub fn dispatch_json(&self, json: &str) -> Result<usize, serde_json::Error> {
        let event: MapEvent = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "unrecognised engine event");
            e
        })?;
        Ok(self.dispatch(&event))
    }

    /// Names of the drawn polygons.
    pub fn feature_names(&self) -> Vec<String> {
        self.features.borrow().clone()
    }

    /// Markers currently placed.
    pub fn marker_count(&self) -> usize {
        self.markers.borrow().len()
    }

    /// Registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.total()
    }

    fn send(&self, command: &SurfaceCommand) {
        self.sink.send(command);
    }
}

impl fmt::Debug for BridgeSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeSurface")
            .field("features", &self.features.borrow().len())
            .field("markers", &self.markers.borrow().len())
            .field("listeners", &self.registry.total())
            .finish_non_exhaustive()
    }
}

impl MapSurface for BridgeSurface {
    fn load_geometry(&self, source: &GeometrySource) -> GeometryFuture {
        debug!(%source, "loading boundary geometry");
        (self.loader)(source)
    }

    fn add_features(&self, features: &[BoundaryFeature]) {
        self.features
            .borrow_mut()
            .extend(features.iter().map(|f| f.name.clone()));
        self.send(&SurfaceCommand::AddFeatures {
            collection: FeatureCollection {
                bbox: None,
                features: features.iter().map(BoundaryFeature::to_feature).collect(),
                foreign_members: None,
            },
        });
    }

    fn set_feature_style(&self, styler: &dyn Fn(&str) -> PaintStyle) {
        let styles: BTreeMap<String, PaintStyle> = self
            .features
            .borrow()
            .iter()
            .map(|name| (name.clone(), styler(name)))
            .collect();
        if styles.is_empty() {
            return;
        }
        self.send(&SurfaceCommand::SetFeatureStyle { styles });
    }

    fn remove_all_features(&self) {
        self.features.borrow_mut().clear();
        self.send(&SurfaceCommand::RemoveAllFeatures);
    }

    fn on(&self, class: EventClass, handler: Handler) -> Subscription {
        self.registry.subscribe(class, handler)
    }

    fn show_tooltip(&self, tooltip: &FeatureTooltip) {
        self.send(&SurfaceCommand::ShowTooltip {
            tooltip: tooltip.clone(),
            html: tooltip.to_html(),
        });
    }

    fn hide_tooltip(&self) {
        self.send(&SurfaceCommand::HideTooltip);
    }

    fn place_marker(&self, spec: &MarkerSpec) -> MarkerHandle {
        let marker = MarkerHandle(self.next_marker.get());
        self.next_marker.set(marker.0 + 1);
        self.markers.borrow_mut().insert(marker);
        self.send(&SurfaceCommand::PlaceMarker {
            marker,
            spec: spec.clone(),
        });
        marker
    }

    fn remove_marker(&self, marker: MarkerHandle) {
        if self.markers.borrow_mut().remove(&marker) {
            self.send(&SurfaceCommand::RemoveMarker { marker });
        }
    }

    fn open_popover(&self, position: LatLng, card: &PopoverCard) {
        self.send(&SurfaceCommand::OpenPopover {
            position,
            card: card.clone(),
            html: card.to_html(),
        });
    }

    fn close_popover(&self) {
        self.send(&SurfaceCommand::ClosePopover);
    }
}
