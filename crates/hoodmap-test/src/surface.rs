//! In-memory [`MapSurface`] that records every call.
//!
//! Geometry loads stay pending until the test resolves them, so the order
//! of mount, unmount and completion is fully under test control.

use futures::channel::oneshot;
use futures::FutureExt;
use hoodmap_core::{
    parse_feature_collection, BoundaryFeature, EventClass, FeatureTooltip, GeometryError,
    GeometryFuture, GeometrySource, Handler, LatLng, ListenerRegistry, MapEvent, MapSurface,
    MarkerHandle, MarkerSpec, PaintStyle, PopoverCard, Subscription,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

type GeometryResult = Result<Vec<BoundaryFeature>, GeometryError>;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    /// `load_geometry`
    LoadGeometry(String),
    /// `add_features` with this many features
    AddFeatures(usize),
    /// `set_feature_style`
    SetFeatureStyle,
    /// `remove_all_features`
    RemoveAllFeatures,
    /// `show_tooltip` for a feature name
    ShowTooltip(String),
    /// `hide_tooltip`
    HideTooltip,
    /// `place_marker` for a slug
    PlaceMarker(String),
    /// `remove_marker`
    RemoveMarker(MarkerHandle),
    /// `open_popover` for a slug
    OpenPopover(String),
    /// `close_popover`
    ClosePopover,
}

#[derive(Default)]
struct SurfaceState {
    features: Vec<BoundaryFeature>,
    styles: BTreeMap<String, PaintStyle>,
    tooltip: Option<FeatureTooltip>,
    markers: BTreeMap<MarkerHandle, MarkerSpec>,
    next_marker: u64,
    popover: Option<(LatLng, PopoverCard)>,
    calls: Vec<SurfaceCall>,
}

/// Fake rendering surface.
#[derive(Default)]
pub struct FakeSurface {
    listeners: ListenerRegistry,
    state: RefCell<SurfaceState>,
    pending: RefCell<VecDeque<oneshot::Sender<GeometryResult>>>,
}

impl FakeSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: SurfaceCall) {
        self.state.borrow_mut().calls.push(call);
    }

    // === Geometry Control ===

    /// Complete the oldest outstanding geometry load.
    ///
    /// Returns `false` if no load was outstanding or its receiver is gone.
    pub fn resolve_geometry(&self, result: GeometryResult) -> bool {
        let sender = self.pending.borrow_mut().pop_front();
        sender.is_some_and(|tx| tx.send(result).is_ok())
    }

    /// Complete the oldest load with parsed GeoJSON text.
    pub fn resolve_geojson(&self, text: &str) -> bool {
        self.resolve_geometry(parse_feature_collection(text))
    }

    /// Number of loads issued and not yet resolved.
    pub fn pending_loads(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Number of loads issued so far.
    pub fn load_count(&self) -> usize {
        self.count_calls(|c| matches!(c, SurfaceCall::LoadGeometry(_)))
    }

    // === Event Simulation ===

    /// Deliver an event to the registered handlers. Returns handlers invoked.
    pub fn emit(&self, event: &MapEvent) -> usize {
        self.listeners.dispatch(event)
    }

    // === Queries ===

    /// Names of installed features, in install order.
    pub fn feature_names(&self) -> Vec<String> {
        self.state
            .borrow()
            .features
            .iter()
            .map(|f| f.name.clone())
            .collect()
    }

    /// Last style applied to a feature.
    pub fn style_of(&self, name: &str) -> Option<PaintStyle> {
        self.state.borrow().styles.get(name).copied()
    }

    /// Visible tooltip.
    pub fn tooltip(&self) -> Option<FeatureTooltip> {
        self.state.borrow().tooltip.clone()
    }

    /// Placed markers.
    pub fn markers(&self) -> Vec<(MarkerHandle, MarkerSpec)> {
        self.state
            .borrow()
            .markers
            .iter()
            .map(|(h, s)| (*h, s.clone()))
            .collect()
    }

    /// Handle of the marker placed for a slug.
    pub fn marker_for(&self, slug: &str) -> Option<MarkerHandle> {
        self.state
            .borrow()
            .markers
            .iter()
            .find(|(_, s)| s.slug == slug)
            .map(|(h, _)| *h)
    }

    /// Open popover content.
    pub fn popover(&self) -> Option<PopoverCard> {
        self.state.borrow().popover.as_ref().map(|(_, c)| c.clone())
    }

    /// Anchor of the open popover.
    pub fn popover_position(&self) -> Option<LatLng> {
        self.state.borrow().popover.as_ref().map(|(p, _)| *p)
    }

    /// Attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.total()
    }

    /// Attached listeners of one class.
    pub fn listeners_for(&self, class: EventClass) -> usize {
        self.listeners.count(class)
    }

    /// Every call so far.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.state.borrow().calls.clone()
    }

    /// Count calls matching a predicate.
    pub fn count_calls(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    /// Forget recorded calls (state is kept).
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Nothing installed, shown or attached.
    pub fn is_clean(&self) -> bool {
        let state = self.state.borrow();
        state.features.is_empty()
            && state.styles.is_empty()
            && state.tooltip.is_none()
            && state.markers.is_empty()
            && state.popover.is_none()
            && self.listeners.total() == 0
    }
}

impl MapSurface for FakeSurface {
    fn load_geometry(&self, source: &GeometrySource) -> GeometryFuture {
        self.record(SurfaceCall::LoadGeometry(source.location().to_string()));
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(tx);
        async move {
            rx.await
                .unwrap_or_else(|_| Err(GeometryError::Fetch("load abandoned".to_string())))
        }
        .boxed_local()
    }

    fn add_features(&self, features: &[BoundaryFeature]) {
        let mut state = self.state.borrow_mut();
        state.calls.push(SurfaceCall::AddFeatures(features.len()));
        state.features.extend_from_slice(features);
    }

    fn set_feature_style(&self, styler: &dyn Fn(&str) -> PaintStyle) {
        let names = self.feature_names();
        let styles: Vec<(String, PaintStyle)> = names
            .into_iter()
            .map(|n| {
                let style = styler(&n);
                (n, style)
            })
            .collect();
        let mut state = self.state.borrow_mut();
        state.calls.push(SurfaceCall::SetFeatureStyle);
        state.styles.extend(styles);
    }

    fn remove_all_features(&self) {
        let mut state = self.state.borrow_mut();
        state.calls.push(SurfaceCall::RemoveAllFeatures);
        state.features.clear();
        state.styles.clear();
    }

    fn on(&self, class: EventClass, handler: Handler) -> Subscription {
        self.listeners.subscribe(class, handler)
    }

    fn show_tooltip(&self, tooltip: &FeatureTooltip) {
        let mut state = self.state.borrow_mut();
        state
            .calls
            .push(SurfaceCall::ShowTooltip(tooltip.name().to_string()));
        state.tooltip = Some(tooltip.clone());
    }

    fn hide_tooltip(&self) {
        let mut state = self.state.borrow_mut();
        state.calls.push(SurfaceCall::HideTooltip);
        state.tooltip = None;
    }

    fn place_marker(&self, spec: &MarkerSpec) -> MarkerHandle {
        let mut state = self.state.borrow_mut();
        state.calls.push(SurfaceCall::PlaceMarker(spec.slug.clone()));
        let handle = MarkerHandle(state.next_marker);
        state.next_marker += 1;
        state.markers.insert(handle, spec.clone());
        handle
    }

    fn remove_marker(&self, marker: MarkerHandle) {
        let mut state = self.state.borrow_mut();
        state.calls.push(SurfaceCall::RemoveMarker(marker));
        state.markers.remove(&marker);
    }

    fn open_popover(&self, position: LatLng, card: &PopoverCard) {
        let mut state = self.state.borrow_mut();
        state.calls.push(SurfaceCall::OpenPopover(card.slug.clone()));
        state.popover = Some((position, card.clone()));
    }

    fn close_popover(&self) {
        let mut state = self.state.borrow_mut();
        state.calls.push(SurfaceCall::ClosePopover);
        state.popover = None;
    }
}
