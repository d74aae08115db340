//! Boundary layer: neighbourhood polygons with hover, click and focus modes.
//!
//! Lifecycle: `Uninitialized → Loading → Ready | Failed`, and back to
//! `Uninitialized` on unmount. Exactly one geometry load is issued per
//! mount. A load that completes after unmount (or after a remount) is
//! discarded without touching the surface.

use crate::context::MapContext;
use futures::task::{LocalSpawn, LocalSpawnExt};
use hoodmap_core::{
    BoundaryFeature, Command, DetailRoutes, EventClass, FeatureTooltip, FocusSet, GeometryError,
    GeometrySource, InteractionState, LayerPhase, Liveness, MapEvent, MapSurface, NameIndex,
    Navigator, Palette, Point, RenderMode, State, Subscription, EXPLORE_HINT,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, debug_span, warn};

/// Messages for the hover state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryMessage {
    /// Pointer entered a feature
    Enter {
        /// Feature name
        name: String,
        /// Pointer position
        position: Point,
    },
    /// Pointer left the layer
    Leave,
    /// Feature clicked
    Click {
        /// Feature name
        name: String,
    },
}

impl BoundaryMessage {
    /// Translate a surface event; `None` for events this layer ignores.
    pub fn from_event(event: &MapEvent) -> Option<Self> {
        match event {
            MapEvent::FeatureEnter { name, position } => Some(Self::Enter {
                name: name.clone(),
                position: *position,
            }),
            MapEvent::FeatureLeave => Some(Self::Leave),
            MapEvent::FeatureClick { name } => Some(Self::Click { name: name.clone() }),
            _ => None,
        }
    }
}

/// Hover state of one boundary layer.
#[derive(Debug, Clone)]
pub struct HoverState {
    interaction: InteractionState,
    mode: RenderMode,
    index: Rc<NameIndex>,
    routes: DetailRoutes,
}

impl HoverState {
    /// Fresh state with nothing hovered.
    pub fn new(mode: RenderMode, index: Rc<NameIndex>, routes: DetailRoutes) -> Self {
        Self {
            interaction: InteractionState::default(),
            mode,
            index,
            routes,
        }
    }

    /// Current interaction state.
    pub const fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Render mode.
    pub const fn mode(&self) -> &RenderMode {
        &self.mode
    }

    fn reset(&mut self) {
        self.interaction = InteractionState::default();
    }
}

impl State for HoverState {
    type Message = BoundaryMessage;

    fn update(&mut self, msg: Self::Message) -> Command {
        match msg {
            BoundaryMessage::Enter { name, position } => {
                self.interaction.hovered = Some(name.clone());
                if !self.mode.is_overview() {
                    return Command::Restyle;
                }
                let mut tooltip = FeatureTooltip::new(name.as_str(), position);
                if self.index.correlates(&name) {
                    tooltip = tooltip.hint(EXPLORE_HINT);
                }
                Command::batch([Command::Restyle, Command::ShowTooltip(tooltip)])
            }
            BoundaryMessage::Leave => {
                self.interaction.hovered = None;
                Command::batch([Command::Restyle, Command::HideTooltip])
            }
            BoundaryMessage::Click { name } => {
                if !self.mode.is_overview() {
                    return Command::None;
                }
                match self.index.slug_for(&name) {
                    Some(slug) => Command::Navigate {
                        route: self.routes.path_for(slug),
                    },
                    None => Command::None,
                }
            }
        }
    }
}

/// Presentation options for a boundary layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryOptions {
    mode: RenderMode,
    focus: FocusSet,
    palette: Palette,
    routes: DetailRoutes,
}

impl BoundaryOptions {
    /// Overview mode, empty focus set, default palette and routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set render mode.
    #[must_use]
    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set focus set.
    #[must_use]
    pub fn focus(mut self, focus: FocusSet) -> Self {
        self.focus = focus;
        self
    }

    /// Set palette.
    #[must_use]
    pub const fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set detail routes.
    #[must_use]
    pub fn routes(mut self, routes: DetailRoutes) -> Self {
        self.routes = routes;
        self
    }
}

struct Runtime {
    phase: LayerPhase,
    fetch_issued: bool,
    state: HoverState,
    features: Vec<BoundaryFeature>,
    subscriptions: Vec<Subscription>,
}

struct Shared {
    surface: Rc<dyn MapSurface>,
    spawner: Rc<dyn LocalSpawn>,
    navigator: Rc<dyn Navigator>,
    source: GeometrySource,
    focus: FocusSet,
    palette: Palette,
    liveness: Liveness,
    runtime: RefCell<Runtime>,
}

impl Shared {
    fn complete(self: &Rc<Self>, result: Result<Vec<BoundaryFeature>, GeometryError>) {
        let features = match result {
            Ok(features) => features,
            Err(err) => {
                warn!(source = %self.source, error = %err, "boundary geometry unavailable");
                self.runtime.borrow_mut().phase = LayerPhase::Failed;
                return;
            }
        };

        self.surface.add_features(&features);
        {
            let mut rt = self.runtime.borrow_mut();
            rt.state.reset();
            rt.features = features;
        }
        self.restyle();

        let subscriptions: Vec<Subscription> = [
            EventClass::FeatureEnter,
            EventClass::FeatureLeave,
            EventClass::FeatureClick,
        ]
        .into_iter()
        .map(|class| {
            let weak: Weak<Self> = Rc::downgrade(self);
            self.surface.on(
                class,
                Box::new(move |event| {
                    if let Some(shared) = weak.upgrade() {
                        shared.handle(event);
                    }
                }),
            )
        })
        .collect();

        let mut rt = self.runtime.borrow_mut();
        rt.subscriptions = subscriptions;
        rt.phase = LayerPhase::Ready;
        debug!(features = rt.features.len(), "boundary layer ready");
    }

    fn handle(&self, event: &MapEvent) {
        let Some(msg) = BoundaryMessage::from_event(event) else {
            return;
        };
        let command = {
            let mut rt = self.runtime.borrow_mut();
            if rt.phase != LayerPhase::Ready {
                return;
            }
            rt.state.update(msg)
        };
        self.apply(command);
    }

    fn apply(&self, command: Command) {
        for command in command.flatten() {
            if self.runtime.borrow().phase != LayerPhase::Ready {
                return;
            }
            match command {
                Command::Restyle => self.restyle(),
                Command::ShowTooltip(tooltip) => self.surface.show_tooltip(&tooltip),
                Command::HideTooltip => self.surface.hide_tooltip(),
                Command::Navigate { route } => {
                    debug!(%route, "boundary click");
                    self.navigator.navigate(&route);
                }
                other => debug!(?other, "command not handled by boundary layer"),
            }
        }
    }

    fn restyle(&self) {
        let (interaction, mode) = {
            let rt = self.runtime.borrow();
            (rt.state.interaction().clone(), rt.state.mode().clone())
        };
        self.surface.set_feature_style(&|name| {
            self.palette.style_for(name, &interaction, &mode, &self.focus)
        });
    }
}

/// Polygon overlay of neighbourhood boundaries.
pub struct BoundaryLayer {
    shared: Rc<Shared>,
}

impl BoundaryLayer {
    /// Overview layer with default options.
    pub fn new(context: &MapContext, source: GeometrySource, index: Rc<NameIndex>) -> Self {
        Self::with_options(context, source, index, BoundaryOptions::default())
    }

    /// Layer with explicit options.
    pub fn with_options(
        context: &MapContext,
        source: GeometrySource,
        index: Rc<NameIndex>,
        options: BoundaryOptions,
    ) -> Self {
        let BoundaryOptions {
            mode,
            focus,
            palette,
            routes,
        } = options;
        Self {
            shared: Rc::new(Shared {
                surface: Rc::clone(&context.surface),
                spawner: Rc::clone(&context.spawner),
                navigator: Rc::clone(&context.navigator),
                source,
                focus,
                palette,
                liveness: Liveness::new(),
                runtime: RefCell::new(Runtime {
                    phase: LayerPhase::Uninitialized,
                    fetch_issued: false,
                    state: HoverState::new(mode, index, routes),
                    features: Vec::new(),
                    subscriptions: Vec::new(),
                }),
            }),
        }
    }

    /// Start loading geometry. A second call before unmount does nothing.
    pub fn mount(&self) {
        let shared = &self.shared;
        let span = debug_span!("boundary_mount", source = %shared.source);
        let _enter = span.enter();

        {
            let mut rt = shared.runtime.borrow_mut();
            if rt.fetch_issued {
                debug!(phase = %rt.phase, "boundary layer already mounted");
                return;
            }
            rt.fetch_issued = true;
            rt.phase = LayerPhase::Loading;
        }

        let token = shared.liveness.arm();
        let load = shared.surface.load_geometry(&shared.source);
        let weak = Rc::downgrade(shared);
        let task = async move {
            let result = load.await;
            let Some(shared) = weak.upgrade() else {
                debug!("boundary layer dropped before geometry arrived");
                return;
            };
            if !token.is_live() {
                debug!("discarding geometry for a previous mount");
                return;
            }
            shared.complete(result);
        };

        if let Err(err) = shared.spawner.spawn_local(task) {
            warn!(error = %err, "could not spawn boundary geometry load");
            shared.runtime.borrow_mut().phase = LayerPhase::Failed;
        } else {
            debug!("boundary geometry load issued");
        }
    }

    /// Tear down: detach listeners, remove features, hide the tooltip.
    ///
    /// Safe from any phase and safe to repeat.
    pub fn unmount(&self) {
        let shared = &self.shared;
        shared.liveness.revoke();
        let (subscriptions, was) = {
            let mut rt = shared.runtime.borrow_mut();
            let was = rt.phase;
            rt.phase = LayerPhase::Uninitialized;
            rt.fetch_issued = false;
            rt.state.reset();
            rt.features.clear();
            (std::mem::take(&mut rt.subscriptions), was)
        };
        drop(subscriptions);
        if !was.is_mounted() {
            return;
        }
        shared.surface.remove_all_features();
        shared.surface.hide_tooltip();
        debug!(phase = %was, "boundary layer unmounted");
    }

    /// Current phase.
    pub fn phase(&self) -> LayerPhase {
        self.shared.runtime.borrow().phase
    }

    /// Name of the hovered feature.
    pub fn hovered(&self) -> Option<String> {
        self.shared
            .runtime
            .borrow()
            .state
            .interaction()
            .hovered
            .clone()
    }

    /// Render mode.
    pub fn mode(&self) -> RenderMode {
        self.shared.runtime.borrow().state.mode().clone()
    }

    /// Number of features held by the layer.
    pub fn feature_count(&self) -> usize {
        self.shared.runtime.borrow().features.len()
    }
}

impl Drop for BoundaryLayer {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for BoundaryLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundaryLayer")
            .field("source", &self.shared.source)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}
