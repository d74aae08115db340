//! Marker layer: one marker per directory record and a single popover.

use crate::context::MapContext;
use hoodmap_core::{
    Command, DetailRoutes, Directory, EventClass, LeadCapture, MapEvent, MapSurface, MarkerHandle,
    MarkerSpec, Navigator, PopoverAction, PopoverCard, State, Subscription,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Messages for the selection state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerMessage {
    /// Marker for this slug clicked
    Clicked {
        /// Directory slug
        slug: String,
    },
    /// Popover close control used
    Closed,
    /// Popover button pressed
    Action(PopoverAction),
}

/// Which marker's popover is open. At most one at a time.
#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: Option<String>,
    directory: Rc<Directory>,
    routes: DetailRoutes,
    offer_report: bool,
}

impl SelectionState {
    /// Nothing selected.
    pub fn new(directory: Rc<Directory>, routes: DetailRoutes) -> Self {
        Self {
            selected: None,
            directory,
            routes,
            offer_report: false,
        }
    }

    /// Show the market-report action in popovers.
    #[must_use]
    pub const fn offer_report(mut self, offer: bool) -> Self {
        self.offer_report = offer;
        self
    }

    /// Selected slug.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn reset(&mut self) {
        self.selected = None;
    }
}

impl State for SelectionState {
    type Message = MarkerMessage;

    fn update(&mut self, msg: Self::Message) -> Command {
        match msg {
            MarkerMessage::Clicked { slug } => {
                let Some(record) = self.directory.by_slug(&slug) else {
                    return Command::None;
                };
                let card = PopoverCard::from_record(record).with_report_action(self.offer_report);
                let open = Command::OpenPopover {
                    position: record.center,
                    card,
                };
                match self.selected.replace(slug) {
                    Some(_) => Command::batch([Command::ClosePopover, open]),
                    None => open,
                }
            }
            MarkerMessage::Closed => match self.selected.take() {
                Some(_) => Command::ClosePopover,
                None => Command::None,
            },
            MarkerMessage::Action(PopoverAction::ViewDetails) => match &self.selected {
                Some(slug) => Command::Navigate {
                    route: self.routes.path_for(slug),
                },
                None => Command::None,
            },
            MarkerMessage::Action(PopoverAction::RequestReport) => match &self.selected {
                Some(slug) => Command::RequestReport { slug: slug.clone() },
                None => Command::None,
            },
        }
    }
}

struct Runtime {
    mounted: bool,
    state: SelectionState,
    markers: BTreeMap<MarkerHandle, String>,
    subscriptions: Vec<Subscription>,
}

struct Shared {
    surface: Rc<dyn MapSurface>,
    navigator: Rc<dyn Navigator>,
    leads: Option<Rc<dyn LeadCapture>>,
    directory: Rc<Directory>,
    clustered: Cell<bool>,
    runtime: RefCell<Runtime>,
}

impl Shared {
    fn handle(&self, event: &MapEvent) {
        let command = {
            let mut rt = self.runtime.borrow_mut();
            if !rt.mounted {
                return;
            }
            let msg = match event {
                MapEvent::MarkerClick { marker } => match rt.markers.get(marker) {
                    Some(slug) => MarkerMessage::Clicked { slug: slug.clone() },
                    None => return,
                },
                MapEvent::PopoverClose => MarkerMessage::Closed,
                MapEvent::PopoverAction { action } => MarkerMessage::Action(*action),
                _ => return,
            };
            rt.state.update(msg)
        };
        self.apply(command);
    }

    fn apply(&self, command: Command) {
        for command in command.flatten() {
            if !self.runtime.borrow().mounted {
                return;
            }
            match command {
                Command::OpenPopover { position, card } => {
                    self.surface.open_popover(position, &card);
                }
                Command::ClosePopover => self.surface.close_popover(),
                Command::Navigate { route } => {
                    debug!(%route, "popover navigation");
                    self.navigator.navigate(&route);
                }
                Command::RequestReport { slug } => match &self.leads {
                    Some(leads) => leads.request_report(&slug),
                    None => debug!(%slug, "report requested without a lead pipeline"),
                },
                other => debug!(?other, "command not handled by marker layer"),
            }
        }
    }
}

/// Clustered point markers with a summary popover.
pub struct MarkerLayer {
    shared: Rc<Shared>,
}

impl MarkerLayer {
    /// Markers for every record in `directory`.
    pub fn new(context: &MapContext, directory: Rc<Directory>, routes: DetailRoutes) -> Self {
        let offer_report = context.leads.is_some();
        Self {
            shared: Rc::new(Shared {
                surface: Rc::clone(&context.surface),
                navigator: Rc::clone(&context.navigator),
                leads: context.leads.clone(),
                directory: Rc::clone(&directory),
                clustered: Cell::new(true),
                runtime: RefCell::new(Runtime {
                    mounted: false,
                    state: SelectionState::new(directory, routes).offer_report(offer_report),
                    markers: BTreeMap::new(),
                    subscriptions: Vec::new(),
                }),
            }),
        }
    }

    /// Let the engine cluster markers (default `true`).
    #[must_use]
    pub fn clustered(self, clustered: bool) -> Self {
        self.shared.clustered.set(clustered);
        self
    }

    /// Show the market-report action (default: when lead capture is present).
    #[must_use]
    pub fn report_action(self, offer: bool) -> Self {
        self.shared.runtime.borrow_mut().state.offer_report = offer;
        self
    }

    /// Place markers and attach listeners. A second call does nothing.
    pub fn mount(&self) {
        let shared = &self.shared;
        if shared.runtime.borrow().mounted {
            return;
        }

        let placed: BTreeMap<MarkerHandle, String> = shared
            .directory
            .all()
            .iter()
            .map(|record| {
                let spec = MarkerSpec {
                    slug: record.slug.clone(),
                    label: record.name.clone(),
                    position: record.center,
                    clustered: shared.clustered.get(),
                };
                (shared.surface.place_marker(&spec), record.slug.clone())
            })
            .collect();

        let subscriptions: Vec<Subscription> = [
            EventClass::MarkerClick,
            EventClass::PopoverClose,
            EventClass::PopoverAction,
        ]
        .into_iter()
        .map(|class| {
            let weak: Weak<Shared> = Rc::downgrade(shared);
            shared.surface.on(
                class,
                Box::new(move |event| {
                    if let Some(shared) = weak.upgrade() {
                        shared.handle(event);
                    }
                }),
            )
        })
        .collect();

        let mut rt = shared.runtime.borrow_mut();
        debug!(markers = placed.len(), "marker layer mounted");
        rt.markers = placed;
        rt.subscriptions = subscriptions;
        rt.mounted = true;
    }

    /// Detach listeners, remove markers and close the popover. Safe to repeat.
    pub fn unmount(&self) {
        let shared = &self.shared;
        let (subscriptions, markers) = {
            let mut rt = shared.runtime.borrow_mut();
            if !rt.mounted {
                return;
            }
            rt.mounted = false;
            rt.state.reset();
            (
                std::mem::take(&mut rt.subscriptions),
                std::mem::take(&mut rt.markers),
            )
        };
        drop(subscriptions);
        for marker in markers.into_keys() {
            shared.surface.remove_marker(marker);
        }
        shared.surface.close_popover();
        debug!("marker layer unmounted");
    }

    /// Whether markers are placed.
    pub fn is_mounted(&self) -> bool {
        self.shared.runtime.borrow().mounted
    }

    /// Slug of the open popover.
    pub fn selected(&self) -> Option<String> {
        self.shared
            .runtime
            .borrow()
            .state
            .selected()
            .map(str::to_string)
    }

    /// Number of placed markers.
    pub fn marker_count(&self) -> usize {
        self.shared.runtime.borrow().markers.len()
    }
}

impl Drop for MarkerLayer {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for MarkerLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerLayer")
            .field("mounted", &self.is_mounted())
            .field("selected", &self.selected())
            .finish_non_exhaustive()
    }
}
