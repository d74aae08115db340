//! Surface events and listener registration.
//!
//! Surfaces deliver [`MapEvent`]s to handlers registered per [`EventClass`].
//! Registration returns a [`Subscription`]; dropping it (or calling
//! [`Subscription::unsubscribe`]) detaches the handler.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Opaque handle to a marker placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerHandle(pub u64);

/// Action button pressed inside a marker popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopoverAction {
    /// Go to the neighbourhood detail page
    ViewDetails,
    /// Ask for a market report (lead capture)
    RequestReport,
}

/// Event delivered by a rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    /// Pointer entered a boundary feature
    FeatureEnter {
        /// Feature name
        name: String,
        /// Pointer position on the surface
        position: Point,
    },
    /// Pointer left the boundary layer (surface-wide)
    FeatureLeave,
    /// Boundary feature clicked
    FeatureClick {
        /// Feature name
        name: String,
    },
    /// Marker clicked
    MarkerClick {
        /// Marker that was clicked
        marker: MarkerHandle,
    },
    /// Popover close control used
    PopoverClose,
    /// Popover action button pressed
    PopoverAction {
        /// Which action
        action: PopoverAction,
    },
}

impl MapEvent {
    /// The class handlers subscribe to for this event.
    #[must_use]
    pub const fn class(&self) -> EventClass {
        match self {
            Self::FeatureEnter { .. } => EventClass::FeatureEnter,
            Self::FeatureLeave => EventClass::FeatureLeave,
            Self::FeatureClick { .. } => EventClass::FeatureClick,
            Self::MarkerClick { .. } => EventClass::MarkerClick,
            Self::PopoverClose => EventClass::PopoverClose,
            Self::PopoverAction { .. } => EventClass::PopoverAction,
        }
    }
}

/// Subscription key for [`MapEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventClass {
    /// [`MapEvent::FeatureEnter`]
    FeatureEnter,
    /// [`MapEvent::FeatureLeave`]
    FeatureLeave,
    /// [`MapEvent::FeatureClick`]
    FeatureClick,
    /// [`MapEvent::MarkerClick`]
    MarkerClick,
    /// [`MapEvent::PopoverClose`]
    PopoverClose,
    /// [`MapEvent::PopoverAction`]
    PopoverAction,
}

/// Event handler registered with a surface.
pub type Handler = Box<dyn FnMut(&MapEvent)>;

/// Token that keeps a handler attached; detaches on drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the surface-specific detach action.
    #[must_use]
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to detach.
    #[must_use]
    pub const fn detached() -> Self {
        Self { cancel: None }
    }

    /// Detach now. Equivalent to dropping the token.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.cancel.is_some())
            .finish()
    }
}

type SharedHandler = Rc<RefCell<Handler>>;

#[derive(Default)]
struct Table {
    next_id: u64,
    handlers: BTreeMap<u64, (EventClass, SharedHandler)>,
}

/// Listener table for surface implementations.
///
/// Dispatch snapshots the matching handlers before calling them, so a
/// handler may call back into the surface, register listeners or drop its
/// own subscription while an event is being delivered.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    table: Rc<RefCell<Table>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event class.
    pub fn subscribe(&self, class: EventClass, handler: Handler) -> Subscription {
        let id = {
            let mut table = self.table.borrow_mut();
            let id = table.next_id;
            table.next_id += 1;
            table
                .handlers
                .insert(id, (class, Rc::new(RefCell::new(handler))));
            id
        };
        let weak: Weak<RefCell<Table>> = Rc::downgrade(&self.table);
        Subscription::new(move || {
            if let Some(table) = weak.upgrade() {
                table.borrow_mut().handlers.remove(&id);
            }
        })
    }

    /// Deliver an event to every handler of its class, in registration order.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, event: &MapEvent) -> usize {
        let class = event.class();
        let targets: Vec<(u64, SharedHandler)> = self
            .table
            .borrow()
            .handlers
            .iter()
            .filter(|(_, (c, _))| *c == class)
            .map(|(id, (_, h))| (*id, Rc::clone(h)))
            .collect();

        let mut invoked = 0;
        for (id, handler) in targets {
            // Skip handlers detached by an earlier handler in this dispatch.
            if !self.table.borrow().handlers.contains_key(&id) {
                continue;
            }
            // A handler re-entered through its own dispatch is skipped.
            if let Ok(mut handler) = handler.try_borrow_mut() {
                handler(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Number of attached handlers for a class.
    #[must_use]
    pub fn count(&self, class: EventClass) -> usize {
        self.table
            .borrow()
            .handlers
            .values()
            .filter(|(c, _)| *c == class)
            .count()
    }

    /// Number of attached handlers overall.
    #[must_use]
    pub fn total(&self) -> usize {
        self.table.borrow().handlers.len()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("handlers", &self.total())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, Handler) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        (hits, Box::new(move |_| h.set(h.get() + 1)))
    }

    #[test]
    fn test_event_class() {
        assert_eq!(MapEvent::FeatureLeave.class(), EventClass::FeatureLeave);
        assert_eq!(
            MapEvent::MarkerClick {
                marker: MarkerHandle(3)
            }
            .class(),
            EventClass::MarkerClick
        );
    }

    #[test]
    fn test_dispatch_by_class() {
        let registry = ListenerRegistry::new();
        let (clicks, on_click) = counter();
        let (leaves, on_leave) = counter();
        let _a = registry.subscribe(EventClass::FeatureClick, on_click);
        let _b = registry.subscribe(EventClass::FeatureLeave, on_leave);

        let invoked = registry.dispatch(&MapEvent::FeatureClick {
            name: "Oakridge".into(),
        });
        assert_eq!(invoked, 1);
        assert_eq!(clicks.get(), 1);
        assert_eq!(leaves.get(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let registry = ListenerRegistry::new();
        let (hits, handler) = counter();
        let sub = registry.subscribe(EventClass::FeatureLeave, handler);
        assert_eq!(registry.count(EventClass::FeatureLeave), 1);
        drop(sub);
        assert_eq!(registry.total(), 0);
        registry.dispatch(&MapEvent::FeatureLeave);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_unsubscribe_explicit() {
        let registry = ListenerRegistry::new();
        let (_, handler) = counter();
        registry.subscribe(EventClass::PopoverClose, handler).unsubscribe();
        assert_eq!(registry.count(EventClass::PopoverClose), 0);
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let registry = ListenerRegistry::new();
        let (_, handler) = counter();
        let sub = registry.subscribe(EventClass::FeatureLeave, handler);
        drop(registry);
        drop(sub);
    }

    #[test]
    fn test_handler_may_subscribe_during_dispatch() {
        let registry = ListenerRegistry::new();
        let inner = registry.clone();
        let held = Rc::new(RefCell::new(Vec::new()));
        let held_in = Rc::clone(&held);
        let _sub = registry.subscribe(
            EventClass::FeatureLeave,
            Box::new(move |_| {
                let sub = inner.subscribe(EventClass::FeatureClick, Box::new(|_| {}));
                held_in.borrow_mut().push(sub);
            }),
        );
        registry.dispatch(&MapEvent::FeatureLeave);
        assert_eq!(registry.count(EventClass::FeatureClick), 1);
    }

    #[test]
    fn test_handler_detached_mid_dispatch_is_skipped() {
        let registry = ListenerRegistry::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let victim_in = Rc::clone(&victim);
        let _first = registry.subscribe(
            EventClass::FeatureLeave,
            Box::new(move |_| {
                victim_in.borrow_mut().take();
            }),
        );
        let (hits, handler) = counter();
        *victim.borrow_mut() = Some(registry.subscribe(EventClass::FeatureLeave, handler));

        assert_eq!(registry.dispatch(&MapEvent::FeatureLeave), 1);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"type":"feature_enter","name":"Oakridge","position":{"x":10.0,"y":4.5}}"#;
        let event: MapEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            MapEvent::FeatureEnter {
                name: "Oakridge".into(),
                position: Point::new(10.0, 4.5)
            }
        );
        let click: MapEvent =
            serde_json::from_str(r#"{"type":"marker_click","marker":2}"#).unwrap();
        assert_eq!(
            click,
            MapEvent::MarkerClick {
                marker: MarkerHandle(2)
            }
        );
        let action: MapEvent =
            serde_json::from_str(r#"{"type":"popover_action","action":"request_report"}"#).unwrap();
        assert_eq!(
            action,
            MapEvent::PopoverAction {
                action: PopoverAction::RequestReport
            }
        );
    }
}
