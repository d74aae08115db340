//! The full map driven through the JSON bridge, as a browser host would.

#![cfg(not(target_arch = "wasm32"))]

use futures::executor::LocalPool;
use hoodmap::browser::{BridgeSurface, BrowserRouter, SurfaceCommand};
use hoodmap::widgets::{MapContext, NeighbourhoodMap};
use hoodmap::{
    DetailRoutes, GeometryError, LayerPhase, MapSurface, Navigator, PaintStyle,
    BACKGROUND_FILL_OPACITY, HOVER_FILL_OPACITY,
};
use hoodmap_test::fixtures;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<SurfaceCommand>>>;

struct Host {
    pool: LocalPool,
    surface: Rc<BridgeSurface>,
    router: Rc<BrowserRouter>,
    log: Log,
}

impl Host {
    fn new(geometry: Result<Vec<hoodmap::BoundaryFeature>, GeometryError>) -> Self {
        let log: Log = Rc::default();
        let sink_log = Rc::clone(&log);
        let sink = move |c: &SurfaceCommand| sink_log.borrow_mut().push(c.clone());
        Self {
            pool: LocalPool::new(),
            surface: Rc::new(BridgeSurface::with_static_geometry(Rc::new(sink), geometry)),
            router: Rc::new(BrowserRouter::starting_at("/map")),
            log,
        }
    }

    fn context(&self) -> MapContext {
        MapContext::new(
            Rc::clone(&self.surface) as Rc<dyn MapSurface>,
            Rc::new(self.pool.spawner()),
            Rc::clone(&self.router) as Rc<dyn Navigator>,
        )
    }

    fn send(&mut self, json: &str) -> usize {
        let ran = self.surface.dispatch_json(json).expect("valid event");
        self.pool.run_until_stalled();
        ran
    }

    fn ops(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .map(|c| {
                let value = serde_json::to_value(c).expect("json");
                value["op"].as_str().unwrap_or_default().to_string()
            })
            .collect()
    }

    fn last_styles(&self) -> BTreeMap<String, PaintStyle> {
        self.log
            .borrow()
            .iter()
            .rev()
            .find_map(|c| match c {
                SurfaceCommand::SetFeatureStyle { styles } => Some(styles.clone()),
                _ => None,
            })
            .expect("a style command")
    }
}

#[test]
fn test_overview_hover_and_click_through_json() {
    let mut host = Host::new(Ok(fixtures::boundary_features()));
    let map = NeighbourhoodMap::from_yaml(fixtures::MANIFEST_YAML).expect("manifest");
    let mut mounted = map.mount(&host.context());
    host.pool.run_until_stalled();
    assert_eq!(mounted.boundary().expect("boundary").phase(), LayerPhase::Ready);
    assert_eq!(host.surface.feature_names().len(), 3);

    host.send(r#"{"type":"feature_enter","name":"Oakridge","position":{"x":10.0,"y":20.0}}"#);
    let styles = host.last_styles();
    assert_eq!(styles["Oakridge"].fill_opacity, HOVER_FILL_OPACITY);
    assert_eq!(styles["Marpole"].fill_opacity, BACKGROUND_FILL_OPACITY);

    let tooltip_html = host.log.borrow().iter().rev().find_map(|c| match c {
        SurfaceCommand::ShowTooltip { html, .. } => Some(html.clone()),
        _ => None,
    });
    assert!(tooltip_html.expect("tooltip").contains("Click to explore"));

    host.send(r#"{"type":"feature_click","name":"Oakridge"}"#);
    assert_eq!(
        host.router.current_slug(&DetailRoutes::default()).as_deref(),
        Some("oakridge")
    );

    mounted.unmount();
    assert_eq!(host.surface.listener_count(), 0);
    assert_eq!(host.surface.marker_count(), 0);
    assert!(host.surface.feature_names().is_empty());
    assert_eq!(host.ops().last().map(String::as_str), Some("close_popover"));
    assert!(host.ops().iter().any(|op| op == "remove_all_features"));
}

#[test]
fn test_marker_popover_through_json() {
    let mut host = Host::new(Err(GeometryError::Status(404)));
    let map = NeighbourhoodMap::from_yaml(fixtures::MANIFEST_YAML).expect("manifest");
    let mounted = map.mount(&host.context());
    host.pool.run_until_stalled();
    assert_eq!(mounted.boundary().expect("boundary").phase(), LayerPhase::Failed);

    let oakridge = host.log.borrow().iter().find_map(|c| match c {
        SurfaceCommand::PlaceMarker { marker, spec } if spec.slug == "oakridge" => Some(*marker),
        _ => None,
    });
    let marker = oakridge.expect("oakridge marker");

    host.send(&format!(r#"{{"type":"marker_click","marker":{}}}"#, marker.0));
    let html = host.log.borrow().iter().rev().find_map(|c| match c {
        SurfaceCommand::OpenPopover { html, card, .. } => {
            assert_eq!(card.avg_price, "$1.2M");
            Some(html.clone())
        }
        _ => None,
    });
    assert!(html.expect("popover").contains("Oakridge"));

    host.send(r#"{"type":"popover_action","action":"view_details"}"#);
    assert_eq!(host.router.pathname(), "/neighbourhoods/oakridge");
}

#[test]
fn test_events_after_unmount_reach_nobody() {
    let mut host = Host::new(Ok(fixtures::boundary_features()));
    let map = NeighbourhoodMap::from_yaml(fixtures::MANIFEST_YAML).expect("manifest");
    drop(map.mount(&host.context()));
    host.pool.run_until_stalled();

    let before = host.log.borrow().len();
    assert_eq!(host.send(r#"{"type":"feature_click","name":"Oakridge"}"#), 0);
    assert_eq!(host.send(r#"{"type":"popover_close"}"#), 0);
    assert_eq!(host.log.borrow().len(), before);
    assert_eq!(host.router.pathname(), "/map");
}

fn popover_opened_while_open(log: &[SurfaceCommand]) -> bool {
    let mut open = false;
    for command in log {
        match command {
            SurfaceCommand::OpenPopover { .. } if open => return true,
            SurfaceCommand::OpenPopover { .. } => open = true,
            SurfaceCommand::ClosePopover => open = false,
            _ => {}
        }
    }
    false
}

proptest! {
    #[test]
    fn prop_engine_never_sees_two_popovers(clicks in prop::collection::vec(0u8..12, 1..20)) {
        let mut host = Host::new(Err(GeometryError::Status(404)));
        let map = NeighbourhoodMap::from_yaml("hoodmap: '0.1'\n").expect("manifest");
        let mut mounted = map.mount(&host.context());
        let handles: Vec<u64> = host
            .log
            .borrow()
            .iter()
            .filter_map(|c| match c {
                SurfaceCommand::PlaceMarker { marker, .. } => Some(marker.0),
                _ => None,
            })
            .collect();

        for click in clicks {
            let event = match handles.get(usize::from(click)) {
                Some(marker) => format!(r#"{{"type":"marker_click","marker":{}}}"#, marker),
                None => r#"{"type":"popover_close"}"#.to_string(),
            };
            host.send(&event);
            prop_assert!(!popover_opened_while_open(&host.log.borrow()));
        }

        mounted.unmount();
        let ops = host.ops();
        prop_assert_eq!(ops.last().map(String::as_str), Some("close_popover"));
    }
}
