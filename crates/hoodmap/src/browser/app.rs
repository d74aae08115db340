//! WASM entry point.

use super::bridge::{BridgeSurface, CommandSink, SurfaceCommand};
use super::fetch::fetch_geometry;
use super::router::BrowserRouter;
use super::spawner::WasmSpawner;
use futures::FutureExt;
use hoodmap_core::{GeometrySource, LeadCapture, MapSurface, Navigator};
use hoodmap_widgets::{MapContext, MapRender, MountedMap, NeighbourhoodMap};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Forwards surface commands to a JavaScript callback as JSON strings.
struct JsSink(js_sys::Function);

impl CommandSink for JsSink {
    fn send(&self, command: &SurfaceCommand) {
        match serde_json::to_string(command) {
            Ok(json) => {
                if let Err(e) = self.0.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    let message = JsValue::from_str("hoodmap: engine rejected command");
                    web_sys::console::error_2(&message, &e);
                }
            }
            Err(e) => log(&format!("hoodmap: cannot encode command: {e}")),
        }
    }
}

/// Host callback taking one string argument.
struct JsCallback(js_sys::Function);

impl JsCallback {
    fn call(&self, what: &str, arg: &str) {
        if let Err(e) = self.0.call1(&JsValue::NULL, &JsValue::from_str(arg)) {
            let message = JsValue::from_str(&format!("hoodmap: {what} callback threw"));
            web_sys::console::error_2(&message, &e);
        }
    }
}

impl Navigator for JsCallback {
    fn navigate(&self, path: &str) {
        self.call("navigate", path);
    }
}

impl LeadCapture for JsCallback {
    fn request_report(&self, slug: &str) {
        self.call("request_report", slug);
    }
}

/// Neighbourhood map controlled from JavaScript.
///
/// The engine receives commands through the `sink` passed to
/// [`MapApp::mount`] and reports pointer and popover events back through
/// [`MapApp::dispatch`]. Do not call `dispatch` from inside `sink`.
#[wasm_bindgen]
pub struct MapApp {
    map: NeighbourhoodMap,
    surface: Option<Rc<BridgeSurface>>,
    mounted: Option<MountedMap>,
}

#[wasm_bindgen]
impl MapApp {
    /// Create a map from a YAML manifest.
    #[wasm_bindgen(constructor)]
    pub fn new(manifest_yaml: &str) -> Result<MapApp, JsValue> {
        console_error_panic_hook::set_once();
        let map = NeighbourhoodMap::from_yaml(manifest_yaml)
            .map_err(|e| JsValue::from_str(&format!("Manifest error: {}", e)))?;
        Ok(Self {
            map,
            surface: None,
            mounted: None,
        })
    }

    /// Mount the layers. Returns false when the placeholder should be shown.
    ///
    /// `navigate` defaults to `history.pushState`. The report action is only
    /// offered when `request_report` is given.
    pub fn mount(
        &mut self,
        credential: Option<String>,
        sink: js_sys::Function,
        navigate: Option<js_sys::Function>,
        request_report: Option<js_sys::Function>,
    ) -> bool {
        self.unmount();

        let surface = Rc::new(BridgeSurface::new(
            Rc::new(JsSink(sink)),
            Box::new(|source: &GeometrySource| fetch_geometry(source.clone()).boxed_local()),
        ));
        let navigator: Rc<dyn Navigator> = match navigate {
            Some(callback) => Rc::new(JsCallback(callback)),
            None => Rc::new(BrowserRouter::new()),
        };

        let render = self.map.render(credential.as_deref(), |_| {
            let context = MapContext::new(
                Rc::clone(&surface) as Rc<dyn MapSurface>,
                Rc::new(WasmSpawner),
                navigator,
            );
            match request_report {
                Some(callback) => context.with_leads(Rc::new(JsCallback(callback))),
                None => context,
            }
        });
        match render {
            MapRender::Interactive(mounted) => {
                self.surface = Some(surface);
                self.mounted = Some(mounted);
                true
            }
            MapRender::Placeholder(_) => false,
        }
    }

    /// Deliver an engine event (JSON). Returns the number of handlers run.
    pub fn dispatch(&self, event_json: &str) -> Result<usize, JsValue> {
        let Some(surface) = &self.surface else {
            return Ok(0);
        };
        surface
            .dispatch_json(event_json)
            .map_err(|e| JsValue::from_str(&format!("Event parse error: {}", e)))
    }

    /// Tear down both layers. Safe to repeat.
    pub fn unmount(&mut self) {
        if let Some(mut mounted) = self.mounted.take() {
            mounted.unmount();
        }
        self.surface = None;
    }

    /// Whether the layers are mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Placeholder markup for degraded mode.
    pub fn placeholder_html(&self) -> String {
        self.map.placeholder().to_html()
    }

    /// Initial viewport as JSON (`null` when the directory is empty).
    pub fn viewport_json(&self) -> String {
        serde_json::to_string(&self.map.viewport()).unwrap_or_else(|_| "null".to_string())
    }
}

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console.
#[wasm_bindgen]
pub fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}
