//! History API navigation for detail pages.
//!
//! # Example
//!
//! ```ignore
//! use hoodmap::browser::BrowserRouter;
//! use hoodmap::{DetailRoutes, Navigator};
//!
//! let router = BrowserRouter::new();
//! router.navigate("/neighbourhoods/oakridge");
//! assert_eq!(router.current_slug(&DetailRoutes::default()).as_deref(), Some("oakridge"));
//! ```

use hoodmap_core::{DetailRoutes, Navigator};
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Mutex;
use tracing::debug;

/// Navigator backed by `history.pushState`.
///
/// Off the browser the history is kept in memory.
#[derive(Debug)]
pub struct BrowserRouter {
    #[cfg(not(target_arch = "wasm32"))]
    state: Mutex<History>,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
}

impl Default for BrowserRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserRouter {
    /// Router starting at `/`.
    #[must_use]
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self {}
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::starting_at("/")
        }
    }

    /// In-memory router starting at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn starting_at(path: &str) -> Self {
        Self {
            state: Mutex::new(History {
                entries: vec![path.to_string()],
                index: 0,
            }),
        }
    }

    /// Current path.
    #[must_use]
    pub fn pathname(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_string())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state
                .lock()
                .ok()
                .and_then(|s| s.entries.get(s.index).cloned())
                .unwrap_or_else(|| "/".to_string())
        }
    }

    /// Slug of the detail page currently shown, if any.
    #[must_use]
    pub fn current_slug(&self, routes: &DetailRoutes) -> Option<String> {
        let path = self.pathname();
        routes.slug_from_path(&path).map(str::to_string)
    }

    /// Push a new history entry.
    pub fn push(&self, path: &str) {
        debug!(path, "history push");
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path));
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Ok(mut state) = self.state.lock() {
                let keep = state.index + 1;
                state.entries.truncate(keep);
                state.entries.push(path.to_string());
                state.index = state.entries.len() - 1;
            }
        }
    }

    /// Replace the current entry.
    pub fn replace(&self, path: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                let _ =
                    history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path));
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Ok(mut state) = self.state.lock() {
                let index = state.index;
                if let Some(entry) = state.entries.get_mut(index) {
                    *entry = path.to_string();
                }
            }
        }
    }

    /// Go back one entry.
    pub fn back(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                let _ = history.back();
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Ok(mut state) = self.state.lock() {
                state.index = state.index.saturating_sub(1);
            }
        }
    }

    /// Number of history entries.
    #[must_use]
    pub fn history_len(&self) -> usize {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|w| w.history().ok())
                .and_then(|h| h.length().ok())
                .unwrap_or(0) as usize
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
        }
    }
}

impl Navigator for BrowserRouter {
    fn navigate(&self, path: &str) {
        self.push(path);
    }
}
