//! Collaborators shared by the map layers.

use futures::task::LocalSpawn;
use hoodmap_core::{LeadCapture, MapSurface, Navigator};
use std::fmt;
use std::rc::Rc;

/// Host-provided capabilities a mounted map runs against.
#[derive(Clone)]
pub struct MapContext {
    /// Rendering engine
    pub surface: Rc<dyn MapSurface>,
    /// Executor for the geometry load
    pub spawner: Rc<dyn LocalSpawn>,
    /// Client-side router
    pub navigator: Rc<dyn Navigator>,
    /// Lead-capture pipeline, if the page has one
    pub leads: Option<Rc<dyn LeadCapture>>,
}

impl MapContext {
    /// Context without lead capture.
    pub fn new(
        surface: Rc<dyn MapSurface>,
        spawner: Rc<dyn LocalSpawn>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            surface,
            spawner,
            navigator,
            leads: None,
        }
    }

    /// Attach a lead-capture pipeline.
    #[must_use]
    pub fn with_leads(mut self, leads: Rc<dyn LeadCapture>) -> Self {
        self.leads = Some(leads);
        self
    }
}

impl fmt::Debug for MapContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapContext")
            .field("leads", &self.leads.is_some())
            .finish_non_exhaustive()
    }
}
