//! Test harness wiring a fake surface, recorders and a local executor.

use crate::recorders::{RecordingLeads, RecordingNavigator};
use crate::surface::FakeSurface;
use futures::executor::LocalPool;
use futures::task::LocalSpawn;
use hoodmap_core::{
    BoundaryFeature, GeometryError, LeadCapture, MapEvent, MapSurface, Navigator, Point,
    PopoverAction,
};
use std::rc::Rc;

/// Test harness for driving map layers.
///
/// Event methods deliver the event, then run the executor until it stalls,
/// so every effect of an interaction is visible when the call returns.
pub struct Harness {
    pool: LocalPool,
    surface: Rc<FakeSurface>,
    navigator: Rc<RecordingNavigator>,
    leads: Rc<RecordingLeads>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Create a harness with a fresh surface.
    pub fn new() -> Self {
        Self {
            pool: LocalPool::new(),
            surface: Rc::new(FakeSurface::new()),
            navigator: Rc::new(RecordingNavigator::new()),
            leads: Rc::new(RecordingLeads::new()),
        }
    }

    // === Collaborators ===

    /// Surface handle for layers.
    pub fn surface(&self) -> Rc<dyn MapSurface> {
        Rc::clone(&self.surface) as Rc<dyn MapSurface>
    }

    /// The fake behind [`Harness::surface`].
    pub fn fake(&self) -> &FakeSurface {
        &self.surface
    }

    /// Spawner bound to the harness executor.
    pub fn spawner(&self) -> Rc<dyn LocalSpawn> {
        Rc::new(self.pool.spawner())
    }

    /// Navigator handle for layers.
    pub fn navigator(&self) -> Rc<dyn Navigator> {
        Rc::clone(&self.navigator) as Rc<dyn Navigator>
    }

    /// Lead-capture handle for layers.
    pub fn leads(&self) -> Rc<dyn LeadCapture> {
        Rc::clone(&self.leads) as Rc<dyn LeadCapture>
    }

    // === Executor ===

    /// Run spawned work until nothing can make progress.
    pub fn run(&mut self) -> &mut Self {
        self.pool.run_until_stalled();
        self
    }

    /// Complete the oldest geometry load with features and run.
    pub fn resolve(&mut self, features: Vec<BoundaryFeature>) -> &mut Self {
        self.surface.resolve_geometry(Ok(features));
        self.run()
    }

    /// Complete the oldest geometry load with GeoJSON text and run.
    pub fn resolve_geojson(&mut self, text: &str) -> &mut Self {
        self.surface.resolve_geojson(text);
        self.run()
    }

    /// Fail the oldest geometry load and run.
    pub fn fail(&mut self, error: GeometryError) -> &mut Self {
        self.surface.resolve_geometry(Err(error));
        self.run()
    }

    // === Event Simulation ===

    /// Deliver an event and run.
    pub fn emit(&mut self, event: MapEvent) -> &mut Self {
        self.surface.emit(&event);
        self.run()
    }

    /// Pointer enters a feature.
    pub fn hover(&mut self, name: &str) -> &mut Self {
        self.hover_at(name, Point::new(240.0, 160.0))
    }

    /// Pointer enters a feature at a position.
    pub fn hover_at(&mut self, name: &str, position: Point) -> &mut Self {
        self.emit(MapEvent::FeatureEnter {
            name: name.to_string(),
            position,
        })
    }

    /// Pointer leaves the boundary layer.
    pub fn leave(&mut self) -> &mut Self {
        self.emit(MapEvent::FeatureLeave)
    }

    /// Click a feature.
    pub fn click_feature(&mut self, name: &str) -> &mut Self {
        self.emit(MapEvent::FeatureClick {
            name: name.to_string(),
        })
    }

    /// Click the marker placed for a slug. No-op if there is none.
    pub fn click_marker(&mut self, slug: &str) -> &mut Self {
        match self.surface.marker_for(slug) {
            Some(marker) => self.emit(MapEvent::MarkerClick { marker }),
            None => self,
        }
    }

    /// Close the popover.
    pub fn close_popover(&mut self) -> &mut Self {
        self.emit(MapEvent::PopoverClose)
    }

    /// Press a popover button.
    pub fn press(&mut self, action: PopoverAction) -> &mut Self {
        self.emit(MapEvent::PopoverAction { action })
    }

    // === Assertions ===

    /// Paths navigated to so far.
    pub fn navigations(&self) -> Vec<String> {
        self.navigator.paths()
    }

    /// Slugs handed to lead capture so far.
    pub fn reports(&self) -> Vec<String> {
        self.leads.slugs()
    }

    /// Assert the last navigation went to `path`.
    ///
    /// # Panics
    ///
    /// Panics if it did not.
    pub fn assert_navigated(&self, path: &str) -> &Self {
        assert_eq!(self.navigator.last().as_deref(), Some(path));
        self
    }

    /// Assert nothing navigated.
    ///
    /// # Panics
    ///
    /// Panics if a navigation happened.
    pub fn assert_no_navigation(&self) -> &Self {
        assert!(
            self.navigator.paths().is_empty(),
            "unexpected navigation: {:?}",
            self.navigator.paths()
        );
        self
    }

    /// Assert the surface is back to empty.
    ///
    /// # Panics
    ///
    /// Panics if anything is still installed, shown or attached.
    pub fn assert_clean(&self) -> &Self {
        assert!(
            self.surface.is_clean(),
            "surface not clean: features={:?} markers={} listeners={}",
            self.surface.feature_names(),
            self.surface.markers().len(),
            self.surface.listener_count()
        );
        self
    }
}
