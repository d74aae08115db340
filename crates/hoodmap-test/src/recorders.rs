//! Collaborators that remember what they were asked to do.

use hoodmap_core::{LeadCapture, Navigator};
use std::cell::RefCell;

/// [`Navigator`] that records paths instead of navigating.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    paths: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path navigated to, oldest first.
    pub fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }

    /// Most recent path.
    pub fn last(&self) -> Option<String> {
        self.paths.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.borrow_mut().push(path.to_string());
    }
}

/// [`LeadCapture`] that records requested slugs.
#[derive(Debug, Default)]
pub struct RecordingLeads {
    slugs: RefCell<Vec<String>>,
}

impl RecordingLeads {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every slug a report was requested for.
    pub fn slugs(&self) -> Vec<String> {
        self.slugs.borrow().clone()
    }
}

impl LeadCapture for RecordingLeads {
    fn request_report(&self, slug: &str) {
        self.slugs.borrow_mut().push(slug.to_string());
    }
}
