//! Map view: access gate plus marker and boundary layers on one surface.

use crate::boundary_layer::{BoundaryLayer, BoundaryOptions};
use crate::context::MapContext;
use crate::markers::MarkerLayer;
use hoodmap_core::{escape_html, DetailRoutes, Directory, GeometrySource, NameIndex};
use hoodmap_yaml::{ManifestError, MapManifest, MarkerConfig, Viewport};
use std::rc::Rc;
use tracing::{debug, debug_span};

/// Usable access credential, if any: present and not blank.
pub fn usable_credential(credential: Option<&str>) -> Option<&str> {
    credential.map(str::trim).filter(|c| !c.is_empty())
}

/// Static stand-in shown when the map engine cannot be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    title: String,
    message: String,
}

impl Placeholder {
    /// Create a placeholder.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Heading text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Explanation text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div class="hoodmap-placeholder" role="note">"#);
        if !self.title.is_empty() {
            html.push_str(&format!("<h2>{}</h2>", escape_html(&self.title)));
        }
        html.push_str(&format!("<p>{}</p></div>", escape_html(&self.message)));
        html
    }
}

/// Both layers mounted on one surface.
#[derive(Debug)]
pub struct MountedMap {
    markers: MarkerLayer,
    boundary: Option<BoundaryLayer>,
    active: bool,
}

impl MountedMap {
    /// Marker layer.
    pub const fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    /// Boundary layer, when configured.
    pub const fn boundary(&self) -> Option<&BoundaryLayer> {
        self.boundary.as_ref()
    }

    /// Whether the layers are still mounted.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Tear down the boundary layer, then the markers. Safe to repeat.
    pub fn unmount(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(boundary) = &self.boundary {
            boundary.unmount();
        }
        self.markers.unmount();
        debug!("map unmounted");
    }
}

impl Drop for MountedMap {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Result of rendering a map.
#[derive(Debug)]
pub enum MapRender {
    /// No usable credential: static message, nothing mounted
    Placeholder(Placeholder),
    /// Layers mounted on a surface
    Interactive(MountedMap),
}

impl MapRender {
    /// Whether the map is interactive.
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }

    /// The mounted map, if interactive.
    pub fn into_mounted(self) -> Option<MountedMap> {
        match self {
            Self::Interactive(map) => Some(map),
            Self::Placeholder(_) => None,
        }
    }

    /// The placeholder, if degraded.
    pub const fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            Self::Placeholder(p) => Some(p),
            Self::Interactive(_) => None,
        }
    }
}

/// Interactive neighbourhood map built from a manifest.
#[derive(Debug, Clone)]
pub struct NeighbourhoodMap {
    title: String,
    directory: Rc<Directory>,
    index: Rc<NameIndex>,
    routes: DetailRoutes,
    markers: MarkerConfig,
    boundary: Option<(GeometrySource, BoundaryOptions)>,
    placeholder: String,
    viewport: Option<Viewport>,
}

impl NeighbourhoodMap {
    /// Resolve a manifest into a map.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest fails validation.
    pub fn from_manifest(manifest: &MapManifest) -> Result<Self, ManifestError> {
        manifest.validate()?;
        let directory = manifest.directory()?;
        let index = manifest.name_index(&directory)?;
        let routes = manifest.routes();
        let boundary = match (&manifest.boundaries, manifest.mode()?) {
            (Some(config), Some(mode)) => Some((
                config.source.clone(),
                BoundaryOptions::new()
                    .mode(mode)
                    .focus(manifest.focus_set(&directory))
                    .palette(manifest.palette())
                    .routes(routes.clone()),
            )),
            _ => None,
        };
        Ok(Self {
            title: manifest.title.clone(),
            viewport: manifest.initial_viewport(&directory),
            directory: Rc::new(directory),
            index: Rc::new(index),
            routes,
            markers: manifest.markers,
            boundary,
            placeholder: manifest.placeholder.clone(),
        })
    }

    /// Parse, validate and resolve YAML in one step.
    ///
    /// # Errors
    ///
    /// Returns the first parse or validation error.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        Self::from_manifest(&MapManifest::from_yaml(yaml)?)
    }

    /// Mount the map, or return the placeholder without a usable credential.
    ///
    /// `surface_factory` receives the credential and is only called when it
    /// is usable.
    pub fn render<F>(&self, credential: Option<&str>, surface_factory: F) -> MapRender
    where
        F: FnOnce(&str) -> MapContext,
    {
        let Some(credential) = usable_credential(credential) else {
            debug!("no map credential, rendering placeholder");
            return MapRender::Placeholder(self.placeholder());
        };
        MapRender::Interactive(self.mount(&surface_factory(credential)))
    }

    /// Mount both layers on an existing context.
    pub fn mount(&self, context: &MapContext) -> MountedMap {
        let span = debug_span!("map_mount", records = self.directory.len());
        let _enter = span.enter();

        let markers = MarkerLayer::new(context, Rc::clone(&self.directory), self.routes.clone())
            .clustered(self.markers.clustered)
            .report_action(self.markers.report_action && context.leads.is_some());
        markers.mount();

        let boundary = self.boundary.as_ref().map(|(source, options)| {
            let layer = BoundaryLayer::with_options(
                context,
                source.clone(),
                Rc::clone(&self.index),
                options.clone(),
            );
            layer.mount();
            layer
        });

        MountedMap {
            markers,
            boundary,
            active: true,
        }
    }

    /// Degraded-mode placeholder.
    pub fn placeholder(&self) -> Placeholder {
        Placeholder::new(self.title.clone(), self.placeholder.clone())
    }

    /// Neighbourhood directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Initial viewport hint for the engine.
    pub const fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Whether a boundary layer is configured.
    pub const fn has_boundaries(&self) -> bool {
        self.boundary.is_some()
    }
}
