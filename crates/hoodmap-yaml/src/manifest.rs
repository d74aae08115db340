//! Map manifest loaded from map.yaml.

use crate::error::ManifestError;
use hoodmap_core::{
    DetailRoutes, Directory, FocusSet, GeometrySource, LatLng, NameIndex, NeighbourhoodRecord,
    Palette, RenderMode, DEFAULT_ROUTE_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Manifest format version this crate reads.
pub const MANIFEST_VERSION: &str = "0.1";

/// Message shown when the map cannot be created.
pub const DEFAULT_PLACEHOLDER: &str =
    "The interactive map is unavailable right now. Browse the neighbourhood list below.";

/// Map configuration loaded from map.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapManifest {
    /// Manifest format version
    pub hoodmap: String,
    /// Map title (accessible label of the map region)
    #[serde(default)]
    pub title: String,
    /// Prefix of neighbourhood detail routes
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
    /// Placeholder text for degraded mode
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Initial viewport; defaults to the directory bounds
    #[serde(default)]
    pub viewport: Option<Viewport>,
    /// Marker layer options
    #[serde(default)]
    pub markers: MarkerConfig,
    /// Boundary layer; absent means markers only
    #[serde(default)]
    pub boundaries: Option<BoundaryConfig>,
    /// Neighbourhood table; absent means the built-in service area
    #[serde(default)]
    pub neighbourhoods: Option<Vec<NeighbourhoodRecord>>,
}

fn default_route_prefix() -> String {
    DEFAULT_ROUTE_PREFIX.to_string()
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

/// Initial camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Map center
    pub center: LatLng,
    /// Zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

fn default_zoom() -> u8 {
    12
}

/// Marker layer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Let the engine cluster nearby markers
    #[serde(default = "default_true")]
    pub clustered: bool,
    /// Offer "Get a market report" in popovers
    #[serde(default)]
    pub report_action: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            clustered: true,
            report_action: false,
        }
    }
}

/// Render mode name as written in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// All boundaries, hover and click enabled
    #[default]
    Overview,
    /// One decorative boundary
    Focused,
}

/// Boundary layer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// GeoJSON FeatureCollection location
    pub source: GeometrySource,
    /// Overview or focused
    #[serde(default)]
    pub mode: ModeKind,
    /// Boundary shown in focused mode
    #[serde(default)]
    pub target: Option<String>,
    /// Names emphasized in overview mode; absent means every directory name
    #[serde(default)]
    pub focus: Option<Vec<String>>,
    /// Geometry name → slug for names that differ from display names
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Colours
    #[serde(default)]
    pub palette: Palette,
}

impl BoundaryConfig {
    /// Boundary options for an overview layer.
    #[must_use]
    pub fn overview(source: impl Into<String>) -> Self {
        Self {
            source: GeometrySource::new(source),
            mode: ModeKind::Overview,
            target: None,
            focus: None,
            aliases: BTreeMap::new(),
            palette: Palette::DEFAULT,
        }
    }

    /// Boundary options for a focused layer.
    #[must_use]
    pub fn focused(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            mode: ModeKind::Focused,
            target: Some(target.into()),
            ..Self::overview(source)
        }
    }

    /// Resolve the render mode.
    ///
    /// # Errors
    ///
    /// Returns an error if focused mode has no target.
    pub fn render_mode(&self) -> Result<RenderMode, ManifestError> {
        match (self.mode, &self.target) {
            (ModeKind::Overview, _) => Ok(RenderMode::Overview),
            (ModeKind::Focused, Some(target)) if !target.trim().is_empty() => {
                Ok(RenderMode::focused(target.clone()))
            }
            (ModeKind::Focused, _) => Err(ManifestError::invalid(
                "boundaries.target",
                "required in focused mode",
            )),
        }
    }
}

impl Default for MapManifest {
    fn default() -> Self {
        Self {
            hoodmap: MANIFEST_VERSION.to_string(),
            title: String::new(),
            route_prefix: default_route_prefix(),
            placeholder: default_placeholder(),
            viewport: None,
            markers: MarkerConfig::default(),
            boundaries: None,
            neighbourhoods: None,
        }
    }
}

impl MapManifest {
    /// Parse a manifest from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or misses required fields.
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Parse and validate in one step.
    ///
    /// # Errors
    ///
    /// Returns the first parse or validation error.
    pub fn load(yaml: &str) -> Result<Self, ManifestError> {
        let manifest = Self::from_yaml(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.hoodmap.trim().is_empty() {
            return Err(ManifestError::MissingField("hoodmap".to_string()));
        }
        if self.hoodmap != MANIFEST_VERSION {
            warn!(version = %self.hoodmap, "manifest version differs from {MANIFEST_VERSION}");
        }
        if !self.route_prefix.starts_with('/') {
            return Err(ManifestError::invalid("route_prefix", "must start with '/'"));
        }
        if let Some(viewport) = &self.viewport {
            if !viewport.center.is_valid() {
                return Err(ManifestError::invalid("viewport.center", "out of range"));
            }
        }

        let directory = self.directory()?;
        if let Some(boundaries) = &self.boundaries {
            if boundaries.source.location().trim().is_empty() {
                return Err(ManifestError::MissingField("boundaries.source".to_string()));
            }
            boundaries.render_mode()?;
            let index = self.name_index(&directory)?;
            if let Some(focus) = &boundaries.focus {
                for name in focus.iter().filter(|n| !index.correlates(n)) {
                    debug!(%name, "focus name has no directory entry");
                }
            }
        }
        Ok(())
    }

    /// The neighbourhood directory: the manifest table or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest table breaks a directory invariant.
    pub fn directory(&self) -> Result<Directory, ManifestError> {
        match &self.neighbourhoods {
            Some(records) => Ok(Directory::new(records.clone())?),
            None => Ok(Directory::builtin()),
        }
    }

    /// Name index for `directory`, extended with the configured aliases.
    ///
    /// # Errors
    ///
    /// Returns an error if an alias names an unknown slug or would re-point
    /// a directory display name.
    pub fn name_index(&self, directory: &Directory) -> Result<NameIndex, ManifestError> {
        let mut index = NameIndex::from_directory(directory);
        if let Some(boundaries) = &self.boundaries {
            for (alias, slug) in &boundaries.aliases {
                index = index.with_alias(directory, alias.clone(), slug.clone())?;
            }
        }
        Ok(index)
    }

    /// Overview focus set: the configured names, or every directory name.
    #[must_use]
    pub fn focus_set(&self, directory: &Directory) -> FocusSet {
        match self.boundaries.as_ref().and_then(|b| b.focus.as_ref()) {
            Some(names) => names.iter().cloned().collect(),
            None => directory.names().collect(),
        }
    }

    /// Boundary palette.
    #[must_use]
    pub fn palette(&self) -> Palette {
        self.boundaries
            .as_ref()
            .map_or(Palette::DEFAULT, |b| b.palette)
    }

    /// Detail route builder.
    #[must_use]
    pub fn routes(&self) -> DetailRoutes {
        DetailRoutes::new(self.route_prefix.clone())
    }

    /// Boundary render mode, if a boundary layer is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if focused mode has no target.
    pub fn mode(&self) -> Result<Option<RenderMode>, ManifestError> {
        self.boundaries
            .as_ref()
            .map(BoundaryConfig::render_mode)
            .transpose()
    }

    /// Initial viewport: configured, else centered on the directory.
    #[must_use]
    pub fn initial_viewport(&self, directory: &Directory) -> Option<Viewport> {
        self.viewport.or_else(|| {
            directory.bounds().map(|b| Viewport {
                center: b.center(),
                zoom: default_zoom(),
            })
        })
    }
}
