//! Hover tooltip content for boundary features.

use crate::geometry::Point;
use crate::markup::escape_html;
use serde::{Deserialize, Serialize};

/// Hint shown under the name of a navigable boundary.
pub const EXPLORE_HINT: &str = "Click to explore";

/// Tooltip placement relative to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipPlacement {
    /// Above the pointer
    #[default]
    Top,
    /// Below the pointer
    Bottom,
    /// Left of the pointer
    Left,
    /// Right of the pointer
    Right,
}

/// Sticky tooltip following the pointer over a boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTooltip {
    name: String,
    hint: Option<String>,
    anchor: Point,
    placement: TooltipPlacement,
}

impl FeatureTooltip {
    /// Tooltip showing only the feature name.
    #[must_use]
    pub fn new(name: impl Into<String>, anchor: Point) -> Self {
        Self {
            name: name.into(),
            hint: None,
            anchor,
            placement: TooltipPlacement::Top,
        }
    }

    /// Add a secondary line.
    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set placement.
    #[must_use]
    pub const fn placement(mut self, placement: TooltipPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Feature name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Secondary line, present only for navigable features.
    #[must_use]
    pub fn get_hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Pointer position the tooltip is anchored to.
    #[must_use]
    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    /// Current placement.
    #[must_use]
    pub const fn get_placement(&self) -> TooltipPlacement {
        self.placement
    }

    /// Render as an HTML fragment. Text is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<div class="hoodmap-tooltip"><strong>{}</strong>"#,
            escape_html(&self.name)
        );
        if let Some(hint) = &self.hint {
            html.push_str(&format!(
                r#"<span class="hoodmap-tooltip-hint">{}</span>"#,
                escape_html(hint)
            ));
        }
        html.push_str("</div>");
        html
    }
}
