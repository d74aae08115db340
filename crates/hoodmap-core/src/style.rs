//! Boundary style engine.
//!
//! Maps a feature's identity, the layer's interaction state, the render mode
//! and the focus set to a paint style. The function is total and pure: the
//! same inputs always give the same [`PaintStyle`], and nothing here touches
//! a rendering surface.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fill opacity of the hovered polygon in overview mode.
pub const HOVER_FILL_OPACITY: f32 = 0.35;
/// Fill opacity of focus-set members in overview mode.
pub const MEMBER_FILL_OPACITY: f32 = 0.12;
/// Fill opacity of background polygons in overview mode.
pub const BACKGROUND_FILL_OPACITY: f32 = 0.04;

/// Stroke weight of the hovered polygon; the largest weight the engine emits.
pub const HOVER_STROKE_WEIGHT: f32 = 3.0;
/// Stroke weight of focus-set members.
pub const MEMBER_STROKE_WEIGHT: f32 = 2.0;
/// Stroke weight of background polygons.
pub const BACKGROUND_STROKE_WEIGHT: f32 = 1.0;

/// Stroke opacity of the hovered polygon.
pub const HOVER_STROKE_OPACITY: f32 = 1.0;
/// Stroke opacity of focus-set members.
pub const MEMBER_STROKE_OPACITY: f32 = 0.7;
/// Stroke opacity of background polygons.
pub const BACKGROUND_STROKE_OPACITY: f32 = 0.3;

/// Fill opacity of the single polygon shown in focused mode.
pub const TARGET_FILL_OPACITY: f32 = 0.3;
/// Stroke weight of the focused-mode polygon.
pub const TARGET_STROKE_WEIGHT: f32 = 2.0;
/// Stroke opacity of the focused-mode polygon.
pub const TARGET_STROKE_OPACITY: f32 = 1.0;

/// Paint applied to one boundary feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintStyle {
    /// Fill colour
    pub fill_color: Color,
    /// Fill opacity [0.0, 1.0]
    pub fill_opacity: f32,
    /// Outline colour
    pub stroke_color: Color,
    /// Outline width in pixels
    pub stroke_weight: f32,
    /// Outline opacity [0.0, 1.0]
    pub stroke_opacity: f32,
    /// Whether the engine should deliver pointer events for this feature
    pub interactive: bool,
    /// Whether the feature is drawn at all
    pub visible: bool,
}

impl PaintStyle {
    /// Fully transparent, non-interactive, invisible.
    #[must_use]
    pub const fn hidden(color: Color) -> Self {
        Self {
            fill_color: color,
            fill_opacity: 0.0,
            stroke_color: color,
            stroke_weight: 0.0,
            stroke_opacity: 0.0,
            interactive: false,
            visible: false,
        }
    }
}

/// How a boundary layer presents its features. Fixed for a layer's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "target")]
pub enum RenderMode {
    /// Every boundary shown, differentiated by focus-set membership
    #[default]
    Overview,
    /// Only the named boundary shown, as decorative context
    Focused(String),
}

impl RenderMode {
    /// Focused mode on one neighbourhood.
    #[must_use]
    pub fn focused(target: impl Into<String>) -> Self {
        Self::Focused(target.into())
    }

    /// Whether this is overview mode.
    #[must_use]
    pub const fn is_overview(&self) -> bool {
        matches!(self, Self::Overview)
    }
}

/// Transient pointer state of one boundary layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    /// Name of the feature under the pointer
    pub hovered: Option<String>,
}

impl InteractionState {
    /// State with a hovered feature.
    #[must_use]
    pub fn hovering(name: impl Into<String>) -> Self {
        Self {
            hovered: Some(name.into()),
        }
    }

    /// Whether `name` is the hovered feature.
    #[must_use]
    pub fn is_hovered(&self, name: &str) -> bool {
        self.hovered.as_deref() == Some(name)
    }
}

/// Names emphasized in overview mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusSet(BTreeSet<String>);

impl FocusSet {
    /// Empty focus set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is a member.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Add a member.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FocusSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The two colours the engine paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Focus-set members and the focused-mode target
    pub highlight: Color,
    /// Everything else
    pub neutral: Color,
}

impl Palette {
    /// Brand red on slate.
    pub const DEFAULT: Self = Self {
        highlight: Color::rgb(0xc8, 0x10, 0x2e),
        neutral: Color::rgb(0x64, 0x74, 0x8b),
    };

    /// Paint style for one feature.
    #[must_use]
    pub fn style_for(
        &self,
        feature_name: &str,
        interaction: &InteractionState,
        mode: &RenderMode,
        focus: &FocusSet,
    ) -> PaintStyle {
        if let RenderMode::Focused(target) = mode {
            return if feature_name == target {
                PaintStyle {
                    fill_color: self.highlight,
                    fill_opacity: TARGET_FILL_OPACITY,
                    stroke_color: self.highlight,
                    stroke_weight: TARGET_STROKE_WEIGHT,
                    stroke_opacity: TARGET_STROKE_OPACITY,
                    interactive: false,
                    visible: true,
                }
            } else {
                PaintStyle::hidden(self.neutral)
            };
        }

        let member = focus.contains(feature_name);
        let hovered = interaction.is_hovered(feature_name);
        let color = if member { self.highlight } else { self.neutral };

        let (fill_opacity, stroke_weight, stroke_opacity) = if hovered {
            (HOVER_FILL_OPACITY, HOVER_STROKE_WEIGHT, HOVER_STROKE_OPACITY)
        } else if member {
            (MEMBER_FILL_OPACITY, MEMBER_STROKE_WEIGHT, MEMBER_STROKE_OPACITY)
        } else {
            (
                BACKGROUND_FILL_OPACITY,
                BACKGROUND_STROKE_WEIGHT,
                BACKGROUND_STROKE_OPACITY,
            )
        };

        PaintStyle {
            fill_color: color,
            fill_opacity,
            stroke_color: color,
            stroke_weight,
            stroke_opacity,
            interactive: true,
            visible: true,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Paint style for one feature using the default palette.
#[must_use]
pub fn style_for(
    feature_name: &str,
    interaction: &InteractionState,
    mode: &RenderMode,
    focus: &FocusSet,
) -> PaintStyle {
    Palette::DEFAULT.style_for(feature_name, interaction, mode, focus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn oakridge_focus() -> FocusSet {
        ["Oakridge"].into_iter().collect()
    }

    #[test]
    fn test_overview_member_not_hovered() {
        let style = style_for(
            "Oakridge",
            &InteractionState::default(),
            &RenderMode::Overview,
            &oakridge_focus(),
        );
        assert_eq!(style.fill_opacity, 0.12);
        assert_eq!(style.stroke_weight, 2.0);
        assert_eq!(style.stroke_opacity, 0.7);
        assert_eq!(style.fill_color, Palette::DEFAULT.highlight);
        assert!(style.interactive);
        assert!(style.visible);
    }

    #[test]
    fn test_overview_member_hovered() {
        let style = style_for(
            "Oakridge",
            &InteractionState::hovering("Oakridge"),
            &RenderMode::Overview,
            &oakridge_focus(),
        );
        assert_eq!(style.fill_opacity, 0.35);
        assert_eq!(style.stroke_weight, 3.0);
        assert_eq!(style.stroke_opacity, 1.0);
        assert_eq!(style.stroke_color, Palette::DEFAULT.highlight);
    }

    #[test]
    fn test_overview_background() {
        let style = style_for(
            "Strathcona",
            &InteractionState::hovering("Oakridge"),
            &RenderMode::Overview,
            &oakridge_focus(),
        );
        assert_eq!(style.fill_opacity, 0.04);
        assert_eq!(style.stroke_weight, 1.0);
        assert_eq!(style.stroke_opacity, 0.3);
        assert_eq!(style.fill_color, Palette::DEFAULT.neutral);
        assert!(style.interactive);
    }

    #[test]
    fn test_overview_background_hovered_keeps_neutral_color() {
        let style = style_for(
            "Strathcona",
            &InteractionState::hovering("Strathcona"),
            &RenderMode::Overview,
            &oakridge_focus(),
        );
        assert_eq!(style.fill_opacity, 0.35);
        assert_eq!(style.stroke_weight, 3.0);
        assert_eq!(style.fill_color, Palette::DEFAULT.neutral);
    }

    #[test]
    fn test_focused_target() {
        let mode = RenderMode::focused("Oakridge");
        let style = style_for("Oakridge", &InteractionState::default(), &mode, &FocusSet::new());
        assert!(style.visible);
        assert!(!style.interactive);
        assert_eq!(style.fill_opacity, TARGET_FILL_OPACITY);
        assert_eq!(style.fill_color, Palette::DEFAULT.highlight);
    }

    #[test]
    fn test_focused_other_is_hidden() {
        let mode = RenderMode::focused("Oakridge");
        let style = style_for("Marpole", &InteractionState::default(), &mode, &oakridge_focus());
        assert!(!style.visible);
        assert!(!style.interactive);
        assert_eq!(style.fill_opacity, 0.0);
        assert_eq!(style.stroke_opacity, 0.0);
        assert_eq!(style.stroke_weight, 0.0);
    }

    #[test]
    fn test_focused_ignores_hover() {
        let mode = RenderMode::focused("Oakridge");
        let idle = style_for("Oakridge", &InteractionState::default(), &mode, &FocusSet::new());
        let hovering = InteractionState::hovering("Oakridge");
        let hovered = style_for("Oakridge", &hovering, &mode, &FocusSet::new());
        assert_eq!(idle, hovered);
    }

    #[test]
    fn test_custom_palette() {
        let palette = Palette {
            highlight: Color::rgb(0, 128, 0),
            neutral: Color::rgb(10, 10, 10),
        };
        let style = palette.style_for(
            "Oakridge",
            &InteractionState::default(),
            &RenderMode::Overview,
            &oakridge_focus(),
        );
        assert_eq!(style.fill_color, Color::rgb(0, 128, 0));
    }

    #[test]
    fn test_render_mode_serde() {
        let json = serde_json::to_string(&RenderMode::focused("Oakridge")).unwrap();
        assert_eq!(json, r#"{"mode":"focused","target":"Oakridge"}"#);
        let overview: RenderMode = serde_json::from_str(r#"{"mode":"overview"}"#).unwrap();
        assert_eq!(overview, RenderMode::Overview);
    }

    #[test]
    fn test_paint_style_serializes_camel_case() {
        let style = style_for(
            "Oakridge",
            &InteractionState::default(),
            &RenderMode::Overview,
            &oakridge_focus(),
        );
        let value = serde_json::to_value(style).unwrap();
        assert_eq!(value["fillColor"], "#c8102e");
        assert_eq!(value["strokeWeight"], 2.0);
        assert_eq!(value["interactive"], true);
    }

    const NAMES: &[&str] = &["Oakridge", "Marpole", "Kerrisdale", "Strathcona", ""];

    fn name() -> impl Strategy<Value = String> {
        prop::sample::select(NAMES).prop_map(str::to_string)
    }

    fn interaction() -> impl Strategy<Value = InteractionState> {
        prop::option::of(name()).prop_map(|hovered| InteractionState { hovered })
    }

    fn mode() -> impl Strategy<Value = RenderMode> {
        prop_oneof![Just(RenderMode::Overview), name().prop_map(RenderMode::Focused)]
    }

    fn focus() -> impl Strategy<Value = FocusSet> {
        prop::collection::vec(name(), 0..4).prop_map(|v| v.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_style_is_deterministic(n in name(), i in interaction(), m in mode(), f in focus()) {
            prop_assert_eq!(style_for(&n, &i, &m, &f), style_for(&n, &i, &m, &f));
        }

        #[test]
        fn prop_focused_mode_shows_only_target(
            target in name(),
            n in name(),
            i in interaction(),
            f in focus()
        ) {
            let style = style_for(&n, &i, &RenderMode::Focused(target.clone()), &f);
            prop_assert!(!style.interactive);
            prop_assert_eq!(style.visible, n == target);
        }

        #[test]
        fn prop_hovered_has_max_stroke(n in name(), f in focus()) {
            let hovering = InteractionState::hovering(n.clone());
            let style = style_for(&n, &hovering, &RenderMode::Overview, &f);
            prop_assert_eq!(style.stroke_weight, HOVER_STROKE_WEIGHT);
        }

        #[test]
        fn prop_overview_always_interactive(n in name(), i in interaction(), f in focus()) {
            let style = style_for(&n, &i, &RenderMode::Overview, &f);
            prop_assert!(style.interactive && style.visible);
            prop_assert!(style.stroke_weight <= HOVER_STROKE_WEIGHT);
        }
    }
}
