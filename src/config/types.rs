//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Undo/redo journal settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum number of undo entries kept, baseline included (valid range: 1 - 500)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Quiescence window in milliseconds; a burst of changes closer together than
    /// this becomes a single undo step (valid range: 0 - 5000)
    #[serde(default = "default_coalesce_ms")]
    pub coalesce_ms: u64,

    /// Start recording history as soon as the editor is created
    #[serde(default = "default_history_enabled")]
    pub enabled_on_start: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            coalesce_ms: default_coalesce_ms(),
            enabled_on_start: default_history_enabled(),
        }
    }
}

/// Pen (path construction) tool settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PathConfig {
    /// Presses closer than this to the previous point are ignored (valid range: 0.0 - 100.0)
    #[serde(default = "default_min_point_spacing")]
    pub min_point_spacing: f64,

    /// Pressing within this distance of the first point closes the path
    /// (valid range: 1.0 - 200.0)
    #[serde(default = "default_close_threshold")]
    pub close_threshold: f64,

    /// Start indicator radius while the pointer is away from the first point
    #[serde(default = "default_indicator_radius")]
    pub indicator_radius: f64,

    /// Start indicator radius while a press would close the path
    #[serde(default = "default_indicator_active_radius")]
    pub indicator_active_radius: f64,

    /// Start indicator color [R, G, B, A] (0.0-1.0 range)
    #[serde(default = "default_indicator_color")]
    pub indicator_color: [f64; 4],

    /// Start indicator color while a press would close the path
    #[serde(default = "default_indicator_active_color")]
    pub indicator_active_color: [f64; 4],

    /// Color of the rubber-band segment and the in-progress polyline
    #[serde(default = "default_preview_color")]
    pub preview_color: [f64; 4],
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            min_point_spacing: default_min_point_spacing(),
            close_threshold: default_close_threshold(),
            indicator_radius: default_indicator_radius(),
            indicator_active_radius: default_indicator_active_radius(),
            indicator_color: default_indicator_color(),
            indicator_active_color: default_indicator_active_color(),
            preview_color: default_preview_color(),
        }
    }
}

/// Fallback paint used when no style source is attached.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StyleConfig {
    /// Outline color - a named color or an RGB array like `[0, 0, 0]`
    #[serde(default = "default_stroke_color")]
    pub stroke_color: ColorSpec,

    /// Outline width in scene units (valid range: 0.0 - 100.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Interior color; "transparent" means no fill
    #[serde(default = "default_fill_color")]
    pub fill_color: ColorSpec,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            stroke_width: default_stroke_width(),
            fill_color: default_fill_color(),
        }
    }
}

/// Interaction settings applied to entities the tools create.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShapesConfig {
    /// Extra hit-test distance around created entities (valid range: 0.0 - 50.0)
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,
}

impl Default for ShapesConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: default_hit_tolerance(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_max_entries() -> usize {
    50
}

fn default_coalesce_ms() -> u64 {
    500
}

fn default_history_enabled() -> bool {
    true
}

fn default_min_point_spacing() -> f64 {
    5.0
}

fn default_close_threshold() -> f64 {
    15.0
}

fn default_indicator_radius() -> f64 {
    4.0
}

fn default_indicator_active_radius() -> f64 {
    8.0
}

fn default_indicator_color() -> [f64; 4] {
    [0.2, 0.4, 1.0, 1.0]
}

fn default_indicator_active_color() -> [f64; 4] {
    [0.0, 0.8, 0.2, 1.0]
}

fn default_preview_color() -> [f64; 4] {
    [0.2, 0.4, 1.0, 0.8]
}

fn default_stroke_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_stroke_width() -> f64 {
    0.3
}

fn default_fill_color() -> ColorSpec {
    ColorSpec::Name("transparent".to_string())
}

fn default_hit_tolerance() -> f64 {
    0.0
}
