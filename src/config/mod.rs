//! Configuration file support for sketchboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchboard/config.toml`. Settings include history limits,
//! pen tool thresholds, fallback paint, and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{HistoryConfig, PathConfig, ShapesConfig, StyleConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [history]
/// max_entries = 50
/// coalesce_ms = 500
///
/// [path]
/// min_point_spacing = 5.0
/// close_threshold = 15.0
///
/// [style]
/// stroke_color = "black"
/// stroke_width = 0.3
/// fill_color = "transparent"
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, schemars::JsonSchema)]
pub struct Config {
    /// Undo/redo journal settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Pen tool thresholds and preview appearance
    #[serde(default)]
    pub path: PathConfig,

    /// Paint used when no style source is attached
    #[serde(default)]
    pub style: StyleConfig,

    /// Interaction settings for created shapes
    #[serde(default)]
    pub shapes: ShapesConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `history.max_entries`: 1 - 500
    /// - `history.coalesce_ms`: 0 - 5000
    /// - `path.min_point_spacing`: 0.0 - 100.0
    /// - `path.close_threshold`: 1.0 - 200.0
    /// - `style.stroke_width`: 0.0 - 100.0
    /// - `shapes.hit_tolerance`: 0.0 - 50.0
    pub fn validate_and_clamp(&mut self) {
        if !(1..=500).contains(&self.history.max_entries) {
            log::warn!(
                "Invalid history max_entries {}, clamping to 1-500 range",
                self.history.max_entries
            );
            self.history.max_entries = self.history.max_entries.clamp(1, 500);
        }

        if self.history.coalesce_ms > 5000 {
            log::warn!(
                "Invalid history coalesce_ms {}, clamping to 0-5000 range",
                self.history.coalesce_ms
            );
            self.history.coalesce_ms = 5000;
        }

        clamp_f64(
            "path min_point_spacing",
            &mut self.path.min_point_spacing,
            0.0,
            100.0,
        );
        clamp_f64(
            "path close_threshold",
            &mut self.path.close_threshold,
            1.0,
            200.0,
        );
        clamp_f64(
            "path indicator_radius",
            &mut self.path.indicator_radius,
            0.5,
            50.0,
        );
        clamp_f64(
            "path indicator_active_radius",
            &mut self.path.indicator_active_radius,
            0.5,
            50.0,
        );
        clamp_f64("style stroke_width", &mut self.style.stroke_width, 0.0, 100.0);
        clamp_f64(
            "shapes hit_tolerance",
            &mut self.shapes.hit_tolerance,
            0.0,
            50.0,
        );

        for (name, rgba) in [
            ("indicator_color", &mut self.path.indicator_color),
            ("indicator_active_color", &mut self.path.indicator_active_color),
            ("preview_color", &mut self.path.preview_color),
        ] {
            for (i, component) in rgba.iter_mut().enumerate() {
                if !(0.0..=1.0).contains(&*component) {
                    log::warn!(
                        "Invalid path {}[{}] = {:.3}, clamping to 0.0-1.0",
                        name,
                        i,
                        component
                    );
                    *component = if component.is_nan() {
                        1.0
                    } else {
                        (*component).clamp(0.0, 1.0)
                    };
                }
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    /// - A keybinding is malformed or bound twice
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();
        config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid keybindings in {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Returns the JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(&*value) {
        log::warn!(
            "Invalid {} {:.2}, clamping to {:.1}-{:.1} range",
            name,
            value,
            min,
            max
        );
        *value = if value.is_nan() { min } else { (*value).clamp(min, max) };
    }
}
