//! Paint queried when the tools create entities.

use crate::config::StyleConfig;
use crate::draw::{Color, Style, TRANSPARENT};

/// Supplies the current fill, stroke and stroke width.
///
/// The editor queries it when a tool creates a preview and again when the
/// finished entity is committed, so paint changes mid-gesture are honoured.
pub trait StyleSource {
    fn fill_color(&self) -> Color;
    fn stroke_color(&self) -> Color;
    fn stroke_width(&self) -> f64;

    /// Collects the three queries into a [`Style`].
    fn style(&self) -> Style {
        Style {
            fill: self.fill_color(),
            stroke: self.stroke_color(),
            stroke_width: self.stroke_width(),
        }
    }
}

/// A fixed style is the simplest source.
impl StyleSource for Style {
    fn fill_color(&self) -> Color {
        self.fill
    }

    fn stroke_color(&self) -> Color {
        self.stroke
    }

    fn stroke_width(&self) -> f64 {
        self.stroke_width
    }
}

impl From<&StyleConfig> for Style {
    fn from(cfg: &StyleConfig) -> Self {
        Style {
            fill: cfg.fill_color.to_color_or(TRANSPARENT),
            stroke: cfg.stroke_color.to_color(),
            stroke_width: cfg.stroke_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorSpec;
    use crate::draw::{BLACK, RED};

    #[test]
    fn default_config_matches_default_style() {
        let style = Style::from(&StyleConfig::default());
        assert_eq!(style, Style::default());
        assert_eq!(style.stroke, BLACK);
        assert_eq!(style.stroke_width, 0.3);
        assert!(style.fill.is_transparent());
    }

    #[test]
    fn unknown_fill_name_stays_transparent() {
        let cfg = StyleConfig {
            fill_color: ColorSpec::Name("chartreuse-ish".to_string()),
            stroke_color: ColorSpec::Name("red".to_string()),
            stroke_width: 2.0,
        };
        let style = Style::from(&cfg);
        assert!(style.fill.is_transparent());
        assert_eq!(style.stroke, RED);
    }
}
