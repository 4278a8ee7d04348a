use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::core::{Viewport, normalize_start_angle};
use crate::error::{ChartError, ChartResult};
use crate::render::LabelFont;

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist chart setup; omitted fields fall back to
/// the same defaults `ChartConfig::new` uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    /// Angle of the first slice's leading edge, radians. Defaults to 12 o'clock.
    #[serde(default = "default_start_angle")]
    pub start_angle: f64,
    /// Outward offset reserved for a selected slice. Stored only.
    #[serde(default)]
    pub selected_pie_offset: f64,
    #[serde(default)]
    pub label_font: LabelFont,
    #[serde(default)]
    pub show_description_text: bool,
    /// Seconds per transaction; zero applies changes immediately.
    #[serde(default)]
    pub animation_duration: f64,
}

fn default_start_angle() -> f64 {
    -FRAC_PI_2
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            start_angle: default_start_angle(),
            selected_pie_offset: 0.0,
            label_font: LabelFont::default(),
            show_description_text: false,
            animation_duration: 0.0,
        }
    }

    #[must_use]
    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    #[must_use]
    pub fn with_animation_duration(mut self, seconds: f64) -> Self {
        self.animation_duration = seconds;
        self
    }

    #[must_use]
    pub fn with_label_font(mut self, font: LabelFont) -> Self {
        self.label_font = font;
        self
    }

    #[must_use]
    pub fn with_description_text(mut self, show: bool) -> Self {
        self.show_description_text = show;
        self
    }

    #[must_use]
    pub fn with_selected_pie_offset(mut self, offset: f64) -> Self {
        self.selected_pie_offset = offset;
        self
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize chart config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart config: {e}")))
    }
}

/// Mutable chart-wide settings owned by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartState {
    start_angle: f64,
    selected_pie_offset: f64,
    label_font: LabelFont,
    show_description_text: bool,
    animation_duration: f64,
}

impl ChartState {
    pub fn from_config(config: &ChartConfig) -> ChartResult<Self> {
        let mut state = Self {
            start_angle: default_start_angle(),
            selected_pie_offset: 0.0,
            label_font: LabelFont::default(),
            show_description_text: config.show_description_text,
            animation_duration: 0.0,
        };
        state.set_start_angle(config.start_angle)?;
        state.set_selected_pie_offset(config.selected_pie_offset)?;
        state.set_label_font(config.label_font.clone())?;
        state.set_animation_duration(config.animation_duration)?;
        Ok(state)
    }

    /// Always within `[-π, π)`.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[must_use]
    pub fn selected_pie_offset(&self) -> f64 {
        self.selected_pie_offset
    }

    #[must_use]
    pub fn label_font(&self) -> &LabelFont {
        &self.label_font
    }

    #[must_use]
    pub fn show_description_text(&self) -> bool {
        self.show_description_text
    }

    #[must_use]
    pub fn animation_duration(&self) -> f64 {
        self.animation_duration
    }

    pub fn set_start_angle(&mut self, start_angle: f64) -> ChartResult<()> {
        if !start_angle.is_finite() {
            return Err(ChartError::InvalidConfig(
                "start angle must be finite".to_owned(),
            ));
        }
        self.start_angle = normalize_start_angle(start_angle);
        Ok(())
    }

    pub fn set_selected_pie_offset(&mut self, offset: f64) -> ChartResult<()> {
        if !offset.is_finite() {
            return Err(ChartError::InvalidConfig(
                "selected pie offset must be finite".to_owned(),
            ));
        }
        self.selected_pie_offset = offset;
        Ok(())
    }

    pub fn set_label_font(&mut self, font: LabelFont) -> ChartResult<()> {
        font.validate()?;
        self.label_font = font;
        Ok(())
    }

    pub fn set_show_description_text(&mut self, show: bool) {
        self.show_description_text = show;
    }

    pub fn set_animation_duration(&mut self, seconds: f64) -> ChartResult<()> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ChartError::InvalidConfig(
                "animation duration must be finite and >= 0".to_owned(),
            ));
        }
        self.animation_duration = seconds;
        Ok(())
    }
}
