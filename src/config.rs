//! Plot configuration. Every field has a default matching the stock page, so a JSON
//! file only needs the keys it wants to override.

use crate::models::NumericField;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Surface width and height in pixels.
    pub width: u32,
    pub height: u32,
    /// Gap between surface edge and the plotting range on every side.
    pub margin: f64,
    pub x_field: NumericField,
    pub y_field: NumericField,
    pub size_field: NumericField,
    /// Buffer added on both sides of the x domain.
    pub x_padding: f64,
    /// Buffer added on both sides of the y domain.
    pub y_padding: f64,
    /// Marker radius in pixels for the smallest and largest population.
    pub radius_range: (f64, f64),
    pub tick_count: usize,
    pub initial_year: String,
    pub marker_fill: String,
    pub title: String,
    pub x_caption: String,
    pub y_caption: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            margin: 50.0,
            x_field: NumericField::FertilityRate,
            y_field: NumericField::LifeExpectancy,
            size_field: NumericField::PopMlns,
            x_padding: 0.5,
            y_padding: 5.0,
            radius_range: (3.0, 20.0),
            tick_count: 10,
            initial_year: "1960".to_string(),
            marker_fill: "#4286f4".to_string(),
            title: "Countries by Life Expectancy and Fertility Rate".to_string(),
            x_caption: "Fertility Rates (Avg Children per Woman)".to_string(),
            y_caption: "Life Expectancy (years)".to_string(),
        }
    }
}

impl PlotConfig {
    /// Read overrides from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg: PlotConfig = serde_json::from_str(&txt)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("surface size must be non-zero");
        }
        if self.margin < 0.0 || 2.0 * self.margin >= f64::from(self.width.min(self.height)) {
            anyhow::bail!("margin {} does not fit the surface", self.margin);
        }
        if self.radius_range.0 < 0.0 || self.radius_range.1 < self.radius_range.0 {
            anyhow::bail!("invalid radius range {:?}", self.radius_range);
        }
        Ok(())
    }

    /// Horizontal pixel range of the plotting area, left to right.
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin, f64::from(self.width) - self.margin)
    }

    /// Vertical pixel range of the plotting area, top to bottom.
    pub fn y_range(&self) -> (f64, f64) {
        (self.margin, f64::from(self.height) - self.margin)
    }
}
