//! Layout, tooltip and animation configuration.

use std::time::Duration;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::{Granularity, HeatcalError, Rgb};

/// Week numbering rule: which weekday starts a week and how many January
/// days week 1 must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekConvention {
    /// First day of every week.
    pub first_day: Weekday,
    /// Week 1 is the first week holding at least this many days of January.
    pub min_days_in_first_week: u8,
}

impl WeekConvention {
    /// ISO-8601: weeks start Monday, week 1 contains January 4th.
    pub const ISO: Self = Self {
        first_day: Weekday::Mon,
        min_days_in_first_week: 4,
    };
    /// US: weeks start Sunday, week 1 contains January 1st.
    pub const US: Self = Self {
        first_day: Weekday::Sun,
        min_days_in_first_week: 1,
    };
}

impl Default for WeekConvention {
    fn default() -> Self {
        Self::ISO
    }
}

/// Tooltip box size and edge-avoidance tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    /// Box width in pixels.
    pub width: f64,
    /// Box height used for bottom-edge avoidance.
    pub height: f64,
    /// Padding around the box.
    pub padding: f64,
    /// Step for incremental nudging.
    pub step: f64,
    /// Vertical nudging never moves the box above this line.
    pub min_y: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            width: 250.0,
            height: 120.0,
            padding: 15.0,
            step: 10.0,
            min_y: 0.0,
        }
    }
}

/// Global configuration for a `Heatmap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Space between year cells and between stacked bars.
    pub gutter: f64,
    /// Space between segments of a stacked bar.
    pub item_gutter: f64,
    /// Surfaces narrower than this are laid out at this width.
    pub min_width: f64,
    /// Space reserved for axis labels.
    pub label_padding: f64,
    /// Upper bound on the height of a stacked bar.
    pub max_block_height: f64,
    /// Base duration of every transition.
    pub transition: Duration,
    /// Top colour of every fill scale.
    pub color: Rgb,
    /// Granularity shown first and pushed onto the history at start.
    pub overview: Granularity,
    /// Week numbering rule.
    pub week: WeekConvention,
    /// Opacity applied to cells a hovered label does not match.
    pub dim_opacity: f64,
    /// Tooltip tuning.
    pub tooltip: TooltipConfig,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            gutter: 5.0,
            item_gutter: 1.0,
            min_width: 1000.0,
            label_padding: 40.0,
            max_block_height: 20.0,
            transition: Duration::from_millis(500),
            color: Rgb::ORANGE_RED,
            overview: Granularity::Year,
            week: WeekConvention::ISO,
            dim_opacity: 0.1,
            tooltip: TooltipConfig::default(),
        }
    }
}

impl HeatmapConfig {
    /// Reject values the layout cannot work with.
    ///
    /// # Errors
    /// Returns `InvalidArg` naming the first offending field.
    pub fn validate(&self) -> Result<(), HeatcalError> {
        let non_negative = [
            ("gutter", self.gutter),
            ("item_gutter", self.item_gutter),
            ("label_padding", self.label_padding),
            ("tooltip.padding", self.tooltip.padding),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(HeatcalError::invalid_arg(format!(
                    "{name} must be a non-negative number, got {v}"
                )));
            }
        }
        let positive = [
            ("min_width", self.min_width),
            ("max_block_height", self.max_block_height),
            ("tooltip.width", self.tooltip.width),
            ("tooltip.step", self.tooltip.step),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(HeatcalError::invalid_arg(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.dim_opacity) {
            return Err(HeatcalError::invalid_arg(format!(
                "dim_opacity must be within [0, 1], got {}",
                self.dim_opacity
            )));
        }
        if !(1..=7).contains(&self.week.min_days_in_first_week) {
            return Err(HeatcalError::invalid_arg(
                "week.min_days_in_first_week must be within 1..=7",
            ));
        }
        Ok(())
    }
}
