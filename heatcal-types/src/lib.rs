//! Shared data types, geometry and configuration for the heatcal drill-down
//! calendar heatmap.
#![warn(missing_docs)]

mod color;
mod config;
mod error;
mod geometry;
mod granularity;
mod record;

pub use color::{Fill, Rgb};
pub use config::{HeatmapConfig, TooltipConfig, WeekConvention};
pub use error::HeatcalError;
pub use geometry::{
    AxisLabel, BackButton, CellGeometry, CellId, Frame, HitTarget, LabelKey, Overflow, Point,
    Rect, Scene,
};
pub use granularity::{Anchor, Granularity, Selection};
pub use record::{DayRecord, DetailEntry, Seconds, SummaryEntry};
