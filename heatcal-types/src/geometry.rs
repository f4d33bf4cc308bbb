//! Screen geometry produced by the layout engine and consumed by renderers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Fill, Granularity};

/// A point in surface coordinates (pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Point {
    /// Construct a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Construct a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// True when every coordinate is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Drawing surface dimensions shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Surface width after clamping to the configured minimum.
    pub width: f64,
    /// Surface height (label band plus seven weekday rows).
    pub height: f64,
    /// Year-view cell edge length.
    pub cell_size: f64,
}

/// Stable identity of a drawn cell, used for pointer hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CellId {
    /// Year-view day cell.
    Day {
        /// Day of the record.
        date: NaiveDate,
    },
    /// One summary segment of a month/week stacked bar.
    Segment {
        /// Day of the record.
        date: NaiveDate,
        /// Position in the day's summary.
        index: usize,
    },
    /// One activity slice in the day view.
    Detail {
        /// Day of the record.
        date: NaiveDate,
        /// Position in the day's details.
        index: usize,
    },
}

impl CellId {
    /// Day the cell belongs to.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        match self {
            Self::Day { date } | Self::Segment { date, .. } | Self::Detail { date, .. } => date,
        }
    }
}

/// How a tooltip avoids the right edge of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Jump to the other side of the cell.
    #[default]
    Flip,
    /// Slide left in fixed steps.
    Nudge,
}

/// Everything a renderer needs to draw one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    /// Identity for hit-testing.
    pub id: CellId,
    /// Bounds.
    pub rect: Rect,
    /// Corner radius (year cells are drawn as rounded squares).
    pub corner_radius: f64,
    /// Paint.
    pub fill: Fill,
    /// Opacity the entrance animation fades to.
    pub opacity: f64,
    /// Category name for segments and slices; empty for year cells.
    pub name: String,
    /// Seconds represented by the cell.
    pub value: u64,
    /// Where the tooltip's top-left corner starts before clamping.
    pub tooltip_anchor: Point,
    /// Right-edge overflow policy for the tooltip.
    pub overflow: Overflow,
}

/// Identity of an axis label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LabelKey {
    /// Month label (first day of the month).
    Month(NaiveDate),
    /// Week label (first day of the week).
    Week(NaiveDate),
    /// Weekday row label, 0 = first day of the week.
    Weekday(u32),
    /// Hour-of-day column label.
    Hour(u32),
    /// Project row label in the day view.
    Project(String),
}

/// A text label placed on an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    /// Identity for hover/click.
    pub key: LabelKey,
    /// Rendered text.
    pub text: String,
    /// Anchor of the text baseline.
    pub position: Point,
    /// Font size in pixels.
    pub font_size: f64,
}

/// The circular back button shown on every non-year view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackButton {
    /// Circle centre.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
}

/// Complete geometry of one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// View the geometry belongs to.
    pub granularity: Granularity,
    /// Surface dimensions.
    pub frame: Frame,
    /// Cells in draw order.
    pub cells: Vec<CellGeometry>,
    /// Axis labels.
    pub labels: Vec<AxisLabel>,
    /// Back button, absent on the year view.
    pub back_button: Option<BackButton>,
}

impl Scene {
    /// Find a cell by id.
    #[must_use]
    pub fn cell(&self, id: &CellId) -> Option<&CellGeometry> {
        self.cells.iter().find(|c| &c.id == id)
    }

    /// Find a label by key.
    #[must_use]
    pub fn label(&self, key: &LabelKey) -> Option<&AxisLabel> {
        self.labels.iter().find(|l| &l.key == key)
    }
}

/// What a pointer event landed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target", content = "id", rename_all = "lowercase")]
pub enum HitTarget {
    /// A data cell.
    Cell(CellId),
    /// An axis label.
    Label(LabelKey),
    /// The back button.
    Back,
}
