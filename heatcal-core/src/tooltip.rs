use serde::{Deserialize, Serialize};

use heatcal_types::{CellGeometry, CellId, DayRecord, Overflow, Point, Scene, TooltipConfig};

use crate::calendar::Calendar;
use crate::format::{format_day, format_day_time, format_duration, tracked};

/// A positioned tooltip ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    /// Top-left corner.
    pub position: Point,
    /// Box width.
    pub width: f64,
    /// Text lines, header first.
    pub lines: Vec<String>,
}

/// Clamp a tooltip anchored at `anchor` into a `viewport` of `(width, height)`.
///
/// Horizontally the box needs `width + 3*padding` of room to its right.
/// [`Overflow::Flip`] first jumps to the other side of the cell; then either
/// policy slides left by `step` until it fits or reaches the left edge.
/// Vertically it slides up by `step` while the bottom overflows, never above
/// `min_y`.
#[must_use]
pub fn place(anchor: Point, overflow: Overflow, viewport: (f64, f64), cfg: &TooltipConfig) -> Point {
    let (vw, vh) = viewport;
    let needed = cfg.width + cfg.padding * 3.0;
    let step = if cfg.step > 0.0 { cfg.step } else { 1.0 };

    let mut x = anchor.x;
    if overflow == Overflow::Flip && vw - x < needed {
        x -= cfg.width + cfg.padding * 2.0;
    }
    while vw - x < needed && x - step >= 0.0 {
        x -= step;
    }

    let mut y = anchor.y;
    while vh - y < cfg.height && y - step >= cfg.min_y {
        y -= step;
    }
    Point::new(x, y)
}

/// Tooltip for the cell `id` of `scene`, or `None` if the cell or its data
/// is gone.
#[must_use]
pub fn for_cell(
    scene: &Scene,
    id: &CellId,
    records: &[DayRecord],
    calendar: &dyn Calendar,
    cfg: &TooltipConfig,
) -> Option<Tooltip> {
    let cell = scene.cell(id)?;
    let record = records.iter().find(|r| r.date == id.date())?;
    let lines = match *id {
        CellId::Day { .. } => day_lines(record),
        CellId::Segment { .. } => segment_lines(cell, record),
        CellId::Detail { index, .. } => {
            let detail = record.details.get(index)?;
            vec![
                detail.name.clone(),
                tracked(detail.value),
                format!("on {}", format_day_time(calendar.local(detail.date))),
            ]
        }
    };
    Some(Tooltip {
        position: place(
            cell.tooltip_anchor,
            cell.overflow,
            (scene.frame.width, scene.frame.height),
            cfg,
        ),
        width: cfg.width,
        lines,
    })
}

fn day_lines(record: &DayRecord) -> Vec<String> {
    let mut lines = vec![
        tracked(record.total),
        format!("on {}", format_day(record.date)),
    ];
    lines.extend(
        record
            .summary()
            .iter()
            .map(|s| format!("{}: {}", s.name, format_duration(s.value))),
    );
    lines
}

fn segment_lines(cell: &CellGeometry, record: &DayRecord) -> Vec<String> {
    vec![
        cell.name.clone(),
        tracked(cell.value),
        format!("on {}", format_day(record.date)),
    ]
}
