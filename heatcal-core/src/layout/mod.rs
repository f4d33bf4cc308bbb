//! Per-granularity layout: records in, [`Scene`] out.
//!
//! Every function here is pure. The only inputs are the records, the frame,
//! the selection, the configuration and the calendar, so a scene can be
//! recomputed at any time (hover, resize) and compared in tests.

mod day;
mod stacked;
mod year;

use chrono::{Months, NaiveDate};
use heatcal_types::{
    Anchor, AxisLabel, BackButton, DayRecord, Frame, Granularity, HeatmapConfig, LabelKey, Point,
    Scene, Selection,
};

use crate::calendar::Calendar;
use crate::renderer::{ExitMotion, ExitPlan};
use crate::scale::BandScale;

pub use day::truncate_label;

/// Everything a layout pass reads.
#[derive(Clone, Copy)]
pub struct LayoutInput<'a> {
    /// Prepared records, ascending by date.
    pub records: &'a [DayRecord],
    /// Surface dimensions.
    pub frame: Frame,
    /// View and anchor to lay out.
    pub selection: Selection,
    /// Constants and colours.
    pub config: &'a HeatmapConfig,
    /// Date arithmetic.
    pub calendar: &'a dyn Calendar,
}

/// Surface dimensions for a container `width` pixels wide.
///
/// `None` for a zero, negative or non-finite width: nothing is laid out
/// until a usable width arrives. Narrow containers are laid out at
/// `min_width`.
#[must_use]
pub fn frame(width: f64, calendar: &dyn Calendar, cfg: &HeatmapConfig) -> Option<Frame> {
    if !width.is_finite() || width <= 0.0 {
        return None;
    }
    let width = width.max(cfg.min_width);
    let today = calendar.today();
    let ago = year_ago(today);
    let weeks = i64::from(calendar.weeks_in_year(calendar.week_year(ago)))
        - i64::from(calendar.week(ago))
        + i64::from(calendar.week(today))
        + 1;
    #[allow(clippy::cast_precision_loss)]
    let weeks = weeks.max(1) as f64;
    let cell_size = ((width - cfg.label_padding) / weeks - cfg.gutter).max(1.0);
    Some(Frame {
        width,
        height: cfg.label_padding + 7.0 * (cell_size + cfg.gutter),
        cell_size,
    })
}

/// Lay out the view named by `input.selection`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "heatcal::layout::compute_scene",
        skip(input),
        fields(
            granularity = %input.selection.granularity,
            records = input.records.len(),
            width = input.frame.width,
        ),
    )
)]
#[must_use]
pub fn compute_scene(input: &LayoutInput<'_>) -> Scene {
    let granularity = input.selection.granularity;
    let scene = if granularity.is_stacked() {
        stacked::layout(input)
    } else if granularity == Granularity::Day {
        day::layout(input)
    } else {
        year::layout(input)
    };
    #[cfg(feature = "tracing")]
    tracing::debug!(
        cells = scene.cells.len(),
        labels = scene.labels.len(),
        "laid out scene"
    );
    scene
}

/// Exit animation for leaving `scene`: year cells fade, the others also
/// scatter by a third of the width, alternating direction.
#[must_use]
pub fn exit_plan(scene: &Scene, duration: std::time::Duration) -> ExitPlan {
    let shift = scene.frame.width / 3.0;
    let cells = scene
        .cells
        .iter()
        .map(|c| {
            let motion = match c.id {
                heatcal_types::CellId::Day { .. } => ExitMotion::Fade,
                heatcal_types::CellId::Segment { index, .. }
                | heatcal_types::CellId::Detail { index, .. } => ExitMotion::Scatter {
                    dx: if index % 2 == 0 { -shift } else { shift },
                },
            };
            (c.id, motion)
        })
        .collect();
    ExitPlan {
        granularity: scene.granularity,
        cells,
        duration,
    }
}

/// The record a Day view shows: the anchored one, else the most recent.
#[must_use]
pub fn resolve_day(records: &[DayRecord], anchor: Option<Anchor>) -> Option<&DayRecord> {
    anchor
        .and_then(|a| records.iter().find(|r| r.date == a.date()))
        .or_else(|| records.last())
}

/// Date that scopes a Month or Week view: the anchor, else today.
#[must_use]
pub fn period_date(anchor: Option<Anchor>, calendar: &dyn Calendar) -> NaiveDate {
    anchor.map_or_else(|| calendar.today(), Anchor::date)
}

/// Start of the trailing-year window ending at `today`.
#[must_use]
pub fn year_ago(today: NaiveDate) -> NaiveDate {
    today.checked_sub_months(Months::new(12)).unwrap_or(today)
}

pub(crate) fn font_size(cfg: &HeatmapConfig) -> f64 {
    (cfg.label_padding / 3.0).floor()
}

/// Seven weekday rows over `[label_padding, height]` and their labels.
pub(crate) fn weekday_axis(
    frame: &Frame,
    cfg: &HeatmapConfig,
    calendar: &dyn Calendar,
) -> (BandScale, Vec<AxisLabel>) {
    let rows = BandScale::round_bands(7, cfg.label_padding, frame.height, 0.0, 0.0);
    let labels = (0..7u32)
        .filter_map(|i| {
            let y = rows.at(i as usize)? + rows.bandwidth() / 1.75;
            let text = calendar.weekday_name(i).chars().next()?.to_string();
            Some(AxisLabel {
                key: LabelKey::Weekday(i),
                text,
                position: Point::new(cfg.label_padding / 3.0, y),
                font_size: font_size(cfg),
            })
        })
        .collect();
    (rows, labels)
}

pub(crate) fn back_button(frame: &Frame, cfg: &HeatmapConfig) -> BackButton {
    BackButton {
        center: Point::new(cfg.label_padding / 2.25, cfg.label_padding / 2.5),
        radius: frame.cell_size / 2.0,
    }
}
