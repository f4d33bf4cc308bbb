use chrono::Days;
use heatcal_types::{
    AxisLabel, CellGeometry, CellId, Fill, Granularity, LabelKey, Overflow, Point, Rect, Scene,
};

use super::{LayoutInput, back_button, font_size, resolve_day};
use crate::scale::{BandScale, LinearScale};

const SECONDS_PER_DAY: f64 = 86_400.0;
const HOURS: u32 = 24;
const BAR_OPACITY: f64 = 0.5;

/// One bar per activity slice: x is time of day, rows are projects in
/// summary order.
pub(super) fn layout(input: &LayoutInput<'_>) -> Scene {
    let LayoutInput {
        records,
        frame,
        selection,
        config: cfg,
        calendar: cal,
    } = *input;
    let record = resolve_day(records, selection.anchor);
    let date = record.map_or_else(|| cal.today(), |r| r.date);

    let names: Vec<&str> = record
        .map(|r| r.summary().iter().map(|s| s.name.as_str()).collect())
        .unwrap_or_default();
    let rows = BandScale::round_bands(names.len(), cfg.label_padding, frame.height, 0.0, 0.0);
    let row_of = |name: &str| names.iter().position(|n| *n == name).and_then(|i| rows.at(i));

    let day_start = cal.day_start(date);
    let day_end = date
        .checked_add_days(Days::new(1))
        .map_or(day_start, |next| cal.day_start(next));
    #[allow(clippy::cast_precision_loss)]
    let time = LinearScale::new(
        (day_start.timestamp() as f64, day_end.timestamp() as f64),
        (cfg.label_padding * 2.0, frame.width),
    );
    let bar_height = rows.bandwidth().min(cfg.max_block_height);
    let tip = &cfg.tooltip;

    let mut cells = Vec::new();
    if let Some(r) = record {
        for (index, d) in r.details.iter().enumerate() {
            // slices of a name missing from the summary have no row
            let Some(row) = row_of(&d.name) else {
                continue;
            };
            #[allow(clippy::cast_precision_loss)]
            let x = time.at(d.date.timestamp() as f64);
            #[allow(clippy::cast_precision_loss)]
            let end = time.at(d.end().timestamp() as f64);
            #[allow(clippy::cast_precision_loss)]
            let value = d.value as f64;
            cells.push(CellGeometry {
                id: CellId::Detail {
                    date: r.date,
                    index,
                },
                rect: Rect::new(
                    x,
                    row + rows.bandwidth() / 2.0 - 15.0,
                    (end - x).max(1.0),
                    bar_height,
                ),
                corner_radius: 0.0,
                fill: Fill::Solid(cfg.color),
                opacity: BAR_OPACITY,
                name: d.name.clone(),
                value: d.value,
                tooltip_anchor: Point::new(
                    x + value * 100.0 / SECONDS_PER_DAY,
                    row + rows.bandwidth() / 2.0 + tip.padding / 2.0,
                ),
                overflow: Overflow::Nudge,
            });
        }
    }

    let font = font_size(cfg);
    let hour_step = (frame.width - cfg.label_padding * 2.0) / f64::from(HOURS);
    let mut labels: Vec<AxisLabel> = (0..HOURS)
        .map(|h| AxisLabel {
            key: LabelKey::Hour(h),
            text: format!("{h:02}:00"),
            position: Point::new(
                cfg.label_padding * 2.0 + f64::from(h) * hour_step,
                cfg.label_padding / 2.0,
            ),
            font_size: font,
        })
        .collect();
    labels.extend(names.iter().enumerate().filter_map(|(i, name)| {
        Some(AxisLabel {
            key: LabelKey::Project((*name).to_string()),
            text: truncate_label(name, font, cfg.label_padding * 1.5),
            position: Point::new(cfg.gutter, rows.at(i)? + rows.bandwidth() / 2.0),
            font_size: font,
        })
    }));

    Scene {
        granularity: Granularity::Day,
        frame,
        cells,
        labels,
        back_button: Some(back_button(&frame, cfg)),
    }
}

/// Estimated rendered width of `text` at `font_size`.
fn text_width(text: &str, font_size: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = text.chars().count() as f64;
    n * font_size * 0.6
}

/// Shorten `text` with a trailing `"..."` until it fits `max_width`.
#[must_use]
pub fn truncate_label(text: &str, font_size: f64, max_width: f64) -> String {
    if text_width(text, font_size) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    loop {
        chars.pop();
        let candidate: String = chars.iter().chain(['.', '.', '.'].iter()).collect();
        if chars.is_empty() || text_width(&candidate, font_size) <= max_width {
            return candidate;
        }
    }
}
