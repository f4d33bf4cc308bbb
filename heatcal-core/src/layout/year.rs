use heatcal_types::{
    AxisLabel, CellGeometry, CellId, Fill, Granularity, LabelKey, Overflow, Point, Rect, Scene,
};

use super::{LayoutInput, font_size, weekday_axis, year_ago};
use crate::scale::ColorScale;

/// One rounded cell per record, columns by week, rows by weekday.
pub(super) fn layout(input: &LayoutInput<'_>) -> Scene {
    let LayoutInput {
        records,
        frame,
        config: cfg,
        calendar: cal,
        ..
    } = *input;

    let today = cal.today();
    let ago = year_ago(today);
    let ago_week = i64::from(cal.week(ago));
    let ago_week_year = i64::from(cal.week_year(ago));
    let ago_weeks = i64::from(cal.weeks_in_year(cal.week_year(ago)));

    #[allow(clippy::cast_precision_loss)]
    let max_total = records.iter().map(|r| r.total).max().unwrap_or(0) as f64;
    let colors = ColorScale::new(max_total, cfg.color);
    let pitch = frame.cell_size + cfg.gutter;

    let cells = records
        .iter()
        .map(|r| {
            let column = i64::from(cal.week(r.date)) - ago_week
                + ago_weeks * (i64::from(cal.week_year(r.date)) - ago_week_year);
            #[allow(clippy::cast_precision_loss)]
            let x = column as f64 * pitch + cfg.label_padding;
            let y = cfg.label_padding + f64::from(cal.weekday(r.date)) * pitch;

            #[allow(clippy::cast_precision_loss)]
            let total = r.total as f64;
            let size = if max_total > 0.0 {
                frame.cell_size * 0.75 + frame.cell_size * total / max_total * 0.25
            } else {
                frame.cell_size
            };
            let inset = (frame.cell_size - size) / 2.0;
            let fill = match colors {
                Some(scale) if r.total > 0 => scale.fill(total),
                _ => Fill::Transparent,
            };
            CellGeometry {
                id: CellId::Day { date: r.date },
                rect: Rect::new(x + inset, y + inset, size, size),
                corner_radius: size,
                fill,
                opacity: 1.0,
                name: String::new(),
                value: r.total,
                tooltip_anchor: Point::new(x + frame.cell_size, y + frame.cell_size),
                overflow: Overflow::Flip,
            }
        })
        .collect();

    let (_, weekday_labels) = weekday_axis(&frame, cfg, cal);
    let mut labels = month_labels(input, ago, today);
    labels.extend(weekday_labels);

    Scene {
        granularity: Granularity::Year,
        frame,
        cells,
        labels,
        back_button: None,
    }
}

/// One short month name per month of the trailing window, centred in equal
/// slices of the width.
fn month_labels(
    input: &LayoutInput<'_>,
    from: chrono::NaiveDate,
    to: chrono::NaiveDate,
) -> Vec<AxisLabel> {
    let cal = input.calendar;
    let last = cal.start_of_month(to);
    let mut months = Vec::new();
    let mut m = cal.start_of_month(from);
    while m <= last {
        months.push(m);
        let next = cal.next_month(m);
        if next == m {
            break;
        }
        m = next;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = months.len() as f64;
    let width = input.frame.width;
    months
        .into_iter()
        .enumerate()
        .map(|(i, month)| {
            #[allow(clippy::cast_precision_loss)]
            let x = width * i as f64 / n + width / (2.0 * n);
            AxisLabel {
                key: LabelKey::Month(month),
                text: month.format("%b").to_string(),
                position: Point::new(x, input.config.label_padding / 2.0),
                font_size: font_size(input.config),
            }
        })
        .collect()
}
