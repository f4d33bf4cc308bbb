use chrono::{Days, NaiveDate};
use heatcal_types::{
    AxisLabel, CellGeometry, CellId, Fill, Granularity, LabelKey, Overflow, Point, Rect, Rgb,
    Scene,
};

use super::{LayoutInput, back_button, font_size, period_date, weekday_axis};
use crate::scale::{BandScale, ColorScale, round_half_up};

// segments of a period with nothing tracked
const IDLE_FILL: Fill = Fill::Solid(Rgb::ORANGE_RED);

/// Month and week views: one horizontal stacked bar per day, one segment per
/// summary entry.
pub(super) fn layout(input: &LayoutInput<'_>) -> Scene {
    let LayoutInput {
        records,
        frame,
        selection,
        config: cfg,
        calendar: cal,
    } = *input;
    let granularity = selection.granularity;
    let anchor = period_date(selection.anchor, cal);

    let (start, end, week_dates, padding) = if granularity == Granularity::Week {
        let start = cal.start_of_week(anchor);
        let end = start.checked_add_days(Days::new(7)).unwrap_or(start);
        (start, end, vec![start], 0.01)
    } else {
        let start = cal.start_of_month(anchor);
        let end = cal.next_month(anchor);
        (start, end, month_weeks(input, start, end), 0.05)
    };

    let in_period: Vec<_> = records
        .iter()
        .filter(|r| start <= r.date && r.date < end)
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let max_value = in_period
        .iter()
        .map(|r| r.max_summary_value())
        .max()
        .unwrap_or(0) as f64;
    let colors = ColorScale::new(max_value, cfg.color);

    let (rows, weekday_labels) = weekday_axis(&frame, cfg, cal);
    let week_numbers: Vec<u32> = week_dates.iter().map(|d| cal.week(*d)).collect();
    let columns = BandScale::round_bands(
        week_numbers.len(),
        cfg.label_padding,
        frame.width,
        padding,
        0.0,
    );
    #[allow(clippy::cast_precision_loss)]
    let item_width =
        (frame.width - cfg.label_padding) / week_numbers.len().max(1) as f64 - cfg.gutter * 5.0;
    let block_height = rows.bandwidth().min(cfg.max_block_height);
    let tip = &cfg.tooltip;

    let mut cells = Vec::new();
    for r in in_period {
        let Some(col) = week_numbers
            .iter()
            .position(|w| *w == cal.week(r.date))
            .and_then(|i| columns.at(i))
        else {
            continue;
        };
        let Some(row) = rows.at(cal.weekday(r.date) as usize) else {
            continue;
        };
        let block_y = row + rows.bandwidth() / 1.75 - 15.0;
        #[allow(clippy::cast_precision_loss)]
        let total = r.total as f64;

        let mut offset = 0.0;
        for (index, s) in r.summary().iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let value = s.value as f64;
            let scaled = if total > 0.0 {
                round_half_up(item_width * value / total)
            } else {
                0.0
            };
            let x = col + offset;
            let anchor = if granularity == Granularity::Week {
                Point::new(
                    x + scaled / 4.0 + tip.width / 4.0,
                    row + tip.padding * 1.5,
                )
            } else {
                Point::new(col + tip.padding, row + tip.padding * 2.0)
            };
            cells.push(CellGeometry {
                id: CellId::Segment {
                    date: r.date,
                    index,
                },
                rect: Rect::new(
                    x,
                    block_y,
                    (scaled - cfg.item_gutter).max(1.0),
                    block_height,
                ),
                corner_radius: 0.0,
                fill: colors.map_or(IDLE_FILL, |c| c.fill(value)),
                opacity: 1.0,
                name: s.name.clone(),
                value: s.value,
                tooltip_anchor: anchor,
                overflow: Overflow::Nudge,
            });
            offset += scaled;
        }
    }

    let week_labels = week_dates.iter().zip(&week_numbers).enumerate().filter_map(
        |(i, (date, number))| {
            Some(AxisLabel {
                key: LabelKey::Week(cal.start_of_week(*date)),
                text: format!("Week {number}"),
                position: Point::new(columns.at(i)?, cfg.label_padding / 2.0),
                font_size: font_size(cfg),
            })
        },
    );
    let mut labels: Vec<AxisLabel> = week_labels.collect();
    labels.extend(weekday_labels);

    Scene {
        granularity,
        frame,
        cells,
        labels,
        back_button: Some(back_button(&frame, cfg)),
    }
}

/// Label dates of a month view: the first of the month, then one week
/// later each time until the week of the month's last day is reached.
fn month_weeks(input: &LayoutInput<'_>, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let cal = input.calendar;
    let last_day = end.pred_opt().unwrap_or(start);
    let last_week = cal.week(last_day);
    let mut out = vec![start];
    let mut d = start;
    // a month spans at most six weeks
    while cal.week(d) != last_week && out.len() < 7 {
        let Some(next) = d.checked_add_days(Days::new(7)) else {
            break;
        };
        d = next;
        out.push(d);
    }
    out
}
