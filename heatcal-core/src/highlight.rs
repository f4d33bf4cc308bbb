use chrono::Datelike;
use heatcal_types::{CellGeometry, CellId, LabelKey, Scene};

use crate::calendar::Calendar;

// label and bar positions come from different float paths
const EPS: f64 = 1e-6;

/// Whether hovering `key` keeps `cell` fully visible.
fn keeps_visible(cell: &CellGeometry, key: &LabelKey, scene: &Scene, calendar: &dyn Calendar) -> bool {
    let date = cell.id.date();
    match key {
        LabelKey::Month(first) => date.year() == first.year() && date.month() == first.month(),
        LabelKey::Week(start) => calendar.start_of_week(date) == *start,
        LabelKey::Weekday(i) => calendar.weekday(date) == *i,
        LabelKey::Hour(_) => scene.label(key).is_some_and(|l| {
            let x = l.position.x;
            cell.rect.x - EPS <= x && x <= cell.rect.right() + EPS
        }),
        LabelKey::Project(name) => matches!(cell.id, CellId::Detail { .. }) && &cell.name == name,
    }
}

/// Opacity per cell while `key` is hovered: matching cells are fully opaque,
/// the rest drop to `dim`.
#[must_use]
pub fn label_hover(
    scene: &Scene,
    key: &LabelKey,
    dim: f64,
    calendar: &dyn Calendar,
) -> Vec<(CellId, f64)> {
    scene
        .cells
        .iter()
        .map(|c| {
            let o = if keeps_visible(c, key, scene, calendar) {
                1.0
            } else {
                dim
            };
            (c.id, o)
        })
        .collect()
}

/// Opacity per cell after the pointer leaves a label.
#[must_use]
pub fn restore(scene: &Scene) -> Vec<(CellId, f64)> {
    scene.cells.iter().map(|c| (c.id, c.opacity)).collect()
}
