// Shared fixtures for the engine tests; not every test file uses all of them.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use heatcal::{
    Calendar, CellId, ChronoCalendar, Heatmap, HitTarget, LabelKey, PointerEvent, WeekConvention,
};
use heatcal_mock::{EnterBehavior, RecordingRenderer, RendererController, fixtures};

/// Pinned "today" for every engine test.
pub fn today() -> NaiveDate {
    d(2024, 6, 15)
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

pub fn calendar() -> Arc<dyn Calendar> {
    Arc::new(ChronoCalendar::new(chrono_tz::UTC, WeekConvention::ISO).with_today(today()))
}

/// A heatmap with no data yet and instant entrances.
pub async fn blank() -> (Heatmap, RendererController) {
    let (renderer, controller) = RecordingRenderer::new_with_controller("rec");
    controller.set_enter_behavior(EnterBehavior::Instant).await;
    let heatmap = Heatmap::builder()
        .renderer(renderer)
        .calendar(calendar())
        .seed(7)
        .build()
        .expect("build heatmap");
    (heatmap, controller)
}

/// A heatmap showing the trailing-year fixture at 1200px, settled, with an
/// empty renderer log.
pub async fn drawn() -> (Heatmap, RendererController) {
    let (mut heatmap, controller) = blank().await;
    heatmap.set_width(1200.0).await.expect("set width");
    heatmap
        .set_data(fixtures::trailing_year(today()))
        .await
        .expect("set data");
    heatmap.settle().await.expect("settle");
    controller.drain().await;
    (heatmap, controller)
}

pub async fn click(heatmap: &mut Heatmap, hit: HitTarget) {
    heatmap
        .pointer(PointerEvent::Click(hit))
        .await
        .expect("click");
}

pub fn month_label(y: i32, m: u32) -> HitTarget {
    HitTarget::Label(LabelKey::Month(d(y, m, 1)))
}

/// First cell of the current scene whose day has tracked time.
pub fn busy_cell(heatmap: &Heatmap) -> CellId {
    let scene = heatmap.scene().expect("scene drawn");
    scene
        .cells
        .iter()
        .map(|c| c.id)
        .find(|id| {
            heatmap
                .records()
                .iter()
                .any(|r| r.date == id.date() && r.total > 0)
        })
        .expect("a busy cell")
}

/// First year cell whose day has nothing tracked.
pub fn idle_cell(heatmap: &Heatmap) -> CellId {
    let scene = heatmap.scene().expect("scene drawn");
    scene
        .cells
        .iter()
        .map(|c| c.id)
        .find(|id| {
            heatmap
                .records()
                .iter()
                .any(|r| r.date == id.date() && r.total == 0)
        })
        .expect("an idle cell")
}
