use std::time::Duration;

use heatcal::{Granularity, HeatcalError, Heatmap, HitTarget, PointerEvent};
use heatcal_mock::{EnterBehavior, RecordingRenderer, RenderOp, RendererController, fixtures};

use crate::helpers::{calendar, month_label, today};

async fn spawned(behavior: EnterBehavior) -> (heatcal::HeatmapHandle, RendererController) {
    let (renderer, controller) = RecordingRenderer::new_with_controller("rec");
    controller.set_enter_behavior(behavior).await;
    let handle = Heatmap::builder()
        .renderer(renderer)
        .calendar(calendar())
        .seed(11)
        .build()
        .unwrap()
        .spawn();
    handle.set_width(1200.0).await.unwrap();
    handle
        .set_data(fixtures::trailing_year(today()))
        .await
        .unwrap();
    (handle, controller)
}

#[tokio::test(start_paused = true)]
async fn lock_is_held_until_every_entrance_finishes() {
    let (handle, controller) = spawned(EnterBehavior::Animate).await;
    assert!(!handle.is_locked());

    handle
        .on_pointer_event(PointerEvent::Click(month_label(2024, 3)))
        .await
        .unwrap();
    let snap = handle.snapshot().await.unwrap();
    assert!(snap.locked);
    assert!(handle.is_locked());
    assert_eq!(snap.selection.granularity, Granularity::Month);
    let segments = snap.scene.as_ref().unwrap().cells.len();

    // dropped: the transition is still animating
    handle
        .on_pointer_event(PointerEvent::Click(HitTarget::Back))
        .await
        .unwrap();
    assert_eq!(
        handle.snapshot().await.unwrap().selection.granularity,
        Granularity::Month
    );

    let start = tokio::time::Instant::now();
    handle.wait_unlocked().await.unwrap();
    // entrances last at most twice the base delay plus the fade
    assert!(start.elapsed() <= Duration::from_millis(1500));

    let entered = controller
        .ops()
        .await
        .into_iter()
        .filter(|op| matches!(op, RenderOp::Entered(id) if matches!(id, heatcal::CellId::Segment { .. })))
        .count();
    assert_eq!(entered, segments);

    handle
        .on_pointer_event(PointerEvent::Click(HitTarget::Back))
        .await
        .unwrap();
    let snap = handle.snapshot().await.unwrap();
    assert_eq!(snap.selection.granularity, Granularity::Year);
    assert_eq!(snap.history, vec![Granularity::Year]);
}

#[tokio::test(start_paused = true)]
async fn stuck_animation_keeps_the_lock() {
    let (handle, _controller) = spawned(EnterBehavior::Hang).await;
    handle
        .on_pointer_event(PointerEvent::Click(month_label(2024, 3)))
        .await
        .unwrap();
    let waited = tokio::time::timeout(Duration::from_secs(10), handle.wait_unlocked()).await;
    assert!(waited.is_err());
    assert!(handle.snapshot().await.unwrap().locked);
}

#[tokio::test(start_paused = true)]
async fn deferred_width_is_applied_after_the_transition() {
    let (handle, _controller) = spawned(EnterBehavior::Animate).await;
    handle
        .on_pointer_event(PointerEvent::Click(month_label(2024, 3)))
        .await
        .unwrap();
    handle.set_width(1600.0).await.unwrap();
    let frame = handle.snapshot().await.unwrap().scene.unwrap().frame;
    assert!((frame.width - 1200.0).abs() < f64::EPSILON);

    handle.wait_unlocked().await.unwrap();
    let scene = handle.snapshot().await.unwrap().scene.unwrap();
    assert_eq!(scene.granularity, Granularity::Month);
    assert!((scene.frame.width - 1600.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn shutdown_closes_every_handle() {
    let (handle, _controller) = spawned(EnterBehavior::Instant).await;
    let other = handle.clone();
    handle.shutdown().await.unwrap();
    assert_eq!(other.set_width(900.0).await, Err(HeatcalError::Closed));
    assert!(matches!(other.snapshot().await, Err(HeatcalError::Closed)));
}
