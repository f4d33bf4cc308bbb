use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::FutureExt;
use heatcal::animation::{Entrance, run_staggered};
use heatcal::{CellGeometry, CellId, EntranceTiming, Fill, HeatcalError, Overflow, Point, Rect};
use heatcal_mock::{EnterBehavior, RecordingRenderer, RenderOp};

fn entrance(day: u32, delay_ms: u64) -> Entrance {
    Entrance {
        cell: CellGeometry {
            id: CellId::Day {
                date: chrono::NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            },
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            corner_radius: 10.0,
            fill: Fill::Transparent,
            opacity: 1.0,
            name: String::new(),
            value: 0,
            tooltip_anchor: Point::new(10.0, 10.0),
            overflow: Overflow::Flip,
        },
        timing: EntranceTiming {
            delay: Duration::from_millis(delay_ms),
            duration: Duration::from_millis(500),
        },
    }
}

#[test]
fn empty_batch_completes_immediately() {
    let (renderer, _controller) = RecordingRenderer::new_with_controller("rec");
    let calls = AtomicUsize::new(0);
    let out = run_staggered(&*renderer, &[], || {
        calls.fetch_add(1, Ordering::SeqCst);
    })
    .now_or_never();
    assert_eq!(out, Some(Ok(())));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn callback_fires_once_after_the_slowest_entrance() {
    let (renderer, controller) = RecordingRenderer::new_with_controller("rec");
    let entrances = vec![entrance(1, 100), entrance(2, 300), entrance(3, 200)];
    let start = tokio::time::Instant::now();
    let calls = AtomicUsize::new(0);
    let mut finished_after = None;

    run_staggered(&*renderer, &entrances, || {
        calls.fetch_add(1, Ordering::SeqCst);
        finished_after = Some(start.elapsed());
    })
    .await
    .expect("entrances ok");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(finished_after, Some(Duration::from_millis(800)));

    let ops = controller.ops().await;
    let entered = ops
        .iter()
        .filter(|op| matches!(op, RenderOp::Entered(_)))
        .count();
    assert_eq!(entered, 3);
    // every entrance started before any finished
    let first_done = ops
        .iter()
        .position(|op| matches!(op, RenderOp::Entered(_)))
        .unwrap();
    assert_eq!(first_done, 3);
}

#[tokio::test]
async fn failures_still_release_the_barrier() {
    let (renderer, controller) = RecordingRenderer::new_with_controller("rec");
    let err = HeatcalError::renderer("rec", "detached");
    controller
        .set_enter_behavior(EnterBehavior::Fail(err.clone()))
        .await;
    let calls = AtomicUsize::new(0);
    let out = run_staggered(&*renderer, &[entrance(1, 0), entrance(2, 0)], || {
        calls.fetch_add(1, Ordering::SeqCst);
    })
    .await;
    assert_eq!(out, Err(err));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
