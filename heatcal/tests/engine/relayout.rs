use heatcal::{Granularity, HeatcalError, HitTarget};
use heatcal_mock::{RenderOp, fixtures};

use crate::helpers::{blank, busy_cell, click, drawn, month_label, today};

#[tokio::test]
async fn nothing_is_drawn_without_width_or_data() {
    let (mut heatmap, controller) = blank().await;
    heatmap
        .set_data(fixtures::trailing_year(today()))
        .await
        .unwrap();
    assert!(heatmap.scene().is_none());

    heatmap.set_width(0.0).await.unwrap();
    assert!(heatmap.scene().is_none());
    assert!(controller.ops().await.is_empty());
    assert!(heatmap.take_entrances().is_empty());

    heatmap.set_width(800.0).await.unwrap();
    let ops = controller.drain().await;
    // narrow containers are laid out at the minimum width
    assert!(matches!(ops[0], RenderOp::Resize { width, .. } if (width - 1000.0).abs() < f64::EPSILON));
    assert_eq!(heatmap.scene().unwrap().cells.len(), 367);
    assert!(!heatmap.is_locked());
}

#[tokio::test]
async fn empty_data_clears_the_surface() {
    let (mut heatmap, controller) = drawn().await;
    heatmap.set_data(Vec::new()).await.unwrap();
    assert!(heatmap.scene().is_none());
    assert_eq!(controller.drain().await, vec![RenderOp::Clear]);
}

#[tokio::test]
async fn passive_relayout_redraws_in_place() {
    let (mut heatmap, controller) = drawn().await;
    heatmap.set_width(1500.0).await.unwrap();
    assert!(!heatmap.is_locked());
    let ops = controller.drain().await;
    assert!(matches!(ops[0], RenderOp::Resize { width, .. } if (width - 1500.0).abs() < f64::EPSILON));
    assert_eq!(ops[1], RenderOp::Clear);
    assert!(matches!(ops[2], RenderOp::Labels(_)));
    assert_eq!(heatmap.take_entrances().len(), 1);
}

#[tokio::test]
async fn width_change_during_transition_waits_for_the_barrier() {
    let (mut heatmap, controller) = drawn().await;
    click(&mut heatmap, month_label(2024, 3)).await;
    controller.drain().await;

    heatmap.set_width(1500.0).await.unwrap();
    heatmap
        .set_data(fixtures::trailing_year(today()))
        .await
        .unwrap();
    assert!(controller.ops().await.is_empty());
    assert!((heatmap.scene().unwrap().frame.width - 1200.0).abs() < f64::EPSILON);

    heatmap.settle().await.unwrap();
    assert!(!heatmap.is_locked());
    let scene = heatmap.scene().unwrap();
    assert_eq!(scene.granularity, Granularity::Month);
    assert!((scene.frame.width - 1500.0).abs() < f64::EPSILON);
    let resizes = controller
        .ops()
        .await
        .into_iter()
        .filter(|op| matches!(op, RenderOp::Resize { .. }))
        .count();
    assert_eq!(resizes, 1);
}

#[tokio::test(start_paused = true)]
async fn failed_layout_releases_the_lock() {
    let (mut heatmap, controller) = drawn().await;
    let err = HeatcalError::renderer("rec", "context lost");
    controller.fail_on("draw_labels", err.clone()).await;

    let res = heatmap
        .pointer(heatcal::PointerEvent::Click(month_label(2024, 3)))
        .await;
    assert_eq!(res, Err(err));
    assert!(!heatmap.is_locked());
    assert_eq!(heatmap.selection().granularity, Granularity::Month);

    // navigation keeps working once the renderer recovers
    controller.reset().await;
    heatmap.set_width(1200.0).await.unwrap();
    heatmap.settle().await.unwrap();
    let cell = busy_cell(&heatmap);
    click(&mut heatmap, HitTarget::Cell(cell)).await;
    assert_eq!(heatmap.selection().granularity, Granularity::Day);
}
