use heatcal::{Calendar, CellId, HitTarget, LabelKey, PointerEvent};
use heatcal_mock::RenderOp;

use crate::helpers::{busy_cell, calendar, click, drawn, month_label, today};

#[tokio::test]
async fn year_cell_tooltip_and_pulse() {
    let (mut heatmap, controller) = drawn().await;
    let cell = busy_cell(&heatmap);
    let cell_size = heatmap.scene().unwrap().frame.cell_size;

    heatmap
        .pointer(PointerEvent::Enter(HitTarget::Cell(cell)))
        .await
        .unwrap();
    let ops = controller.drain().await;
    assert_eq!(ops.len(), 2);
    let RenderOp::ShowTooltip(tooltip) = &ops[0] else {
        panic!("expected a tooltip, got {:?}", ops[0]);
    };
    assert!(tooltip.lines[0].ends_with(" tracked"));
    assert!(tooltip.lines[1].starts_with("on "));
    assert!(tooltip.lines.len() > 2);
    assert_eq!(
        ops[1],
        RenderOp::Emphasize {
            cell,
            size: cell_size * 1.1
        }
    );

    heatmap
        .pointer(PointerEvent::Leave(HitTarget::Cell(cell)))
        .await
        .unwrap();
    assert_eq!(
        controller.drain().await,
        vec![RenderOp::Restore(cell), RenderOp::HideTooltip]
    );
}

#[tokio::test]
async fn tooltip_stays_inside_the_right_edge() {
    let (mut heatmap, controller) = drawn().await;
    let cell = CellId::Day { date: today() };
    heatmap
        .pointer(PointerEvent::Enter(HitTarget::Cell(cell)))
        .await
        .unwrap();
    let width = heatmap.scene().unwrap().frame.width;
    let cfg = heatmap.config().tooltip;
    let ops = controller.drain().await;
    let RenderOp::ShowTooltip(tooltip) = &ops[0] else {
        panic!("expected a tooltip, got {:?}", ops[0]);
    };
    assert!(tooltip.position.x <= width - cfg.width - cfg.padding);
}

#[tokio::test]
async fn weekday_label_dims_other_rows() {
    let (mut heatmap, controller) = drawn().await;
    let key = LabelKey::Weekday(0);
    heatmap
        .pointer(PointerEvent::Enter(HitTarget::Label(key.clone())))
        .await
        .unwrap();
    let ops = controller.drain().await;
    let [RenderOp::SetOpacity(updates)] = ops.as_slice() else {
        panic!("expected one opacity update, got {ops:?}");
    };
    let cal = calendar();
    assert_eq!(updates.len(), heatmap.scene().unwrap().cells.len());
    for (id, opacity) in updates {
        let expected = if cal.weekday(id.date()) == 0 { 1.0 } else { 0.1 };
        assert!((opacity - expected).abs() < f64::EPSILON, "{id:?}");
    }

    heatmap
        .pointer(PointerEvent::Leave(HitTarget::Label(key)))
        .await
        .unwrap();
    let ops = controller.drain().await;
    let [RenderOp::SetOpacity(updates)] = ops.as_slice() else {
        panic!("expected one opacity update, got {ops:?}");
    };
    let scene = heatmap.scene().unwrap();
    for (id, opacity) in updates {
        let cell = scene.cell(id).unwrap();
        assert!((opacity - cell.opacity).abs() < f64::EPSILON);
    }
}

#[tokio::test]
async fn hover_is_ignored_while_locked_or_off_scene() {
    let (mut heatmap, controller) = drawn().await;
    heatmap
        .pointer(PointerEvent::Enter(HitTarget::Label(LabelKey::Hour(3))))
        .await
        .unwrap();
    assert!(controller.ops().await.is_empty());

    click(&mut heatmap, month_label(2024, 3)).await;
    controller.drain().await;
    let segment = busy_cell(&heatmap);
    heatmap
        .pointer(PointerEvent::Enter(HitTarget::Cell(segment)))
        .await
        .unwrap();
    heatmap
        .pointer(PointerEvent::Enter(HitTarget::Label(LabelKey::Weekday(1))))
        .await
        .unwrap();
    assert!(controller.ops().await.is_empty());

    heatmap.settle().await.unwrap();
    controller.drain().await;
    heatmap
        .pointer(PointerEvent::Enter(HitTarget::Cell(segment)))
        .await
        .unwrap();
    let ops = controller.ops().await;
    assert_eq!(ops.len(), 1);
    assert!(matches!(&ops[0], RenderOp::ShowTooltip(t) if t.lines.len() == 3));
}
