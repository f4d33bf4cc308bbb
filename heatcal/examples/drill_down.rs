//! Walks a recorded heatmap from the year view down to a single day and back.
//!
//! Run with `RUST_LOG=debug cargo run --example drill_down --features tracing`
//! to see layout passes and navigation in the log.

use chrono::Datelike;
use heatcal::{CellId, Granularity, Heatmap, HeatmapHandle, HitTarget, LabelKey, PointerEvent};
use heatcal_mock::{RecordingRenderer, RenderOp, fixtures};
use tracing_subscriber::fmt::format::FmtSpan;

async fn click(handle: &HeatmapHandle, hit: HitTarget) -> Result<(), Box<dyn std::error::Error>> {
    handle.on_pointer_event(PointerEvent::Click(hit)).await?;
    handle.wait_unlocked().await?;
    let snap = handle.snapshot().await?;
    let cells = snap.scene.as_ref().map_or(0, |s| s.cells.len());
    println!(
        "{} anchor={:?} history={:?} cells={cells}",
        snap.selection.granularity, snap.selection.anchor, snap.history
    );
    Ok(())
}

fn first_busy(snap: &heatcal::Snapshot) -> Option<CellId> {
    snap.scene
        .as_ref()?
        .cells
        .iter()
        .find(|c| c.value > 0)
        .map(|c| c.id)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,heatcal=debug,heatcal_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    let (renderer, controller) = RecordingRenderer::new_with_controller("recording");
    let handle = Heatmap::builder()
        .renderer(renderer)
        .color("#2e8b57")
        .seed(2024)
        .handler(|slice| println!("handler: {} for {}s at {}", slice.name, slice.value, slice.date))
        .build()?
        .spawn();

    let today = chrono::Utc::now().date_naive();
    handle.set_width(1280.0).await?;
    handle.set_data(fixtures::trailing_year(today)).await?;
    handle.wait_unlocked().await?;

    let this_month = today.with_day0(0).unwrap_or(today);
    click(&handle, HitTarget::Label(LabelKey::Month(this_month))).await?;

    let snap = handle.snapshot().await?;
    let week = snap.scene.as_ref().and_then(|s| {
        s.labels.iter().find_map(|l| match l.key {
            LabelKey::Week(start) => Some(start),
            _ => None,
        })
    });
    if let Some(start) = week {
        click(&handle, HitTarget::Label(LabelKey::Week(start))).await?;
    }

    if let Some(cell) = first_busy(&handle.snapshot().await?) {
        click(&handle, HitTarget::Cell(cell)).await?;
    }

    let snap = handle.snapshot().await?;
    if snap.selection.granularity == Granularity::Day
        && let Some(bar) = first_busy(&snap)
    {
        handle.on_pointer_event(PointerEvent::Enter(HitTarget::Cell(bar))).await?;
        handle.on_pointer_event(PointerEvent::Click(HitTarget::Cell(bar))).await?;
    }

    while handle.snapshot().await?.selection.granularity != Granularity::Year {
        click(&handle, HitTarget::Back).await?;
    }

    let ops = controller.ops().await;
    let tooltips = ops
        .iter()
        .filter_map(|op| match op {
            RenderOp::ShowTooltip(t) => Some(t.lines.join(" | ")),
            _ => None,
        })
        .collect::<Vec<_>>();
    println!("renderer calls: {}", ops.len());
    for t in tooltips {
        println!("tooltip: {t}");
    }

    handle.shutdown().await?;
    Ok(())
}
