use std::time::Duration;

use futures::future::join_all;
use rand::RngCore;

use heatcal_core::{CellGeometry, EntranceTiming, HeatcalError, Renderer};

use super::stagger::stagger_delay;

/// One cell waiting to be animated in.
#[derive(Debug, Clone, PartialEq)]
pub struct Entrance {
    /// Cell to add.
    pub cell: CellGeometry,
    /// Delay and fade-in length.
    pub timing: EntranceTiming,
}

/// Give every cell a staggered delay and the shared `duration`.
pub fn schedule(
    cells: Vec<CellGeometry>,
    duration: Duration,
    rng: &mut (dyn RngCore + Send),
) -> Vec<Entrance> {
    cells
        .into_iter()
        .map(|cell| Entrance {
            timing: EntranceTiming {
                delay: stagger_delay(&mut *rng, duration),
                duration,
            },
            cell,
        })
        .collect()
}

/// Start every entrance at once and call `on_all_complete` exactly once,
/// after the last one finishes.
///
/// With no entrances the callback runs on the first poll. A failing entrance
/// still counts as finished so the barrier always releases; the first error
/// is returned after the callback has run.
///
/// # Errors
/// Returns the first renderer error among the entrances.
pub async fn run_staggered<F>(
    renderer: &dyn Renderer,
    entrances: &[Entrance],
    on_all_complete: F,
) -> Result<(), HeatcalError>
where
    F: FnOnce(),
{
    let results = join_all(
        entrances
            .iter()
            .map(|e| renderer.enter(&e.cell, e.timing)),
    )
    .await;
    on_all_complete();
    #[cfg(feature = "tracing")]
    tracing::debug!(
        renderer = renderer.name(),
        cells = entrances.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        "entrances finished"
    );
    results.into_iter().collect()
}
