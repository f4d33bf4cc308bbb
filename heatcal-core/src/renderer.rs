use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use heatcal_types::{AxisLabel, BackButton, CellGeometry, CellId, Granularity, HeatcalError};

use crate::tooltip::Tooltip;

/// Timing of one cell's entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntranceTiming {
    /// Wait before the fade-in starts.
    pub delay: Duration,
    /// Length of the fade-in.
    pub duration: Duration,
}

/// How a cell leaves the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExitMotion {
    /// Fade out in place.
    Fade,
    /// Fade out while sliding horizontally by `dx`.
    Scatter {
        /// Horizontal displacement in pixels.
        dx: f64,
    },
}

/// Exit animation of a whole view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitPlan {
    /// View being removed.
    pub granularity: Granularity,
    /// Motion per cell.
    pub cells: Vec<(CellId, ExitMotion)>,
    /// Length of the animation.
    pub duration: Duration,
}

/// Drawing backend driven by the heatmap.
///
/// Implementations own every graphical primitive. Methods other than
/// [`Renderer::enter`] only start their animation and return; `enter`
/// resolves once the cell has finished appearing, which is what the
/// all-finished barrier waits on.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Short backend name used in error messages.
    fn name(&self) -> &'static str;

    /// Resize the drawing surface.
    async fn resize(&self, width: f64, height: f64) -> Result<(), HeatcalError>;

    /// Start removing the current view. Its labels and back button go with it.
    async fn exit(&self, plan: ExitPlan) -> Result<(), HeatcalError>;

    /// Drop every element immediately.
    async fn clear(&self) -> Result<(), HeatcalError>;

    /// Replace the axis labels.
    async fn draw_labels(&self, labels: &[AxisLabel]) -> Result<(), HeatcalError>;

    /// Fade the back button in.
    async fn draw_back_button(&self, button: &BackButton) -> Result<(), HeatcalError>;

    /// Add a cell and animate it in; resolves when the animation ends.
    async fn enter(&self, cell: &CellGeometry, timing: EntranceTiming)
    -> Result<(), HeatcalError>;

    /// Transition the opacity of existing cells.
    async fn set_opacity(
        &self,
        updates: &[(CellId, f64)],
        duration: Duration,
    ) -> Result<(), HeatcalError>;

    /// Grow a cell to `size` and back, repeating until the next opacity or
    /// emphasis change for it.
    async fn emphasize(&self, cell: CellId, size: f64, duration: Duration)
    -> Result<(), HeatcalError>;

    /// Restore a cell's drawn geometry after emphasis.
    async fn restore(&self, cell: &CellGeometry, duration: Duration) -> Result<(), HeatcalError>;

    /// Show the tooltip.
    async fn show_tooltip(&self, tooltip: &Tooltip) -> Result<(), HeatcalError>;

    /// Fade the tooltip out.
    async fn hide_tooltip(&self) -> Result<(), HeatcalError>;
}
