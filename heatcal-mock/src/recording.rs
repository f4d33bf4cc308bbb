use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use heatcal_core::{
    AxisLabel, BackButton, CellGeometry, CellId, EntranceTiming, ExitPlan, HeatcalError, Renderer,
    Tooltip,
};

/// One call received by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    /// Surface resized.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
    /// Exit animation of the previous view.
    Exit(ExitPlan),
    /// Everything removed at once.
    Clear,
    /// Axis labels drawn.
    Labels(Vec<AxisLabel>),
    /// Back button drawn.
    BackButton(BackButton),
    /// An entrance started.
    Enter {
        /// Cell entering.
        cell: CellId,
        /// Delay and duration it was given.
        timing: EntranceTiming,
    },
    /// An entrance finished.
    Entered(CellId),
    /// Opacity changes from label hover.
    SetOpacity(Vec<(CellId, f64)>),
    /// Year cell pulsed.
    Emphasize {
        /// Cell pulsed.
        cell: CellId,
        /// Side length it grew to.
        size: f64,
    },
    /// Pulse undone.
    Restore(CellId),
    /// Tooltip shown.
    ShowTooltip(Tooltip),
    /// Tooltip hidden.
    HideTooltip,
}

/// How `enter` resolves.
#[derive(Debug, Clone, Default)]
pub enum EnterBehavior {
    /// Sleep for the entrance's delay plus duration on the Tokio clock.
    #[default]
    Animate,
    /// Resolve immediately.
    Instant,
    /// Never resolve (an animation stuck on screen).
    Hang,
    /// Fail immediately with the provided error.
    Fail(HeatcalError),
}

#[derive(Default)]
struct InternalState {
    log: Vec<RenderOp>,
    enter: EnterBehavior,
    failures: HashMap<&'static str, HeatcalError>,
}

/// Controller handle used by tests to steer a [`RecordingRenderer`] and read
/// its log.
#[derive(Clone)]
pub struct RendererController {
    state: Arc<Mutex<InternalState>>,
}

impl RendererController {
    /// Set how subsequent `enter` calls resolve.
    pub async fn set_enter_behavior(&self, behavior: EnterBehavior) {
        self.state.lock().await.enter = behavior;
    }

    /// Make every call to the renderer method `op` (e.g. `"resize"`,
    /// `"show_tooltip"`) fail with `err`.
    pub async fn fail_on(&self, op: &'static str, err: HeatcalError) {
        self.state.lock().await.failures.insert(op, err);
    }

    /// Copy of the call log.
    pub async fn ops(&self) -> Vec<RenderOp> {
        self.state.lock().await.log.clone()
    }

    /// Return and clear the call log.
    pub async fn drain(&self) -> Vec<RenderOp> {
        std::mem::take(&mut self.state.lock().await.log)
    }

    /// Clear the log, failures and enter behaviour.
    pub async fn reset(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
    }
}

/// Renderer that records calls instead of drawing.
pub struct RecordingRenderer {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl RecordingRenderer {
    /// Create a renderer and the controller that observes it.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn Renderer>, RendererController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = RendererController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn Renderer>, controller)
    }

    async fn record(&self, op_name: &'static str, op: RenderOp) -> Result<(), HeatcalError> {
        let mut guard = self.state.lock().await;
        if let Some(err) = guard.failures.get(op_name) {
            return Err(err.clone());
        }
        guard.log.push(op);
        Ok(())
    }
}

#[async_trait]
impl Renderer for RecordingRenderer {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn resize(&self, width: f64, height: f64) -> Result<(), HeatcalError> {
        self.record("resize", RenderOp::Resize { width, height })
            .await
    }

    async fn exit(&self, plan: ExitPlan) -> Result<(), HeatcalError> {
        self.record("exit", RenderOp::Exit(plan)).await
    }

    async fn clear(&self) -> Result<(), HeatcalError> {
        self.record("clear", RenderOp::Clear).await
    }

    async fn draw_labels(&self, labels: &[AxisLabel]) -> Result<(), HeatcalError> {
        self.record("draw_labels", RenderOp::Labels(labels.to_vec()))
            .await
    }

    async fn draw_back_button(&self, button: &BackButton) -> Result<(), HeatcalError> {
        self.record("draw_back_button", RenderOp::BackButton(*button))
            .await
    }

    async fn enter(
        &self,
        cell: &CellGeometry,
        timing: EntranceTiming,
    ) -> Result<(), HeatcalError> {
        self.record(
            "enter",
            RenderOp::Enter {
                cell: cell.id,
                timing,
            },
        )
        .await?;
        // snapshot the behaviour; the lock is not held while animating
        let behavior = self.state.lock().await.enter.clone();
        match behavior {
            EnterBehavior::Animate => tokio::time::sleep(timing.delay + timing.duration).await,
            EnterBehavior::Instant => {}
            EnterBehavior::Hang => std::future::pending::<()>().await,
            EnterBehavior::Fail(err) => return Err(err),
        }
        self.state.lock().await.log.push(RenderOp::Entered(cell.id));
        Ok(())
    }

    async fn set_opacity(
        &self,
        updates: &[(CellId, f64)],
        _duration: Duration,
    ) -> Result<(), HeatcalError> {
        self.record("set_opacity", RenderOp::SetOpacity(updates.to_vec()))
            .await
    }

    async fn emphasize(
        &self,
        cell: CellId,
        size: f64,
        _duration: Duration,
    ) -> Result<(), HeatcalError> {
        self.record("emphasize", RenderOp::Emphasize { cell, size })
            .await
    }

    async fn restore(&self, cell: &CellGeometry, _duration: Duration) -> Result<(), HeatcalError> {
        self.record("restore", RenderOp::Restore(cell.id)).await
    }

    async fn show_tooltip(&self, tooltip: &Tooltip) -> Result<(), HeatcalError> {
        self.record("show_tooltip", RenderOp::ShowTooltip(tooltip.clone()))
            .await
    }

    async fn hide_tooltip(&self) -> Result<(), HeatcalError> {
        self.record("hide_tooltip", RenderOp::HideTooltip).await
    }
}
