use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use heatcal_core::{DayRecord, HeatcalError};

use crate::animation::run_staggered;
use crate::core::{Heatmap, PointerEvent, Snapshot};

type Reply = oneshot::Sender<Result<(), HeatcalError>>;

enum Command {
    SetData(Vec<DayRecord>, Reply),
    SetWidth(f64, Reply),
    Pointer(PointerEvent, Reply),
    Snapshot(oneshot::Sender<Snapshot>),
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable host-side handle to a heatmap running on its own task.
///
/// Every method waits until the event has been fully processed by the loop,
/// so two calls from the same caller are always handled in order. Entrance
/// animations are not awaited; use [`HeatmapHandle::wait_unlocked`] to wait
/// for a navigation transition to end.
#[derive(Clone)]
pub struct HeatmapHandle {
    tx: mpsc::UnboundedSender<Command>,
    locked: watch::Receiver<bool>,
}

impl Heatmap {
    /// Move the heatmap onto a Tokio task and return a handle to it.
    ///
    /// The loop stops on [`HeatmapHandle::shutdown`] or when every handle is
    /// dropped. Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(self) -> HeatmapHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let (lock_tx, lock_rx) = watch::channel(self.is_locked());
        tokio::spawn(event_loop(self, rx, lock_tx));
        HeatmapHandle {
            tx,
            locked: lock_rx,
        }
    }
}

async fn event_loop(
    mut heatmap: Heatmap,
    mut commands: mpsc::UnboundedReceiver<Command>,
    lock_tx: watch::Sender<bool>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<u64>();

    loop {
        tokio::select! {
            cmd = commands.recv() => {
                let Some(cmd) = cmd else { break };
                match cmd {
                    Command::SetData(records, reply) => {
                        let res = heatmap.set_data(records).await;
                        publish(&mut heatmap, &done_tx, &lock_tx);
                        let _ = reply.send(res);
                    }
                    Command::SetWidth(width, reply) => {
                        let res = heatmap.set_width(width).await;
                        publish(&mut heatmap, &done_tx, &lock_tx);
                        let _ = reply.send(res);
                    }
                    Command::Pointer(event, reply) => {
                        let res = heatmap.pointer(event).await;
                        publish(&mut heatmap, &done_tx, &lock_tx);
                        let _ = reply.send(res);
                    }
                    Command::Snapshot(reply) => {
                        let _ = reply.send(heatmap.snapshot());
                    }
                    Command::Shutdown(reply) => {
                        let _ = reply.send(());
                        break;
                    }
                }
            }
            Some(pass) = done_rx.recv() => {
                if let Err(_e) = heatmap.finish(pass).await {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(pass, error = %_e, "deferred relayout failed");
                }
                publish(&mut heatmap, &done_tx, &lock_tx);
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("heatmap event loop stopped");
}

/// Start the entrances left by the last step and publish the lock state.
fn publish(heatmap: &mut Heatmap, done: &mpsc::UnboundedSender<u64>, lock: &watch::Sender<bool>) {
    for batch in heatmap.take_entrances() {
        let renderer = Arc::clone(&heatmap.renderer);
        let done = done.clone();
        tokio::spawn(async move {
            let pass = batch.pass;
            let res = run_staggered(&*renderer, &batch.entrances, move || {
                let _ = done.send(pass);
            })
            .await;
            if let Err(_e) = res {
                #[cfg(feature = "tracing")]
                tracing::warn!(pass, renderer = renderer.name(), error = %_e, "entrance failed");
            }
        });
    }
    lock.send_replace(heatmap.is_locked());
}

impl HeatmapHandle {
    /// Replace the records and relayout.
    ///
    /// # Errors
    /// `Closed` if the loop has stopped, or the first renderer error of the
    /// layout pass.
    pub async fn set_data(&self, records: Vec<DayRecord>) -> Result<(), HeatcalError> {
        self.request(|reply| Command::SetData(records, reply)).await
    }

    /// Report a new container width.
    ///
    /// # Errors
    /// `Closed` if the loop has stopped, or the first renderer error of the
    /// layout pass.
    pub async fn set_width(&self, width: f64) -> Result<(), HeatcalError> {
        self.request(|reply| Command::SetWidth(width, reply)).await
    }

    /// Forward a hit-tested pointer event.
    ///
    /// # Errors
    /// `Closed` if the loop has stopped, or the first renderer error caused by
    /// the event.
    pub async fn on_pointer_event(&self, event: PointerEvent) -> Result<(), HeatcalError> {
        self.request(|reply| Command::Pointer(event, reply)).await
    }

    /// Current navigation state and scene.
    ///
    /// # Errors
    /// `Closed` if the loop has stopped.
    pub async fn snapshot(&self) -> Result<Snapshot, HeatcalError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Snapshot(reply))
            .map_err(|_| HeatcalError::Closed)?;
        rx.await.map_err(|_| HeatcalError::Closed)
    }

    /// Whether a navigation transition is animating right now.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        *self.locked.borrow()
    }

    /// Resolve once no navigation transition is animating.
    ///
    /// # Errors
    /// `Closed` if the loop stopped while a transition was in flight.
    pub async fn wait_unlocked(&self) -> Result<(), HeatcalError> {
        let mut rx = self.locked.clone();
        rx.wait_for(|locked| !*locked)
            .await
            .map(|_| ())
            .map_err(|_| HeatcalError::Closed)
    }

    /// Stop the event loop. Animations already started run to completion.
    ///
    /// # Errors
    /// `Closed` if the loop had already stopped.
    pub async fn shutdown(&self) -> Result<(), HeatcalError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Shutdown(reply))
            .map_err(|_| HeatcalError::Closed)?;
        rx.await.map_err(|_| HeatcalError::Closed)
    }

    async fn request<F>(&self, make: F) -> Result<(), HeatcalError>
    where
        F: FnOnce(Reply) -> Command,
    {
        let (reply, rx) = oneshot::channel();
        self.tx.send(make(reply)).map_err(|_| HeatcalError::Closed)?;
        rx.await.map_err(|_| HeatcalError::Closed)?
    }
}
