//! Test doubles for heatcal.
//!
//! - [`RecordingRenderer`] logs every renderer call and animates entrances on
//!   the Tokio clock, so tests can assert on draw order and timing with
//!   `start_paused` runtimes.
//! - [`fixtures`] builds deterministic activity records.
#![warn(missing_docs)]

mod recording;

pub mod fixtures;

pub use recording::{EnterBehavior, RecordingRenderer, RenderOp, RendererController};
