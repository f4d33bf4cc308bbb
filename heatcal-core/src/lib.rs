//! heatcal-core
//!
//! Pure algorithms and external seams of the heatcal calendar heatmap.
//!
//! - `calendar`: the `Calendar` service and its chrono-backed implementation.
//! - `summary`: per-day aggregation of activity slices.
//! - `layout`: one layout function per granularity, producing a `Scene`.
//! - `tooltip`: tooltip placement and content.
//! - `highlight`: opacity plans for label hovering.
//! - `renderer`: the `Renderer` trait implemented by drawing backends.
//!
//! Nothing in this crate draws or sleeps; the `heatcal` crate drives these
//! functions from its event loop.
#![warn(missing_docs)]

/// Calendar service used for every date computation.
pub mod calendar;
/// Human-readable duration and date strings.
pub mod format;
/// Opacity plans for label hover.
pub mod highlight;
pub mod layout;
/// Drawing backend seam.
pub mod renderer;
/// Linear, band and colour scales.
pub mod scale;
/// Per-day aggregation of activity slices.
pub mod summary;
/// Tooltip placement and content.
pub mod tooltip;

pub use calendar::{Calendar, ChronoCalendar};
pub use format::{format_day, format_day_time, format_duration};
pub use layout::{LayoutInput, compute_scene, frame};
pub use renderer::{EntranceTiming, ExitMotion, ExitPlan, Renderer};
pub use summary::{prepare_batch, summarize};
pub use tooltip::{Tooltip, place};

pub use heatcal_types::*;
