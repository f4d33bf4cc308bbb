//! heatcal turns a year of per-day activity records into a calendar heatmap
//! you can drill into.
//!
//! Overview
//! - Four zoom levels: a trailing-year grid of days, a month of stacked bars,
//!   a single week, and one day's activity slices laid out on a time axis.
//! - Layout is pure (`heatcal_core::layout`); drawing is delegated to a
//!   [`Renderer`] you implement for your surface.
//! - Navigation is a pure state machine ([`navigation::Navigator`]) with a
//!   history stack for single-step "back" and a transition lock that drops
//!   clicks while entrance animations are running.
//! - Entrances are staggered with random delays; a barrier
//!   ([`animation::run_staggered`]) releases the lock once the last one
//!   finishes.
//!
//! Key behaviors
//! - Clicking a day with no tracked time, or a month/week label with no
//!   records, does nothing.
//! - Hover (tooltips, label highlighting, year-cell pulse) is ignored while a
//!   transition runs.
//! - Data and width changes that arrive during a transition are applied as
//!   one relayout when it ends.
//! - Clicking a bar in the day view calls the `handler` registered on the
//!   builder; this works even mid-transition.
//!
//! Examples
//! Driving a heatmap from a host event loop:
//! ```rust,ignore
//! use std::sync::Arc;
//! use heatcal::{Heatmap, HitTarget, CellId, PointerEvent};
//!
//! let handle = Heatmap::builder()
//!     .renderer(Arc::new(MyCanvas::new()))
//!     .color("#ff4500")
//!     .handler(|slice| println!("{} for {}s", slice.name, slice.value))
//!     .build()?
//!     .spawn();
//!
//! handle.set_width(1200.0).await?;
//! handle.set_data(records).await?;
//! handle
//!     .on_pointer_event(PointerEvent::Click(HitTarget::Cell(CellId::Day { date })))
//!     .await?;
//! handle.wait_unlocked().await?;
//! ```
//!
//! Feature flags
//! - `tracing`: structured spans and events for layout passes, navigation
//!   and renderer failures.
#![warn(missing_docs)]

/// Staggered entrance scheduling and the all-finished barrier.
pub mod animation;
mod core;
mod handle;
/// Drill-down navigation state machine.
pub mod navigation;

pub use core::{DetailHandler, EntranceBatch, Heatmap, HeatmapBuilder, PointerEvent, Snapshot};
pub use handle::HeatmapHandle;

pub use heatcal_core::{
    Anchor, AxisLabel, BackButton, Calendar, CellGeometry, CellId, ChronoCalendar, DayRecord,
    DetailEntry, EntranceTiming, ExitMotion, ExitPlan, Fill, Frame, Granularity, HeatcalError,
    HeatmapConfig, HitTarget, LabelKey, Overflow, Point, Rect, Renderer, Rgb, Scene, Selection,
    SummaryEntry, Tooltip, TooltipConfig, WeekConvention,
};
