use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use heatcal_core::layout::{self, LayoutInput};
use heatcal_core::{
    Calendar, CellId, ChronoCalendar, DayRecord, DetailEntry, Frame, Granularity, HeatcalError,
    HeatmapConfig, HitTarget, LabelKey, Renderer, Scene, Selection, highlight, tooltip,
};

use crate::animation::{Entrance, run_staggered, schedule};
use crate::navigation::{Action, Event, Navigator, Target};

/// Callback invoked with the activity slice clicked in the day view.
pub type DetailHandler = Arc<dyn Fn(&DetailEntry) + Send + Sync>;

/// A pointer event reported by the host, already hit-tested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "hit", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Pointer pressed and released on the target.
    Click(HitTarget),
    /// Pointer moved onto the target.
    Enter(HitTarget),
    /// Pointer moved off the target.
    Leave(HitTarget),
}

/// Entrances produced by one layout pass.
///
/// Whoever drives the heatmap runs them (see [`run_staggered`]) and reports
/// the pass back with [`Heatmap::finish`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntranceBatch {
    /// Layout pass that produced the entrances.
    pub pass: u64,
    /// One entry per cell of the new scene.
    pub entrances: Vec<Entrance>,
}

/// Point-in-time view of the navigation state and the drawn scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Active granularity and anchor.
    pub selection: Selection,
    /// Visited granularities, current one last.
    pub history: Vec<Granularity>,
    /// Whether a navigation transition is animating.
    pub locked: bool,
    /// Scene on screen, if anything has been drawn.
    pub scene: Option<Scene>,
}

/// The calendar heatmap engine.
///
/// Owns the records, the navigation state and the current scene, and turns
/// host events into renderer calls. It never waits on entrance animations
/// itself: each layout pass leaves an [`EntranceBatch`] behind for the
/// driver. [`Heatmap::spawn`](crate::Heatmap::spawn) runs them on tasks;
/// [`Heatmap::settle`] runs them inline.
pub struct Heatmap {
    pub(crate) renderer: Arc<dyn Renderer>,
    pub(crate) calendar: Arc<dyn Calendar>,
    pub(crate) cfg: HeatmapConfig,
    pub(crate) handler: Option<DetailHandler>,
    pub(crate) rng: Box<dyn RngCore + Send>,
    pub(crate) nav: Navigator,
    pub(crate) records: Vec<DayRecord>,
    pub(crate) width: f64,
    pub(crate) frame: Option<Frame>,
    pub(crate) scene: Option<Scene>,
    pub(crate) pending: Vec<EntranceBatch>,
}

/// Builder for a [`Heatmap`].
pub struct HeatmapBuilder {
    renderer: Option<Arc<dyn Renderer>>,
    calendar: Option<Arc<dyn Calendar>>,
    cfg: HeatmapConfig,
    color: Option<String>,
    handler: Option<DetailHandler>,
    rng: Option<Box<dyn RngCore + Send>>,
}

impl Default for HeatmapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeatmapBuilder {
    /// A builder with the default configuration and no renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderer: None,
            calendar: None,
            cfg: HeatmapConfig::default(),
            color: None,
            handler: None,
            rng: None,
        }
    }

    /// Drawing backend. Required.
    #[must_use]
    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Calendar service. Defaults to UTC day boundaries with the configured
    /// week convention.
    #[must_use]
    pub fn calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Replace the whole configuration, including anything set by an earlier
    /// `overview` call.
    #[must_use]
    pub fn config(mut self, cfg: HeatmapConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Top colour of the fill scales as a CSS-style string (`#ff4500`,
    /// `#f40`, `rgb(255, 69, 0)`). Parsed by [`build`](Self::build).
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Granularity shown first.
    #[must_use]
    pub const fn overview(mut self, overview: Granularity) -> Self {
        self.cfg.overview = overview;
        self
    }

    /// Called when a day-view bar is clicked.
    #[must_use]
    pub fn handler<F>(mut self, f: F) -> Self
    where
        F: Fn(&DetailEntry) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(f));
        self
    }

    /// Seed the entrance-delay generator for reproducible staggering.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(Box::new(StdRng::seed_from_u64(seed)));
        self
    }

    /// Use a custom entrance-delay generator.
    #[must_use]
    pub fn rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Build the heatmap.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no renderer was set or the configuration is
    /// rejected by [`HeatmapConfig::validate`], and `InvalidColor` when the
    /// colour string does not parse.
    pub fn build(mut self) -> Result<Heatmap, HeatcalError> {
        if let Some(color) = &self.color {
            self.cfg.color = color.parse()?;
        }
        self.cfg.validate()?;
        let Some(renderer) = self.renderer else {
            return Err(HeatcalError::invalid_arg(
                "no renderer set; add one via renderer(...)",
            ));
        };
        let calendar: Arc<dyn Calendar> = match self.calendar {
            Some(calendar) => calendar,
            None => Arc::new(ChronoCalendar::new(chrono_tz::UTC, self.cfg.week)),
        };
        let rng: Box<dyn RngCore + Send> = match self.rng {
            Some(rng) => rng,
            None => Box::new(StdRng::from_os_rng()),
        };
        Ok(Heatmap {
            renderer,
            calendar,
            nav: Navigator::new(self.cfg.overview),
            cfg: self.cfg,
            handler: self.handler,
            rng,
            records: Vec::new(),
            width: 0.0,
            frame: None,
            scene: None,
            pending: Vec::new(),
        })
    }
}

impl Heatmap {
    /// Start building a heatmap.
    ///
    /// ```rust,ignore
    /// let heatmap = heatcal::Heatmap::builder()
    ///     .renderer(Arc::new(MyCanvas::new()))
    ///     .color("#1e90ff")
    ///     .handler(|d| println!("clicked {}", d.name))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> HeatmapBuilder {
        HeatmapBuilder::new()
    }

    /// Active granularity and anchor.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.nav.selection()
    }

    /// Visited granularities, current one last.
    #[must_use]
    pub fn history(&self) -> &[Granularity] {
        &self.nav.history
    }

    /// Whether a navigation transition is still animating.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.nav.is_locked()
    }

    /// The scene currently on screen.
    #[must_use]
    pub const fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Prepared records, ascending by date.
    #[must_use]
    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    /// Configuration the heatmap was built with.
    #[must_use]
    pub const fn config(&self) -> &HeatmapConfig {
        &self.cfg
    }

    /// Copy of the navigation state and current scene.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            selection: self.selection(),
            history: self.nav.history.clone(),
            locked: self.is_locked(),
            scene: self.scene.clone(),
        }
    }

    /// Entrance batches left by layout passes since the last call.
    pub fn take_entrances(&mut self) -> Vec<EntranceBatch> {
        std::mem::take(&mut self.pending)
    }

    /// Replace the records and relayout the current view.
    ///
    /// # Errors
    /// Returns the first renderer error; the state still advances.
    pub async fn set_data(&mut self, records: Vec<DayRecord>) -> Result<(), HeatcalError> {
        self.records = heatcal_core::prepare_batch(records);
        self.dispatch(Event::Relayout).await
    }

    /// Report the container width and relayout the current view.
    ///
    /// # Errors
    /// Returns the first renderer error; the state still advances.
    pub async fn set_width(&mut self, width: f64) -> Result<(), HeatcalError> {
        self.width = width;
        self.dispatch(Event::Relayout).await
    }

    /// Handle a pointer event. Targets that are not part of the current
    /// scene are ignored.
    ///
    /// # Errors
    /// Returns the first renderer error; the state still advances.
    pub async fn pointer(&mut self, event: PointerEvent) -> Result<(), HeatcalError> {
        match event {
            PointerEvent::Click(hit) => {
                let target = self.resolve(&hit);
                self.dispatch(Event::Click(target)).await
            }
            PointerEvent::Enter(hit) if self.in_scene(&hit) => {
                self.dispatch(Event::Enter(hit)).await
            }
            PointerEvent::Leave(hit) if self.in_scene(&hit) => {
                self.dispatch(Event::Leave(hit)).await
            }
            PointerEvent::Enter(_) | PointerEvent::Leave(_) => Ok(()),
        }
    }

    /// Report that every entrance of layout pass `pass` has finished.
    ///
    /// # Errors
    /// Returns the first renderer error of a deferred relayout.
    pub async fn finish(&mut self, pass: u64) -> Result<(), HeatcalError> {
        self.dispatch(Event::AnimationsFinished { pass }).await
    }

    /// Run pending entrance batches inline, reporting each pass as it ends,
    /// until none are left.
    ///
    /// # Errors
    /// Returns the first error; every batch is still run and finished.
    pub async fn settle(&mut self) -> Result<(), HeatcalError> {
        let mut first_err = None;
        let renderer = Arc::clone(&self.renderer);
        while !self.pending.is_empty() {
            for batch in self.take_entrances() {
                if let Err(e) = run_staggered(&*renderer, &batch.entrances, || {}).await {
                    first_err.get_or_insert(e);
                }
                if let Err(e) = self.finish(batch.pass).await {
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    async fn dispatch(&mut self, event: Event) -> Result<(), HeatcalError> {
        let mut queue = VecDeque::from([event]);
        let mut first_err = None;
        while let Some(event) = queue.pop_front() {
            let (nav, actions) = std::mem::take(&mut self.nav).handle(event);
            self.nav = nav;
            for action in actions {
                if let Err(e) = self.apply(action, &mut queue).await {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %e, renderer = self.renderer.name(), "action failed");
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    async fn apply(
        &mut self,
        action: Action,
        queue: &mut VecDeque<Event>,
    ) -> Result<(), HeatcalError> {
        match action {
            Action::HideTooltip => self.renderer.hide_tooltip().await,
            Action::RemoveView { .. } => {
                let Some(scene) = self.scene.take() else {
                    return Ok(());
                };
                #[cfg(feature = "tracing")]
                tracing::info!(
                    from = %scene.granularity,
                    to = %self.nav.granularity,
                    history = self.nav.history.len(),
                    "navigating"
                );
                self.renderer
                    .exit(layout::exit_plan(&scene, self.cfg.transition))
                    .await
            }
            Action::Render { pass, .. } => match self.render(pass).await {
                Ok(Some(batch)) => {
                    self.pending.push(batch);
                    Ok(())
                }
                Ok(None) => {
                    queue.push_back(Event::AnimationsFinished { pass });
                    Ok(())
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(pass, "layout pass failed; releasing its lock");
                    queue.push_back(Event::AnimationsFinished { pass });
                    Err(e)
                }
            },
            Action::ShowTooltip(id) => {
                let Some(scene) = &self.scene else {
                    return Ok(());
                };
                match tooltip::for_cell(
                    scene,
                    &id,
                    &self.records,
                    &*self.calendar,
                    &self.cfg.tooltip,
                ) {
                    Some(t) => self.renderer.show_tooltip(&t).await,
                    None => Ok(()),
                }
            }
            Action::Emphasize(id) => {
                let Some(scene) = &self.scene else {
                    return Ok(());
                };
                let size = scene.frame.cell_size * 1.1;
                self.renderer
                    .emphasize(id, size, self.cfg.transition)
                    .await
            }
            Action::Restore(id) => match self.scene.as_ref().and_then(|s| s.cell(&id)) {
                Some(cell) => self.renderer.restore(cell, self.cfg.transition / 2).await,
                None => Ok(()),
            },
            Action::Highlight(key) => {
                let Some(scene) = &self.scene else {
                    return Ok(());
                };
                let updates =
                    highlight::label_hover(scene, &key, self.cfg.dim_opacity, &*self.calendar);
                self.renderer
                    .set_opacity(&updates, self.cfg.transition)
                    .await
            }
            Action::ClearHighlight => {
                let Some(scene) = &self.scene else {
                    return Ok(());
                };
                self.renderer
                    .set_opacity(&highlight::restore(scene), self.cfg.transition)
                    .await
            }
            Action::InvokeHandler { date, index } => {
                if let (Some(handler), Some(detail)) = (&self.handler, self.detail(date, index)) {
                    handler(detail);
                }
                Ok(())
            }
        }
    }

    /// Lay out and draw the current selection. `None` when there is nothing
    /// to draw: no records or no usable width yet.
    async fn render(&mut self, pass: u64) -> Result<Option<EntranceBatch>, HeatcalError> {
        if self.records.is_empty() {
            if self.scene.take().is_some() {
                self.renderer.clear().await?;
            }
            return Ok(None);
        }
        let Some(frame) = layout::frame(self.width, &*self.calendar, &self.cfg) else {
            return Ok(None);
        };
        if self.frame != Some(frame) {
            self.renderer.resize(frame.width, frame.height).await?;
            self.frame = Some(frame);
        }
        if self.scene.take().is_some() {
            self.renderer.clear().await?;
        }

        let scene = layout::compute_scene(&LayoutInput {
            records: &self.records,
            frame,
            selection: self.nav.selection(),
            config: &self.cfg,
            calendar: &*self.calendar,
        });
        self.renderer.draw_labels(&scene.labels).await?;
        if let Some(button) = &scene.back_button {
            self.renderer.draw_back_button(button).await?;
        }
        let entrances = schedule(scene.cells.clone(), self.cfg.transition, &mut *self.rng);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            pass,
            granularity = %scene.granularity,
            cells = entrances.len(),
            "scene drawn"
        );
        self.scene = Some(scene);
        Ok(Some(EntranceBatch { pass, entrances }))
    }

    fn in_scene(&self, hit: &HitTarget) -> bool {
        let Some(scene) = &self.scene else {
            return false;
        };
        match hit {
            HitTarget::Cell(id) => scene.cell(id).is_some(),
            HitTarget::Label(key) => scene.label(key).is_some(),
            HitTarget::Back => scene.back_button.is_some(),
        }
    }

    fn resolve(&self, hit: &HitTarget) -> Target {
        if !self.in_scene(hit) {
            return Target::None;
        }
        match hit {
            HitTarget::Cell(CellId::Day { date } | CellId::Segment { date, .. }) => Target::Day {
                date: *date,
                total: self.record(*date).map_or(0, |r| r.total),
            },
            HitTarget::Cell(CellId::Detail { date, index }) => Target::Detail {
                date: *date,
                index: *index,
            },
            HitTarget::Label(LabelKey::Month(first)) => {
                let start = self.calendar.start_of_month(*first);
                let end = self.calendar.next_month(start);
                Target::Month {
                    start,
                    has_records: self.any_between(start, end),
                }
            }
            HitTarget::Label(LabelKey::Week(first)) => {
                let start = self.calendar.start_of_week(*first);
                let end = start.checked_add_days(Days::new(7)).unwrap_or(start);
                Target::Week {
                    start,
                    has_records: self.any_between(start, end),
                }
            }
            HitTarget::Label(_) => Target::None,
            HitTarget::Back => Target::Back,
        }
    }

    fn record(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.records.iter().find(|r| r.date == date)
    }

    fn detail(&self, date: NaiveDate, index: usize) -> Option<&DetailEntry> {
        self.record(date)?.details.get(index)
    }

    fn any_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.records.iter().any(|r| start <= r.date && r.date < end)
    }
}
