use chrono::NaiveDate;

use heatcal_core::{Anchor, CellId, Granularity, HitTarget, Selection};

/// What a click resolved to, with the facts the guards need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// A day cell or one of its segments.
    Day {
        /// Day clicked.
        date: NaiveDate,
        /// Tracked seconds on that day; zero blocks the drill-down.
        total: u64,
    },
    /// A month label of the year view.
    Month {
        /// First day of the month.
        start: NaiveDate,
        /// Whether any record falls inside the month.
        has_records: bool,
    },
    /// A week label of the month view.
    Week {
        /// First day of the week.
        start: NaiveDate,
        /// Whether any record falls inside the week.
        has_records: bool,
    },
    /// A bar of the day view.
    Detail {
        /// Day of the record.
        date: NaiveDate,
        /// Position in the record's details.
        index: usize,
    },
    /// The back button.
    Back,
    /// Anything that does not navigate.
    None,
}

/// Input to [`Navigator::handle`].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Records or width changed; the current view must be redrawn.
    Relayout,
    /// A click, already resolved against the current scene.
    Click(Target),
    /// Pointer moved onto a cell or label.
    Enter(HitTarget),
    /// Pointer moved off a cell or label.
    Leave(HitTarget),
    /// Every entrance of a layout pass has finished.
    AnimationsFinished {
        /// Pass number issued with the matching [`Action::Render`].
        pass: u64,
    },
}

/// Side effect requested by [`Navigator::handle`].
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Hide the tooltip.
    HideTooltip,
    /// Start the exit animation of the view being left.
    RemoveView {
        /// Granularity of the view being left.
        granularity: Granularity,
    },
    /// Lay out and draw the current selection.
    Render {
        /// Number reported back through [`Event::AnimationsFinished`].
        pass: u64,
        /// Whether this pass holds the transition lock until its entrances
        /// finish.
        locked: bool,
    },
    /// Show the tooltip of a cell.
    ShowTooltip(CellId),
    /// Pulse a year cell.
    Emphasize(CellId),
    /// Undo [`Action::Emphasize`].
    Restore(CellId),
    /// Dim every cell the hovered label does not match.
    Highlight(heatcal_core::LabelKey),
    /// Put every cell back to its own opacity.
    ClearHighlight,
    /// Call the host's detail handler.
    InvokeHandler {
        /// Day of the record.
        date: NaiveDate,
        /// Position in the record's details.
        index: usize,
    },
}

/// The drill-down state machine.
///
/// `handle` is pure: it consumes the state and an event and returns the next
/// state plus the side effects for the driver to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigator {
    /// View on screen.
    pub granularity: Granularity,
    /// Date the view is centred on.
    pub anchor: Option<Anchor>,
    /// Visited granularities; the top is always the current one.
    pub history: Vec<Granularity>,
    /// Pass holding the transition lock, if any.
    pub lock: Option<u64>,
    /// Last pass number issued.
    pub pass: u64,
    /// A relayout arrived while locked and runs once the lock clears.
    pub relayout_pending: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Granularity::Year)
    }
}

impl Navigator {
    /// Start at `overview` with `Year` at the bottom of the history.
    #[must_use]
    pub fn new(overview: Granularity) -> Self {
        let mut history = vec![Granularity::Year];
        if overview != Granularity::Year {
            history.push(overview);
        }
        Self {
            granularity: overview,
            anchor: None,
            history,
            lock: None,
            pass: 0,
            relayout_pending: false,
        }
    }

    /// Granularity and anchor as one value.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        Selection {
            granularity: self.granularity,
            anchor: self.anchor,
        }
    }

    /// Whether a navigation transition holds the lock.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Consume one event and return the next state with its actions.
    #[must_use]
    pub fn handle(mut self, event: Event) -> (Self, Vec<Action>) {
        // handler clicks are not navigation and ignore the lock
        if let Event::Click(Target::Detail { date, index }) = event {
            let actions = if self.granularity == Granularity::Day {
                vec![Action::InvokeHandler { date, index }]
            } else {
                Vec::new()
            };
            return (self, actions);
        }

        match event {
            Event::AnimationsFinished { pass } => {
                if self.lock != Some(pass) {
                    return (self, Vec::new());
                }
                self.lock = None;
                if self.relayout_pending {
                    self.relayout_pending = false;
                    let pass = self.next_pass();
                    return (self, vec![Action::Render { pass, locked: false }]);
                }
                (self, Vec::new())
            }
            Event::Relayout if self.is_locked() => {
                self.relayout_pending = true;
                (self, Vec::new())
            }
            Event::Relayout => {
                let pass = self.next_pass();
                (self, vec![Action::Render { pass, locked: false }])
            }
            // everything below is pointer-driven and dropped while locked
            _ if self.is_locked() => (self, Vec::new()),
            Event::Click(target) => self.click(target),
            Event::Enter(hit) => {
                let actions = match hit {
                    HitTarget::Cell(id) => {
                        let mut out = vec![Action::ShowTooltip(id)];
                        if self.granularity == Granularity::Year {
                            out.push(Action::Emphasize(id));
                        }
                        out
                    }
                    HitTarget::Label(key) => vec![Action::Highlight(key)],
                    HitTarget::Back => Vec::new(),
                };
                (self, actions)
            }
            Event::Leave(hit) => {
                let actions = match hit {
                    HitTarget::Cell(id) if self.granularity == Granularity::Year => {
                        vec![Action::Restore(id), Action::HideTooltip]
                    }
                    HitTarget::Cell(_) => vec![Action::HideTooltip],
                    HitTarget::Label(_) => vec![Action::ClearHighlight],
                    HitTarget::Back => Vec::new(),
                };
                (self, actions)
            }
        }
    }

    fn click(self, target: Target) -> (Self, Vec<Action>) {
        use Granularity::{Day, Month, Week, Year};
        match (self.granularity, target) {
            (Year | Month | Week, Target::Day { date, total }) if total > 0 => {
                self.drill(Day, Anchor::Record(date))
            }
            (Year, Target::Month { start, has_records }) if has_records => {
                self.drill(Month, Anchor::Period(start))
            }
            (Month, Target::Week { start, has_records }) if has_records => {
                self.drill(Week, Anchor::Period(start))
            }
            (Month | Week | Day, Target::Back) => self.back(),
            _ => (self, Vec::new()),
        }
    }

    fn drill(mut self, to: Granularity, anchor: Anchor) -> (Self, Vec<Action>) {
        let from = self.granularity;
        self.granularity = to;
        self.anchor = Some(anchor);
        if self.history.last() != Some(&to) {
            self.history.push(to);
        }
        let pass = self.take_lock();
        (
            self,
            vec![
                Action::HideTooltip,
                Action::RemoveView { granularity: from },
                Action::Render { pass, locked: true },
            ],
        )
    }

    fn back(mut self) -> (Self, Vec<Action>) {
        let from = self.granularity;
        self.history.pop();
        if self.history.is_empty() {
            self.history.push(Granularity::Year);
        }
        self.granularity = self.history.last().copied().unwrap_or_default();
        let pass = self.take_lock();
        (
            self,
            vec![
                Action::HideTooltip,
                Action::RemoveView { granularity: from },
                Action::Render { pass, locked: true },
            ],
        )
    }

    fn next_pass(&mut self) -> u64 {
        self.pass += 1;
        self.pass
    }

    fn take_lock(&mut self) -> u64 {
        let pass = self.next_pass();
        self.lock = Some(pass);
        pass
    }
}
