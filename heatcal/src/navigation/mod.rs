//! Granularity, anchor, history and transition lock.

pub mod state_machine;

pub use state_machine::{Action, Event, Navigator, Target};
