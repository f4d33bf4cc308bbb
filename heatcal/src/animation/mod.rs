//! Staggered entrances and the all-finished barrier.

/// Entrance scheduling and the barrier over a batch of entrances.
pub mod coordinator;
/// Random entrance delays.
pub mod stagger;

pub use coordinator::{Entrance, run_staggered, schedule};
pub use stagger::stagger_delay;
