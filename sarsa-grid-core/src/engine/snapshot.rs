use crate::{ActionValueTable, Cell, EligibilityTable};

/// An owned copy of the observable state of an [`Engine`](super::Engine), taken between
/// steps.
///
/// The engine itself is not meant to be shared. A consumer on another thread receives
/// snapshots instead, so it never sees a table in the middle of an update sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Action values.
    pub q: ActionValueTable,

    /// Eligibility traces.
    pub e: EligibilityTable,

    /// Position of the actor.
    pub actor: Cell,

    /// Index of the current episode.
    pub episode: usize,

    /// Current epsilon.
    pub epsilon: f32,

    /// Number of steps taken since the engine was built.
    pub total_steps: usize,
}
