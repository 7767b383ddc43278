//! Boot phases
//!
//! The host runs initialization hooks at fixed points around the first scene
//! load. Each phase runs at most once.

/// Points during startup where initialization hooks fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootPhase {
    /// Before the first scene is loaded
    BeforeSceneLoad,
    /// Right after the first scene is loaded
    AfterSceneLoad,
}

impl BootPhase {
    /// Every phase, in the order they run
    pub const ORDER: [BootPhase; 2] = [BootPhase::BeforeSceneLoad, BootPhase::AfterSceneLoad];
}

/// Tracks which boot phases have already run
#[derive(Debug, Default)]
pub struct BootSequence {
    completed: Vec<BootPhase>,
}

impl BootSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `phase` as running.
    ///
    /// Returns false if the phase already ran or an earlier phase has not run
    /// yet; the caller must then skip its hooks.
    pub fn begin(&mut self, phase: BootPhase) -> bool {
        if self.completed.contains(&phase) {
            log::debug!("Boot phase {phase:?} already ran");
            return false;
        }

        let expected = BootPhase::ORDER.get(self.completed.len());
        if expected != Some(&phase) {
            log::warn!("Boot phase {phase:?} out of order, expected {expected:?}");
            return false;
        }

        self.completed.push(phase);
        true
    }

    /// Check whether `phase` has run
    pub fn has_run(&self, phase: BootPhase) -> bool {
        self.completed.contains(&phase)
    }

    /// Check whether every phase has run
    pub fn is_finished(&self) -> bool {
        self.completed.len() == BootPhase::ORDER.len()
    }
}
