//! Session phase enum

use serde::{Deserialize, Serialize};

/// Phase of a voting session
///
/// Phases only ever move forward (`Idle -> Countdown -> Active -> Closed`);
/// the single exception is an explicit reset back to [`Phase::Idle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No active poll
    #[default]
    Idle,
    /// Fixed pre-roll before voting opens, so every participant's display
    /// can synchronize on a visible "starting in N…" cue
    Countdown,
    /// Votes are accepted
    Active,
    /// Window elapsed, results available
    Closed,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Idle => "idle",
            Phase::Countdown => "countdown",
            Phase::Active => "active",
            Phase::Closed => "closed",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Idle => "Idle",
            Phase::Countdown => "Countdown",
            Phase::Active => "Active",
            Phase::Closed => "Closed",
        }
    }

    /// Check if votes are accepted in this phase
    pub fn accepts_votes(&self) -> bool {
        matches!(self, Phase::Active)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
