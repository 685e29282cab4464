use super::policy::Policy;
use super::r#move::Move;
use super::types::LegalMoveSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One selection: what was chosen, from what, how, and when.
///
/// Built once per `select` call, handed to observers, then dropped by the
/// selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub chosen: Move,
    pub legal_moves: LegalMoveSet,
    pub policy: Policy,
    pub timestamp: DateTime<Utc>,
    pub elapsed_ms: u64,
    /// Same measurement as `elapsed_ms` at microsecond resolution; reflex
    /// selections usually finish well under a millisecond.
    #[serde(default)]
    pub elapsed_us: f64,
}

impl Decision {
    /// Position of the chosen move in the legal set.
    pub fn chosen_index(&self) -> Option<usize> {
        self.legal_moves.iter().position(|mv| *mv == self.chosen)
    }
}
