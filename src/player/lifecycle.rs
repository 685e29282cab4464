use serde::{Deserialize, Serialize};
use std::fmt;

/// ゲーマーの状態
///
/// `Created -> MetaGaming -> [SelectingMove]* -> Stopped | Aborted`.
/// `Stopped` and `Aborted` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GamerPhase {
    #[default]
    Created,
    MetaGaming,
    SelectingMove,
    Stopped,
    Aborted,
}

impl GamerPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, GamerPhase::Stopped | GamerPhase::Aborted)
    }

    pub fn on_meta_game(self) -> GamerPhase {
        match self {
            GamerPhase::Created => GamerPhase::MetaGaming,
            other => other,
        }
    }

    pub fn on_select(self) -> GamerPhase {
        if self.is_finished() {
            self
        } else {
            GamerPhase::SelectingMove
        }
    }

    pub fn on_stop(self) -> GamerPhase {
        if self.is_finished() {
            self
        } else {
            GamerPhase::Stopped
        }
    }

    pub fn on_abort(self) -> GamerPhase {
        if self.is_finished() {
            self
        } else {
            GamerPhase::Aborted
        }
    }
}

impl fmt::Display for GamerPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
