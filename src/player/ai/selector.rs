use super::random::RandomSource;
use crate::core::{Deadline, Decision, LegalMoveSet, Policy};
use crate::error::SelectError;
use crate::player::observer::{MoveObserver, ObserverList};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Reduces a legal move set to one move under a fixed policy.
///
/// Stateless across calls: the only state is the policy, the notification
/// flag and the observer list, all fixed by the owning gamer.
#[derive(Clone)]
pub struct MoveSelector {
    policy: Policy,
    notify: bool,
    observers: ObserverList,
}

impl MoveSelector {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            notify: true,
            observers: ObserverList::new(),
        }
    }

    /// Turns decision events on or off. Selection itself is unaffected.
    pub fn with_notifications(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn notifies(&self) -> bool {
        self.notify
    }

    pub fn register(&mut self, observer: Arc<dyn MoveObserver>) {
        self.observers.register(observer);
    }

    pub fn observers(&self) -> &ObserverList {
        &self.observers
    }

    pub fn observers_mut(&mut self) -> &mut ObserverList {
        &mut self.observers
    }

    pub fn select(
        &self,
        moves: LegalMoveSet,
        deadline: Deadline,
        rng: &mut dyn RandomSource,
    ) -> Result<Decision, SelectError> {
        let start = Instant::now();
        if deadline.has_passed() {
            warn!(policy = %self.policy, "deadline already passed before selection");
        }

        let index = pick_index(&moves, self.policy, rng)?;
        let chosen = moves[index].clone();
        let elapsed = start.elapsed();
        debug!(
            policy = %self.policy,
            index,
            legal = moves.len(),
            chosen = %chosen,
            "selected move"
        );

        let decision = Decision {
            chosen,
            legal_moves: moves,
            policy: self.policy,
            timestamp: Utc::now(),
            elapsed_ms: elapsed.as_millis() as u64,
            elapsed_us: elapsed.as_secs_f64() * 1_000_000.0,
        };
        if self.notify {
            self.observers.notify(&decision);
        }
        Ok(decision)
    }
}

/// Index of the move `policy` picks. No side effects beyond one draw from
/// `rng` for `UniformRandom`.
pub fn pick_index(
    moves: &LegalMoveSet,
    policy: Policy,
    rng: &mut dyn RandomSource,
) -> Result<usize, SelectError> {
    if moves.is_empty() {
        return Err(SelectError::EmptyMoveSet);
    }
    match policy {
        Policy::FirstInOrder => Ok(0),
        Policy::UniformRandom => {
            let index = rng.next_index(moves.len())?;
            if index >= moves.len() {
                return Err(SelectError::RandomSourceOutOfRange {
                    index,
                    len: moves.len(),
                });
            }
            Ok(index)
        }
    }
}
