pub mod script;

pub use script::{MatchScript, ScriptedMachine};

use crate::core::{Deadline, LegalMoveSet, Move, Role};
use crate::player::{GamerPhase, PlayerController};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// The rule engine a gamer plays against. States are opaque to the gamer.
pub trait StateMachine {
    type State: Clone;

    fn initial_state(&self) -> Self::State;

    fn role(&self) -> &Role;

    fn legal_moves(&self, state: &Self::State, role: &Role) -> LegalMoveSet;

    fn is_terminal(&self, state: &Self::State) -> bool;

    fn next_state(&self, state: &Self::State, mv: &Move) -> Self::State;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchClock {
    pub meta_game: Duration,
    pub per_move: Duration,
    pub max_rounds: usize,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self {
            meta_game: Duration::from_secs(5),
            per_move: Duration::from_secs(2),
            max_rounds: 500,
        }
    }
}

impl From<&crate::player::ai::config::ClockConfig> for MatchClock {
    fn from(clock: &crate::player::ai::config::ClockConfig) -> Self {
        Self {
            meta_game: clock.meta_game_budget(),
            per_move: clock.move_budget(),
            max_rounds: clock.max_rounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub gamer: String,
    pub moves: Vec<Move>,
    pub final_phase: GamerPhase,
    pub late_decisions: usize,
}

/// Drives one gamer through a match against a state machine.
pub struct Match<M: StateMachine> {
    machine: M,
    clock: MatchClock,
}

impl<M: StateMachine> Match<M> {
    pub fn new(machine: M, clock: MatchClock) -> Self {
        Self { machine, clock }
    }

    pub fn run(&self, gamer: &mut dyn PlayerController) -> anyhow::Result<MatchOutcome> {
        let role = self.machine.role().clone();
        let mut state = self.machine.initial_state();
        let mut moves = Vec::new();
        let mut late_decisions = 0;

        info!(gamer = gamer.name(), role = %role, "match started");
        gamer.preview(Deadline::after(self.clock.meta_game));
        gamer.meta_game(Deadline::after(self.clock.meta_game));

        loop {
            if self.machine.is_terminal(&state) {
                break;
            }
            if moves.len() >= self.clock.max_rounds {
                warn!(gamer = gamer.name(), rounds = moves.len(), "round limit reached");
                break;
            }

            let legal = self.machine.legal_moves(&state, &role);
            let deadline = Deadline::after(self.clock.per_move);
            let started = Instant::now();

            let mv = match gamer.choose_move(legal.clone(), deadline) {
                Ok(mv) => mv,
                Err(err) => {
                    gamer.abort();
                    let round = moves.len() + 1;
                    return Err(anyhow::Error::new(err)
                        .context(format!("round {}: {} failed to move", round, gamer.name())));
                }
            };

            if deadline.has_passed() {
                late_decisions += 1;
                warn!(
                    gamer = gamer.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "decision returned after deadline"
                );
            }
            if !legal.contains(&mv) {
                gamer.abort();
                anyhow::bail!(
                    "round {}: {} played illegal move {}",
                    moves.len() + 1,
                    gamer.name(),
                    mv
                );
            }

            state = self.machine.next_state(&state, &mv);
            moves.push(mv);
        }

        gamer.stop();
        info!(gamer = gamer.name(), rounds = moves.len(), "match finished");
        Ok(MatchOutcome {
            gamer: gamer.name().to_string(),
            moves,
            final_phase: gamer.phase(),
            late_decisions,
        })
    }
}
