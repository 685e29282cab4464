use super::StateMachine;
use crate::core::{LegalMoveSet, Move, Role};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 記録済みの合法手列
///
/// One entry per decision round, in the order the rule engine enumerated the
/// moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScript {
    #[serde(default)]
    pub role: Role,
    pub rounds: Vec<LegalMoveSet>,
}

impl MatchScript {
    pub fn new(role: Role, rounds: Vec<LegalMoveSet>) -> Self {
        Self { role, rounds }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let script: MatchScript = serde_json::from_reader(reader)?;
        Ok(script)
    }
}

/// Replays a `MatchScript`. States are round indices; any move advances to
/// the next round.
#[derive(Debug, Clone)]
pub struct ScriptedMachine {
    script: MatchScript,
}

impl ScriptedMachine {
    pub fn new(script: MatchScript) -> Self {
        Self { script }
    }

    pub fn rounds(&self) -> usize {
        self.script.rounds.len()
    }
}

impl StateMachine for ScriptedMachine {
    type State = usize;

    fn initial_state(&self) -> usize {
        0
    }

    fn role(&self) -> &Role {
        &self.script.role
    }

    fn legal_moves(&self, state: &usize, _role: &Role) -> LegalMoveSet {
        self.script.rounds.get(*state).cloned().unwrap_or_default()
    }

    fn is_terminal(&self, state: &usize) -> bool {
        *state >= self.script.rounds.len()
    }

    fn next_state(&self, state: &usize, _mv: &Move) -> usize {
        state + 1
    }
}
