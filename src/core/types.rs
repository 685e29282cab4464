use super::r#move::Move;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::time::{Duration, Instant};

/// ロール (手を選ぶ参加者)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Role(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::new("player")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Legal moves for one role at one decision point, in enumeration order.
///
/// Emptiness is representable so the selector can reject it; the order is
/// never changed after construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegalMoveSet(Vec<Move>);

impl LegalMoveSet {
    pub fn new(moves: Vec<Move>) -> Self {
        LegalMoveSet(moves)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Move> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&Move> {
        self.0.get(index)
    }

    pub fn contains(&self, mv: &Move) -> bool {
        self.0.contains(mv)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }
}

impl Index<usize> for LegalMoveSet {
    type Output = Move;

    fn index(&self, index: usize) -> &Move {
        &self.0[index]
    }
}

impl<M: Into<Move>> FromIterator<M> for LegalMoveSet {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        LegalMoveSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a LegalMoveSet {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Absolute wall-clock bound for a decision. Advisory: the caller's scheduler
/// enforces it, the selector only reports when it was already missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn at(at: Instant) -> Self {
        Deadline { at }
    }

    pub fn after(budget: Duration) -> Self {
        Deadline {
            at: Instant::now() + budget,
        }
    }

    pub fn instant(&self) -> Instant {
        self.at
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_move_set_keeps_enumeration_order() {
        let moves: LegalMoveSet = ["noop", "(mark 1 1)", "(mark 2 2)"].into_iter().collect();
        let ids: Vec<&str> = moves.iter().map(Move::as_str).collect();
        assert_eq!(ids, vec!["noop", "(mark 1 1)", "(mark 2 2)"]);
        assert_eq!(moves[1], Move::from("(mark 1 1)"));
        assert!(moves.contains(&Move::from("noop")));
        assert!(!moves.contains(&Move::from("(mark 3 3)")));
    }

    #[test]
    fn deadline_reports_remaining_time() {
        let future = Deadline::after(Duration::from_secs(60));
        assert!(!future.has_passed());
        assert!(future.remaining() > Duration::from_secs(50));

        let past = Deadline::at(Instant::now() - Duration::from_millis(1));
        assert!(past.has_passed());
        assert_eq!(past.remaining(), Duration::ZERO);
    }
}
