//! Error taxonomy for move selection.
//!
//! `SelectError` is propagated to the caller and never retried.
//! `ObserverError` is caught inside the observer list and only logged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The caller handed over a terminal or stuck position.
    #[error("no legal moves to select from")]
    EmptyMoveSet,

    /// A finite (scripted) random source ran dry.
    #[error("random source exhausted after {draws} draws")]
    RandomSourceExhausted { draws: usize },

    /// A scripted random source produced an index outside `[0, len)`.
    #[error("random source produced index {index} for {len} legal moves")]
    RandomSourceOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("observer '{observer}' failed: {reason}")]
pub struct ObserverError {
    pub observer: String,
    pub reason: String,
}

impl ObserverError {
    pub fn new(observer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            observer: observer.into(),
            reason: reason.into(),
        }
    }
}
