//! Decision observers.
//!
//! Observers are pushed every `Decision` synchronously, in registration order.
//! A failing observer never affects the selection that produced the event.

use crate::core::Decision;
use crate::error::ObserverError;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

pub trait MoveObserver: Send + Sync {
    fn name(&self) -> &str;

    fn move_selected(&self, decision: &Decision) -> Result<(), ObserverError>;
}

#[derive(Default, Clone)]
pub struct ObserverList {
    observers: Vec<Arc<dyn MoveObserver>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Arc<dyn MoveObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Pushes `decision` to every observer and returns how many accepted it.
    pub fn notify(&self, decision: &Decision) -> usize {
        if self.observers.is_empty() {
            debug!(chosen = %decision.chosen, "no observers registered");
            return 0;
        }

        let mut delivered = 0;
        for observer in &self.observers {
            match observer.move_selected(decision) {
                Ok(()) => delivered += 1,
                Err(err) => warn!(error = %err, "dropping observer failure"),
            }
        }
        delivered
    }
}

/// Keeps every decision in memory.
#[derive(Debug, Default)]
pub struct DecisionLog {
    decisions: Mutex<Vec<Decision>>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decisions(&self) -> Vec<Decision> {
        match self.decisions.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.decisions.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MoveObserver for DecisionLog {
    fn name(&self) -> &str {
        "decision-log"
    }

    fn move_selected(&self, decision: &Decision) -> Result<(), ObserverError> {
        let mut guard = self
            .decisions
            .lock()
            .map_err(|_| ObserverError::new(self.name(), "log mutex poisoned"))?;
        guard.push(decision.clone());
        Ok(())
    }
}

/// Emits each decision as a structured `tracing` event.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    gamer: String,
}

impl TracingObserver {
    pub fn new(gamer: impl Into<String>) -> Self {
        Self {
            gamer: gamer.into(),
        }
    }
}

impl MoveObserver for TracingObserver {
    fn name(&self) -> &str {
        "tracing"
    }

    fn move_selected(&self, decision: &Decision) -> Result<(), ObserverError> {
        info!(
            gamer = %self.gamer,
            policy = %decision.policy,
            chosen = %decision.chosen,
            legal = decision.legal_moves.len(),
            elapsed_ms = decision.elapsed_ms,
            elapsed_us = decision.elapsed_us,
            "move selected"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LegalMoveSet, Move, Policy};
    use chrono::Utc;

    struct Failing;

    impl MoveObserver for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn move_selected(&self, _decision: &Decision) -> Result<(), ObserverError> {
            Err(ObserverError::new(self.name(), "display closed"))
        }
    }

    fn decision() -> Decision {
        Decision {
            chosen: Move::from("noop"),
            legal_moves: ["noop"].into_iter().collect::<LegalMoveSet>(),
            policy: Policy::FirstInOrder,
            timestamp: Utc::now(),
            elapsed_ms: 0,
            elapsed_us: 12.5,
        }
    }

    #[test]
    fn empty_list_delivers_nothing() {
        assert_eq!(ObserverList::new().notify(&decision()), 0);
    }

    #[test]
    fn failure_does_not_stop_later_observers() {
        let log = Arc::new(DecisionLog::new());
        let mut list = ObserverList::new();
        list.register(Arc::new(Failing));
        list.register(log.clone());
        list.register(Arc::new(TracingObserver::new("Legal")));

        assert_eq!(list.notify(&decision()), 2);
        assert_eq!(log.len(), 1);
        assert_eq!(log.decisions()[0].chosen, Move::from("noop"));
    }

    #[test]
    fn log_len_tracks_pushes() {
        let log = DecisionLog::new();
        assert!(log.is_empty());
        for _ in 0..3 {
            log.move_selected(&decision()).unwrap();
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.len(), log.decisions().len());
    }

    #[test]
    fn log_len_survives_a_poisoned_lock() {
        let log = Arc::new(DecisionLog::new());
        log.move_selected(&decision()).unwrap();
        let poisoner = log.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.decisions.lock().unwrap();
            panic!("poison the log");
        })
        .join();
        assert_eq!(log.len(), 1);
        assert!(!log.is_empty());
    }
}
