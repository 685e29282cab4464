use crate::core::{Deadline, LegalMoveSet, Move, Policy};
use crate::error::SelectError;
use crate::player::ai::config::GamerConfig;
use crate::player::ai::random::{self, RandomSource};
use crate::player::ai::MoveSelector;
use crate::player::lifecycle::GamerPhase;
use crate::player::observer::MoveObserver;
use crate::player::PlayerController;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A gamer that acts on reflex: the first legal move, or a uniformly random
/// one, regardless of the position.
pub struct ReflexGamer {
    name: String,
    selector: MoveSelector,
    rng: Box<dyn RandomSource + Send>,
    phase: GamerPhase,
}

impl ReflexGamer {
    pub fn new(policy: Policy, rng: Box<dyn RandomSource + Send>) -> Self {
        Self {
            name: policy.default_name().to_string(),
            selector: MoveSelector::new(policy),
            rng,
            phase: GamerPhase::Created,
        }
    }

    /// Plays the first enumerated legal move.
    pub fn legal() -> Self {
        Self::new(Policy::FirstInOrder, Box::new(random::from_entropy()))
    }

    /// Plays a uniformly random legal move from a ChaCha8 stream seeded with `seed`.
    pub fn random(seed: u64) -> Self {
        Self::new(Policy::UniformRandom, Box::new(random::seeded(seed)))
    }

    pub fn from_config(config: &GamerConfig) -> Self {
        let rng: Box<dyn RandomSource + Send> = match config.gamer.seed {
            Some(seed) => Box::new(random::seeded(seed)),
            None => Box::new(random::from_entropy()),
        };
        Self::new(config.gamer.policy, rng)
            .with_name(&config.display_name())
            .with_notifications(config.gamer.notify_observers)
    }

    /// Blank names keep the policy's default so `name()` is never empty.
    pub fn with_name(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.name = name.to_string();
        }
        self
    }

    pub fn with_notifications(mut self, notify: bool) -> Self {
        self.selector = self.selector.with_notifications(notify);
        self
    }

    pub fn register_observer(&mut self, observer: Arc<dyn MoveObserver>) {
        self.selector.register(observer);
    }

    pub fn policy(&self) -> Policy {
        self.selector.policy()
    }
}

impl PlayerController for ReflexGamer {
    fn name(&self) -> &str {
        &self.name
    }

    fn phase(&self) -> GamerPhase {
        self.phase
    }

    fn preview(&mut self, deadline: Deadline) {
        // Nothing to learn from a game ahead of time.
        debug!(gamer = %self.name, remaining_ms = deadline.remaining().as_millis() as u64, "preview");
    }

    fn meta_game(&mut self, deadline: Deadline) {
        // Reflex play needs no preparation.
        debug!(gamer = %self.name, remaining_ms = deadline.remaining().as_millis() as u64, "meta game");
        self.phase = self.phase.on_meta_game();
    }

    fn choose_move(
        &mut self,
        legal_moves: LegalMoveSet,
        deadline: Deadline,
    ) -> Result<Move, SelectError> {
        if self.phase.is_finished() {
            warn!(gamer = %self.name, phase = %self.phase, "move requested after match end");
        }
        let decision = self.selector.select(legal_moves, deadline, self.rng.as_mut())?;
        self.phase = self.phase.on_select();
        Ok(decision.chosen)
    }

    fn stop(&mut self) {
        if self.phase.is_finished() {
            debug!(gamer = %self.name, phase = %self.phase, "stop ignored");
            return;
        }
        info!(gamer = %self.name, "match stopped");
        self.phase = self.phase.on_stop();
    }

    fn abort(&mut self) {
        if self.phase.is_finished() {
            debug!(gamer = %self.name, phase = %self.phase, "abort ignored");
            return;
        }
        info!(gamer = %self.name, "match aborted");
        self.phase = self.phase.on_abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ai::random::ScriptedRandom;
    use crate::player::observer::DecisionLog;
    use rstest::rstest;
    use std::time::Duration;

    fn moves(ids: &[&str]) -> LegalMoveSet {
        ids.iter().copied().collect()
    }

    fn soon() -> Deadline {
        Deadline::after(Duration::from_millis(500))
    }

    #[test]
    fn legal_gamer_plays_first_move() {
        let mut gamer = ReflexGamer::legal();
        gamer.meta_game(soon());
        let mv = gamer
            .choose_move(moves(&["move_a", "move_b", "move_c"]), soon())
            .unwrap();
        assert_eq!(mv, Move::from("move_a"));
        assert_eq!(gamer.phase(), GamerPhase::SelectingMove);
    }

    #[test]
    fn random_gamer_is_reproducible() {
        let mut a = ReflexGamer::random(42);
        let mut b = ReflexGamer::random(42);
        for _ in 0..20 {
            let set = moves(&["up", "down", "left", "right"]);
            assert_eq!(
                a.choose_move(set.clone(), soon()).unwrap(),
                b.choose_move(set, soon()).unwrap()
            );
        }
    }

    #[test]
    fn random_gamer_seed_42_first_pick() {
        let mut gamer = ReflexGamer::random(42);
        let mv = gamer.choose_move(moves(&["up", "down"]), soon()).unwrap();
        assert_eq!(mv, Move::from("down"));
    }

    #[rstest]
    #[case::legal(Policy::FirstInOrder, "Legal")]
    #[case::random(Policy::UniformRandom, "Random")]
    fn names_are_never_empty(#[case] policy: Policy, #[case] expected: &str) {
        let gamer = ReflexGamer::new(policy, Box::new(random::seeded(0))).with_name("  ");
        assert_eq!(gamer.name(), expected);
        assert!(!gamer.name().is_empty());
    }

    #[test]
    fn empty_set_propagates_and_keeps_phase() {
        let mut gamer = ReflexGamer::legal();
        gamer.meta_game(soon());
        let result = gamer.choose_move(LegalMoveSet::default(), soon());
        assert_eq!(result, Err(SelectError::EmptyMoveSet));
        assert_eq!(gamer.phase(), GamerPhase::MetaGaming);
    }

    #[test]
    fn lifecycle_hooks_tolerate_any_order() {
        let mut gamer = ReflexGamer::random(1);
        gamer.preview(Deadline::after(Duration::ZERO));
        gamer.preview(soon());
        assert_eq!(gamer.phase(), GamerPhase::Created);
        gamer.meta_game(soon());
        gamer.preview(soon());
        assert_eq!(gamer.phase(), GamerPhase::MetaGaming);

        let mut gamer = ReflexGamer::random(1);
        gamer.stop();
        gamer.stop();
        gamer.abort();
        gamer.meta_game(Deadline::after(Duration::ZERO));
        gamer.preview(soon());
        assert_eq!(gamer.phase(), GamerPhase::Stopped);

        let mut gamer = ReflexGamer::random(1);
        gamer.abort();
        gamer.stop();
        gamer.preview(soon());
        assert_eq!(gamer.phase(), GamerPhase::Aborted);
    }

    #[test]
    fn finished_gamer_still_answers() {
        let mut gamer = ReflexGamer::legal();
        gamer.stop();
        let mv = gamer.choose_move(moves(&["a", "b"]), soon()).unwrap();
        assert_eq!(mv, Move::from("a"));
        assert_eq!(gamer.phase(), GamerPhase::Stopped);
    }

    #[test]
    fn observers_see_each_decision_unless_silenced() {
        let log = Arc::new(DecisionLog::new());
        let mut gamer = ReflexGamer::new(Policy::UniformRandom, Box::new(ScriptedRandom::new([1, 0])));
        gamer.register_observer(log.clone());
        gamer.choose_move(moves(&["a", "b"]), soon()).unwrap();
        gamer.choose_move(moves(&["a", "b"]), soon()).unwrap();

        let chosen: Vec<Move> = log.decisions().into_iter().map(|d| d.chosen).collect();
        assert_eq!(chosen, vec![Move::from("b"), Move::from("a")]);

        let silent_log = Arc::new(DecisionLog::new());
        let mut silent = ReflexGamer::legal().with_notifications(false);
        silent.register_observer(silent_log.clone());
        silent.choose_move(moves(&["a"]), soon()).unwrap();
        assert!(silent_log.is_empty());
    }

    #[test]
    fn exhausted_scripted_source_propagates() {
        let mut gamer = ReflexGamer::new(Policy::UniformRandom, Box::new(ScriptedRandom::default()));
        let result = gamer.choose_move(moves(&["a", "b"]), soon());
        assert_eq!(result, Err(SelectError::RandomSourceExhausted { draws: 0 }));
    }

    #[test]
    fn config_drives_construction() {
        let mut config = GamerConfig::default();
        config.gamer.policy = Policy::UniformRandom;
        config.gamer.seed = Some(42);
        config.gamer.name = "Sample".to_string();

        let mut gamer = ReflexGamer::from_config(&config);
        assert_eq!(gamer.name(), "Sample");
        assert_eq!(gamer.policy(), Policy::UniformRandom);
        assert_eq!(
            gamer.choose_move(moves(&["up", "down"]), soon()).unwrap(),
            Move::from("down")
        );
    }
}
