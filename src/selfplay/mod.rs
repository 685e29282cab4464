use crate::core::{Move, Policy};
use crate::game::{Match, MatchClock, MatchScript, ScriptedMachine};
use crate::player::ai::random::{match_seed, seeded};
use crate::player::{DecisionLog, GamerPhase, ReflexGamer};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub struct MatchesConfig {
    pub num_matches: usize,
    pub policy: Policy,
    pub base_seed: u64,
    pub clock: MatchClock,
    pub script: MatchScript,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub index: usize,
    pub seed: u64,
    pub moves: Vec<Move>,
    pub aborted: bool,
    /// Summed selection time of the match's decisions.
    pub decision_us: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionStats {
    pub policy: Policy,
    pub started_at: DateTime<Utc>,
    pub total_matches: usize,
    pub aborted_matches: usize,
    pub total_decisions: usize,
    pub avg_decision_ms: f64,
    /// round -> move -> times chosen
    pub per_round: Vec<BTreeMap<Move, usize>>,
    pub matches: Vec<MatchResult>,
}

impl SelectionStats {
    pub fn new(policy: Policy, rounds: usize) -> Self {
        Self {
            policy,
            started_at: Utc::now(),
            total_matches: 0,
            aborted_matches: 0,
            total_decisions: 0,
            avg_decision_ms: 0.0,
            per_round: vec![BTreeMap::new(); rounds],
            matches: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: MatchResult) {
        self.total_matches += 1;
        if result.aborted {
            self.aborted_matches += 1;
        }
        for (round, mv) in result.moves.iter().enumerate() {
            if round >= self.per_round.len() {
                self.per_round.resize_with(round + 1, BTreeMap::new);
            }
            *self.per_round[round].entry(mv.clone()).or_insert(0) += 1;
        }
        self.total_decisions += result.moves.len();
        self.matches.push(result);
        self.recalculate_average();
    }

    fn recalculate_average(&mut self) {
        if self.total_decisions == 0 {
            return;
        }
        let total_us: f64 = self.matches.iter().map(|m| m.decision_us).sum();
        self.avg_decision_ms = total_us / 1_000.0 / self.total_decisions as f64;
    }

    /// Pearson chi-square of the choices in `round` against a uniform draw
    /// over `legal_count` moves. `None` if the round was never played.
    pub fn chi_square(&self, round: usize, legal_count: usize) -> Option<f64> {
        let counts = self.per_round.get(round)?;
        let observed: usize = counts.values().sum();
        chi_square_uniform(counts.values().copied(), legal_count, observed)
    }
}

/// Chi-square statistic of `counts` (moves never chosen may be omitted)
/// against the uniform expectation `total / categories`. `None` when there
/// are no categories or no draws.
pub fn chi_square_uniform(
    counts: impl IntoIterator<Item = usize>,
    categories: usize,
    total: usize,
) -> Option<f64> {
    if categories == 0 || total == 0 {
        return None;
    }
    let expected = total as f64 / categories as f64;
    let mut seen = 0;
    let mut stat = 0.0;
    for count in counts {
        seen += 1;
        let diff = count as f64 - expected;
        stat += diff * diff / expected;
    }
    // Categories with zero observations.
    Some(stat + (categories.saturating_sub(seen)) as f64 * expected)
}

/// Runs every match on its own gamer and its own seeded generator.
pub fn run_matches(config: &MatchesConfig) -> anyhow::Result<SelectionStats> {
    if config.num_matches == 0 {
        anyhow::bail!("num_matches must be at least 1");
    }
    let started = Instant::now();
    info!(
        matches = config.num_matches,
        policy = %config.policy,
        rounds = config.script.rounds.len(),
        "starting self-play"
    );

    let mut results: Vec<MatchResult> = (0..config.num_matches)
        .into_par_iter()
        .map(|index| play_one(config, index))
        .collect();
    results.sort_by_key(|r| r.index);

    let mut stats = SelectionStats::new(config.policy, config.script.rounds.len());
    for result in results {
        stats.add_result(result);
    }

    info!(
        matches = stats.total_matches,
        aborted = stats.aborted_matches,
        decisions = stats.total_decisions,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "self-play finished"
    );
    Ok(stats)
}

fn play_one(config: &MatchesConfig, index: usize) -> MatchResult {
    let seed = match_seed(config.base_seed, index as u64);
    let log = Arc::new(DecisionLog::new());
    let mut gamer = ReflexGamer::new(config.policy, Box::new(seeded(seed)))
        .with_name(&format!("{}-{}", config.policy.default_name(), index));
    gamer.register_observer(log.clone());

    let game = Match::new(ScriptedMachine::new(config.script.clone()), config.clock);
    let decision_us = || -> f64 { log.decisions().iter().map(|d| d.elapsed_us).sum() };

    match game.run(&mut gamer) {
        Ok(outcome) => MatchResult {
            index,
            seed,
            moves: outcome.moves,
            aborted: outcome.final_phase == GamerPhase::Aborted,
            decision_us: decision_us(),
        },
        Err(err) => {
            warn!(index, error = %err, "match aborted");
            MatchResult {
                index,
                seed,
                moves: log.decisions().into_iter().map(|d| d.chosen).collect(),
                aborted: true,
                decision_us: decision_us(),
            }
        }
    }
}
