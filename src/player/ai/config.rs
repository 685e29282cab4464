use crate::core::Policy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "gamer_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamerConfig {
    pub version: String,
    pub gamer: GamerSection,
    pub clock: ClockConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamerSection {
    /// Display name; empty means the policy's default name.
    #[serde(default)]
    pub name: String,
    pub policy: Policy,
    /// Fixed seed for reproducible matches; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_notify")]
    pub notify_observers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    pub meta_game_ms: u64,
    pub move_ms: u64,
    pub max_rounds: usize,
}

fn default_notify() -> bool {
    true
}

impl ClockConfig {
    pub fn meta_game_budget(&self) -> Duration {
        Duration::from_millis(self.meta_game_ms)
    }

    pub fn move_budget(&self) -> Duration {
        Duration::from_millis(self.move_ms)
    }
}

impl GamerConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: GamerConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }

    /// A policy given on the command line wins over the configured one.
    pub fn policy_or(&self, cli: Option<Policy>) -> Policy {
        cli.unwrap_or(self.gamer.policy)
    }

    /// Name the gamer reports; never empty.
    pub fn display_name(&self) -> String {
        let name = self.gamer.name.trim();
        if name.is_empty() {
            self.gamer.policy.default_name().to_string()
        } else {
            name.to_string()
        }
    }
}

impl Default for GamerConfig {
    fn default() -> Self {
        GamerConfig {
            version: "1.0".to_string(),
            gamer: GamerSection {
                name: String::new(),
                policy: Policy::FirstInOrder,
                seed: None,
                notify_observers: true,
            },
            clock: ClockConfig {
                meta_game_ms: 5_000,
                move_ms: 2_000,
                max_rounds: 500,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_minimal_json() {
        let json = r#"{
            "version": "1.0",
            "gamer": { "policy": "uniform_random", "seed": 7 },
            "clock": { "meta_game_ms": 100, "move_ms": 50, "max_rounds": 10 }
        }"#;
        let config: GamerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.gamer.policy, Policy::UniformRandom);
        assert_eq!(config.gamer.seed, Some(7));
        assert!(config.gamer.notify_observers);
        assert_eq!(config.display_name(), "Random");
        assert_eq!(config.clock.move_budget(), Duration::from_millis(50));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        assert!(GamerConfig::load_from("does/not/exist.json").is_err());
        let config = GamerConfig::default();
        assert_eq!(config.gamer.policy, Policy::FirstInOrder);
        assert_eq!(config.display_name(), "Legal");
    }

    #[test]
    fn blank_name_uses_policy_name() {
        let mut config = GamerConfig::default();
        config.gamer.name = "   ".to_string();
        assert_eq!(config.display_name(), "Legal");
        config.gamer.name = "Reflex-1".to_string();
        assert_eq!(config.display_name(), "Reflex-1");
    }

    #[rstest]
    #[case::falls_back_to_config(None, Policy::UniformRandom)]
    #[case::cli_wins(Some(Policy::FirstInOrder), Policy::FirstInOrder)]
    fn cli_policy_overrides_config(#[case] cli: Option<Policy>, #[case] expected: Policy) {
        let mut config = GamerConfig::default();
        config.gamer.policy = Policy::UniformRandom;
        assert_eq!(config.policy_or(cli), expected);
    }
}
