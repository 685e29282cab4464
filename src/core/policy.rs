use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 手の選び方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Always the first enumerated legal move.
    #[default]
    FirstInOrder,
    /// Each legal move with probability 1/n.
    UniformRandom,
}

impl Policy {
    /// Display name the framework shows for a gamer playing this policy.
    pub fn default_name(self) -> &'static str {
        match self {
            Policy::FirstInOrder => "Legal",
            Policy::UniformRandom => "Random",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Policy::FirstInOrder => write!(f, "first_in_order"),
            Policy::UniformRandom => write!(f, "uniform_random"),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "legal" | "first_in_order" => Ok(Policy::FirstInOrder),
            "random" | "uniform" | "uniform_random" => Ok(Policy::UniformRandom),
            other => Err(format!(
                "unknown policy '{}' (expected legal | random)",
                other
            )),
        }
    }
}
