use serde::{Deserialize, Serialize};
use std::fmt;

/// 合法手 (外部のルールエンジンが列挙した不透明な識別子)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Move(String);

impl Move {
    pub fn new(id: impl Into<String>) -> Self {
        Move(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Move {
    fn from(id: &str) -> Self {
        Move::new(id)
    }
}

impl From<String> for Move {
    fn from(id: String) -> Self {
        Move(id)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
