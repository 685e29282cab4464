pub mod core;
pub mod error;
pub mod game;
pub mod player;
pub mod selfplay;


pub use crate::core::{Deadline, Decision, LegalMoveSet, Move, Policy, Role};
pub use crate::error::{ObserverError, SelectError};
pub use crate::player::{PlayerController, ReflexGamer};
