pub mod config;
pub mod random;
pub mod selector;

pub use config::GamerConfig;
pub use random::{RandomSource, ScriptedRandom};
pub use selector::{pick_index, MoveSelector};
