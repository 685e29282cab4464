pub mod decision;
pub mod r#move;
pub mod policy;
pub mod types;

pub use decision::Decision;
pub use policy::Policy;
pub use r#move::Move;
pub use types::{Deadline, LegalMoveSet, Role};
