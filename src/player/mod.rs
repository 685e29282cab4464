pub mod ai;
pub mod controller;
pub mod lifecycle;
pub mod observer;
pub mod reflex;

pub use controller::PlayerController;
pub use lifecycle::GamerPhase;
pub use observer::{DecisionLog, MoveObserver, ObserverList, TracingObserver};
pub use reflex::ReflexGamer;
