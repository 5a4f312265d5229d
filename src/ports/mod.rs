//! Ports (trait boundaries) for external dependencies.
//!
//! The engine, agent and training supervisor talk to each other and to the
//! outside world only through these traits; concrete implementations live in
//! `q_learning`, `pipeline` and `adapters`.

pub mod learner;
pub mod observer;
pub mod repository;

pub use learner::{Learner, MovePolicy, NoLearning, Transition};
pub use observer::{Observer, ProgressEvent};
pub use repository::AgentRepository;
