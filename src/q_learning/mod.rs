//! Tabular Q-learning
//!
//! Values are stored per packed board key with one slot per cell. The agent
//! acts epsilon-greedily and bootstraps each update from the best legal move
//! of the board the move produced.
//!
//! ## Variants
//!
//! | Variant | Tables | Bootstrap |
//! |---------|--------|-----------|
//! | Q-learning | 1 | `max_a' Q(s',a')` |
//! | Double Q, same table | 2, one updated at random | updated table's own max |
//! | Double Q, cross table | 2, one updated at random | argmax in updated table, value from the other |
//!
//! ## Usage Example
//!
//! ```no_run
//! use qttt::app::AgentConfig;
//! use qttt::q_learning::{DoubleBootstrap, QAgent};
//!
//! let single = QAgent::new(AgentConfig::default().with_seed(1))?;
//! let double = QAgent::new(
//!     AgentConfig::default()
//!         .with_double(DoubleBootstrap::SameTable)
//!         .with_epsilon(0.5, 0.999, 0.05),
//! )?;
//! # Ok::<(), qttt::Error>(())
//! ```

pub mod agent;
pub mod exploration;
pub mod learner;
pub mod policy;
pub mod q_table;
pub mod serialization;
pub mod value_store;

// Public re-exports
pub use agent::QAgent;
pub use exploration::ExplorationSchedule;
pub use learner::TdParams;
pub use policy::choose_move;
pub use q_table::{ValueTable, best_actions};
pub use serialization::SavedAgent;
pub use value_store::{DoubleBootstrap, TableSide, ValueStore};
