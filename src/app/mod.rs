//! Application layer: configuration, dependency injection and the
//! play-and-train session facade.
//!
//! # Usage
//!
//! ```
//! use qttt::app::{AgentConfig, App};
//! use qttt::pipeline::TrainingConfig;
//! use qttt::tictactoe::Player;
//!
//! let app = App::new();
//! let mut session = app.create_session(
//!     AgentConfig::default().with_seed(42),
//!     Player::X,
//!     TrainingConfig::default(),
//! )?;
//! session.train_agent(100, Vec::new())?;
//! let report = session.make_move(4)?;
//! assert!(report.accepted);
//! # Ok::<(), qttt::Error>(())
//! ```

pub mod config;
pub mod container;
pub mod session;

pub use config::AgentConfig;
pub use container::{App, AppBuilder};
pub use session::{MoveReport, Session, SharedSession};
