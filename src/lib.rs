pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{Cli, Command};
pub use crate::config::ClientConfig;

pub use crate::adapters::HttpBackend;
pub use crate::core::game::{FlipOutcome, IgnoreReason, MemoryGame, Phase};
pub use crate::core::presenter::{ResultsPresenter, SubmitOutcome};
pub use crate::core::session::{GameSession, GameSettings};
pub use crate::utils::error::{ClientError, QueryError, Result};
