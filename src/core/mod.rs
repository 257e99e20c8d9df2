pub mod game;
pub mod presenter;
pub mod render;
pub mod session;

pub use crate::domain::model::{Card, LeaderboardEntry, Score, SearchQuery, SearchResult};
pub use crate::domain::ports::{
    CompanySearch, ConfigProvider, GameView, NamePrompt, ResultsView, ScoreBoard,
};
pub use crate::utils::error::Result;
