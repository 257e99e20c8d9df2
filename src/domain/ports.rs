use crate::core::render::{LeaderboardRow, ResultRow};
use crate::domain::model::{Card, LeaderboardEntry, Score, SearchQuery, SearchResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn server_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn reveal_delay(&self) -> Duration;
    fn tick_interval(&self) -> Duration;
    fn symbols(&self) -> &[String];
    fn seed(&self) -> Option<u64>;
}

/// `POST /save-score` and `GET /leaderboard`.
#[async_trait]
pub trait ScoreBoard: Send + Sync {
    async fn save_score(&self, score: &Score) -> Result<()>;
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>>;
}

/// `POST /search`.
#[async_trait]
pub trait CompanySearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>>;
}

/// Asks the player for a leaderboard name once a game is won.
#[async_trait]
pub trait NamePrompt: Send + Sync {
    async fn ask_name(&self, score_preview: &Score) -> Option<String>;
}

pub trait GameView: Send + Sync {
    fn render_board(&self, cards: &[Card]);
    fn show_moves(&self, moves: u32);
    fn show_timer(&self, elapsed_seconds: u64);
    fn render_leaderboard(&self, rows: &[LeaderboardRow]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

pub trait ResultsView: Send + Sync {
    fn set_loading(&self, loading: bool);
    fn set_submit_enabled(&self, enabled: bool);
    /// Hides both the results table and the no-results message.
    fn clear_results(&self);
    fn show_results(&self, rows: &[ResultRow]);
    fn show_no_results(&self);
    fn notify(&self, message: &str, kind: NoticeKind);
}
