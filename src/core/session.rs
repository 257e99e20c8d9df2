//! A running memory game: the [`MemoryGame`] rules plus the clock, the
//! reveal delay, the name prompt and score submission.
//!
//! All mutable state sits behind one async mutex and views are only
//! touched while it is held. The clock and the reveal delay are spawned
//! tasks whose handles are kept in that state and aborted on restart and
//! on win; each task also re-checks the deal epoch before mutating.

use crate::core::game::{FlipOutcome, MemoryGame, Phase};
use crate::core::render::leaderboard_rows;
use crate::domain::model::{Score, DEFAULT_SYMBOLS};
use crate::domain::ports::{ConfigProvider, GameView, NamePrompt, ScoreBoard};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

#[derive(Debug, Clone)]
pub struct GameSettings {
    pub symbols: Vec<String>,
    pub reveal_delay: Duration,
    pub tick_interval: Duration,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            reveal_delay: Duration::from_secs(1),
            tick_interval: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            symbols: config.symbols().to_vec(),
            reveal_delay: config.reveal_delay(),
            tick_interval: config.tick_interval(),
            seed: config.seed(),
        }
    }
}

struct SessionState {
    game: MemoryGame,
    rng: StdRng,
    ticker: Option<JoinHandle<()>>,
    reveal: Option<JoinHandle<()>>,
}

impl SessionState {
    fn cancel_timers(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        if let Some(reveal) = self.reveal.take() {
            reveal.abort();
        }
    }
}

struct Shared<S, V, P> {
    state: Mutex<SessionState>,
    scoreboard: S,
    view: V,
    prompt: P,
    settings: GameSettings,
}

pub struct GameSession<S, V, P> {
    shared: Arc<Shared<S, V, P>>,
}

impl<S, V, P> Clone for GameSession<S, V, P> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S, V, P> GameSession<S, V, P>
where
    S: ScoreBoard + 'static,
    V: GameView + 'static,
    P: NamePrompt + 'static,
{
    pub fn new(scoreboard: S, view: V, prompt: P, settings: GameSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let game = MemoryGame::new(settings.symbols.iter().cloned());
        view.render_board(game.cards());

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SessionState {
                    game,
                    rng,
                    ticker: None,
                    reveal: None,
                }),
                scoreboard,
                view,
                prompt,
                settings,
            }),
        }
    }

    pub fn view(&self) -> &V {
        &self.shared.view
    }

    /// Deals a new game and starts the clock. Any previous clock or pending
    /// reveal is cancelled first.
    pub async fn start(&self) {
        let mut state = self.shared.state.lock().await;
        // Old clock and reveal belong to the previous deal.
        state.cancel_timers();

        let SessionState { game, rng, .. } = &mut *state;
        let epoch = game.deal(rng);
        state.ticker = Some(self.spawn_ticker(epoch));

        tracing::info!(epoch, pairs = state.game.pair_count(), "New game started");

        // Reset the counters on screen
        let view = &self.shared.view;
        view.show_moves(0);
        view.show_timer(0);
        view.render_board(state.game.cards());
    }

    /// Flips the card at `index`. Disallowed flips are ignored, never errors.
    ///
    /// When this flip completes the last pair, the win flow (name prompt and
    /// score submission) runs before this returns.
    pub async fn flip(&self, index: usize) -> FlipOutcome {
        let outcome = {
            let mut state = self.shared.state.lock().await;
            let outcome = state.game.flip(index);

            match outcome {
                FlipOutcome::Ignored(reason) => {
                    tracing::debug!(index, ?reason, "Flip ignored");
                    return outcome;
                }
                FlipOutcome::Revealed { .. } => {}
                FlipOutcome::Matched { won, .. } => {
                    if won {
                        state.cancel_timers();
                    }
                }
                FlipOutcome::Mismatched { first, second } => {
                    let epoch = state.game.epoch();
                    state.reveal = Some(self.spawn_reveal(epoch, first, second));
                }
            }

            let view = &self.shared.view;
            view.render_board(state.game.cards());
            if !matches!(outcome, FlipOutcome::Revealed { .. }) {
                view.show_moves(state.game.moves());
            }
            outcome
        };

        if let FlipOutcome::Matched { won: true, .. } = outcome {
            self.win().await;
        }
        outcome
    }

    async fn win(&self) {
        // Captured now; a restart during the prompt must not change it.
        let mut score = {
            let state = self.shared.state.lock().await;
            if state.game.phase() != Phase::Won {
                return;
            }
            Score {
                name: String::new(),
                elapsed_seconds: state.game.elapsed_seconds(),
                moves: state.game.moves(),
            }
        };
        tracing::info!(
            seconds = score.elapsed_seconds,
            moves = score.moves,
            "Game won"
        );

        match self.shared.prompt.ask_name(&score).await {
            Some(name) if !name.trim().is_empty() => {
                score.name = name.trim().to_string();
                self.post_score(score).await;
            }
            _ => tracing::debug!("No player name given, score not submitted"),
        }
    }

    /// Posts the current game's score, then refreshes the leaderboard.
    /// Failures are logged and otherwise ignored.
    pub async fn submit_score(&self, name: &str) {
        let score = {
            let state = self.shared.state.lock().await;
            Score {
                name: name.to_string(),
                elapsed_seconds: state.game.elapsed_seconds(),
                moves: state.game.moves(),
            }
        };
        self.post_score(score).await;
    }

    async fn post_score(&self, score: Score) {
        match self.shared.scoreboard.save_score(&score).await {
            Ok(()) => {
                tracing::info!(player = %score.name, "Score saved");
                self.refresh_leaderboard().await;
            }
            Err(e) => tracing::warn!("Error saving score: {}", e),
        }
    }

    pub async fn refresh_leaderboard(&self) {
        match self.shared.scoreboard.leaderboard().await {
            Ok(entries) => {
                let rows = leaderboard_rows(&entries);
                let _state = self.shared.state.lock().await;
                self.shared.view.render_leaderboard(&rows);
            }
            Err(e) => tracing::warn!("Error updating leaderboard: {}", e),
        }
    }

    /// Copy of the current game state.
    pub async fn snapshot(&self) -> MemoryGame {
        self.shared.state.lock().await.game.clone()
    }

    /// Cancels the clock and any pending reveal, e.g. when the host shuts down.
    pub async fn stop(&self) {
        self.shared.state.lock().await.cancel_timers();
    }

    fn spawn_ticker(&self, epoch: u64) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let period = shared.settings.tick_interval;

        tokio::spawn(async move {
            let mut clock = interval_at(Instant::now() + period, period);
            clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                clock.tick().await;
                let mut state = shared.state.lock().await;
                match state.game.tick(epoch) {
                    Some(seconds) => shared.view.show_timer(seconds),
                    None => break,
                }
            }
        })
    }

    fn spawn_reveal(&self, epoch: u64, first: usize, second: usize) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let delay = shared.settings.reveal_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = shared.state.lock().await;
            if state.game.conceal(epoch, first, second) {
                state.reveal = None;
                shared.view.render_board(state.game.cards());
            } else {
                tracing::debug!(epoch, first, second, "Stale reveal dropped");
            }
        })
    }
}
