use async_trait::async_trait;
use corp_census::core::render::LeaderboardRow;
use corp_census::core::{Card, GameView, LeaderboardEntry, NamePrompt, Score, ScoreBoard};
use corp_census::domain::model::CardState;
use corp_census::{ClientError, FlipOutcome, GameSession, GameSettings, IgnoreReason, MemoryGame, Phase};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Default)]
struct RecordingView {
    boards: AtomicUsize,
    moves: Mutex<Vec<u32>>,
    timer: Mutex<Vec<u64>>,
    leaderboards: Mutex<Vec<Vec<LeaderboardRow>>>,
}

impl RecordingView {
    fn last_timer(&self) -> Option<u64> {
        self.timer.lock().unwrap().last().copied()
    }
}

impl GameView for RecordingView {
    fn render_board(&self, _cards: &[Card]) {
        self.boards.fetch_add(1, Ordering::SeqCst);
    }

    fn show_moves(&self, moves: u32) {
        self.moves.lock().unwrap().push(moves);
    }

    fn show_timer(&self, elapsed_seconds: u64) {
        self.timer.lock().unwrap().push(elapsed_seconds);
    }

    fn render_leaderboard(&self, rows: &[LeaderboardRow]) {
        self.leaderboards.lock().unwrap().push(rows.to_vec());
    }
}

#[derive(Default)]
struct FakeScoreBoard {
    fail_save: bool,
    saved: Mutex<Vec<Score>>,
}

#[async_trait]
impl ScoreBoard for FakeScoreBoard {
    async fn save_score(&self, score: &Score) -> corp_census::Result<()> {
        if self.fail_save {
            return Err(ClientError::ServerError {
                status: 500,
                message: "disk full".to_string(),
            });
        }
        self.saved.lock().unwrap().push(score.clone());
        Ok(())
    }

    async fn leaderboard(&self) -> corp_census::Result<Vec<LeaderboardEntry>> {
        let saved = self.saved.lock().unwrap();
        Ok(saved
            .iter()
            .map(|s| LeaderboardEntry {
                name: s.name.clone(),
                time: s.elapsed_seconds,
                moves: s.moves,
            })
            .collect())
    }
}

struct FixedPrompt {
    name: Option<String>,
}

impl FixedPrompt {
    fn answering(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
        }
    }
}

#[async_trait]
impl NamePrompt for FixedPrompt {
    async fn ask_name(&self, _score_preview: &Score) -> Option<String> {
        self.name.clone()
    }
}

/// Prompt that announces it is open and answers only once released.
struct HeldPrompt {
    opened: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl NamePrompt for HeldPrompt {
    async fn ask_name(&self, _score_preview: &Score) -> Option<String> {
        self.opened.notify_one();
        self.release.notified().await;
        Some("ana".to_string())
    }
}

type TestSession = GameSession<FakeScoreBoard, RecordingView, FixedPrompt>;

fn settings(symbols: &[&str]) -> GameSettings {
    GameSettings {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        reveal_delay: Duration::from_secs(1),
        tick_interval: Duration::from_secs(1),
        seed: Some(17),
    }
}

fn session_with(board: FakeScoreBoard, prompt: FixedPrompt, symbols: &[&str]) -> TestSession {
    GameSession::new(board, RecordingView::default(), prompt, settings(symbols))
}

fn pairs(game: &MemoryGame) -> Vec<(usize, usize)> {
    let mut by_face: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, card) in game.cards().iter().enumerate() {
        by_face.entry(card.face.clone()).or_default().push(i);
    }
    let mut pairs: Vec<(usize, usize)> = by_face.values().map(|v| (v[0], v[1])).collect();
    pairs.sort();
    pairs
}

fn mismatched(game: &MemoryGame) -> (usize, usize) {
    let cards = game.cards();
    let second = (1..cards.len()).find(|&i| cards[i].face != cards[0].face).unwrap();
    (0, second)
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_start_deals_and_runs_clock() {
    let session = session_with(FakeScoreBoard::default(), FixedPrompt::answering(None), &["🏢", "🏦", "🏪", "🏭"]);
    assert_eq!(session.snapshot().await.phase(), Phase::Idle);

    session.start().await;
    let game = session.snapshot().await;
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.cards().len(), 8);
    assert_eq!(game.moves(), 0);
    assert!(session.view().boards.load(Ordering::SeqCst) >= 2);

    sleep_ms(3500).await;
    assert_eq!(session.snapshot().await.elapsed_seconds(), 3);
    assert_eq!(session.view().last_timer(), Some(3));

    session.stop().await;
    sleep_ms(3000).await;
    assert_eq!(session.snapshot().await.elapsed_seconds(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_mismatch_is_concealed_after_delay() {
    let session = session_with(FakeScoreBoard::default(), FixedPrompt::answering(None), &["A", "B", "C"]);
    session.start().await;
    let (a, b) = mismatched(&session.snapshot().await);

    assert_eq!(session.flip(a).await, FlipOutcome::Revealed { index: a });
    assert_eq!(session.snapshot().await.moves(), 0);
    assert_eq!(session.flip(b).await, FlipOutcome::Mismatched { first: a, second: b });

    let game = session.snapshot().await;
    assert_eq!(game.moves(), 1);
    assert_eq!(session.view().moves.lock().unwrap().last(), Some(&1));
    assert_eq!(game.phase(), Phase::Evaluating);
    assert_eq!(game.flipped(), &[a, b]);

    let third = (0..6).find(|i| *i != a && *i != b).unwrap();
    assert_eq!(
        session.flip(third).await,
        FlipOutcome::Ignored(IgnoreReason::PairPending)
    );

    sleep_ms(500).await;
    assert_eq!(session.snapshot().await.flipped().len(), 2);

    sleep_ms(600).await;
    let game = session.snapshot().await;
    assert!(game.flipped().is_empty());
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.cards()[a].state, CardState::FaceDown);
    assert_eq!(game.cards()[b].state, CardState::FaceDown);
    assert_eq!(game.moves(), 1);

    session.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_restart_during_pending_reveal_leaves_new_board_alone() {
    let session = session_with(FakeScoreBoard::default(), FixedPrompt::answering(None), &["A", "B", "C", "D"]);
    session.start().await;
    let (a, b) = mismatched(&session.snapshot().await);
    session.flip(a).await;
    session.flip(b).await;

    sleep_ms(300).await;
    session.start().await;
    assert_eq!(session.flip(a).await, FlipOutcome::Revealed { index: a });

    sleep_ms(1500).await;
    let game = session.snapshot().await;
    assert_eq!(game.flipped(), &[a]);
    assert_eq!(game.cards()[a].state, CardState::Flipped);
    assert_eq!(game.moves(), 0);

    session.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_restart_replaces_clock_instead_of_adding_one() {
    let session = session_with(FakeScoreBoard::default(), FixedPrompt::answering(None), &["A", "B"]);
    session.start().await;
    sleep_ms(2500).await;
    assert_eq!(session.snapshot().await.elapsed_seconds(), 2);

    session.start().await;
    assert_eq!(session.snapshot().await.elapsed_seconds(), 0);
    sleep_ms(1500).await;
    assert_eq!(session.snapshot().await.elapsed_seconds(), 1);

    session.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_win_submits_score_and_refreshes_leaderboard() {
    let session = session_with(
        FakeScoreBoard::default(),
        FixedPrompt::answering(Some("  ana  ")),
        &["A", "B"],
    );
    session.start().await;
    sleep_ms(2500).await;

    let all = pairs(&session.snapshot().await);
    session.flip(all[0].0).await;
    assert!(matches!(
        session.flip(all[0].1).await,
        FlipOutcome::Matched { won: false, .. }
    ));
    assert_ne!(session.snapshot().await.phase(), Phase::Won);

    session.flip(all[1].0).await;
    assert!(matches!(
        session.flip(all[1].1).await,
        FlipOutcome::Matched { won: true, .. }
    ));

    let game = session.snapshot().await;
    assert_eq!(game.phase(), Phase::Won);
    assert_eq!(game.matched_pairs(), 2);

    sleep_ms(5000).await;
    assert_eq!(session.snapshot().await.elapsed_seconds(), 2);

    let leaderboards = session.view().leaderboards.lock().unwrap().clone();
    assert_eq!(leaderboards.len(), 1);
    assert_eq!(leaderboards[0][0].name, "ana");
    assert_eq!(leaderboards[0][0].time, "2s");
    assert_eq!(leaderboards[0][0].moves, 2);
    assert_eq!(leaderboards[0][0].rank, 1);

    assert_eq!(
        session.flip(all[0].0).await,
        FlipOutcome::Ignored(IgnoreReason::NotPlaying)
    );
}

#[tokio::test(start_paused = true)]
async fn test_restart_while_name_prompt_is_open_keeps_won_score() {
    let opened = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let prompt = HeldPrompt {
        opened: Arc::clone(&opened),
        release: Arc::clone(&release),
    };
    let session = GameSession::new(
        FakeScoreBoard::default(),
        RecordingView::default(),
        prompt,
        settings(&["A"]),
    );
    session.start().await;
    sleep_ms(3500).await;
    session.flip(0).await;

    let (outcome, _) = tokio::join!(session.flip(1), async {
        opened.notified().await;
        session.start().await;
        let game = session.snapshot().await;
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.elapsed_seconds(), 0);
        release.notify_one();
    });
    assert!(matches!(outcome, FlipOutcome::Matched { won: true, .. }));

    let leaderboards = session.view().leaderboards.lock().unwrap().clone();
    assert_eq!(leaderboards.len(), 1);
    assert_eq!(leaderboards[0][0].name, "ana");
    assert_eq!(leaderboards[0][0].time, "3s");
    assert_eq!(leaderboards[0][0].moves, 1);

    assert_eq!(session.snapshot().await.phase(), Phase::Playing);
    session.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_blank_name_skips_submission() {
    let session = session_with(FakeScoreBoard::default(), FixedPrompt::answering(Some("   ")), &["A"]);
    session.start().await;

    session.flip(0).await;
    assert!(matches!(session.flip(1).await, FlipOutcome::Matched { won: true, .. }));

    assert!(session.view().leaderboards.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_score_submission_is_absorbed() {
    let board = FakeScoreBoard {
        fail_save: true,
        ..Default::default()
    };
    let session = session_with(board, FixedPrompt::answering(Some("kim")), &["A"]);
    session.start().await;

    session.flip(0).await;
    assert!(matches!(session.flip(1).await, FlipOutcome::Matched { won: true, .. }));

    assert_eq!(session.snapshot().await.phase(), Phase::Won);
    assert!(session.view().leaderboards.lock().unwrap().is_empty());

    session.start().await;
    assert_eq!(session.snapshot().await.phase(), Phase::Playing);
    session.stop().await;
}

#[tokio::test]
async fn test_refresh_leaderboard_renders_empty_table() {
    let session = session_with(FakeScoreBoard::default(), FixedPrompt::answering(None), &["A"]);
    session.refresh_leaderboard().await;

    let leaderboards = session.view().leaderboards.lock().unwrap().clone();
    assert_eq!(leaderboards, vec![Vec::<LeaderboardRow>::new()]);
}
