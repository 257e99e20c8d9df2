use crate::core::render::{LeaderboardRow, ResultRow};
use crate::domain::model::{Card, Score};
use crate::domain::ports::{GameView, NamePrompt, NoticeKind, ResultsView};
use async_trait::async_trait;
use std::io::Write;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

const BOARD_COLUMNS: usize = 4;
const FACE_DOWN: &str = "?";

/// Line-oriented stdin shared between the command loop and the name prompt.
#[derive(Clone)]
pub struct ConsoleInput {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl ConsoleInput {
    pub fn stdin() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }

    /// Prints `prompt` and reads one line. `None` on end of input.
    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        if let Err(e) = std::io::stdout().flush() {
            tracing::debug!("Failed to flush stdout: {}", e);
        }

        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read from stdin: {}", e);
                None
            }
        }
    }
}

pub struct StdinNamePrompt {
    input: ConsoleInput,
}

impl StdinNamePrompt {
    pub fn new(input: ConsoleInput) -> Self {
        Self { input }
    }
}

#[async_trait]
impl NamePrompt for StdinNamePrompt {
    async fn ask_name(&self, score_preview: &Score) -> Option<String> {
        println!(
            "🎉 Congratulations! Finished in {}s with {} moves.",
            score_preview.elapsed_seconds, score_preview.moves
        );
        self.input
            .read_line("Enter your name for the leaderboard (blank to skip): ")
            .await
    }
}

/// Draws the board as a grid of numbered cells. The clock is only shown
/// alongside the board so ticks do not flood the terminal.
#[derive(Default)]
pub struct TerminalGameView {
    moves: AtomicU32,
    elapsed: AtomicU64,
}

impl TerminalGameView {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn board_lines(cards: &[Card]) -> Vec<String> {
    cards
        .chunks(BOARD_COLUMNS)
        .enumerate()
        .map(|(row, chunk)| {
            chunk
                .iter()
                .enumerate()
                .map(|(col, card)| {
                    let index = row * BOARD_COLUMNS + col;
                    let face = if card.is_face_up() { card.face.as_str() } else { FACE_DOWN };
                    let marker = if card.is_matched() { "*" } else { " " };
                    format!("{:>2}:{}{}", index, face, marker)
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}

impl GameView for TerminalGameView {
    fn render_board(&self, cards: &[Card]) {
        println!();
        for line in board_lines(cards) {
            println!("  {}", line);
        }
        println!(
            "  Moves: {}   Time: {}s",
            self.moves.load(Ordering::Relaxed),
            self.elapsed.load(Ordering::Relaxed)
        );
    }

    fn show_moves(&self, moves: u32) {
        self.moves.store(moves, Ordering::Relaxed);
    }

    fn show_timer(&self, elapsed_seconds: u64) {
        self.elapsed.store(elapsed_seconds, Ordering::Relaxed);
    }

    fn render_leaderboard(&self, rows: &[LeaderboardRow]) {
        println!("\n🏆 Leaderboard");
        println!("  {:<5} {:<20} {:>8} {:>6}", "Rank", "Name", "Time", "Moves");
        for row in rows {
            println!(
                "  {:<5} {:<20} {:>8} {:>6}",
                row.rank, row.name, row.time, row.moves
            );
        }
    }
}

#[derive(Default)]
pub struct TerminalResultsView;

impl TerminalResultsView {
    pub fn new() -> Self {
        Self
    }
}

pub fn result_lines(rows: &[ResultRow]) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<30} {:>12} {:<10} {:<15} {}",
        "Company", "Employees", "Region", "Source", "Other sources"
    )];
    lines.extend(rows.iter().map(|row| {
        format!(
            "{:<30} {:>12} {:<10} {:<15} {}",
            row.company,
            row.employees,
            row.region,
            row.source.label,
            row.other_sources_text()
        )
    }));
    lines
}

impl ResultsView for TerminalResultsView {
    fn set_loading(&self, loading: bool) {
        if loading {
            eprintln!("⏳ Searching...");
        }
    }

    fn set_submit_enabled(&self, _enabled: bool) {}

    fn clear_results(&self) {}

    fn show_results(&self, rows: &[ResultRow]) {
        for line in result_lines(rows) {
            println!("{}", line);
        }
    }

    fn show_no_results(&self) {
        println!("No results found");
    }

    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Error => eprintln!("❌ {}", message),
            NoticeKind::Info => eprintln!("ℹ️  {}", message),
        }
    }
}
