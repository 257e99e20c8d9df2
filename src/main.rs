use anyhow::Context;
use clap::Parser;
use corp_census::adapters::{
    export_results_csv, ConsoleInput, HttpBackend, StdinNamePrompt, TerminalGameView,
    TerminalResultsView,
};
use corp_census::core::render::leaderboard_rows;
use corp_census::core::{ConfigProvider, GameView, ScoreBoard};
use corp_census::utils::{logger, validation::Validate};
use corp_census::{Cli, ClientConfig, Command, FlipOutcome, GameSession, GameSettings};
use corp_census::{ResultsPresenter, SubmitOutcome};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    // Load and validate configuration
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Client config: {:?}", config);

    let backend = HttpBackend::new(config.server_url(), config.request_timeout())
        .context("failed to create HTTP client")?;

    // Run the selected command
    match cli.command.clone() {
        Command::Search { names, file, csv } => run_search(backend, names, file, csv).await,
        Command::Leaderboard => run_leaderboard(backend).await,
        Command::Play { .. } => run_play(backend, &config).await,
    }
}

async fn read_names(names: Vec<String>, file: Option<PathBuf>) -> anyhow::Result<Vec<String>> {
    if !names.is_empty() {
        return Ok(names);
    }

    let text = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read company names from stdin")?;
            text
        }
    };
    Ok(text.lines().map(str::to_string).collect())
}

async fn run_search(
    backend: HttpBackend,
    names: Vec<String>,
    file: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> anyhow::Result<()> {
    let names = read_names(names, file).await?;
    let presenter = ResultsPresenter::new(backend, TerminalResultsView::new());

    match presenter.submit_query(&names).await {
        SubmitOutcome::Populated(rows) => {
            if let Some(path) = csv {
                export_results_csv(&path, &rows)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("📁 Results saved to: {}", path.display());
            }
            Ok(())
        }
        SubmitOutcome::NoResults | SubmitOutcome::Busy => Ok(()),
        SubmitOutcome::Rejected(_) => std::process::exit(2),
        SubmitOutcome::Failed => std::process::exit(1),
    }
}

async fn run_leaderboard(backend: HttpBackend) -> anyhow::Result<()> {
    let entries = backend
        .leaderboard()
        .await
        .context("failed to fetch the leaderboard")?;
    TerminalGameView::new().render_leaderboard(&leaderboard_rows(&entries));
    Ok(())
}

async fn run_play(backend: HttpBackend, config: &ClientConfig) -> anyhow::Result<()> {
    let input = ConsoleInput::stdin();
    let session = GameSession::new(
        backend,
        TerminalGameView::new(),
        StdinNamePrompt::new(input.clone()),
        GameSettings::from_config(config),
    );

    // Show the current standings, then deal the first game
    session.refresh_leaderboard().await;
    session.start().await;
    println!("Enter a card number to flip it, n for a new game, q to quit.");

    while let Some(line) = input.read_line("> ").await {
        match line.trim() {
            "" => continue,
            "q" | "quit" => break,
            "n" | "new" => session.start().await,
            other => match other.parse::<usize>() {
                Ok(index) => match session.flip(index).await {
                    FlipOutcome::Ignored(reason) => println!("Cannot flip {}: {:?}", index, reason),
                    FlipOutcome::Matched { won: true, .. } => {
                        println!("Press n for a new game or q to quit.")
                    }
                    _ => {}
                },
                Err(_) => println!("Enter a card number, n for a new game or q to quit."),
            },
        }
    }

    // Cancel the clock before exiting
    session.stop().await;
    Ok(())
}
