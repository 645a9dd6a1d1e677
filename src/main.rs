//! Terminal Beat the Box runner (default binary).
//!
//! Reads configuration from the environment (and `.env`), logs to a file, and
//! drives one `GameState` from crossterm key events. Stats writes go through a
//! background `StatsRecorder` so the loop never waits on disk.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

use beat_the_box::config::{AppConfig, STORE_FILE_NAME};
use beat_the_box::core::{GameSnapshot, GameState};
use beat_the_box::input::{handle_key_event, should_quit, Command};
use beat_the_box::stats::{
    FileStore, InterstitialCadence, KeyValueStore, MemoryStore, OnboardingFlag, StatsRecorder,
    StatsStore,
};
use beat_the_box::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};

const STATS_REFRESH: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();
    let _log_guard = setup_logging(&config.log_dir)?;

    let kv = open_store(&config);
    let recorder = StatsRecorder::start(StatsStore::new(kv.clone()))
        .context("failed to start stats recorder")?;
    let session = Session {
        onboarding: OnboardingFlag::new(kv.clone()),
        cadence: InterstitialCadence::new(kv, config.ad_interval),
        recorder,
        show_stats: false,
        show_help: false,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let (result, session) = run(&mut term, &config, session);

    // Always try to restore terminal state.
    let _ = term.exit();

    let stats = session.recorder.shutdown();
    tracing::info!(
        "exiting: {} games played, {} won",
        stats.games_played,
        stats.games_won
    );
    result
}

fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "beat-the-box.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // File only: the terminal is in raw mode while playing.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("log file: {}/beat-the-box.log", log_dir.display());
    Ok(guard)
}

fn open_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    if config.stats_disabled {
        tracing::info!("stats disabled, keeping them in memory");
        return Arc::new(MemoryStore::new());
    }
    match FileStore::new(&config.data_dir, STORE_FILE_NAME) {
        Ok(store) => {
            tracing::info!("stats file: {}", store.path().display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(
                "cannot use {} for stats ({}), keeping them in memory",
                config.data_dir.display(),
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

/// Front-end state that lives outside the engine.
struct Session {
    recorder: StatsRecorder,
    onboarding: OnboardingFlag,
    cadence: InterstitialCadence,
    show_stats: bool,
    show_help: bool,
}

impl Session {
    fn apply(&mut self, game: &mut GameState, command: Command) {
        match command {
            Command::SelectPile(index) => {
                game.select_pile(index);
            }
            Command::Unselect => game.unselect_pile(),
            Command::Guess(guess) => {
                let Some(index) = game.selected_pile() else {
                    return;
                };
                if game.make_guess(index, guess) {
                    if let Some(outcome) = game.last_outcome() {
                        self.recorder.record_guess(outcome.correct);
                    }
                    if self.show_help {
                        self.show_help = false;
                        self.onboarding.mark_onboarding_viewed();
                    }
                }
            }
            Command::NewRound(mode) => {
                game.start_new_game(mode);
                tracing::debug!("round {} started ({})", game.round_id(), game.mode().as_str());
            }
            Command::EndZen => {
                game.end_zen_game();
            }
            Command::ToggleStats => self.show_stats = !self.show_stats,
        }

        if let Some(result) = game.take_round_result() {
            tracing::info!(
                "round {} over: {} {} with score {}",
                game.round_id(),
                result.mode.as_str(),
                if result.won { "won" } else { "lost" },
                result.score
            );
            self.recorder.record_round_end(result);
            if self.cadence.register_round() {
                tracing::info!("interstitial slot reached");
            }
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, mut session: Session) -> (Result<()>, Session) {
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!("seed {}", seed);

    let initial = session.recorder.latest();
    let mut game = GameState::new(seed)
        .with_mode(config.mode)
        .with_high_scores(initial.high_score, initial.zen_mode_high_score);
    game.start_new_game(None);
    session.show_help = !session.onboarding.onboarding_viewed();

    let result = event_loop(term, &mut game, &mut session);
    (result, session)
}

fn event_loop(term: &mut TerminalRenderer, game: &mut GameState, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let stats = session.show_stats.then(|| session.recorder.latest());
        let hud = Hud {
            stats: stats.as_ref(),
            show_help: session.show_help,
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Poll so the stats panel picks up writes that land in the background.
        if !event::poll(STATS_REFRESH)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(command) = handle_key_event(key) {
                    session.apply(game, command);
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
