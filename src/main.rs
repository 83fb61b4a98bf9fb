//! Terminal falling-block runner (default binary).
//!
//! Polls crossterm input until the next 16ms frame boundary, then ticks the
//! session and flushes one frame.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use blockfall::core::Controller;
use blockfall::engine::Board;
use blockfall::input::{open_store, BindingTable};
use blockfall::term::{FrameBuffer, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;
use blockfall::{Cli, Flow, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A full-screen app cannot log to stdout, so logs go to a file.
    let log_path = cli.log_path();
    if let Some(dir) = log_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create log directory {}", dir.display()))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let seed = cli.seed();
    tracing::info!(
        seed,
        width = cli.board_width,
        height = cli.board_height,
        "starting"
    );

    // Configuration errors surface before the terminal changes mode.
    let bindings_path = cli.bindings_path();
    let bindings = BindingTable::load(open_store(bindings_path.as_deref()));
    let controller =
        Controller::new(cli.clock_config(), bindings).context("invalid clock configuration")?;
    let board = Board::with_size(cli.board_width, cli.board_height, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let controller = if term.reports_key_releases() {
        controller.with_release_timeout(None)
    } else {
        controller
    };
    let mut session = Session::new(board, controller, cli.cell_size);

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        tracing::warn!(error = ?e, "terminal restore failed");
    }
    if let Err(e) = &result {
        tracing::error!(error = ?e, "session ended with error");
    }
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session<Board>) -> Result<()> {
    let start = Instant::now();
    let frame = Duration::from_millis(FRAME_MS);
    let mut next_frame = start + frame;
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        // Input with timeout until the next frame boundary.
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if session.on_key(&key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        next_frame += frame;
        if next_frame < now {
            // Fell behind (suspended, slow terminal): skip the missed frames.
            next_frame = now + frame;
        }

        session.tick(now.duration_since(start).as_millis() as u64);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
