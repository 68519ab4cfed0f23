//! Terminal Blockfall runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer renderer
//! for output. Every handled event is followed by a redraw; the poll timeout
//! is the time left until the next automatic drop.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use blockfall::input::{handle_key_event, should_quit, GestureTracker};
use blockfall::leaderboard::{BackgroundLeaderboard, HttpLeaderboard};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::{ClientConfig, GameSession};

/// Upper bound on a poll, so leaderboard results show up while paused
const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let config = ClientConfig::from_env();
    init_logging(&config)?;

    let leaderboard = BackgroundLeaderboard::spawn(HttpLeaderboard::new(&config.leaderboard_url))
        .map_err(|err| warn!(%err, "leaderboard disabled"))
        .ok();
    let mut session = GameSession::new(&config, leaderboard);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Tracing goes to a file or nowhere; the terminal belongs to the game.
fn init_logging(config: &ClientConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = GameView::default();
    let mut gestures = GestureTracker::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(
            &session.game().snapshot(),
            &session.hud(),
            Viewport::new(w, h),
            &mut fb,
        );
        term.draw_swap(&mut fb)?;

        let timeout = session
            .time_until_next_tick()
            .map_or(IDLE_POLL, |t| t.min(IDLE_POLL));

        let mut action = None;
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    action = handle_key_event(key);
                }
                Event::Mouse(mouse) => action = gestures.handle_mouse_event(mouse),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        session.step(now - last, action);
        last = now;
        session.poll_leaderboard();
    }
}
