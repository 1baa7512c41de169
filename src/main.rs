//! Terminal blockfall runner.
//!
//! Configuration comes from `BLOCKFALL_*` environment variables (see
//! [`blockfall::config`]); logs go to stderr through `env_logger`, so redirect it
//! when playing: `RUST_LOG=debug blockfall 2>blockfall.log`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::Round;
use blockfall::input::{handle_key_event, prompt_choice, should_quit, PromptChoice};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::Command;
use blockfall::Config;

/// Poll timeout while gravity is off; only bounds how often the screen refreshes.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::from_env()?;
    log::info!("starting with {config:?}");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        log::warn!("failed to restore terminal: {err:#}");
    }
    result
}

fn new_round(config: &Config) -> Round {
    match config.seed {
        Some(seed) => Round::with_seed(seed),
        None => Round::new(),
    }
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let mut round = new_round(config);
    round.start_round();

    let view = GameView::default()
        .with_ghost(config.ghost)
        .with_preview(config.preview);
    let mut fb = FrameBuffer::new(0, 0);

    let gravity = config.gravity();
    let mut next_fall = gravity.map(|g| Instant::now() + g);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&round, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = next_fall.map_or(IDLE_POLL, |at| {
            at.saturating_duration_since(Instant::now())
        });

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if round.is_game_over() {
                        match prompt_choice(key) {
                            Some(PromptChoice::Quit) => return Ok(()),
                            Some(PromptChoice::Replay) => {
                                match config.seed {
                                    Some(seed) => round.restart_round_with_seed(seed),
                                    None => round.restart_round(),
                                };
                                next_fall = gravity.map(|g| Instant::now() + g);
                            }
                            None => {}
                        }
                    } else if should_quit(key) {
                        return Ok(());
                    } else if let Some(cmd) = handle_key_event(key) {
                        let outcome = round.command(cmd);
                        if outcome.lines_cleared > 0 {
                            log::debug!("{} cleared {} lines", cmd.as_str(), outcome.lines_cleared);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity. A blocked fall does not lock; pieces lock on hard drop only.
        if let (Some(at), Some(g)) = (next_fall, gravity) {
            let now = Instant::now();
            if now >= at {
                if !round.is_game_over() {
                    round.command(Command::SoftDrop);
                }
                next_fall = Some(now + g);
            }
        }
    }
}
