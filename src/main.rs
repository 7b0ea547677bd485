//! Terminal runner (default binary).
//!
//! Reads crossterm input, drives the session clock and draws through the framebuffer renderer.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::engine::{EventLog, GameConfig, Session, SoundManager};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{
    frame_fingerprint, BellOutput, FrameBuffer, GameView, HudState, RenderThrottle,
    TerminalRenderer, Viewport,
};

/// Input wait while nothing animates (paused, game over).
const STATIC_POLL: Duration = Duration::from_millis(100);

/// Minimum redraw interval for unchanged static screens.
const STATIC_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let config = GameConfig::parse();

    // Restore the terminal before the panic message prints, or it is lost in the alternate screen.
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ =
            crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::style::ResetColor);
        let _ = crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::cursor::Show);
        let _ = crossterm::ExecutableCommand::execute(
            &mut io::stderr(),
            crossterm::terminal::LeaveAlternateScreen,
        );
        eprint!("{panic_info}\n\n");
    }));

    let log = match config.event_log_path() {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &GameConfig,
    log: Option<EventLog<io::BufWriter<std::fs::File>>>,
) -> Result<()> {
    let hud = Rc::new(RefCell::new(HudState::default()));
    let sound = SoundManager::with_mutes(
        BellOutput::stdout(config.bell),
        config.mute_music,
        config.mute_sound,
    );
    let mut session = Session::new(
        config.resolve_seed(),
        config.frame_ms,
        sound,
        Rc::clone(&hud),
        log,
    );

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_secs_f64() * 1000.0;

    session.start(now_ms())?;

    loop {
        let timeout = if session.game().frame_requested() {
            session.poll_timeout(now_ms())
        } else {
            STATIC_POLL
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    if should_quit(key) {
                        break;
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.handle_action(action, now_ms())?;
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        let now = now_ms();
        session.tick(now, |snap| {
            let hud = hud.borrow();
            throttle.should_render(now as u64, frame_fingerprint(snap, &hud), false);
            view.render_into(snap, &hud, viewport, &mut fb);
            term.draw_swap(&mut fb)
        })?;

        // Paused and game-over screens get no frames; redraw them when they change.
        if !session.game().frame_requested() {
            let snap = session.game().snapshot();
            let hud = hud.borrow();
            if throttle.should_render(now as u64, frame_fingerprint(&snap, &hud), true) {
                view.render_into(&snap, &hud, viewport, &mut fb);
                term.draw_swap(&mut fb)?;
            }
        }
    }

    session.finish(now_ms())
}
