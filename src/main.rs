//! Terminal blockfall runner.
//!
//! Owns the terminal lifecycle and the event loop: input events feed the
//! session, the drop timer is polled for gravity, and the screen is
//! redrawn only when the engine reports a mutation.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::GameSnapshot;
use blockfall::engine::Session;
use blockfall::input::{should_quit, InputHandler};
use blockfall::share::share_message;
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::trace::SessionTrace;
use blockfall::types::{GameAction, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

#[derive(Debug)]
struct Options {
    seed: u32,
    rows: u8,
    cols: u8,
    trace: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut opts = Options {
        seed: clock_seed(),
        rows: BOARD_HEIGHT,
        cols: BOARD_WIDTH,
        trace: None,
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                opts.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--rows" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --rows"))?;
                opts.rows = v
                    .parse::<u8>()
                    .map_err(|_| anyhow!("invalid --rows value: {}", v))?;
            }
            "--cols" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --cols"))?;
                opts.cols = v
                    .parse::<u8>()
                    .map_err(|_| anyhow!("invalid --cols value: {}", v))?;
            }
            "--trace" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --trace"))?;
                opts.trace = Some(PathBuf::from(v));
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(opts)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos().wrapping_add(d.as_secs() as u32))
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(&args)?;
    let mut trace = match opts.trace.as_deref() {
        Some(path) => Some(SessionTrace::open(path)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &opts, &mut trace);

    // Always try to restore terminal state before reporting anything.
    let _ = term.exit();
    if let Some(trace) = trace.as_mut() {
        let _ = trace.flush();
    }

    if let Some(final_score) = result? {
        println!("{}", share_message(final_score));
    }
    Ok(())
}

/// Event loop. Returns the final score when the session ended in game
/// over, None when the player quit mid-game.
fn run(
    term: &mut TerminalRenderer,
    opts: &Options,
    trace: &mut Option<SessionTrace>,
) -> Result<Option<u32>> {
    let mut session = Session::with_size(opts.cols, opts.rows, opts.seed, Instant::now())
        .map_err(|e| anyhow!(e.message()))?;
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snapshot = GameSnapshot::default();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let fb = view.render(session.state(), Viewport::new(w, h));
            term.draw(&fb)?;
            dirty = false;
        }

        // Sleep until the next input pump or the drop deadline,
        // whichever comes first.
        let now = Instant::now();
        let until_tick = tick.saturating_sub(last_tick.elapsed());
        let timeout = match session.poll_timeout(now) {
            Some(until_drop) => until_tick.min(until_drop),
            None => until_tick,
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(session_score(&session));
                        }
                        if let Some(action) = input.handle_key_press(key.code) {
                            dirty |= apply(&mut session, action, trace, &mut snapshot)?;
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; held keys are
                        // synthesized by the input handler.
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            for action in input.update(TICK_MS) {
                dirty |= apply(&mut session, action, trace, &mut snapshot)?;
            }
        }

        if session.poll(Instant::now()) {
            record(&session, trace, &mut snapshot)?;
            dirty = true;
        }
    }
}

fn apply(
    session: &mut Session,
    action: GameAction,
    trace: &mut Option<SessionTrace>,
    snapshot: &mut GameSnapshot,
) -> Result<bool> {
    if !session.handle_action(action, Instant::now()) {
        return Ok(false);
    }
    record(session, trace, snapshot)?;
    Ok(true)
}

fn record(
    session: &Session,
    trace: &mut Option<SessionTrace>,
    snapshot: &mut GameSnapshot,
) -> Result<()> {
    if let Some(trace) = trace {
        session.state().snapshot_into(snapshot);
        trace.record(snapshot)?;
    }
    Ok(())
}

fn session_score(session: &Session) -> Option<u32> {
    if session.state().game_over() {
        Some(session.state().score())
    } else {
        None
    }
}
