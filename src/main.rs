use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use env_logger::{Builder, Env, Target};
use log::{info, warn};
use rand::thread_rng;

use wave_shooter::compute::{acknowledge, init_state, move_player, player_shoot, tick};
use wave_shooter::config::GameConfig;
use wave_shooter::display::{self, Viewport};
use wave_shooter::entities::{Direction, GameState, GameStatus};
use wave_shooter::input::{any_held, press_action, track_modal, KeyAction};

const TITLE: &str = "Wave-Based Shooting Game";

/// Environment variable overriding the log file location.
const LOG_ENV: &str = "WAVE_SHOOTER_LOG";

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, so W/S can be held while Space is tapped.  Firing
/// acts on each press event.  While a modal screen (wave complete, game
/// over) is up, `input::press_action` decides whether a press dismisses it;
/// the quit keys work in every state.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    view: &mut Viewport,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let frame_budget = Duration::from_secs_f64(1.0 / state.config.fps as f64);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut modal_since: Option<u64> = None;

    let up_keys = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
    let down_keys = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

    loop {
        let frame_start = Instant::now();
        frame += 1;

        modal_since = track_modal(state.status, modal_since, frame);
        let mut acknowledged = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let (code, kind, modifiers) = match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => (code, kind, modifiers),
                Event::Resize(cols, rows) => {
                    *view = Viewport::new(cols, rows, &state.config);
                    continue;
                }
                _ => continue,
            };

            match kind {
                KeyEventKind::Press => {
                    let action =
                        press_action(state.status, code, modifiers, frame, modal_since, acknowledged);
                    match action {
                        KeyAction::Quit => {
                            info!("quit requested on wave {}", state.wave.number);
                            return Ok(());
                        }
                        KeyAction::Shoot => *state = player_shoot(state),
                        KeyAction::Acknowledge => {
                            *state = acknowledge(state);
                            acknowledged = true;
                        }
                        KeyAction::Ignore => {}
                    }
                    key_frame.insert(code, frame);
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held-key movement ─────────────────────────────────────────────────
        if state.status == GameStatus::Playing {
            if any_held(&key_frame, &up_keys, frame) {
                *state = move_player(state, Direction::Up);
            }
            if any_held(&key_frame, &down_keys, frame) {
                *state = move_player(state, Direction::Down);
            }
        }

        *state = tick(state, &mut rng);

        display::render(out, state, view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Route `log` output to a file; stderr belongs to the raw-mode terminal.
/// Logging is simply off when the file cannot be created.
fn init_logging() {
    let path = std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("wave_shooter.log"));
    let Ok(file) = File::create(&path) else {
        return;
    };
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    info!("logging to {}", path.display());
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = GameConfig::load().context("failed to load game config")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter the alternate screen")?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(TITLE))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                warn!("input reader stopped: {err}");
                break;
            }
        }
    });

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: GameConfig) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, &config);
    let mut state = init_state(config);
    info!("wave {} started with {} enemies", state.wave.number, state.wave.enemies_per_wave);

    game_loop(out, &mut state, rx, &mut view)
}
