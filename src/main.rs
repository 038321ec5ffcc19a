mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sky_assault::compute::{Game, GameStatus};
use sky_assault::config::GameConfig;
use sky_assault::error::AppError;
use sky_assault::input::InputState;

use display::TerminalSurface;

/// Target frame period, roughly 30 frames per second.
const FRAME: Duration = Duration::from_millis(33);

/// Environment variable overriding where the log file goes.
const LOG_ENV: &str = "SKY_ASSAULT_LOG";

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a key stays down after its latest press or repeat event.  Four
/// frames outlast the gap between OS auto-repeat events, so holding fire on
/// a terminal without release events still reads as one continuous hold.
const HOLD_WINDOW: u64 = 4;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .is_some_and(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn read_input(key_frame: &HashMap<KeyCode, u64>, frame: u64, use_item: bool) -> InputState {
    use KeyCode::{Char, Down, Left, Right, Up};
    InputState {
        left: any_held(key_frame, &[Left, Char('a'), Char('A')], frame),
        right: any_held(key_frame, &[Right, Char('d'), Char('D')], frame),
        up: any_held(key_frame, &[Up, Char('w'), Char('W')], frame),
        down: any_held(key_frame, &[Down, Char('s'), Char('S')], frame),
        fire: is_held(key_frame, &Char(' '), frame),
        use_item,
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file; stdout is the game screen.
fn init_logging() -> Result<PathBuf, AppError> {
    let path = std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("sky_assault.log"));
    let file = File::create(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;
    Ok(path)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drives the simulation at `FRAME` cadence.
///
/// Key events only stamp `key_frame` with the current frame number; the
/// `InputState` handed to the core is derived from those stamps, which lets
/// fire and movement be held together.  Release events, when the terminal
/// reports them, clear a key at once; otherwise it lapses after
/// `HOLD_WINDOW` quiet frames.
fn game_loop<W: Write>(
    screen: &mut TerminalSurface<W>,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), AppError> {
    let mut rng = thread_rng();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut use_item = false;

        while let Ok(ev) = rx.try_recv() {
            let (code, kind, modifiers) = match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => (code, kind, modifiers),
                Event::Resize(w, h) => {
                    screen.resize(w, h);
                    continue;
                }
                _ => continue,
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Enter if game.status == GameStatus::Menu => game.start(),
                        KeyCode::Char('p') | KeyCode::Char('P') => game.toggle_pause(),
                        KeyCode::Char('r') | KeyCode::Char('R') => game.restart(),
                        KeyCode::Char('z') | KeyCode::Char('Z') => use_item = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32() * 1000.0;
        last = now;

        let input = read_input(&key_frame, frame, use_item);
        game.frame(dt, &input, &mut rng, &mut *screen);
        for event in game.take_events() {
            tracing::debug!(?event, "game event");
        }
        game.render(&mut *screen);
        screen.present()?;

        if let Some(rest) = FRAME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = GameConfig::load(config_path.as_deref())?;
    let log_path = init_logging()?;
    info!(log = %log_path.display(), ?config, "starting sky_assault");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events are optional; without them keys lapse via HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the loop polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, config, &rx);

    // Restore the terminal whatever `run` returned.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        warn!(error = %e, "exiting with error");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    config: GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), AppError> {
    let (width, height) = terminal::size()?;
    let mut game = Game::new(config);
    let mut screen = TerminalSurface::new(out, game.field, width, height);
    game_loop(&mut screen, &mut game, rx)?;
    info!(
        score = game.score,
        level = game.progression.level(),
        enemies_defeated = game.enemies_defeated,
        status = ?game.status,
        "session ended"
    );
    Ok(())
}
