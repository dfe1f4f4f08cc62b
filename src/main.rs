mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use land_raider::constants::TARGET_FPS;
use land_raider::entities::Session;
use land_raider::input::{Command, InputSnapshot};
use land_raider::{advance_frame, initialize_session};

use display::TerminalAssets;

const FRAME: Duration = Duration::from_millis(1000 / TARGET_FPS); // ≈30 FPS

/// Frames a key counts as held after its last press or repeat event.  On
/// terminals without release events, auto-repeat refreshes it in time.
const HOLD_WINDOW: u64 = 4;

#[derive(Parser)]
#[command(name = "land_raider")]
#[command(about = "Side-scrolling arcade shooter in the terminal")]
struct Args {
    /// Seed for a replayable run (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Held-key bindings.  Unbound keys map to nothing and are ignored.
fn held_command(key: &KeyCode) -> Option<Command> {
    match key {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::RotateUp),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::RotateDown),
        KeyCode::Char(' ') => Some(Command::Fire),
        _ => None,
    }
}

/// Bindings that act once per key press.
fn press_command(key: &KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::SwitchWeapon),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    display::draw_menu(out)?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Char(' ') | KeyCode::Enter => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Play one session.  The flag is true when the player quit outright.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key; each frame every key still "fresh"
/// contributes its held command, so Space + arrows + A/D combine freely.
/// Weapon switching and quitting act on the press event itself.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    clock: &Instant,
    rng: &mut StdRng,
) -> anyhow::Result<(bool, Session)> {
    let mut session = initialize_session(&TerminalAssets, now_ms(clock))
        .context("starting session")?;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Pending input ─────────────────────────────────────────────────────
        let mut pressed: Vec<Command> = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    pressed.extend(press_command(&code, modifiers));
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let held = key_frame
            .keys()
            .filter(|key| is_held(&key_frame, key, frame))
            .filter_map(held_command);
        let input = InputSnapshot::from_commands(held.chain(pressed.iter().copied()));

        let next = advance_frame(&session, &input, now_ms(clock), rng)?;
        session = next.session;

        for sound in &next.sounds {
            display::play(out, sound.key)?;
        }
        if next.terminal {
            return Ok((input.quit, session));
        }
        display::render(out, &session, &next.draws)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

fn now_ms(clock: &Instant) -> u64 {
    clock.elapsed().as_millis() as u64
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: Option<&PathBuf>) -> anyhow::Result<()> {
    // Stderr belongs to the game screen, so logs only go to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events where the terminal supports the kitty protocol.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the loops poll the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &mut rng);

    // Restore the terminal even when the session failed
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let clock = Instant::now();

    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let (quit, session) = game_loop(out, rx, &clock, rng)?;
                let summary = serde_json::to_string(&session.stats.snapshot())?;
                info!(status = ?session.status, stats = %summary, "session ended");

                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
