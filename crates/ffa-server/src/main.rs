//! Free-for-all arena runner
//!
//! This binary:
//! 1. Loads the arena config (`FFA_CONFIG`, defaults otherwise)
//! 2. Starts an arena session over an in-memory world
//! 3. Runs the tick loop at `TARGET_TPS`
//!
//! Commands:
//! - `r` or `reset` - Start the arena reset countdown now
//! - `l` or `list` - List players and arena members
//! - `join <name>` - Connect a player
//! - `pad <name>` - Walk a player onto the join pad
//! - `leave <name>` - Disconnect a player
//! - `q` or `quit` - Quit the server
//! - `help` - Show help

use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute};
use ffa_arena::events::{PlayerLeft, PlayerSpawned};
use ffa_arena::host::Directory as _;
use ffa_arena::{ArenaConfig, ArenaServer};
use ffa_sim::SimWorld;
use ffa_tick::TpsTracker;
use tracing::{info, warn};

/// Commands that can be sent from the input thread
enum Command {
    Reset,
    List,
    Join(String),
    Pad(String),
    Leave(String),
    Quit,
    Help,
    Unknown(String),
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ffa_server=info".parse()?)
                .add_directive("ffa_arena=info".parse()?),
        )
        .init();

    let config = match std::env::var("FFA_CONFIG") {
        Ok(path) => ArenaConfig::load(&path)?,
        Err(_) => {
            info!("FFA_CONFIG not set, using default arena config");
            ArenaConfig::default()
        }
    };

    let target_tps: f32 = std::env::var("TARGET_TPS")
        .ok()
        .and_then(|p| p.parse().ok())
        .filter(|tps: &f32| *tps > 0.0)
        .unwrap_or(20.0);

    let seed: u64 = std::env::var("FFA_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| d.as_secs())
        });

    let pad = config.zones.join_pad.floor_center();
    let mut server = ArenaServer::new(SimWorld::new(), config, seed);
    info!("Arena running at {target_tps} TPS, spawn seed {seed}");

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    thread::spawn(move || {
        input_thread(&cmd_tx);
    });

    terminal::enable_raw_mode().ok();
    print_prompt();

    let target_delta = Duration::from_secs_f32(1.0 / target_tps);
    let mut tps = TpsTracker::new(target_tps);
    let mut last_tick = Instant::now();
    let mut running = true;

    while running {
        let start = Instant::now();

        while let Ok(cmd) = cmd_rx.try_recv() {
            clear_line();
            match cmd {
                Command::Reset => {
                    info!("Manual arena reset requested");
                    server.start_reset_countdown();
                }
                Command::List => {
                    let world = server.host();
                    let players = world.players();
                    info!("Players ({}):", players.len());
                    for player in players {
                        let name = world.name(player).unwrap_or("?");
                        let member = if server.arena().is_member(player) { " [arena]" } else { "" };
                        info!("  - {name}{member}");
                    }
                }
                Command::Join(name) => {
                    let player = server.host_mut().connect(&name);
                    server.post(PlayerSpawned {
                        player,
                        initial: true,
                    });
                    info!("{name} joined");
                }
                Command::Pad(name) => match server.host().find_player(&name) {
                    Some(player) => server.host_mut().move_player(player, pad),
                    None => warn!("No player named '{name}'"),
                },
                Command::Leave(name) => match server.host().find_player(&name) {
                    Some(player) => {
                        server.host_mut().disconnect(player);
                        server.post(PlayerLeft { player });
                        info!("{name} left");
                    }
                    None => warn!("No player named '{name}'"),
                },
                Command::Quit => {
                    info!("Shutting down...");
                    running = false;
                }
                Command::Help => {
                    info!("\r\nCommands:");
                    info!("  r, reset     - Start the arena reset countdown");
                    info!("  l, list      - List players");
                    info!("  join <name>  - Connect a player");
                    info!("  pad <name>   - Walk a player onto the join pad");
                    info!("  leave <name> - Disconnect a player");
                    info!("  q, quit      - Quit the server");
                    info!("  help         - Show this help");
                }
                Command::Unknown(s) => {
                    if !s.is_empty() {
                        info!("Unknown command: '{}'. Type 'help' for commands.", s);
                    }
                }
            }
            print_prompt();
        }

        server.tick();
        let tick = server.current_tick();

        let now = Instant::now();
        tps.update(now.duration_since(last_tick).as_secs_f32());
        last_tick = now;

        if tick.is_multiple_of(20) {
            update_title(tick, &tps);
        }
        if tick.is_multiple_of(ffa_tick::seconds(30)) && tps.is_lagging() {
            warn!("Running behind: {:.1} TPS (1m {:.1})", tps.tps_5s, tps.tps_1m);
        }

        let elapsed = start.elapsed();
        if elapsed < target_delta {
            thread::sleep(target_delta - elapsed);
        }
    }

    terminal::disable_raw_mode().ok();
    server.into_host();

    Ok(())
}

#[allow(clippy::print_stdout)]
fn input_thread(tx: &mpsc::Sender<Command>) {
    let mut input_buffer = String::new();

    loop {
        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
            if let Ok(Event::Key(key_event)) = event::read() {
                if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
                    let _ = tx.send(Command::Quit);
                    break;
                }

                match key_event.code {
                    KeyCode::Enter => {
                        let cmd = parse_command(&input_buffer);
                        let is_quit = matches!(cmd, Command::Quit);
                        let _ = tx.send(cmd);
                        input_buffer.clear();
                        if is_quit {
                            break;
                        }
                    }
                    KeyCode::Char(c) => {
                        input_buffer.push(c);
                        print!("{c}");
                        io::stdout().flush().ok();
                    }
                    KeyCode::Backspace => {
                        if input_buffer.pop().is_some() {
                            print!("\x08 \x08");
                            io::stdout().flush().ok();
                        }
                    }
                    KeyCode::Esc => {
                        input_buffer.clear();
                        clear_line();
                        print_prompt();
                    }
                    _ => {}
                }
            }
        }
    }
}

fn parse_command(input: &str) -> Command {
    let mut words = input.split_whitespace();
    let verb = words.next().unwrap_or_default().to_lowercase();
    let name = words.next().map(str::to_owned);

    match (verb.as_str(), name) {
        ("r" | "reset", _) => Command::Reset,
        ("l" | "list", _) => Command::List,
        ("j" | "join", Some(name)) => Command::Join(name),
        ("p" | "pad", Some(name)) => Command::Pad(name),
        ("leave", Some(name)) => Command::Leave(name),
        ("q" | "quit" | "exit", _) => Command::Quit,
        ("help" | "h" | "?", _) => Command::Help,
        _ => Command::Unknown(input.trim().to_owned()),
    }
}

#[allow(clippy::print_stdout)]
fn print_prompt() {
    print!("\r> ");
    io::stdout().flush().ok();
}

fn clear_line() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveToColumn(0), terminal::Clear(ClearType::CurrentLine)).ok();
}

#[allow(clippy::print_stdout)]
fn update_title(tick: u64, tps: &TpsTracker) {
    print!("\x1b]0;FFA Arena - Tick: {tick} - TPS: {:.1}\x07", tps.tps_5s);
    io::stdout().flush().ok();
}
