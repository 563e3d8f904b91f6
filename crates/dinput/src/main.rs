//! dinput command-line entry point.
//!
//! Runs one input call per invocation, for scripting and for checking what a
//! call would inject.
//!
//! # Usage
//!
//! ```text
//! dinput [--config PATH] [--dry-run] [--log-level LEVEL] <COMMAND>
//!
//! dinput move-to --x 100 --y 150 --duration-ms 250
//! dinput move-to --x 800
//! dinput click --x 640 --y 480 --clicks 2
//! dinput hotkey ctrl shift esc
//! dinput --dry-run write "Hello!"
//! ```
//!
//! `--dry-run` replaces `SendInput` with the recording gateway and a fixed
//! 1920×1080 desktop, then prints every event that would have been injected
//! as one JSON object per line.  It works on any OS.
//!
//! # Environment variable overrides
//!
//! | Variable        | Description                                 |
//! |-----------------|---------------------------------------------|
//! | `DINPUT_CONFIG` | Config file path (default: platform dir)    |
//! | `DINPUT_LOG`    | Log level when `RUST_LOG` is unset          |
//! | `RUST_LOG`      | Full `tracing` filter, overrides the above  |

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dinput::application::pacing::RecordingSleeper;
use dinput::infrastructure::desktop::FixedDesktop;
use dinput::infrastructure::injection::mock::RecordingGateway;
use dinput::infrastructure::storage::config::{self, DInputConfig};
use dinput::InputController;
use dinput_core::MouseButton;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Scan-code mouse and keyboard automation for DirectX applications.
#[derive(Debug, Parser)]
#[command(name = "dinput", version)]
struct Cli {
    /// Config file to read instead of the platform default.
    #[arg(long, global = true, env = "DINPUT_CONFIG")]
    config: Option<PathBuf>,

    /// Print the events instead of injecting them.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long, global = true, env = "DINPUT_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Input(InputCommand),
    /// Write a default config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Commands that run one call against the controller.
#[derive(Debug, Subcommand)]
enum InputCommand {
    /// Move the cursor to an absolute pixel position; an omitted axis keeps
    /// its current coordinate.
    MoveTo {
        #[arg(long, allow_negative_numbers = true, required_unless_present = "y")]
        x: Option<i32>,
        #[arg(long, allow_negative_numbers = true, required_unless_present = "x")]
        y: Option<i32>,
        #[arg(long, default_value_t = 0)]
        duration_ms: u64,
    },
    /// Move the cursor relative to its current position.
    Move {
        #[arg(allow_negative_numbers = true)]
        dx: i32,
        #[arg(allow_negative_numbers = true)]
        dy: i32,
        #[arg(long, default_value_t = 0)]
        duration_ms: u64,
        /// Send raw mickeys instead of an absolute move.
        #[arg(long, conflicts_with = "duration_ms")]
        raw: bool,
    },
    /// Press a mouse button, optionally after moving.
    MouseDown {
        #[arg(long, allow_negative_numbers = true, requires = "y")]
        x: Option<i32>,
        #[arg(long, allow_negative_numbers = true, requires = "x")]
        y: Option<i32>,
        #[arg(long, default_value = "primary")]
        button: MouseButton,
    },
    /// Release a mouse button, optionally after moving.
    MouseUp {
        #[arg(long, allow_negative_numbers = true, requires = "y")]
        x: Option<i32>,
        #[arg(long, allow_negative_numbers = true, requires = "x")]
        y: Option<i32>,
        #[arg(long, default_value = "primary")]
        button: MouseButton,
    },
    /// Click a mouse button, optionally after moving.
    Click {
        #[arg(long, allow_negative_numbers = true, requires = "y")]
        x: Option<i32>,
        #[arg(long, allow_negative_numbers = true, requires = "x")]
        y: Option<i32>,
        /// left, right, middle, primary, secondary, x1 or x2.
        #[arg(long, default_value = "primary")]
        button: MouseButton,
        #[arg(long, default_value_t = 1)]
        clicks: u32,
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
    /// Scroll the vertical wheel; positive is up.
    Scroll {
        #[arg(allow_negative_numbers = true)]
        amount: i32,
        #[arg(long, allow_negative_numbers = true, requires = "y")]
        x: Option<i32>,
        #[arg(long, allow_negative_numbers = true, requires = "x")]
        y: Option<i32>,
    },
    /// Scroll the horizontal wheel; positive is right.
    Hscroll {
        #[arg(allow_negative_numbers = true)]
        amount: i32,
        #[arg(long, allow_negative_numbers = true, requires = "y")]
        x: Option<i32>,
        #[arg(long, allow_negative_numbers = true, requires = "x")]
        y: Option<i32>,
    },
    /// Drag with a button held to an absolute position.
    DragTo {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(long, default_value = "primary")]
        button: MouseButton,
        #[arg(long, default_value_t = 0)]
        duration_ms: u64,
    },
    /// Tap one or more keys in order.
    Press {
        #[arg(required = true)]
        keys: Vec<String>,
        #[arg(long, default_value_t = 1)]
        presses: u32,
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
    /// Type text with scan codes (US layout).
    Write {
        text: String,
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
    /// Press keys in order, then release them in reverse.
    Hotkey {
        #[arg(required = true)]
        keys: Vec<String>,
        /// Hold time between the last press and the first release.
        #[arg(long, default_value_t = 0)]
        wait_ms: u64,
    },
    KeyDown {
        key: String,
    },
    KeyUp {
        key: String,
    },
    /// Type any text as unicode events, independent of the layout.
    UnicodeWrite {
        text: String,
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
    /// Print the cursor position.
    Position,
    /// Print the primary monitor size.
    Size,
    /// Exit with status 0 if the key name is supported, 1 otherwise.
    ValidKey {
        key: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::config_file_path().context("locating config file")?,
    };
    let file_config = config::load_config_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| file_config.logging.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let command = match cli.command {
        Command::InitConfig { force } => return init_config(&config_path, force),
        Command::Input(command) => command,
    };

    let settings = file_config.to_settings();
    let recorder = Arc::new(RecordingGateway::new());
    let controller = if cli.dry_run {
        InputController::new(recorder.clone(), Arc::new(FixedDesktop::single_1080p()))
            .with_sleeper(Arc::new(RecordingSleeper::new()))
    } else {
        native_controller()?
    }
    .with_settings(settings);

    run(&controller, command)?;

    if cli.dry_run {
        for event in recorder.events() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    Ok(())
}

#[cfg(target_os = "windows")]
fn native_controller() -> anyhow::Result<InputController> {
    Ok(dinput::infrastructure::native_controller())
}

#[cfg(not(target_os = "windows"))]
fn native_controller() -> anyhow::Result<InputController> {
    bail!("input injection is only supported on Windows; use --dry-run to preview events")
}

fn init_config(path: &std::path::Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", path.display());
    }
    config::save_config_to(&DInputConfig::default(), path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote default config to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn run(input: &InputController, command: InputCommand) -> anyhow::Result<()> {
    match command {
        InputCommand::MoveTo { x, y, duration_ms } => {
            input.move_to_axes(x, y, ms(duration_ms))?
        }
        InputCommand::MouseDown { x, y, button } => input.mouse_down(x.zip(y), button)?,
        InputCommand::MouseUp { x, y, button } => input.mouse_up(x.zip(y), button)?,
        InputCommand::Move {
            dx,
            dy,
            duration_ms,
            raw,
        } => {
            if raw {
                input.move_raw(dx, dy)?
            } else {
                input.move_rel(dx, dy, ms(duration_ms))?
            }
        }
        InputCommand::Click {
            x,
            y,
            button,
            clicks,
            interval_ms,
        } => input.click(x.zip(y), button, clicks, ms(interval_ms))?,
        InputCommand::Scroll { amount, x, y } => input.scroll(amount, x.zip(y))?,
        InputCommand::Hscroll { amount, x, y } => input.hscroll(amount, x.zip(y))?,
        InputCommand::DragTo {
            x,
            y,
            button,
            duration_ms,
        } => input.drag_to(x, y, button, ms(duration_ms))?,
        InputCommand::Press {
            keys,
            presses,
            interval_ms,
        } => {
            let names: Vec<&str> = keys.iter().map(String::as_str).collect();
            input.press_keys(&names, presses, ms(interval_ms))?
        }
        InputCommand::Write { text, interval_ms } => input.write(&text, ms(interval_ms))?,
        InputCommand::Hotkey { keys, wait_ms } => {
            let names: Vec<&str> = keys.iter().map(String::as_str).collect();
            input.hotkey_timed(&names, input.settings().minimum_sleep, ms(wait_ms))?
        }
        InputCommand::KeyDown { key } => input.key_down(&key)?,
        InputCommand::KeyUp { key } => input.key_up(&key)?,
        InputCommand::UnicodeWrite { text, interval_ms } => {
            input.unicode_write(&text, ms(interval_ms))?
        }
        InputCommand::Position => {
            let (x, y) = input.position()?;
            println!("{x} {y}");
        }
        InputCommand::Size => {
            let (width, height) = input.size()?;
            println!("{width} {height}");
        }
        InputCommand::ValidKey { key } => {
            if !input.is_valid_key(&key) {
                bail!("unknown key: {key:?}");
            }
            println!("{key}");
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
