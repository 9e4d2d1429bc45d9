//! `keycoder` diagnostic binary.
//!
//! Prints the live character → key code mapping, or posts key events by
//! code.  Useful for checking what a layout produces and whether the
//! process has the Accessibility permission needed to post events.
//!
//! ```text
//! keycoder mapping            # table sorted by key code
//! keycoder mapping --json     # {"a": 0, "s": 1, ...}
//! keycoder post 0             # key-down for kVK_ANSI_A
//! keycoder post 0 --up        # key-up
//! keycoder tap 36             # press and release Return
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use keycoder::{KeyCode, KeyCoder, KeyEvent};
use keycoder_core::config::{config_file_path, load_config_at};
use keycoder_core::KeyCoderConfig;

#[derive(Debug, Parser)]
#[command(name = "keycoder", version, about = "Inspect keyboard layouts and post key events")]
struct Cli {
    /// Config file to use instead of the platform default location.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the character to key code mapping of the active layout.
    Mapping {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Post a single key event.
    Post {
        code: KeyCode,
        /// Post a key-up instead of a key-down.
        #[arg(long)]
        up: bool,
    },
    /// Post a key-down followed by a key-up.
    Tap { code: KeyCode },
}

/// `--config` wins; otherwise the platform location, if there is one.
fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| config_file_path().ok())
}

fn resolve_config(path: Option<&Path>) -> anyhow::Result<KeyCoderConfig> {
    load_config_at(path).context("failed to load configuration")
}

/// Reports where the configuration came from.  Runs after the subscriber is
/// installed, since the config itself picks the log level.
fn log_config_source(path: Option<&Path>) {
    match path {
        Some(path) if path.exists() => debug!(path = %path.display(), "loaded configuration"),
        Some(path) => debug!(path = %path.display(), "no config file, using defaults"),
        None => debug!("no platform config directory, using defaults"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let path = config_path(cli.config);
    let config = resolve_config(path.as_deref())?;

    // Logs go to stderr so `mapping --json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    log_config_source(path.as_deref());

    let coder = KeyCoder::system(&config).context("keyboard services unavailable")?;

    match cli.command {
        Command::Mapping { json } => {
            let map = coder.dynamic_mapping().context("failed to read keyboard layout")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                for (text, code) in map.sorted_by_code() {
                    println!("{code:>3}  {text:?}");
                }
            }
        }
        Command::Post { code, up } => {
            coder.post(KeyEvent::new(code, !up))?;
            info!(code, key_down = !up, "posted");
        }
        Command::Tap { code } => {
            for event in KeyEvent::stroke(code) {
                coder.post(event)?;
            }
            info!(code, "tapped");
        }
    }

    Ok(())
}
