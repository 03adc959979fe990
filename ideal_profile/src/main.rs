use anyhow::Context;
use clap::Parser;
use console::Term;
use std::path::PathBuf;
use tracing::{debug, warn};

use ideal_profile::{calculate_ideal_profile, render_report};
use media_utils::logging::{init_logging, LogConfig};
use media_utils::SystemProbe;

#[derive(Parser)]
#[command(name = "ideal-profile")]
#[command(
    version,
    about = "Find the largest resolution and framerate in a folder of images and videos",
    long_about = None
)]
struct Cli {
    /// Folder containing the image and video files [default: current directory]
    #[arg(value_name = "FOLDER_PATH")]
    folder_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let _ = init_logging("ideal_profile", LogConfig::default());

    let cli = Cli::parse();

    let folder = resolve_folder(cli.folder_path)?;

    let profile = calculate_ideal_profile(&folder, &SystemProbe)
        .with_context(|| format!("Failed to analyze {}", folder.display()))?;

    if let Ok(json) = serde_json::to_string(&profile) {
        debug!(profile = %json, "Ideal profile");
    }

    clear_screen();
    print!("{}", render_report(&profile));

    Ok(())
}

/// The folder to analyze, defaulting to the current directory.
fn resolve_folder(folder_path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match folder_path {
        Some(path) => Ok(path),
        None => std::env::current_dir().context("Failed to resolve the current directory"),
    }
}

/// Start the report on a fresh screen when attached to a terminal.
fn clear_screen() {
    let term = Term::stdout();
    if term.is_term() {
        if let Err(e) = term.clear_screen() {
            warn!(error = %e, "Failed to clear the terminal");
        }
    }
}
