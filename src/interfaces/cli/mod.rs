//! Command-line interface for aotrans.

use std::path::PathBuf;

use clap::Parser;

use crate::io::format::aotrans_output;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted aotrans heading to the `aotrans-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    aotrans_output!("╭─────────────────────────────────────────────────────────────────────────────────────────────────────╮");
    aotrans_output!("│                                                                                                     │");
    aotrans_output!("│                          ▄▀█ █▀█ ▀█▀ █▀█ ▄▀█ █▄ █ █▀                                                │");
    aotrans_output!("│                          █▀█ █▄█  █  █▀▄ █▀█ █ ▀█ ▄█                                                │");
    aotrans_output!("│                                                                                                     │");
    aotrans_output!("│                Shell-by-shell atomic-orbital basis transformations: GAMESS → Psi4                   │");
    aotrans_output!("│                                                                                                     │");
    aotrans_output!("│                                                                                       {version:>13} │");
    aotrans_output!("╰─────────────────────────────────────────────────────────────────────────────────────────────────────╯");
    aotrans_output!("");
}

/// Command-line arguments of the `aotrans` binary.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a YAML input configuration. If not given, a template configuration is written to
    /// `aotrans_template.yml`.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to a file to which the main output is logged. If not given, the output is logged to
    /// the console.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also log debugging messages.
    #[arg(short, long)]
    pub debug: bool,
}
