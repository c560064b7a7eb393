//! Vexil CLI: headless runs, snapshot inspection and config tooling.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vexil")]
#[command(version, about = "Vexil: flag to star-polyhedron morph simulation")]
struct Cli {
    /// Log simulation events and debug diagnostics.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scene headless for a number of frames.
    Simulate {
        /// Scene config (TOML). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frames to run.
        #[arg(short, long, default_value_t = 600)]
        frames: u64,

        /// Host frame interval in milliseconds.
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,

        /// Toggle the morph direction at these frames.
        #[arg(long = "toggle-at", value_name = "FRAME")]
        toggles: Vec<u64>,

        /// Click the flag centre (or the first element, when rigid) at these frames.
        #[arg(long = "click-at", value_name = "FRAME")]
        clicks: Vec<u64>,

        /// Override a cloth parameter, e.g. `--set wind_strength=0.6`.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,

        /// Write a snapshot of the final frame.
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },

    /// Inspect a scene snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: PathBuf,

        /// Second snapshot to diff against.
        #[arg(long)]
        against: Option<PathBuf>,
    },

    /// Validate a scene config file.
    Validate {
        /// Path to config file.
        path: PathBuf,
    },

    /// Print the default scene config as TOML.
    Params,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Simulate {
            config,
            frames,
            frame_ms,
            toggles,
            clicks,
            overrides,
            snapshot,
        } => commands::simulate(&commands::SimulateArgs {
            config,
            frames,
            frame_ms,
            toggles,
            clicks,
            overrides,
            snapshot,
            verbose: cli.verbose,
        }),
        Commands::Inspect { path, against } => commands::inspect(&path, against.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Params => commands::params(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
