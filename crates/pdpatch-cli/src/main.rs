//! Pure Data patch generator CLI.
//!
//! Provides the `pdpatch` binary:
//! - `brain` writes the OSC-driven example patch to disk.
//! - `render` turns a JSON patch model into `.pd` text.
//! - `dump-brain` prints the example patch as a JSON model, a starting point
//!   for hand-written models.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pdpatch_core::brain::brain_patch_sized;
use pdpatch_core::graph::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use pdpatch_core::{Patch, PatchError};

/// Pure Data patch generator.
#[derive(Parser)]
#[command(name = "pdpatch", about = "Generate Pure Data patch files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write the OSC-controlled "brain" example patch.
    Brain {
        /// Output patch file.
        #[arg(short, long, env = "PDPATCH_OUT", default_value = "brain.pd")]
        output: PathBuf,

        /// Canvas width.
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,

        /// Canvas height.
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u32,
    },

    /// Render a JSON patch model to Pd text.
    Render {
        /// Path to the JSON model.
        input: PathBuf,

        /// Output patch file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the example patch as a JSON model.
    DumpBrain,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Brain {
            output,
            width,
            height,
        } => run_brain(&output, width, height),
        Commands::Render { input, output } => run_render(&input, output.as_deref()),
        Commands::DumpBrain => run_dump_brain(),
    };
    process::exit(exit_code);
}

/// Execute the brain subcommand.
///
/// Returns exit code: 0 = success, 3 = I/O error.
fn run_brain(output: &Path, width: u32, height: u32) -> i32 {
    let patch = brain_patch_sized(width, height);
    match write_patch(&patch, output) {
        Ok(()) => {
            println!("Generated {}", output.display());
            0
        }
        Err(code) => code,
    }
}

/// Execute the render subcommand.
///
/// Returns exit code: 0 = success, 1 = invalid model, 3 = I/O error.
fn run_render(input: &Path, output: Option<&Path>) -> i32 {
    let json = match fs::read_to_string(input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", input.display(), e);
            return 3;
        }
    };

    let patch = match Patch::from_json(&json) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: invalid patch model '{}': {}", input.display(), e);
            return 1;
        }
    };

    match output {
        Some(path) => write_patch(&patch, path).err().unwrap_or(0),
        None => {
            report_dangling(&patch);
            println!("{}", patch.render());
            0
        }
    }
}

/// Execute the dump-brain subcommand.
fn run_dump_brain() -> i32 {
    let patch = brain_patch_sized(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    match patch.to_json_pretty() {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Saves `patch`, mapping failures to an exit code.
fn write_patch(patch: &Patch, path: &Path) -> Result<(), i32> {
    report_dangling(patch);
    match patch.save(path) {
        Ok(()) => {
            info!(path = %path.display(), nodes = patch.len(), "wrote patch");
            Ok(())
        }
        Err(e @ PatchError::Io { .. }) => {
            eprintln!("I/O error: {}", e);
            Err(3)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(1)
        }
    }
}

/// Warns about connections the interpreter will reject, on every canvas
/// level. The patch is still written unchanged.
fn report_dangling(patch: &Patch) -> usize {
    let dangling = patch.dangling_connections_nested();
    for (path, c) in &dangling {
        let canvas = if path.is_empty() { "<top>" } else { path.as_str() };
        warn!(
            canvas,
            source = %c.source,
            outlet = c.outlet,
            sink = %c.sink,
            inlet = c.inlet,
            "connection references a node past the end of its canvas"
        );
    }
    dangling.len()
}
