//! Quick Trace CLI
//!
//! Runs a sample workload under a tracer so the output styles and filters
//! can be tried from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

mod commands;

use commands::{execute_demo, execute_styles, validate_args, DemoArgs};
use quick_trace::utils::config::SCHEMA_VERSION;
use quick_trace::OutputStyle;

/// Quick Trace - checkpoint timing with smart filtering
#[derive(Parser, Debug)]
#[command(name = "quick-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Trace a sample workload and print its summary
    Demo {
        /// Output style (default, colorful, minimal, detailed, table, structured)
        #[arg(short, long)]
        style: Option<OutputStyle>,

        /// Show only spans of at least this many milliseconds
        #[arg(long, value_name = "MS")]
        slow_only: Option<u64>,

        /// Hide spans shorter than this many milliseconds
        #[arg(long, value_name = "MS")]
        hide_fast: Option<u64>,

        /// Group spans within this many milliseconds of each other
        #[arg(long, value_name = "MS")]
        group: Option<u64>,

        /// Print only when the session takes at least this many milliseconds
        #[arg(long, value_name = "MS")]
        min_total: Option<u64>,

        /// Record without printing
        #[arg(long)]
        silent: bool,

        /// Disable colours
        #[arg(long)]
        no_color: bool,

        /// Advance a simulated clock instead of sleeping through each step
        #[arg(long)]
        simulate: bool,

        /// TOML settings file, applied before the flags above
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Render one simulated session in every style
    Styles {
        /// Disable colours
        #[arg(long)]
        no_color: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Demo {
            style,
            slow_only,
            hide_fast,
            group,
            min_total,
            silent,
            no_color,
            simulate,
            config,
        } => {
            let args = DemoArgs {
                style,
                slow_only_ms: slow_only,
                hide_fast_ms: hide_fast,
                group_ms: group,
                min_total_ms: min_total,
                silent,
                no_color,
                simulate,
                config,
            };

            // Validate args first
            validate_args(&args)?;

            execute_demo(args)?;
        }

        Commands::Styles { no_color } => {
            execute_styles(no_color)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Quick Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Structured Output Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Checkpoint timing with smart filtering and multi-style summaries.");
    println!("Styles: {}", OutputStyle::ALL.map(|s| s.as_str()).join(", "));
}
