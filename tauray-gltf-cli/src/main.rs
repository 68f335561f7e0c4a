use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod ui;

use commands::validate::ValidateCommand;

/// Tauray glTF tooling - headless render validation
#[derive(Parser)]
#[command(
    name = "tauray-gltf",
    version = env!("CARGO_PKG_VERSION"),
    about = "Validation tooling for Tauray renders of exported glTF scenes",
    long_about = None,
    arg_required_else_help = true
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene headless and compare it against a reference image
    Validate(ValidateCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize colored output
    colored::control::set_override(!cli.no_color);

    // Initialize logging
    init_logging(cli.verbose)?;

    // Execute command
    match &cli.command {
        Commands::Validate(cmd) => cmd.execute(),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("tauray_gltf_cli={}", level))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
