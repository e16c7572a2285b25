//! screenfit CLI, the main entry point.
//!
//! Commands:
//! - `summarize` : Layered summaries for one or more display profiles
//! - `budget`    : Character budgets derived from profile geometry
//! - `profiles`  : List or add display profiles
//! - `personas`  : List personas and their overhead
//! - `config`    : Show, locate, or validate the config file

use clap::{Parser, Subcommand};

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "screenfit",
    about = "Layered summaries sized to the screens they are read on",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize text for one or more display profiles
    Summarize(commands::summarize::SummarizeArgs),

    /// Show the character budget of each profile
    Budget {
        /// Profiles: comma-separated names, paths, or @file
        #[arg(short, long)]
        profiles: Option<String>,

        /// Override every profile's buffer ratio, in (0, 1]
        #[arg(short, long)]
        buffer: Option<f64>,
    },

    /// List or add display profiles
    Profiles {
        #[command(subcommand)]
        action: Option<commands::profiles::ProfileAction>,
    },

    /// List available personas
    Personas,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Validate the config file
    Validate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Summarize(args) => commands::summarize::run(args)?,
        Commands::Budget { profiles, buffer } => commands::budget::run(profiles, buffer)?,
        Commands::Profiles { action } => commands::profiles::run(action)?,
        Commands::Personas => commands::personas::run()?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show()?,
            ConfigAction::Path => commands::config_cmd::path()?,
            ConfigAction::Validate => commands::config_cmd::validate()?,
        },
    }

    Ok(())
}
