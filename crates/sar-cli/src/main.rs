//! SAR CLI
//!
//! Command-line front end for the self-assessment report engine.
//!
//! # Usage
//!
//! ```bash
//! sar generate -a assessment.json --format html -o report.html
//! sar generate -a assessment.json -c catalogue.json --format json
//! sar summary -a assessment.json
//! sar catalogue --list
//! sar config init
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "sar")]
#[command(version)]
#[command(about = "Security self-assessment gap analysis and reporting", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.sar/config.toml)
    #[arg(long, global = true, env = "SAR_CONFIG")]
    config: Option<PathBuf>,

    /// Profile name from the config directory
    #[arg(long, short, global = true)]
    profile: Option<String>,

    /// Increase log verbosity
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report from an assessment
    Generate {
        /// Assessment record (JSON)
        #[arg(short, long)]
        assessment: PathBuf,
        /// Framework catalogue (JSON); the built-in CMMC Level 1 catalogue if omitted
        #[arg(short, long)]
        catalogue: Option<PathBuf>,
        /// Output format
        #[arg(long, short)]
        format: Option<output::OutputFormat>,
        /// Output file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Assessor name
        #[arg(long, env = "SAR_ASSESSOR_NAME")]
        assessor_name: Option<String>,
        /// Assessor organization
        #[arg(long, env = "SAR_ORGANIZATION")]
        organization: Option<String>,
        /// Report title
        #[arg(long)]
        title: Option<String>,
        /// Assessment scope
        #[arg(long)]
        scope: Option<String>,
    },
    /// Print the domain table and headline numbers
    Summary {
        #[arg(short, long)]
        assessment: PathBuf,
        #[arg(short, long)]
        catalogue: Option<PathBuf>,
    },
    /// Validate a catalogue and optionally list its controls
    Catalogue {
        #[arg(short, long)]
        catalogue: Option<PathBuf>,
        /// List every control
        #[arg(long)]
        list: bool,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a template configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the effective configuration
    Show,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose > 0 { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let location = config::Location {
        explicit: cli.config.clone(),
        profile: cli.profile.clone(),
    };

    let result = config::Config::load(&location).and_then(|config| match cli.command {
        Commands::Generate {
            assessment,
            catalogue,
            format,
            output,
            assessor_name,
            organization,
            title,
            scope,
        } => commands::generate::handle(
            commands::generate::Args {
                assessment,
                catalogue,
                format,
                output,
                assessor_name,
                organization,
                title,
                scope,
            },
            &config,
        ),
        Commands::Summary { assessment, catalogue } => {
            commands::summary::handle(&assessment, catalogue.as_deref(), &config)
        }
        Commands::Catalogue { catalogue, list } => {
            commands::catalogue::handle(catalogue.as_deref(), list)
        }
        Commands::Config { action } => commands::config::handle(action, &location, &config),
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
