use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use pwb_estimate::cli::calculate::CalculateOptions;
use pwb_estimate::cli::project::{ClassificationArgs, EstimateArgs};
use pwb_estimate::{ConfigTable, Result};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pwb")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Project estimation calculator", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Coefficient table override (default: ./pwb.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recommended project artifacts by phase
    Artifacts {
        /// Project file to read the classification from
        #[arg(short, long)]
        project: Option<PathBuf>,

        #[command(flatten)]
        classification: ClassificationArgs,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Estimate effort, duration and constraint radar
    Calculate {
        /// Project file (.toml, .json, .yaml)
        #[arg(short, long)]
        project: Option<PathBuf>,

        #[command(flatten)]
        estimate: EstimateArgs,

        /// Number of selected artifacts (default: the recommended ones)
        #[arg(long)]
        selected_artifacts: Option<u32>,

        /// Output the full calculation as JSON
        #[arg(short, long)]
        json: bool,

        /// Write the calculation as JSON to a file
        #[arg(long)]
        export_json: Option<PathBuf>,

        /// Write a CSV summary to a file
        #[arg(long)]
        export_csv: Option<PathBuf>,
    },

    /// Compute a calibration factor from an actual and an estimated duration
    Calibrate {
        /// Actual duration in days
        #[arg(long)]
        actual: Option<f64>,

        /// Estimated duration in days
        #[arg(long)]
        estimated: Option<f64>,
    },

    /// Print the effective coefficient table as TOML
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

/// Logs go to stderr so that `--json` output on stdout stays clean
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Completions and calibration do not need the coefficient table
    match cli.command {
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "pwb", &mut io::stdout());
            return Ok(());
        }
        Commands::Calibrate { actual, estimated } => {
            return pwb_estimate::cli::calibrate::run(actual, estimated);
        }
        _ => {}
    }

    let project_root = env::current_dir()?;
    let config = ConfigTable::discover(cli.config.as_deref(), &project_root)?;

    match cli.command {
        Commands::Artifacts {
            project,
            classification,
            json,
        } => {
            pwb_estimate::cli::artifacts::run(&config, project.as_deref(), &classification, json)?;
        }

        Commands::Calculate {
            project,
            estimate,
            selected_artifacts,
            json,
            export_json,
            export_csv,
        } => {
            let opts = CalculateOptions {
                project,
                args: estimate,
                selected_artifacts,
                json,
                export_json,
                export_csv,
            };
            pwb_estimate::cli::calculate::run(&config, opts)?;
        }

        Commands::Config => {
            pwb_estimate::cli::dump_config(&config)?;
        }

        Commands::Completions { .. } | Commands::Calibrate { .. } => {
            unreachable!("handled before loading the config")
        }
    }

    Ok(())
}
