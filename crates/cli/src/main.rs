// reeldiff CLI - diff an IMDb ratings export against a Letterboxd export

mod exit_codes;
mod markdown;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser, Subcommand};
use reeldiff_recon::rating::{to_half_step_scale, to_ten_scale};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "reeldiff")]
#[command(about = "Find movies rated on IMDb but not logged on Letterboxd, and vice versa")]
#[command(version)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff the two exports named in a .diff.toml config
    #[command(after_help = "\
Examples:
  reeldiff run movies.diff.toml
  reeldiff run movies.diff.toml --json
  reeldiff run movies.diff.toml --output diff.json --markdown diff.md
  reeldiff run movies.diff.toml --strict")]
    Run {
        /// Path to the .diff.toml config file
        config: PathBuf,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write JSON output to file (overrides [output].json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Write a Markdown checklist to file (overrides [output].markdown)
        #[arg(long)]
        markdown: Option<PathBuf>,

        /// Exit 1 when either side has unmatched entries
        #[arg(long)]
        strict: bool,
    },

    /// Validate a .diff.toml config without reading the exports
    #[command(after_help = "\
Examples:
  reeldiff validate movies.diff.toml")]
    Validate {
        /// Path to the .diff.toml config file
        config: PathBuf,
    },

    /// Convert a rating between the IMDb and Letterboxd scales
    #[command(group(ArgGroup::new("scale").required(true).args(["to_stars", "to_ten"])))]
    #[command(after_help = "\
Examples:
  reeldiff rating --to-stars 7
  reeldiff rating --to-ten 3.5")]
    Rating {
        /// IMDb score (1-10) to convert to stars
        #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
        to_stars: Option<i32>,

        /// Letterboxd stars (0.5-5) to convert to an IMDb score
        #[arg(long, value_name = "STARS", allow_negative_numbers = true)]
        to_ten: Option<f64>,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for --json output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_rating(to_stars: Option<i32>, to_ten: Option<f64>) -> Result<(), CliError> {
    match (to_stars, to_ten) {
        (Some(score), None) => {
            if !(1..=10).contains(&score) {
                tracing::warn!("score {score} is outside 1-10, clamping");
            }
            println!("{:.1}", to_half_step_scale(score));
            Ok(())
        }
        (None, Some(stars)) => {
            if !stars.is_finite() {
                return Err(CliError::args(format!("--to-ten expects a number, got {stars}")));
            }
            println!("{}", to_ten_scale(stars));
            Ok(())
        }
        _ => Err(CliError::args("pass exactly one of --to-stars or --to-ten")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { config, json, output, markdown, strict } => run::cmd_run(run::RunArgs {
            config,
            json,
            output,
            markdown,
            strict,
        }),
        Commands::Validate { config } => run::cmd_validate(config),
        Commands::Rating { to_stars, to_ten } => cmd_rating(to_stars, to_ten),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
