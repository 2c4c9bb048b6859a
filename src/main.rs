use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use tracker::batch::{self, ActivityReport};
use tracker::config::AppConfig;
use tracker::logging::{init_logging, LogFormat, LogLevel};
use tracker::{Biometrics, DayStepsCalculator, TrackerError, TrainingCalculator};

/// tracker - activity summaries from fitness tracker records
///
/// Turns `steps,duration` day packages and `steps,type,duration` training
/// records into distance, speed and calorie estimates.
#[derive(Parser)]
#[command(name = "tracker")]
#[command(version)]
#[command(about = "Fitness tracker record calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log format on stderr
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct BiometricArgs {
    /// Body weight in kilograms
    #[arg(short, long)]
    weight: Option<f64>,

    /// Body height in meters
    #[arg(short = 'H', long)]
    height: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a day package, e.g. "678,0h50m00s"
    Day {
        record: String,

        #[command(flatten)]
        biometrics: BiometricArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarise a training record, e.g. "3456,Ходьба,3h00m00s"
    Training {
        record: String,

        #[command(flatten)]
        biometrics: BiometricArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Process a file with one record per line
    Batch {
        /// Input file path
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        biometrics: BiometricArgs,

        /// Print the summaries as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Manage the configuration file
    Config {
        /// Print the current configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Store a default body weight in kilograms
        #[arg(long, value_name = "KG")]
        set_weight: Option<f64>,

        /// Store a default body height in meters
        #[arg(long, value_name = "M")]
        set_height: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // `config --init` must work even when the current file cannot be read
    let config = match cli.command {
        Commands::Config { init: true, .. } => AppConfig::default(),
        _ => AppConfig::load_or_default(cli.config.as_deref())?,
    };

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(log_config.level, cli.verbose);
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    init_logging(&log_config)?;

    match cli.command {
        Commands::Day {
            record,
            biometrics,
            json,
        } => {
            let bio = resolve_biometrics(&config, &biometrics)?;
            let summary = DayStepsCalculator::day_summary(&record, &bio)
                .map_err(|e| report_failure(&record, e))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary);
            }
        }

        Commands::Training {
            record,
            biometrics,
            json,
        } => {
            let bio = resolve_biometrics(&config, &biometrics)?;
            let summary = TrainingCalculator::training_summary(&record, &bio)
                .map_err(|e| report_failure(&record, e))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary);
            }
        }

        Commands::Batch {
            file,
            biometrics,
            json,
        } => {
            let bio = resolve_biometrics(&config, &biometrics)?;
            let report = batch::process_file(&file, &bio)?;

            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(activity) if json => println!("{}", serde_json::to_string(activity)?),
                    Ok(activity) => {
                        let heading = match activity {
                            ActivityReport::Day(_) => "day",
                            ActivityReport::Training(_) => "training",
                        };
                        println!("{}", format!("#{} {}", outcome.line_number, heading).dimmed());
                        println!("{}", activity);
                    }
                    Err(e) => eprintln!(
                        "{} line {}: {}",
                        "✗".red(),
                        outcome.line_number,
                        e.user_message()
                    ),
                }
            }

            eprintln!(
                "{}",
                format!(
                    "✓ {} processed, {} failed, {:.2} kcal total",
                    report.succeeded(),
                    report.failed(),
                    report.total_calories()
                )
                .green()
            );

            if report.failed() > 0 {
                bail!("{} of {} records failed", report.failed(), report.outcomes.len());
            }
        }

        Commands::Config {
            show,
            init,
            set_weight,
            set_height,
        } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(AppConfig::default_config_path);

            let write = init || set_weight.is_some() || set_height.is_some();
            let current = if write {
                let updated = AppConfig::update_file(&path, init, set_weight, set_height)?;
                println!("{}", format!("✓ Configuration written to {}", path.display()).green());
                updated
            } else {
                config
            };

            if show || !write {
                println!("{}", format!("Configuration file: {}", path.display()).bold());
                print!("{}", toml::to_string_pretty(&current)?);
                if let Err(e) = current.validate() {
                    eprintln!("{} {}", "✗".red(), e);
                }
            }
        }
    }

    Ok(())
}

fn resolve_biometrics(config: &AppConfig, args: &BiometricArgs) -> Result<Biometrics> {
    let bio = config.biometrics_with(args.weight, args.height);
    if !bio.is_valid() {
        bail!(
            "weight and height must be positive, got {} kg and {} m",
            bio.weight_kg,
            bio.height_m
        );
    }
    Ok(bio)
}

fn report_failure(record: &str, error: TrackerError) -> anyhow::Error {
    error.log("cli");
    eprintln!("{} {}", "✗".red(), error.user_message());
    anyhow::Error::new(error).context(format!("record \"{}\" was rejected", record))
}
