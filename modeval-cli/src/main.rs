use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use modeval_core::{Result, Summarizable};
use modeval_metrics::{
    evaluate_binary, evaluate_multiclass, evaluate_regression, BinaryConfig, MarePolicy,
    MulticlassConfig, RegressionConfig, RocTies, DEFAULT_THRESHOLD,
};

mod report;

#[derive(Parser)]
#[command(name = "modeval")]
#[command(
    about = "Evaluate classifier and regressor predictions stored in CSV files",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print the report as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Multi-class classifier: label column followed by K class probabilities
    Multiclass {
        /// Input CSV file
        #[arg(short, long, default_value = "model.csv")]
        input: PathBuf,

        /// Number of classes K
        #[arg(short = 'k', long, default_value_t = 5)]
        classes: usize,

        /// Value of the first class label in the file
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        label_base: i64,
    },

    /// Binary classifier: 0/1 label column followed by the positive-class probability
    Binary {
        /// Input CSV file
        #[arg(short, long, default_value = "model_3.csv")]
        input: PathBuf,

        /// Probabilities at or above this value are predicted positive
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// How rows with equal probabilities are placed on the ROC curve
        #[arg(long, value_enum, default_value_t = TiesArg::Grouped)]
        roc_ties: TiesArg,
    },

    /// Single-variable regressor: actual value column followed by the predicted value
    Regression {
        /// Input CSV file
        #[arg(short, long, default_value = "model_3.csv")]
        input: PathBuf,

        /// What MARE divides by once zero-valued actuals are skipped
        #[arg(long, value_enum, default_value_t = MareArg::AllRows)]
        mare_denominator: MareArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TiesArg {
    /// Equal probabilities form a single ROC step
    Grouped,
    /// Equal probabilities are walked in file order
    RowOrder,
}

impl From<TiesArg> for RocTies {
    fn from(arg: TiesArg) -> Self {
        match arg {
            TiesArg::Grouped => RocTies::Grouped,
            TiesArg::RowOrder => RocTies::RowOrder,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MareArg {
    /// Divide by every row, including those skipped for a zero actual
    AllRows,
    /// Divide only by the rows that were summed
    NonZeroRows,
}

impl From<MareArg> for MarePolicy {
    fn from(arg: MareArg) -> Self {
        match arg {
            MareArg::AllRows => MarePolicy::AllRows,
            MareArg::NonZeroRows => MarePolicy::NonZeroRows,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {} failed: {e}", e.stage());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read, evaluate, and only then render, so a failure prints no metrics.
fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::Multiclass {
            input,
            classes,
            label_base,
        } => {
            let config = MulticlassConfig {
                n_classes: *classes,
            };
            let data = modeval_io::csv::read_multiclass(input, config.n_classes, *label_base)?;
            let report = evaluate_multiclass(data.actual(), data.predicted(), &config)?;
            tracing::info!(summary = %report.summary(), "multi-class evaluation complete");
            if cli.json {
                report::write_json(out, input, &report)?;
            } else {
                report::write_multiclass(out, input, &report)?;
            }
        }
        Command::Binary {
            input,
            threshold,
            roc_ties,
        } => {
            let config = BinaryConfig {
                threshold: *threshold,
                roc_ties: (*roc_ties).into(),
            };
            let data = modeval_io::csv::read_binary(input)?;
            let report = evaluate_binary(data.actual(), data.predicted(), &config)?;
            tracing::info!(summary = %report.summary(), "binary evaluation complete");
            if cli.json {
                report::write_json(out, input, &report)?;
            } else {
                report::write_binary(out, input, &report)?;
            }
        }
        Command::Regression {
            input,
            mare_denominator,
        } => {
            let config = RegressionConfig {
                mare: (*mare_denominator).into(),
            };
            let data = modeval_io::csv::read_regression(input)?;
            let report = evaluate_regression(data.actual(), data.predicted(), &config)?;
            tracing::info!(summary = %report.summary(), "regression evaluation complete");
            if cli.json {
                report::write_json(out, input, &report)?;
            } else {
                report::write_regression(out, input, &report)?;
            }
        }
    }
    Ok(())
}
