/// Coefficient Extractor - emits a U256 constant array from Horner blocks
///
/// The main entry point for the extractor. It parses command-line arguments,
/// sets up logging and prints the rendered declaration to stdout.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use log::{info, warn, LevelFilter};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use coeff_extractor::app::render_file;
use coeff_extractor::config::{load_config, Settings};
use coeff_extractor::utils::output_formatter;
use coeff_extractor::ScanStrategy;

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "coeff_extractor",
    version,
    about = "Extracts polynomial coefficients from Horner evaluation blocks",
    long_about = "Scans a source file for polynomial evaluation blocks (`result := add( ... )`),
collects the hexadecimal literals of each block in Horner order and prints
a Rust declaration of a constant U256 array."
)]
struct Args {
    /// Path to the source file to scan
    #[arg(name = "INPUT", env = "COEFF_EXTRACTOR_INPUT")]
    input: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Literal text opening a block
    #[arg(long = "prefix")]
    prefix: Option<String>,

    /// Name of the emitted constant
    #[arg(long = "name")]
    name: Option<String>,

    /// Element type of the emitted array
    #[arg(long = "element-type")]
    element_type: Option<String>,

    /// How the end of a block is located
    #[arg(long = "strategy", value_enum)]
    strategy: Option<ScanStrategy>,

    /// Fail on ambiguous or unterminated blocks
    #[arg(long = "strict", action = ArgAction::SetTrue)]
    strict: bool,

    /// Output in markdown format (wrapped in triple backticks)
    #[arg(long = "md", action = ArgAction::SetTrue)]
    md: bool,

    /// Export a per-block report to a JSON file
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Set logging level (default: WARN)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Write logs to a file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of file settings
    fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(prefix) = &self.prefix {
            settings.block_prefix = prefix.clone();
        }
        if let Some(name) = &self.name {
            settings.const_name = name.clone();
        }
        if let Some(element_type) = &self.element_type {
            settings.element_type = element_type.clone();
        }
        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
        if self.strict {
            settings.strict = true;
        }
        settings
    }
}

/// Main entry point function
fn main() {
    let args = Args::parse();

    setup_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = args.apply_overrides(load_config(args.config.as_deref())?);
    let input = args.input.clone().unwrap_or_default();

    let (sequence, output) = render_file(&input, &settings, args.md)?;

    let ambiguous = sequence.ambiguous_lines();
    if !ambiguous.is_empty() {
        warn!(
            "{} ambiguous block(s) at line(s) {:?}; rerun with --strict to reject them",
            ambiguous.len(),
            ambiguous
        );
    }

    if let Some(json_path) = &args.json {
        output_formatter::export_report_json(&sequence, &input, settings.strategy, json_path)?;
        info!("Wrote report to {}", json_path.display());
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(output.as_bytes())
        .context("Failed to write declaration to stdout")?;
    handle.flush()?;

    Ok(())
}

/// Set up logging to stderr or to the requested file
fn setup_logging(args: &Args) {
    // Configure logging
    let mut builder = env_logger::Builder::new();

    // Set log level from arguments
    builder.filter_level(args.log_level);

    // Set format
    builder.format(|buf, record| {
        use chrono::Local;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    // Add file output
    if let Some(log_file) = &args.log_file {
        match File::create(log_file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!(
                "{} cannot open log file {}: {}",
                "Warning:".yellow().bold(),
                log_file.display(),
                e
            ),
        }
    }

    // Initialize logger
    builder.init();
}
