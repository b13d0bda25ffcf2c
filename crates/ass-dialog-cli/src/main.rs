//! ASS dialogue extractor
//!
//! Renders every `Dialogue:` line of an ASS script through a text template,
//! optionally retiming it from one frame rate to another.

use anyhow::{Context, Result};
use ass_dialog_core::{
    template::DEFAULT_TEMPLATE, ConversionReport, ConvertOptions, Converter, FrameRateRatio,
    SubstitutionMode, Template,
};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const FORMAT_HELP: &str = "\
Format tokens:
  !layer   layer number
  !start   start time, H:MM:SS.CC
  !end     end time, H:MM:SS.CC
  !style   style name
  !actor   actor name
  !effect  effect
  !text    dialogue text

Escapes \\t and \\n in the format are replaced by a tab and a newline.";

#[derive(Parser, Debug)]
#[command(name = "ass-dialog")]
#[command(about = "Render ASS dialogue lines through a text template")]
#[command(version, after_help = FORMAT_HELP)]
struct Cli {
    /// Input script, `-` for stdin
    input: Option<PathBuf>,

    /// Output file, `-` for stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Frame rate the script was timed for
    #[arg(long, value_name = "FPS")]
    ofps: Option<f64>,

    /// Frame rate to retime the script for
    #[arg(long, value_name = "FPS")]
    nfps: Option<f64>,

    /// Output template for each dialogue line
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    format: String,

    /// Stop at the first malformed `Dialogue:` line
    #[arg(long)]
    strict: bool,

    /// Substitute all tokens in one pass so field values are never rescanned
    #[arg(long)]
    simultaneous: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Conversion settings described by the flags
    fn convert_options(&self) -> ConvertOptions {
        let mode = if self.simultaneous {
            SubstitutionMode::Simultaneous
        } else {
            SubstitutionMode::Sequential
        };

        ConvertOptions::default()
            .with_template(Template::compile(&self.format))
            .with_ratio(frame_rate_ratio(self.ofps, self.nfps))
            .with_mode(mode)
            .with_strict(self.strict)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();

    let report = run(&cli)?;
    log::info!("{report}");
    Ok(())
}

/// Convert the input named by `cli` into its output
fn run(cli: &Cli) -> Result<ConversionReport> {
    let converter = Converter::new(cli.convert_options());
    let reader = open_input(cli.input.as_deref())?;
    let writer = open_output(cli.output.as_deref())?;

    let source = cli
        .input
        .as_deref()
        .map_or_else(|| "stdin".to_string(), |path| path.display().to_string());
    converter
        .run(reader, writer)
        .with_context(|| format!("Failed to convert {source}"))
}

/// Ratio for the given rates, warning when they cannot be used
fn frame_rate_ratio(ofps: Option<f64>, nfps: Option<f64>) -> FrameRateRatio {
    match (ofps, nfps) {
        (None, None) => FrameRateRatio::IDENTITY,
        (Some(old), Some(new)) => FrameRateRatio::try_new(old, new).unwrap_or_else(|err| {
            log::warn!("{err}; times are left unchanged");
            FrameRateRatio::IDENTITY
        }),
        _ => {
            log::warn!("both --ofps and --nfps are needed to retime; times are left unchanged");
            FrameRateRatio::IDENTITY
        }
    }
}

/// Log level for the number of `-v` flags
const fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Whether `path` is the `-` placeholder for stdin or stdout
fn is_stdio(path: &Path) -> bool {
    path == Path::new("-")
}

/// Buffered reader over the input file, or stdin
fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if !is_stdio(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Buffered writer over the output file, or stdout
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if !is_stdio(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
