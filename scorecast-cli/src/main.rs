mod reports;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;
use scorecast_engine::{CountRequest, PredictRequest, ScoreConfig, ScoreEngine, ScoreKind, SeedClock};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use reports::{Report, ReportCtx, ReportFormat, write_report};
use util::{DisplayZone, check_admission, parse_kinds, parse_start};

const DEFAULT_MAX_DURATION: u64 = 24 * 60 * 60;

#[derive(Debug, Parser)]
#[command(name = "scorecast", version = "0.1.0")]
#[command(about = "Predict time-seeded karaoke total scores and count rare results")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Zone for start times without an offset and for console output
    #[arg(long, value_enum, default_value_t = DisplayZone::Utc, global = true)]
    timezone: DisplayZone,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console, global = true)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// JSON file overriding scoring thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Longest window (seconds) any command may simulate
    #[arg(long, default_value_t = DEFAULT_MAX_DURATION, global = true)]
    max_duration: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the predicted score for every second of a window
    Predict {
        /// Window start (RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, a date, or `now`)
        #[arg(long)]
        start: String,
        /// Window length in seconds
        #[arg(long)]
        duration: u64,
        /// Seed from the machine's JST clock instead of UTC
        #[arg(long)]
        jst_seed: bool,
        /// Score kinds to keep (comma-separated: normal,quadruple,hundred or all)
        #[arg(long, default_value = "all")]
        include: String,
    },
    /// Count hundred and quadruple scores per span under both seed clocks
    Count {
        #[arg(long)]
        start: String,
        /// Span length in seconds
        #[arg(long)]
        span: u64,
        /// Window length in seconds
        #[arg(long)]
        duration: u64,
    },
    /// Find the next second producing a given score kind
    Next {
        #[arg(long)]
        start: String,
        /// normal, quadruple or hundred
        #[arg(long)]
        kind: ScoreKind,
        /// How far ahead to search, in seconds
        #[arg(long, default_value_t = DEFAULT_MAX_DURATION)]
        horizon: u64,
        #[arg(long)]
        jst_seed: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let engine = load_engine(args.config.as_deref())?;
    let start_time = Instant::now();
    let report = run_command(&args, &engine)?;
    let elapsed = start_time.elapsed();
    info!("{} computed in {elapsed:?}", command_label(&args.command));
    if args.verbose {
        eprintln!(
            "{} {} in {elapsed:?}",
            "⏱".cyan(),
            command_label(&args.command).bold()
        );
    }

    let mut output_target = OutputTarget::new(args.output.clone())?;
    let ctx = ReportCtx {
        zone: args.timezone,
        config: engine.config(),
    };
    write_report(&mut output_target, args.report, &report, &ctx)?;
    output_target.flush_inner()?;
    Ok(())
}

fn load_engine(path: Option<&Path>) -> Result<ScoreEngine> {
    let config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ScoreConfig::from_json(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => ScoreConfig::default(),
    };
    ScoreEngine::new(config).context("invalid scoring configuration")
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Predict { .. } => "predict",
        Command::Count { .. } => "count",
        Command::Next { .. } => "next",
    }
}

fn run_command(args: &Args, engine: &ScoreEngine) -> Result<Report> {
    let config = engine.config();
    match &args.command {
        Command::Predict {
            start,
            duration,
            jst_seed,
            include,
        } => {
            check_admission("duration", *duration, args.max_duration)?;
            let request = PredictRequest {
                start: parse_start(start, args.timezone, config)?,
                duration_seconds: *duration,
                seed_clock: SeedClock::from_jst_flag(*jst_seed),
                filter: parse_kinds(include)?,
            };
            Ok(Report::Predictions(engine.predict(&request)?))
        }
        Command::Count {
            start,
            span,
            duration,
        } => {
            check_admission("duration", *duration, args.max_duration)?;
            let request = CountRequest {
                start: parse_start(start, args.timezone, config)?,
                span_seconds: *span,
                duration_seconds: *duration,
            };
            Ok(Report::Counts(engine.count_by_window(&request)?))
        }
        Command::Next {
            start,
            kind,
            horizon,
            jst_seed,
        } => {
            check_admission("horizon", *horizon, args.max_duration)?;
            let found = engine.next_occurrence(
                parse_start(start, args.timezone, config)?,
                *kind,
                *horizon,
                SeedClock::from_jst_flag(*jst_seed),
            )?;
            Ok(Report::Next { kind: *kind, found })
        }
    }
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
