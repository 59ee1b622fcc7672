use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glob::glob;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tagwire_core::{ConsoleHandlers, RunReport};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("TAGWIRE_BUILD_COMMIT"),
    ", ",
    env!("TAGWIRE_BUILD_DATE"),
    ")"
);

const RUN_EXAMPLES: &str = "Examples:\n  tagwire vectors run vectors.hex -o report.json\n  tagwire vectors run --builtin --stdout --pretty\n  tagwire vectors test 'fixtures/*.hex' --stdout --strict";

#[derive(Parser, Debug)]
#[command(name = "tagwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode and dispatch tagged binary messages (display / motor).",
    long_about = None,
    after_help = RUN_EXAMPLES
)]
struct Cli {
    /// Log level filter when RUST_LOG is unset (e.g. warn, debug, tagwire_core=debug)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on message vector lists.
    Vectors {
        #[command(subcommand)]
        command: VectorsCommands,
    },
    /// Encode a message frame and print it as hex.
    Encode {
        #[command(subcommand)]
        command: EncodeCommands,
    },
}

#[derive(Subcommand, Debug)]
enum VectorsCommands {
    /// Dispatch every vector and write a JSON report with the pass/fail tally.
    #[command(alias = "test")]
    #[command(after_help = RUN_EXAMPLES)]
    Run {
        /// Path (or glob matching one file) to a .hex or .txt vector list
        #[arg(required_unless_present = "builtin", conflicts_with = "builtin")]
        input: Option<PathBuf>,

        /// Run the built-in reference vectors
        #[arg(long)]
        builtin: bool,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress display output and non-error messages
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any vector failed
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Subcommand, Debug)]
enum EncodeCommands {
    /// Display message carrying TEXT
    Display {
        /// Message id
        #[arg(long, default_value_t = 1)]
        id: u8,
        /// Text payload (sent as UTF-8 bytes)
        text: String,
    },
    /// Motor command with two axis values
    #[command(allow_negative_numbers = true)]
    Motor {
        /// Message id
        #[arg(long, default_value_t = 2)]
        id: u8,
        /// Forward/back value
        forward_back: f32,
        /// Left/right value
        left_right: f32,
    },
}

struct RunOptions {
    input: Option<PathBuf>,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = init_logging(&cli.log_level).and_then(|()| match cli.command {
        Commands::Vectors { command } => match command {
            VectorsCommands::Run {
                input,
                builtin: _,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
            } => cmd_vectors_run(RunOptions {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
            }),
        },
        Commands::Encode { command } => cmd_encode(command),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn init_logging(level: &str) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|err| {
            CliError::new(
                format!("invalid log level '{}'", level),
                Some(format!("filter error: {}", err)),
            )
        })?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init()
        .map_err(|err| CliError::new(format!("failed to init logging: {}", err), None))
}

fn cmd_vectors_run(opts: RunOptions) -> Result<(), CliError> {
    if opts.pretty && opts.compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let report_path = if opts.stdout {
        None
    } else {
        Some(opts.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    let out: Box<dyn Write> = if opts.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    };
    let mut handlers = ConsoleHandlers::new(out);

    let mut rep = match opts.input.as_ref() {
        Some(input) => {
            let resolved = resolve_input_path(input)?;
            validate_input_file(&resolved)?;
            debug!(input = %resolved.display(), "running vector file");
            if let Some(report_path) = report_path.as_ref() {
                ensure_distinct_paths(&resolved, report_path)?;
            }
            tagwire_core::run_vector_file(&resolved, &mut handlers)
                .context("vector run failed")?
        }
        None => tagwire_core::run_builtin(&mut handlers).context("vector run failed")?,
    };
    rep.generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("timestamp formatting failed")?;
    rep.tool.commit = Some(env!("TAGWIRE_BUILD_COMMIT").to_string());

    let json = serialize_report(&rep, opts.pretty)?;

    match report_path {
        None => {
            print!("{}", json);
            io::stdout().flush().context("failed to flush stdout")?;
        }
        Some(report_path) => {
            if let Some(parent) = report_path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report_path, json)
                .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
            if !opts.quiet {
                eprintln!("OK: report written -> {}", report_path.display());
            }
        }
    }

    if !opts.quiet {
        print_summary(&rep);
    }
    if opts.strict && rep.has_failures() {
        return Err(CliError::new(
            format!("{} of {} vectors failed", rep.summary.failed, rep.summary.total),
            Some("inspect the report results for the failing vectors".to_string()),
        ));
    }
    Ok(())
}

fn cmd_encode(command: EncodeCommands) -> Result<(), CliError> {
    let frame = match command {
        EncodeCommands::Display { id, text } => tagwire_core::encode_display(id, text.as_bytes())
            .map_err(|err| {
                CliError::new(
                    err.to_string(),
                    Some("display payloads are limited to 65535 bytes".to_string()),
                )
            })?,
        EncodeCommands::Motor {
            id,
            forward_back,
            left_right,
        } => tagwire_core::encode_motor(id, forward_back, left_right),
    };
    println!("{}", tagwire_core::to_hex(&frame));
    Ok(())
}

fn serialize_report(rep: &RunReport, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_summary(rep: &RunReport) {
    for result in rep.results.iter().filter(|result| !result.passed) {
        eprintln!(
            "FAIL: vector {} (line {}): expected {}, got {}",
            result.index, result.origin, result.expected, result.outcome
        );
    }
    eprintln!(
        "Summary: {} passed, {} failed, {} total",
        rep.summary.passed, rep.summary.failed, rep.summary.total
    );
}

fn ensure_distinct_paths(input: &PathBuf, report: &PathBuf) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // A report directory that does not exist yet cannot contain the input.
    let Ok(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .hex or .txt vector file, or --builtin".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .hex or .txt vector file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "hex" && ext != "txt" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .hex or .txt vector file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .hex or .txt".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single vector file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
