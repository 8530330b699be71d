// capcheck-cli/src/main.rs
// ============================================================================
// Module: capcheck CLI Entry Point
// Description: Command dispatcher for conformance runs and authoring tasks.
// Purpose: Provide a safe CLI for running, validating, and normalizing contract sources.
// Dependencies: capcheck-core, capcheck-registry, clap, thiserror.
// ============================================================================

//! ## Overview
//! The capcheck CLI loads a declarative contract source, binds it to a
//! scripted candidate, and reports one line per contract result plus a
//! trailing summary line. All user-facing strings are routed through the
//! i18n catalog to prepare for future localization. Inputs are untrusted and
//! size-limited before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use capcheck_cli::t;
use capcheck_core::ConformanceRunner;
use capcheck_core::ExecutionResult;
use capcheck_core::Isolation;
use capcheck_core::RunSummary;
use capcheck_core::RunnerOptions;
use capcheck_core::ScriptSpec;
use capcheck_core::ScriptedFactory;
use capcheck_registry::LoadedContractSet;
use capcheck_registry::SourceFormat;
use capcheck_registry::detect_format;
use capcheck_registry::load_contract_set;
use capcheck_registry::load_script_spec;
use capcheck_registry::validate;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a contract-source input file.
const MAX_SOURCE_BYTES: u64 = 1024 * 1024;
/// Maximum size of a candidate-script input file.
const MAX_SCRIPT_BYTES: u64 = 1024 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "capcheck", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a contract source against a candidate script.
    Run(RunCommand),
    /// Validate a contract source and report warnings.
    Validate(ValidateCommand),
    /// Normalize a contract source to canonical JSON.
    Normalize(NormalizeCommand),
}

/// Source format argument accepted by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Canonical JSON input.
    Json,
    /// Human-friendly RON input.
    Ron,
}

impl From<FormatArg> for SourceFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => Self::Json,
            FormatArg::Ron => Self::Ron,
        }
    }
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Contract source path.
    #[arg(value_name = "PATH")]
    source: PathBuf,
    /// Contract source format (defaults to the file extension).
    #[arg(long, value_enum, value_name = "FORMAT")]
    format: Option<FormatArg>,
    /// Optional candidate behavior script path.
    #[arg(long, value_name = "PATH")]
    candidate: Option<PathBuf>,
    /// Candidate script format (defaults to the file extension).
    #[arg(long = "candidate-format", value_enum, value_name = "FORMAT")]
    candidate_format: Option<FormatArg>,
    /// Halt after the first fail/error and report the rest as skipped.
    #[arg(long, action = ArgAction::SetTrue)]
    stop_on_first_failure: bool,
    /// Per-contract execution deadline in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,
    /// Prepare a fresh candidate per contract (true, the default) or reuse one (false).
    #[arg(long, value_name = "BOOL")]
    isolation: Option<bool>,
    /// Treat contract warnings as fatal.
    #[arg(long, action = ArgAction::SetTrue)]
    warnings_as_errors: bool,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Contract source path.
    #[arg(value_name = "PATH")]
    input: PathBuf,
    /// Contract source format (defaults to the file extension).
    #[arg(long, value_enum, value_name = "FORMAT")]
    format: Option<FormatArg>,
}

/// Arguments for the `normalize` command.
#[derive(Args, Debug)]
struct NormalizeCommand {
    /// Contract source path.
    #[arg(value_name = "PATH")]
    input: PathBuf,
    /// Contract source format (defaults to the file extension).
    #[arg(long, value_enum, value_name = "FORMAT")]
    format: Option<FormatArg>,
    /// Output path for canonical JSON (defaults to stdout).
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

// ============================================================================
// SECTION: CLI Errors
// ============================================================================

/// CLI error carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// User-facing error message.
    message: String,
}

impl CliError {
    /// Creates a CLI error from a user-facing message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Run(command) => command_run(&command),
        Commands::Validate(command) => command_validate(&command),
        Commands::Normalize(command) => command_normalize(&command),
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let loaded = load_source(&command.source, command.format)?;

    let warnings = validate(&loaded.set);
    for warning in &warnings {
        write_stderr_line(&t!("run.warning", warning = warning))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    if command.warnings_as_errors && !warnings.is_empty() {
        return Err(CliError::new(t!("run.warnings_fatal", count = warnings.len())));
    }

    let script = match &command.candidate {
        Some(path) => load_candidate_script(path, command.candidate_format)?,
        None => ScriptSpec::default(),
    };

    let options = RunnerOptions {
        stop_on_first_failure: command.stop_on_first_failure,
        isolation: match command.isolation {
            Some(false) => Isolation::Reuse,
            _ => Isolation::Fresh,
        },
        timeout: command.timeout.map(Duration::from_millis),
    };
    let runner = ConformanceRunner::new(options);
    let factory = Arc::new(ScriptedFactory::new(script));

    let results =
        runner.run(&loaded.set, &factory).map_err(|err| CliError::new(err.to_string()))?;
    let summary = RunSummary::summarize(&results, loaded.set.stub_count());

    for result in &results {
        write_stdout_line(&result_line(result))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    write_stdout_line(&summary_line(&summary))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    Ok(ExitCode::from(summary.exit_code()))
}

/// Renders one per-contract result line.
fn result_line(result: &ExecutionResult) -> String {
    match &result.detail {
        Some(detail) => {
            t!("run.result_detailed", name = result.name, outcome = result.outcome, detail = detail)
        }
        None => t!("run.result", name = result.name, outcome = result.outcome),
    }
}

/// Renders the trailing summary line.
fn summary_line(summary: &RunSummary) -> String {
    t!(
        "run.summary",
        passed = summary.passed,
        failed = summary.failed,
        errored = summary.errored,
        skipped = summary.skipped,
        stubbed = summary.stubbed,
        declared = summary.total_declared,
    )
}

// ============================================================================
// SECTION: Validate Command
// ============================================================================

/// Executes the `validate` command.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let loaded = load_source(&command.input, command.format)?;

    for warning in validate(&loaded.set) {
        write_stderr_line(&t!("run.warning", warning = warning))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    write_stdout_line(&t!(
        "validate.ok",
        set_id = loaded.set.set_id,
        set_hash = loaded.set_hash.value,
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Normalize Command
// ============================================================================

/// Executes the `normalize` command.
fn command_normalize(command: &NormalizeCommand) -> CliResult<ExitCode> {
    let loaded = load_source(&command.input, command.format)?;

    let canonical = String::from_utf8(loaded.canonical_json)
        .map_err(|err| CliError::new(t!("normalize.encode_failed", error = err)))?;

    match &command.output {
        Some(path) => {
            fs::write(path, &canonical).map_err(|err| {
                CliError::new(t!(
                    "normalize.write_failed",
                    path = path.display(),
                    error = err
                ))
            })?;
            write_stdout_line(&t!("normalize.ok", path = path.display()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        None => {
            write_stdout_line(&canonical)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Loads and normalizes a contract source from disk.
fn load_source(path: &Path, format: Option<FormatArg>) -> CliResult<LoadedContractSet> {
    let format = resolve_format(format, path)?;
    let input = read_limited(path, "input.kind.source", MAX_SOURCE_BYTES)?;
    load_contract_set(&input, format).map_err(|err| {
        CliError::new(t!("source.load_failed", path = path.display(), error = err))
    })
}

/// Loads a candidate behavior script from disk.
fn load_candidate_script(path: &Path, format: Option<FormatArg>) -> CliResult<ScriptSpec> {
    let format = resolve_format(format, path)?;
    let input = read_limited(path, "input.kind.script", MAX_SCRIPT_BYTES)?;
    load_script_spec(&input, format).map_err(|err| {
        CliError::new(t!("run.candidate.load_failed", path = path.display(), error = err))
    })
}

/// Resolves an input format from an explicit flag or the file extension.
fn resolve_format(explicit: Option<FormatArg>, path: &Path) -> CliResult<SourceFormat> {
    if let Some(format) = explicit {
        return Ok(format.into());
    }
    detect_format(path)
        .ok_or_else(|| CliError::new(t!("source.format.missing", path = path.display())))
}

/// Reads a size-limited text input from disk.
fn read_limited(path: &Path, kind_key: &'static str, limit: u64) -> CliResult<String> {
    let kind = capcheck_cli::i18n::translate(kind_key, Vec::new());
    let size = fs::metadata(path)
        .map_err(|err| {
            CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = err))
        })?
        .len();
    if size > limit {
        return Err(CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit,
        )));
    }
    fs::read_to_string(path).map_err(|err| {
        CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = err))
    })
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one line to stdout.
fn write_stdout_line(line: &str) -> std::io::Result<()> {
    let mut handle = std::io::stdout().lock();
    handle.write_all(line.as_bytes())?;
    handle.write_all(b"\n")
}

/// Writes one line to stderr.
fn write_stderr_line(line: &str) -> std::io::Result<()> {
    let mut handle = std::io::stderr().lock();
    handle.write_all(line.as_bytes())?;
    handle.write_all(b"\n")
}

/// Renders an output-stream failure message.
fn output_error(stream: &str, err: &std::io::Error) -> String {
    let stream = match stream {
        "stdout" => t!("output.stream.stdout"),
        _ => t!("output.stream.stderr"),
    };
    t!("output.write_failed", stream = stream, error = err)
}

/// Emits a fatal error to stderr and returns a failing exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}
