//! Command-line argument parsing for the amparo terminal host.
//!
//! This module handles parsing command-line arguments and determining
//! which command to execute.

use thiserror::Error;

/// Parsed CLI invocation: a command plus any options that modify it.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: CliCommand,
    pub options: CliOptions,
}

/// Command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Probe the backend health endpoint
    Health,
    /// Delete a backend session by id
    Clear { session_id: String },
    /// Run the interactive chat (default)
    Chat,
}

/// Options shared by the commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOptions {
    /// Backend base URL override (`--api-url`).
    pub api_url: Option<String>,
    /// Use the non-streaming endpoint (`--no-stream`).
    pub no_stream: bool,
}

/// Errors produced while parsing arguments.
#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("missing value for {0}")]
    MissingValue(&'static str),
}

/// Parse command-line arguments.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
pub fn parse_args<I>(args: I) -> Result<CliArgs, CliError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1); // Skip the program name
    let mut command = CliCommand::Chat;
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliArgs::new(CliCommand::Version, options)),
            "--help" | "-h" => return Ok(CliArgs::new(CliCommand::Help, options)),
            "--api-url" => {
                let url = args.next().ok_or(CliError::MissingValue("--api-url"))?;
                options.api_url = Some(url);
            }
            "--no-stream" => options.no_stream = true,
            "health" => command = CliCommand::Health,
            "clear" => {
                let session_id = args.next().ok_or(CliError::MissingValue("clear"))?;
                command = CliCommand::Clear { session_id };
            }
            other => return Err(CliError::UnknownArgument(other.to_string())),
        }
    }

    Ok(CliArgs::new(command, options))
}

impl CliArgs {
    fn new(command: CliCommand, options: CliOptions) -> Self {
        Self { command, options }
    }
}

/// Usage text for `--help`.
pub const USAGE: &str = "\
amparo - terminal client for the Defensa Publica assistance backend

USAGE:
    amparo [OPTIONS] [COMMAND]

COMMANDS:
    health              Probe the backend health endpoint
    clear <session-id>  Delete a backend session
    (none)              Start an interactive chat

OPTIONS:
    --api-url <url>     Backend base URL (default: http://localhost:8000)
    --no-stream         Use the non-streaming chat endpoint
    -V, --version       Show version information
    -h, --help          Show this message
";
