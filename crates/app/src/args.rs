use std::fmt;
use std::path::PathBuf;

use services::gateway::DEFAULT_BASE_URL;

pub const DEFAULT_SESSION_FILE: &str = "session.json";

pub const API_URL_ENV: &str = "TRACKER_API_URL";
pub const SESSION_FILE_ENV: &str = "TRACKER_SESSION_FILE";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    MissingToken,
    Empty { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::MissingToken => write!(f, "login requires --token <token>"),
            ArgsError::Empty { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ui,
    Login { token: String },
    Logout,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub api_url: String,
    pub session_file: PathBuf,
    pub command: Command,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    Run(Args),
    Help,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  tracker [ui]             [--api-url <url>] [--session-file <path>]");
    eprintln!("  tracker login --token <t> [--session-file <path>]");
    eprintln!("  tracker logout           [--session-file <path>]");
    eprintln!("  tracker status           [--session-file <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {DEFAULT_BASE_URL}");
    eprintln!("  --session-file ./{DEFAULT_SESSION_FILE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {API_URL_ENV}, {SESSION_FILE_ENV}, RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::Empty { flag });
    }
    Ok(value)
}

/// Parse `argv` (without the program name). Flags win over the environment.
///
/// The subcommand, if any, must come first; flags may follow in any order.
pub fn parse(
    argv: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Parsed, ArgsError> {
    let mut args = argv.into_iter().peekable();

    let subcommand = match args.peek().map(String::as_str) {
        None => "ui".to_string(),
        Some("--help" | "-h") => return Ok(Parsed::Help),
        Some(first) if first.starts_with("--") => "ui".to_string(),
        Some(_) => args.next().unwrap_or_default(),
    };

    let mut api_url = env(API_URL_ENV)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let mut session_file = env(SESSION_FILE_ENV)
        .filter(|value| !value.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);
    let mut token = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => api_url = require_value(&mut args, "--api-url")?,
            "--session-file" => {
                session_file = PathBuf::from(require_value(&mut args, "--session-file")?);
            }
            "--token" if subcommand == "login" => {
                token = Some(require_value(&mut args, "--token")?);
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    let command = match subcommand.as_str() {
        "ui" => Command::Ui,
        "login" => Command::Login {
            token: token.ok_or(ArgsError::MissingToken)?,
        },
        "logout" => Command::Logout,
        "status" => Command::Status,
        _ => return Err(ArgsError::UnknownCommand(subcommand)),
    };

    Ok(Parsed::Run(Args {
        api_url,
        session_file,
        command,
    }))
}
