use std::fmt;
use std::path::PathBuf;

use logicflow_core::model::{QuestionFormat, Topic};

pub const DEFAULT_DATA_FILE: &str = "logicflow.json";
pub const DEFAULT_TOPIC: Topic = Topic::BooleanBasic;

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidTopic { raw: String },
    InvalidFormat { raw: String },
    InvalidSeed { raw: String },
    InvalidFontSize { raw: String },
    InvalidToggle { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidTopic { raw } => write!(f, "invalid --topic value: {raw}"),
            ArgsError::InvalidFormat { raw } => write!(f, "invalid --format value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidFontSize { raw } => write!(f, "invalid --font-size value: {raw}"),
            ArgsError::InvalidToggle { raw } => write!(f, "expected on or off, got: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Practice,
    Progress,
    Reset,
    Settings,
    Topics,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "practice" => Some(Self::Practice),
            "progress" => Some(Self::Progress),
            "reset" => Some(Self::Reset),
            "settings" => Some(Self::Settings),
            "topics" => Some(Self::Topics),
            _ => None,
        }
    }
}

/// Parsed command line. Flags that a command does not use are still accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub data: PathBuf,
    pub topic: Option<Topic>,
    pub format: Option<QuestionFormat>,
    pub seed: Option<u64>,
    pub font_size: Option<u8>,
    pub dark_mode: Option<bool>,
    pub help: bool,
}

impl Args {
    /// Parse `argv` (without the program name), falling back to `env` for
    /// `LOGICFLOW_DATA` and `LOGICFLOW_TOPIC`.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut args = argv.into_iter().peekable();

        let command = match args.peek().map(String::as_str) {
            None => Command::Practice,
            Some(first) if first.starts_with('-') => Command::Practice,
            Some(first) => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_owned()))?;
                args.next();
                command
            }
        };

        let mut parsed = Self {
            command,
            data: env("LOGICFLOW_DATA").map_or_else(|| PathBuf::from(DEFAULT_DATA_FILE), PathBuf::from),
            topic: env("LOGICFLOW_TOPIC")
                .map(|raw| raw.parse().map_err(|_| ArgsError::InvalidTopic { raw }))
                .transpose()?,
            format: None,
            seed: None,
            font_size: None,
            dark_mode: None,
            help: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => parsed.data = PathBuf::from(require_value(&mut args, "--data")?),
                "--topic" => {
                    let raw = require_value(&mut args, "--topic")?;
                    parsed.topic =
                        Some(raw.parse().map_err(|_| ArgsError::InvalidTopic { raw })?);
                }
                "--format" => {
                    let raw = require_value(&mut args, "--format")?;
                    parsed.format =
                        Some(raw.parse().map_err(|_| ArgsError::InvalidFormat { raw })?);
                }
                "--seed" => {
                    let raw = require_value(&mut args, "--seed")?;
                    parsed.seed = Some(raw.parse().map_err(|_| ArgsError::InvalidSeed { raw })?);
                }
                "--font-size" => {
                    let raw = require_value(&mut args, "--font-size")?;
                    parsed.font_size =
                        Some(raw.parse().map_err(|_| ArgsError::InvalidFontSize { raw })?);
                }
                "--dark-mode" => {
                    let raw = require_value(&mut args, "--dark-mode")?;
                    parsed.dark_mode = Some(match raw.as_str() {
                        "on" | "true" => true,
                        "off" | "false" => false,
                        _ => return Err(ArgsError::InvalidToggle { raw }),
                    });
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  logicflow [practice] [--topic <id>] [--format <multiple-choice|fill-in>] [--seed <n>]");
    eprintln!("  logicflow progress");
    eprintln!("  logicflow reset    [--topic <id>]");
    eprintln!("  logicflow settings [--format <fmt>] [--font-size <12-24>] [--dark-mode <on|off>]");
    eprintln!("  logicflow topics");
    eprintln!();
    eprintln!("Every command accepts --data <path> (default {DEFAULT_DATA_FILE}).");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LOGICFLOW_DATA, LOGICFLOW_TOPIC, RUST_LOG");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_to_practice() {
        let args = Args::parse(argv(&[]), no_env).unwrap();
        assert_eq!(args.command, Command::Practice);
        assert_eq!(args.data, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(args.topic, None);
    }

    #[test]
    fn flags_without_subcommand_mean_practice() {
        let args = Args::parse(
            argv(&["--topic", "demorgan", "--format", "fill-in", "--seed", "42"]),
            no_env,
        )
        .unwrap();
        assert_eq!(args.command, Command::Practice);
        assert_eq!(args.topic, Some(Topic::DeMorgan));
        assert_eq!(args.format, Some(QuestionFormat::FillIn));
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn env_supplies_data_and_topic() {
        let env = |key: &str| match key {
            "LOGICFLOW_DATA" => Some("/tmp/drills.json".to_owned()),
            "LOGICFLOW_TOPIC" => Some("k-map".to_owned()),
            _ => None,
        };
        let args = Args::parse(argv(&["reset"]), env).unwrap();
        assert_eq!(args.command, Command::Reset);
        assert_eq!(args.data, PathBuf::from("/tmp/drills.json"));
        assert_eq!(args.topic, Some(Topic::KMap));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Args::parse(argv(&["--topic", "calculus"]), no_env),
            Err(ArgsError::InvalidTopic { .. })
        ));
        assert!(matches!(
            Args::parse(argv(&["--seed"]), no_env),
            Err(ArgsError::MissingValue { flag: "--seed" })
        ));
        assert!(matches!(
            Args::parse(argv(&["launch"]), no_env),
            Err(ArgsError::UnknownCommand(_))
        ));
        assert!(matches!(
            Args::parse(argv(&["settings", "--dark-mode", "maybe"]), no_env),
            Err(ArgsError::InvalidToggle { .. })
        ));
    }
}
