//! Command line configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::pattern::Pattern;
use crate::pattern::PatternError;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

/// Time between two generations.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

pub const DEFAULT_PATTERN: &str = "r-pentomino";

pub const USAGE: &str = "\
usage: sparselife [options]

options:
  --interval-ms N    time between generations in milliseconds (default 50)
  --rule RULE        life-like rule such as B3/S23 (default: the pattern's rule, else B3/S23)
  --pattern NAME     built-in starting pattern (default r-pentomino)
  --file PATH        read the starting pattern from an RLE file
  --generations N    stop after N generations
  --headless         no terminal UI: run --generations and print the result
  -h, --help         print this message
";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },

    #[error("Invalid value \"{value}\" for {flag}")]
    InvalidValue { flag: &'static str, value: String },

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),

    #[error("The interval must be at least one millisecond")]
    ZeroInterval,

    #[error("--headless needs --generations")]
    HeadlessWithoutLimit,

    #[error("Unknown argument: {0}\n\n{usage}", usage = USAGE)]
    UnknownArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    Builtin(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub interval: Duration,

    /// Rule chosen on the command line. Overrides the one the pattern asks for.
    pub rule: Option<RuleSet>,

    pub source: PatternSource,

    /// Stop after this many generations
    pub generations: Option<u64>,

    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            rule: None,
            source: PatternSource::Builtin(DEFAULT_PATTERN.to_string()),
            generations: None,
            headless: false,
        }
    }
}

impl Config {
    pub fn load_pattern(&self) -> Result<Pattern, PatternError> {
        match &self.source {
            PatternSource::Builtin(name) => Pattern::builtin(name),
            PatternSource::File(path) => Pattern::load(path),
        }
    }

    /// The rule to run `pattern` with: the command line wins, then the pattern, then Life.
    pub fn rule_for(&self, pattern: &Pattern) -> RuleSet {
        self.rule.or(pattern.rule).unwrap_or_default()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
}

/// Parse the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = Config::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &'static str| args.next().ok_or(ConfigError::MissingValue { flag });

        match arg.as_str() {
            "--interval-ms" => {
                let ms: u64 = parse_number("--interval-ms", value("--interval-ms")?)?;
                if ms == 0 {
                    return Err(ConfigError::ZeroInterval);
                }

                config.interval = Duration::from_millis(ms);
            }
            "--rule" => {
                config.rule = Some(value("--rule")?.parse::<RuleSet>()?);
            }
            "--pattern" => {
                config.source = PatternSource::Builtin(value("--pattern")?);
            }
            "--file" => {
                config.source = PatternSource::File(PathBuf::from(value("--file")?));
            }
            "--generations" => {
                config.generations = Some(parse_number("--generations", value("--generations")?)?);
            }
            "--headless" => {
                config.headless = true;
            }
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(ConfigError::UnknownArgument(arg)),
        }
    }

    if config.headless && config.generations.is_none() {
        return Err(ConfigError::HeadlessWithoutLimit);
    }

    Ok(Command::Run(config))
}

fn parse_number(flag: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { flag, value })
}
