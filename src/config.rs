// config.rs - Command-line configuration
//
// Arguments are either `key=value` or positional. A positional value goes to
// the option after the last named one (the first option if none was named),
// then the cursor moves on, following the order of `SCHEMA`.

use std::fmt::Write as _;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::grid::{MAX_DIMENSION, MIN_DIMENSION};
use crate::patterns::{Pattern, PatternError};
use crate::theme::{Theme, UnknownTheme};

/// Delays must stay below this many seconds.
pub const MAX_DELAY_SECS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Window,
    Terminal,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "window" => Ok(Backend::Window),
            "terminal" => Ok(Backend::Terminal),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid needs at least {min} rows, got {0}", min = MIN_DIMENSION)]
    RowsTooSmall(usize),

    #[error("grid needs at least {min} columns, got {0}", min = MIN_DIMENSION)]
    ColumnsTooSmall(usize),

    #[error("grid allows at most {max} rows, got {0}", max = MAX_DIMENSION)]
    RowsTooLarge(usize),

    #[error("grid allows at most {max} columns, got {0}", max = MAX_DIMENSION)]
    ColumnsTooLarge(usize),

    #[error("delay {0}s is outside the [0, {max}) second range", max = MAX_DELAY_SECS)]
    DelayOutOfRange(f64),

    #[error(transparent)]
    Theme(#[from] UnknownTheme),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("unknown backend '{0}', choose 'window' or 'terminal'")]
    UnknownBackend(String),

    #[error("generations must be at least 1")]
    ZeroGenerations,

    #[error("option '{key}' expects {expected}, got '{value}'")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unexpected positional argument '{0}', no option left to fill")]
    UnexpectedPositional(String),
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub columns: usize,
    pub delay_secs: f64,
    pub theme: Theme,
    pub title: String,
    pub seed: Option<u64>,
    pub pattern: Option<&'static Pattern>,
    pub backend: Backend,
    pub generations: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 50,
            columns: 50,
            delay_secs: 0.0,
            theme: Theme::Dark,
            title: "Bruno's Game".to_string(),
            seed: None,
            pattern: None,
            backend: Backend::Window,
            generations: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
}

type Setter = fn(&mut Config, &'static str, &str) -> Result<(), ConfigError>;

/// One entry of the ordered option schema.
pub struct OptionSpec {
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub help: &'static str,
    set: Setter,
}

pub const SCHEMA: &[OptionSpec] = &[
    OptionSpec {
        name: "rows",
        alias: Some("x"),
        help: "grid height in cells (20..=10000, default 50)",
        set: |c, key, v| {
            c.rows = number(key, v, "an integer")?;
            Ok(())
        },
    },
    OptionSpec {
        name: "columns",
        alias: Some("y"),
        help: "grid width in cells (20..=10000, default 50)",
        set: |c, key, v| {
            c.columns = number(key, v, "an integer")?;
            Ok(())
        },
    },
    OptionSpec {
        name: "delay",
        alias: None,
        help: "seconds between generations, 0 <= delay < 10 (default 0)",
        set: |c, key, v| {
            c.delay_secs = number(key, v, "a number of seconds")?;
            Ok(())
        },
    },
    OptionSpec {
        name: "theme",
        alias: None,
        help: "dark, light or dartmouth (default dark)",
        set: |c, _, v| {
            c.theme = v.parse()?;
            Ok(())
        },
    },
    OptionSpec {
        name: "title",
        alias: None,
        help: "window title (default \"Bruno's Game\")",
        set: |c, _, v| {
            c.title = v.to_string();
            Ok(())
        },
    },
    OptionSpec {
        name: "seed",
        alias: None,
        help: "seed for the random starting grid",
        set: |c, key, v| {
            c.seed = Some(number(key, v, "an unsigned integer")?);
            Ok(())
        },
    },
    OptionSpec {
        name: "pattern",
        alias: None,
        help: "start from a named pattern instead of a random grid",
        set: |c, _, v| {
            c.pattern = Some(Pattern::find(v)?);
            Ok(())
        },
    },
    OptionSpec {
        name: "backend",
        alias: None,
        help: "window or terminal (default window)",
        set: |c, _, v| {
            c.backend = v.parse()?;
            Ok(())
        },
    },
    OptionSpec {
        name: "generations",
        alias: None,
        help: "stop after this many generations",
        set: |c, key, v| {
            c.generations = Some(number(key, v, "an unsigned integer")?);
            Ok(())
        },
    },
];

fn number<T: FromStr>(key: &'static str, value: &str, expected: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        expected,
    })
}

fn slot_of(key: &str) -> Option<usize> {
    let key = key.trim().trim_start_matches("--").to_lowercase();
    SCHEMA
        .iter()
        .position(|spec| spec.name == key || spec.alias == Some(key.as_str()))
}

impl Config {
    /// Parses arguments (without the program name) on top of the defaults.
    pub fn from_args<I, S>(args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values: Vec<Option<String>> = vec![None; SCHEMA.len()];
        let mut cursor = 0;

        for arg in args {
            let arg = arg.as_ref();
            if matches!(arg, "-h" | "--help") {
                return Ok(Command::Help);
            }

            match arg.split_once('=') {
                Some((key, value)) => {
                    let slot = slot_of(key).ok_or_else(|| ConfigError::UnknownOption(key.to_string()))?;
                    values[slot] = Some(value.to_string());
                    cursor = slot + 1;
                }
                None => {
                    let slot = values
                        .get_mut(cursor)
                        .ok_or_else(|| ConfigError::UnexpectedPositional(arg.to_string()))?;
                    *slot = Some(arg.to_string());
                    cursor += 1;
                }
            }
        }

        let mut config = Config::default();
        for (spec, value) in SCHEMA.iter().zip(&values) {
            if let Some(value) = value {
                (spec.set)(&mut config, spec.name, value)?;
            }
        }
        config.validate()?;
        Ok(Command::Run(config))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < MIN_DIMENSION {
            return Err(ConfigError::RowsTooSmall(self.rows));
        }
        if self.columns < MIN_DIMENSION {
            return Err(ConfigError::ColumnsTooSmall(self.columns));
        }
        if self.rows > MAX_DIMENSION {
            return Err(ConfigError::RowsTooLarge(self.rows));
        }
        if self.columns > MAX_DIMENSION {
            return Err(ConfigError::ColumnsTooLarge(self.columns));
        }
        if !(0.0..MAX_DELAY_SECS).contains(&self.delay_secs) {
            return Err(ConfigError::DelayOutOfRange(self.delay_secs));
        }
        if self.generations == Some(0) {
            return Err(ConfigError::ZeroGenerations);
        }
        if let Some(pattern) = self.pattern {
            pattern.place(self.rows, self.columns)?;
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_secs).unwrap_or(Duration::ZERO)
    }
}

/// Help text listing every option in positional order.
pub fn usage(program: &str) -> String {
    let mut text = format!("Usage: {program} [key=value | value]...\n\nOptions, in positional order:\n");
    for spec in SCHEMA {
        let name = match spec.alias {
            Some(alias) => format!("{} ({alias})", spec.name),
            None => spec.name.to_string(),
        };
        let _ = writeln!(text, "  {name:<14} {}", spec.help);
    }
    text
}
