//! Explicit store configuration.
//!
//! # Responsibility
//! - Carry the database target and query behavior as a plain value.
//! - Load that value from process environment for binaries.
//!
//! # Invariants
//! - Core code never reads environment or global state on its own; callers
//!   build a `StoreConfig` and pass it to `Store::open`.
//! - Environment loading never panics; malformed values are reported as
//!   `ConfigError`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DB_PATH: &str = "PAYROLL_DB_PATH";
pub const ENV_NAME_MATCH: &str = "PAYROLL_NAME_MATCH";
pub const ENV_BUSY_TIMEOUT_MS: &str = "PAYROLL_BUSY_TIMEOUT_MS";

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Text comparison used by name-fragment search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameMatch {
    /// Substring match through SQLite `LIKE`, which folds ASCII letters
    /// only: `lee` finds `Lee`, but `émile` does not find `Émile`.
    #[default]
    CaseInsensitive,
    /// Exact byte-wise substring match.
    CaseSensitive,
}

impl NameMatch {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "insensitive" | "case_insensitive" | "ci" => Some(Self::CaseInsensitive),
            "sensitive" | "case_sensitive" | "cs" => Some(Self::CaseSensitive),
            _ => None,
        }
    }
}

/// Connection target and behavior for one payroll store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file. Created on first open when missing.
    pub db_path: PathBuf,
    /// Case behavior for `find_by_name_fragment`.
    pub name_match: NameMatch,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl StoreConfig {
    /// Creates a config with default search and timeout behavior.
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            name_match: NameMatch::default(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    /// Reads `PAYROLL_DB_PATH`, `PAYROLL_NAME_MATCH` and
    /// `PAYROLL_BUSY_TIMEOUT_MS` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// Split from [`StoreConfig::from_env`] so tests do not mutate the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(ENV_DB_PATH)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(ENV_DB_PATH))?;

        let mut config = Self::new(db_path);

        if let Some(raw) = lookup(ENV_NAME_MATCH) {
            config.name_match = NameMatch::parse(&raw).ok_or_else(|| ConfigError::Invalid {
                key: ENV_NAME_MATCH,
                value: raw.clone(),
                expected: "insensitive|sensitive",
            })?;
        }

        if let Some(raw) = lookup(ENV_BUSY_TIMEOUT_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid {
                    key: ENV_BUSY_TIMEOUT_MS,
                    value: raw.clone(),
                    expected: "non-negative integer milliseconds",
                })?;
            config.busy_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

/// Configuration loading failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::Invalid {
                key,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for `{key}`; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}
