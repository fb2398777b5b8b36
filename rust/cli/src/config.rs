//! Table configuration resolved from defaults, a TOML file, and the
//! environment.
//!
//! Precedence, lowest to highest: built-in defaults, the file named by
//! `FELT_CONFIG`, then `FELT_SEED`. A seed passed on the command line
//! overrides all of these.

use std::fs;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub seed: Option<u64>,
    /// Personalities cycled through the bot seats when the command line
    /// names none.
    pub personalities: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_stack: 1_000,
            small_blind: 10,
            big_blind: 20,
            seed: None,
            personalities: Vec::new(),
        }
    }
}

/// Partial file form: every field optional, unset fields keep defaults.
#[derive(Debug, Deserialize)]
struct FileConfig {
    starting_stack: Option<u32>,
    small_blind: Option<u32>,
    big_blind: Option<u32>,
    seed: Option<u64>,
    personalities: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config read failed: {}", e),
            ConfigError::Parse(e) => write!(f, "config parse failed: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

/// Resolve configuration from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    load_from(
        std::env::var("FELT_CONFIG").ok().as_deref(),
        std::env::var("FELT_SEED").ok().as_deref(),
    )
}

/// Resolve configuration from explicit inputs; `load` supplies the real
/// environment, tests supply their own.
pub fn load_from(config_path: Option<&str>, seed_env: Option<&str>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    if let Some(path) = config_path {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
        }
        if let Some(v) = f.personalities {
            cfg.personalities = v;
        }
    }

    if let Some(seed) = seed_env
        && !seed.is_empty()
    {
        let parsed = seed
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid(format!("FELT_SEED '{}' is not a u64", seed)))?;
        cfg.seed = Some(parsed);
    }

    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid("starting_stack must be > 0".into()));
    }
    if cfg.big_blind == 0 || cfg.small_blind == 0 {
        return Err(ConfigError::Invalid("blinds must be > 0".into()));
    }
    if cfg.small_blind > cfg.big_blind {
        return Err(ConfigError::Invalid(
            "small_blind cannot exceed big_blind".into(),
        ));
    }
    if cfg.big_blind * 2 > cfg.starting_stack {
        return Err(ConfigError::Invalid(
            "starting_stack must cover at least two big blinds".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = load_from(None, None).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            "starting_stack = 5000\nbig_blind = 50\nsmall_blind = 25\npersonalities = [\"adaptive\"]"
        )
        .unwrap();
        let cfg = load_from(Some(f.path().to_str().unwrap()), None).unwrap();
        assert_eq!(cfg.starting_stack, 5_000);
        assert_eq!(cfg.small_blind, 25);
        assert_eq!(cfg.big_blind, 50);
        assert_eq!(cfg.personalities, vec!["adaptive"]);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn seed_env_overrides_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "seed = 1").unwrap();
        let cfg = load_from(Some(f.path().to_str().unwrap()), Some("42")).unwrap();
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn bad_seed_env_is_rejected() {
        assert!(matches!(
            load_from(None, Some("not-a-number")),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_from(Some("/nonexistent/felt.toml"), None),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn inconsistent_stakes_are_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "small_blind = 100\nbig_blind = 20").unwrap();
        assert!(matches!(
            load_from(Some(f.path().to_str().unwrap()), None),
            Err(ConfigError::Invalid(_))
        ));
    }
}
