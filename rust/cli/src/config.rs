//! Layered CLI configuration.
//!
//! Values resolve in order defaults ← TOML file named by `RIVERSTONE_CONFIG`
//! ← environment variables, and each value remembers which layer set it so
//! `riverstone cfg` can explain itself. Command-line flags override all of
//! these inside the individual commands.

use serde::{Deserialize, Serialize};
use std::fs;

use riverstone_ai::AI_TYPES;
use riverstone_engine::game::TableConfig;

pub const CONFIG_ENV: &str = "RIVERSTONE_CONFIG";
pub const SEED_ENV: &str = "RIVERSTONE_SEED";
pub const SEATS_ENV: &str = "RIVERSTONE_SEATS";
pub const STACK_ENV: &str = "RIVERSTONE_STACK";
pub const AI_ENV: &str = "RIVERSTONE_AI";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seats: usize,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub seed: Option<u64>,
    /// Comma-separated AI types, assigned to seats round-robin
    pub ai: String,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            seats: table.seats,
            starting_stack: table.starting_stack,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            seed: None,
            ai: "baseline".into(),
        }
    }
}

impl Config {
    /// AI types in seat order, lowercased.
    pub fn ai_types(&self) -> Vec<String> {
        split_ai_list(&self.ai)
    }

    /// Table setup for this configuration with the given deck seed.
    pub fn table_config(&self, seed: u64) -> TableConfig {
        TableConfig {
            seats: self.seats,
            starting_stack: self.starting_stack,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            seed,
            names: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seats: ValueSource,
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub seed: ValueSource,
    pub ai: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seats: ValueSource::Default,
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            seed: ValueSource::Default,
            ai: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String, std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "cannot read '{}': {}", path, e),
            ConfigError::Parse(e) => write!(f, "malformed config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolves configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Resolves configuration with `lookup` standing in for the environment.
pub fn resolve<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    // empty variables count as unset
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(path) = var(CONFIG_ENV) {
        let s = fs::read_to_string(&path).map_err(|e| ConfigError::Io(path.clone(), e))?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
    }

    if let Some(seed) = var(SEED_ENV) {
        cfg.seed = Some(parse_env(SEED_ENV, &seed)?);
        sources.seed = ValueSource::Env;
    }
    if let Some(seats) = var(SEATS_ENV) {
        cfg.seats = parse_env(SEATS_ENV, &seats)?;
        sources.seats = ValueSource::Env;
    }
    if let Some(stack) = var(STACK_ENV) {
        cfg.starting_stack = parse_env(STACK_ENV, &stack)?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(ai) = var(AI_ENV) {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ai: Option<String>,
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: '{}'", key, raw)))
}

pub fn split_ai_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Checks table limits and AI names.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.table_config(0)
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    let types = cfg.ai_types();
    if types.is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: ai must name at least one AI type".into(),
        ));
    }
    if let Some(unknown) = types.iter().find(|t| !AI_TYPES.contains(&t.as_str())) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown ai '{}' (expected one of: {})",
            unknown,
            AI_TYPES.join(", ")
        )));
    }
    Ok(())
}
