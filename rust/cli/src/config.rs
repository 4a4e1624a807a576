//! Table configuration resolved from defaults, an optional TOML file and
//! environment overrides, in that order.
//!
//! | key           | file          | env                  | default             |
//! |---------------|---------------|----------------------|---------------------|
//! | stacks        | `stacks`      | `HOLDEM_STACKS`      | six stacks of 1000  |
//! | small blind   | `small_blind` | `HOLDEM_SMALL_BLIND` | 20                  |
//! | seed          | `seed`        | `HOLDEM_SEED`        | random per run      |
//! | database path | `db_path`     | `HOLDEM_DB`          | `data/hands.sqlite` |
//!
//! The file is read from the path in `HOLDEM_CONFIG`.

use serde::{Deserialize, Serialize};
use std::fs;

use holdem_engine::player::SEAT_COUNT;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const SMALL_BLIND_ENV: &str = "HOLDEM_SMALL_BLIND";
pub const STACKS_ENV: &str = "HOLDEM_STACKS";
pub const DB_ENV: &str = "HOLDEM_DB";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub stacks: Vec<u32>,
    pub small_blind: u32,
    pub seed: Option<u64>,
    pub db_path: String,
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
    pub stacks: ValueSource,
    pub small_blind: ValueSource,
    pub seed: ValueSource,
    pub db_path: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            stacks: ValueSource::Default,
            small_blind: ValueSource::Default,
            seed: ValueSource::Default,
            db_path: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stacks: vec![1000; SEAT_COUNT],
            small_blind: 20,
            seed: None,
            db_path: "data/hands.sqlite".into(),
        }
    }
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
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.stacks {
            cfg.stacks = v;
            sources.stacks = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.db_path {
            cfg.db_path = v;
            sources.db_path = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed {:?}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(sb) = std::env::var(SMALL_BLIND_ENV)
        && !sb.is_empty()
    {
        cfg.small_blind = sb
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid small blind {:?}", sb)))?;
        sources.small_blind = ValueSource::Env;
    }
    if let Ok(stacks) = std::env::var(STACKS_ENV)
        && !stacks.is_empty()
    {
        cfg.stacks = parse_stacks(&stacks)?;
        sources.stacks = ValueSource::Env;
    }
    if let Ok(db) = std::env::var(DB_ENV)
        && !db.is_empty()
    {
        cfg.db_path = db;
        sources.db_path = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    stacks: Option<Vec<u32>>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    db_path: Option<String>,
}

/// Parses `"1000,1000,500,0,1000,1000"`.
pub fn parse_stacks(s: &str) -> Result<Vec<u32>, ConfigError> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::Invalid(format!("Invalid stack {:?}", part.trim())))
        })
        .collect()
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.stacks.len() != SEAT_COUNT {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: expected {} stacks, got {}",
            SEAT_COUNT,
            cfg.stacks.len()
        )));
    }
    if cfg.small_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must be >0".into(),
        ));
    }
    if cfg.db_path.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: db_path must not be empty".into(),
        ));
    }
    Ok(())
}
