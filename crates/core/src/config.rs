use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::DomainError;
use crate::mining::{MiningThresholds, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_SUPPORT};
use crate::recommend::DEFAULT_LIMIT;

/// Largest seeded basket count accepted; every recomputation rescans the store.
pub const MAX_SEED_TRANSACTIONS: usize = 100_000;

/// Largest recommendation limit accepted.
pub const MAX_RECOMMEND_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub mining: MiningConfig,
    pub recommend: RecommendConfig,
    pub seed: SeedConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiningConfig {
    pub min_support: f64,
    pub min_confidence: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecommendConfig {
    pub default_limit: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    pub transactions: usize,
    pub rng_seed: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub min_support: Option<f64>,
    pub min_confidence: Option<f64>,
    pub default_limit: Option<usize>,
    pub seed_transactions: Option<usize>,
    pub rng_seed: Option<u64>,
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mining: MiningConfig {
                min_support: DEFAULT_MIN_SUPPORT,
                min_confidence: DEFAULT_MIN_CONFIDENCE,
            },
            recommend: RecommendConfig { default_limit: DEFAULT_LIMIT },
            seed: SeedConfig { transactions: 500, rng_seed: 42 },
            catalog: CatalogConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("cobuy.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// Mining thresholds for the engine.
    pub fn thresholds(&self) -> Result<MiningThresholds, DomainError> {
        MiningThresholds::new(self.mining.min_support, self.mining.min_confidence)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(mining) = patch.mining {
            if let Some(min_support) = mining.min_support {
                self.mining.min_support = min_support;
            }
            if let Some(min_confidence) = mining.min_confidence {
                self.mining.min_confidence = min_confidence;
            }
        }

        if let Some(recommend) = patch.recommend {
            if let Some(default_limit) = recommend.default_limit {
                self.recommend.default_limit = default_limit;
            }
        }

        if let Some(seed) = patch.seed {
            if let Some(transactions) = seed.transactions {
                self.seed.transactions = transactions;
            }
            if let Some(rng_seed) = seed.rng_seed {
                self.seed.rng_seed = rng_seed;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("COBUY_MINING_MIN_SUPPORT") {
            self.mining.min_support = parse_f64("COBUY_MINING_MIN_SUPPORT", &value)?;
        }
        if let Some(value) = read_env("COBUY_MINING_MIN_CONFIDENCE") {
            self.mining.min_confidence = parse_f64("COBUY_MINING_MIN_CONFIDENCE", &value)?;
        }

        if let Some(value) = read_env("COBUY_RECOMMEND_DEFAULT_LIMIT") {
            self.recommend.default_limit = parse_usize("COBUY_RECOMMEND_DEFAULT_LIMIT", &value)?;
        }

        if let Some(value) = read_env("COBUY_SEED_TRANSACTIONS") {
            self.seed.transactions = parse_usize("COBUY_SEED_TRANSACTIONS", &value)?;
        }
        if let Some(value) = read_env("COBUY_SEED_RNG_SEED") {
            self.seed.rng_seed = parse_u64("COBUY_SEED_RNG_SEED", &value)?;
        }

        if let Some(value) = read_env("COBUY_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }

        let log_level = read_env("COBUY_LOGGING_LEVEL").or_else(|| read_env("COBUY_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("COBUY_LOGGING_FORMAT").or_else(|| read_env("COBUY_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(min_support) = overrides.min_support {
            self.mining.min_support = min_support;
        }
        if let Some(min_confidence) = overrides.min_confidence {
            self.mining.min_confidence = min_confidence;
        }
        if let Some(default_limit) = overrides.default_limit {
            self.recommend.default_limit = default_limit;
        }
        if let Some(transactions) = overrides.seed_transactions {
            self.seed.transactions = transactions;
        }
        if let Some(rng_seed) = overrides.rng_seed {
            self.seed.rng_seed = rng_seed;
        }
        if let Some(path) = overrides.catalog_path {
            self.catalog.path = Some(path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_mining(&self.mining)?;
        validate_recommend(&self.recommend)?;
        validate_seed(&self.seed)?;
        validate_catalog(&self.catalog)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("cobuy.toml"), PathBuf::from("config/cobuy.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_mining(mining: &MiningConfig) -> Result<(), ConfigError> {
    MiningThresholds::new(mining.min_support, mining.min_confidence).map(|_| ()).map_err(
        |error| match error {
            DomainError::InvalidThreshold { name: "min_support", .. } => ConfigError::Validation(
                "mining.min_support must be greater than 0 and at most 1".to_string(),
            ),
            DomainError::InvalidThreshold { .. } => ConfigError::Validation(
                "mining.min_confidence must be in range 0..=1".to_string(),
            ),
            other => ConfigError::Validation(other.to_string()),
        },
    )
}

fn validate_recommend(recommend: &RecommendConfig) -> Result<(), ConfigError> {
    if recommend.default_limit == 0 || recommend.default_limit > MAX_RECOMMEND_LIMIT {
        return Err(ConfigError::Validation(format!(
            "recommend.default_limit must be in range 1..={MAX_RECOMMEND_LIMIT}"
        )));
    }

    Ok(())
}

fn validate_seed(seed: &SeedConfig) -> Result<(), ConfigError> {
    if seed.transactions > MAX_SEED_TRANSACTIONS {
        return Err(ConfigError::Validation(format!(
            "seed.transactions must be at most {MAX_SEED_TRANSACTIONS}"
        )));
    }

    Ok(())
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if let Some(path) = &catalog.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("catalog.path must not be empty".to_string()));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn invalid_override(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvOverride { key: key.to_string(), value: value.to_string() }
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| invalid_override(key, value))
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| invalid_override(key, value))
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| invalid_override(key, value))
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    mining: Option<MiningPatch>,
    recommend: Option<RecommendPatch>,
    seed: Option<SeedPatch>,
    catalog: Option<CatalogPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct MiningPatch {
    min_support: Option<f64>,
    min_confidence: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendPatch {
    default_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct SeedPatch {
    transactions: Option<usize>,
    rng_seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
