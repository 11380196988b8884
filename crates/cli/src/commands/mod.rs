pub mod config;
pub mod recommend;
pub mod rules;
pub mod services;
pub mod stats;

use std::path::{Path, PathBuf};

use cobuy_core::config::{AppConfig, ConfigError, LoadOptions};
use cobuy_core::{ApplicationError, Catalog, Recommender, SyntheticBasketGenerator};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome<T: Serialize> {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl CommandResult {
    pub fn success<T: Serialize>(command: &str, message: impl Into<String>, data: T) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome::<()> {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    fn config_failure(command: &str, error: &ConfigError) -> Self {
        Self::failure(command, "config_validation", format!("configuration issue: {error}"), 2)
    }

    fn application_failure(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Configuration(_) => 2,
            _ => 3,
        };
        Self::failure(
            command,
            error.error_class(),
            format!("{} ({error})", error.user_message()),
            exit_code,
        )
    }
}

fn serialize_payload<T: Serialize>(payload: CommandOutcome<T>) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub fn load_options(config_path: Option<&Path>) -> LoadOptions {
    LoadOptions { config_path: config_path.map(Path::to_path_buf), ..LoadOptions::default() }
}

/// Config, catalog and a recommender seeded with synthetic baskets.
pub struct Session {
    pub config: AppConfig,
    pub catalog: Catalog,
    pub engine: Recommender,
    pub generator: SyntheticBasketGenerator,
}

impl Session {
    pub fn start(command: &str, config_path: Option<&Path>) -> Result<Self, CommandResult> {
        let config = AppConfig::load(load_options(config_path))
            .map_err(|error| CommandResult::config_failure(command, &error))?;

        Self::from_config(config).map_err(|error| CommandResult::application_failure(command, &error))
    }

    pub fn from_config(config: AppConfig) -> Result<Self, ApplicationError> {
        let thresholds = config.thresholds()?;
        let catalog = Catalog::load_or_builtin(config.catalog.path.as_deref());
        let mut generator = SyntheticBasketGenerator::new(config.seed.rng_seed);

        let mut engine = Recommender::new(thresholds);
        for basket in generator.generate(config.seed.transactions) {
            engine.add_transaction(basket);
        }
        engine.recompute()?;

        info!(
            event_name = "cli.session.seeded",
            transactions = engine.transaction_count(),
            products = catalog.len(),
            rng_seed = config.seed.rng_seed,
            "seeded recommender"
        );

        Ok(Self { config, catalog, engine, generator })
    }
}

/// Config file the loader would pick, for source attribution.
pub fn detect_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then(|| path.to_path_buf());
    }

    let root = PathBuf::from("cobuy.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/cobuy.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}
