use std::env;
use std::fs;
use std::path::Path;

use cobuy_core::config::AppConfig;
use serde::Serialize;
use toml::Value;

use crate::commands::{detect_config_path, load_options, CommandResult};

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

/// Config key, primary env var and an optional alias.
const FIELDS: &[(&str, &str, Option<&str>)] = &[
    ("mining.min_support", "COBUY_MINING_MIN_SUPPORT", None),
    ("mining.min_confidence", "COBUY_MINING_MIN_CONFIDENCE", None),
    ("recommend.default_limit", "COBUY_RECOMMEND_DEFAULT_LIMIT", None),
    ("seed.transactions", "COBUY_SEED_TRANSACTIONS", None),
    ("seed.rng_seed", "COBUY_SEED_RNG_SEED", None),
    ("catalog.path", "COBUY_CATALOG_PATH", None),
    ("logging.level", "COBUY_LOGGING_LEVEL", Some("COBUY_LOG_LEVEL")),
    ("logging.format", "COBUY_LOGGING_FORMAT", Some("COBUY_LOG_FORMAT")),
];

pub fn run(config_path: Option<&Path>) -> CommandResult {
    let config = match AppConfig::load(load_options(config_path)) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            );
        }
    };

    let config_file_path = detect_config_path(config_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let entries: Vec<ConfigEntry> = FIELDS
        .iter()
        .map(|(key, env_key, alias)| ConfigEntry {
            key: *key,
            value: render_value(&config, key),
            source: field_source(
                key,
                &[Some(*env_key), *alias],
                config_file_doc.as_ref(),
                config_file_path.as_deref(),
            ),
        })
        .collect();

    CommandResult::success(
        "config",
        "effective config (source precedence: env > file > default)",
        entries,
    )
}

fn render_value(config: &AppConfig, key: &str) -> String {
    match key {
        "mining.min_support" => config.mining.min_support.to_string(),
        "mining.min_confidence" => config.mining.min_confidence.to_string(),
        "recommend.default_limit" => config.recommend.default_limit.to_string(),
        "seed.transactions" => config.seed.transactions.to_string(),
        "seed.rng_seed" => config.seed.rng_seed.to_string(),
        "catalog.path" => config
            .catalog
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<builtin>".to_string()),
        "logging.level" => config.logging.level.clone(),
        "logging.format" => format!("{:?}", config.logging.format),
        _ => "<unknown>".to_string(),
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[Option<&str>],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    for env_key in env_keys.iter().flatten() {
        if env::var(env_key).is_ok_and(|value| !value.trim().is_empty()) {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::contains_path;

    #[test]
    fn nested_keys_are_found_in_toml_document() {
        let doc: toml::Value = "[mining]\nmin_support = 0.2\n".parse().expect("toml");

        assert!(contains_path(&doc, "mining.min_support"));
        assert!(!contains_path(&doc, "mining.min_confidence"));
        assert!(!contains_path(&doc, "seed.transactions"));
    }
}
