use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use cobuy_cli::commands::{config, recommend, rules, services, stats};
use serde_json::Value;

const SMALL_SEED: &[(&str, &str)] = &[("COBUY_SEED_TRANSACTIONS", "150")];

#[test]
fn stats_reports_seeded_engine() {
    with_env(SMALL_SEED, || {
        let result = stats::run(None);
        assert_eq!(result.exit_code, 0, "expected successful stats run: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "stats");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["totalTransactions"], 150);
        assert!(payload["data"]["totalRules"].as_u64().unwrap_or_default() > 0);
    });
}

#[test]
fn stats_is_deterministic_for_a_seed() {
    with_env(SMALL_SEED, || {
        let first = stats::run(None);
        let second = stats::run(None);
        assert_eq!(first.output, second.output);
    });
}

#[test]
fn invalid_threshold_returns_config_failure() {
    with_env(&[("COBUY_MINING_MIN_SUPPORT", "0")], || {
        let result = stats::run(None);
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "stats");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn rules_are_truncated_and_ordered() {
    with_env(SMALL_SEED, || {
        let result = rules::run(None, Some(3));
        assert_eq!(result.exit_code, 0, "expected successful rules run: {}", result.output);

        let payload = parse_payload(&result.output);
        let listed = payload["data"]["rules"].as_array().expect("rules array");
        assert!(listed.len() <= 3);
        assert!(payload["data"]["total"].as_u64().unwrap_or_default() >= listed.len() as u64);

        let lifts: Vec<f64> =
            listed.iter().map(|rule| rule["lift"].as_f64().expect("lift")).collect();
        assert!(lifts.windows(2).all(|pair| pair[0] >= pair[1]));
        assert!(lifts.iter().all(|lift| *lift > 1.0));
    });
}

#[test]
fn recommend_catalog_product_returns_view() {
    with_env(SMALL_SEED, || {
        let result = recommend::run(None, "Toyota Camry 2023", Some(3), false);
        assert_eq!(result.exit_code, 0, "expected successful recommend run: {}", result.output);

        let payload = parse_payload(&result.output);
        let data = &payload["data"];
        assert_eq!(data["catalogMatch"], true);
        assert_eq!(data["recorded"], false);
        assert_eq!(data["transactions"], 150);

        let recommendations = data["view"]["recommendations"].as_array().expect("array");
        assert!(!recommendations.is_empty());
        assert!(recommendations.len() <= 3);
        assert!(data["view"]["usedFallback"].is_boolean());
        assert!(data["view"]["services"].is_array());
    });
}

#[test]
fn recording_appends_a_transaction() {
    with_env(SMALL_SEED, || {
        let car = parse_payload(&recommend::run(None, "BMW X5", None, true).output);
        assert_eq!(car["data"]["recorded"], true);
        assert_eq!(car["data"]["transactions"], 151);

        // Accessories carry no basket attributes.
        let accessory = parse_payload(&recommend::run(None, "AirPods Pro", None, true).output);
        assert_eq!(accessory["data"]["recorded"], false);
        assert_eq!(accessory["data"]["transactions"], 150);
    });
}

#[test]
fn recommend_unknown_product_uses_rules_only() {
    with_env(SMALL_SEED, || {
        let result = recommend::run(None, "Tesla Model 3", Some(4), true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["catalogMatch"], false);
        assert_eq!(payload["data"]["recorded"], false);
        assert!(payload["data"]["recommendations"].is_array());
        assert!(payload["data"].get("view").is_none());
    });
}

#[test]
fn recommend_rejects_bad_arguments() {
    with_env(SMALL_SEED, || {
        let blank = parse_payload(&recommend::run(None, "  ", None, false).output);
        assert_eq!(blank["error_class"], "invalid_argument");

        let result = recommend::run(None, "BMW X5", Some(0), false);
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "invalid_argument");
    });
}

#[test]
fn services_are_listed_by_confidence() {
    with_env(SMALL_SEED, || {
        let result = services::run(None, "Toyota Camry 2023");
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let listed = payload["data"].as_array().expect("services array");
        let confidences: Vec<f64> =
            listed.iter().map(|service| service["confidence"].as_f64().expect("confidence")).collect();
        assert!(confidences.windows(2).all(|pair| pair[0] >= pair[1]));
        assert!(listed
            .iter()
            .all(|service| service["service"].as_str().unwrap_or_default().starts_with("Service_")));
    });
}

#[test]
fn config_reports_env_and_file_sources() {
    with_env(&[("COBUY_SEED_TRANSACTIONS", "75")], || {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cobuy.toml");
        fs::write(&path, "[mining]\nmin_confidence = 0.4\n").expect("write config");

        let result = config::run(Some(&path));
        assert_eq!(result.exit_code, 0, "expected successful config run: {}", result.output);

        let payload = parse_payload(&result.output);
        let entries = payload["data"].as_array().expect("entries");
        let entry = |key: &str| {
            entries.iter().find(|entry| entry["key"] == key).cloned().expect("config entry")
        };

        assert_eq!(entry("seed.transactions")["value"], "75");
        assert_eq!(entry("seed.transactions")["source"], "env (COBUY_SEED_TRANSACTIONS)");
        assert_eq!(entry("mining.min_confidence")["value"], "0.4");
        assert!(entry("mining.min_confidence")["source"]
            .as_str()
            .unwrap_or_default()
            .starts_with("file ("));
        assert_eq!(entry("mining.min_support")["source"], "default");
        assert_eq!(entry("catalog.path")["value"], "<builtin>");
    });
}

#[test]
fn catalog_file_replaces_builtin_products() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("products.json");
    fs::write(
        &path,
        r#"[{"name": "Tesla Model Y", "price": "$52,000", "category": "car", "location": "Texas"}]"#,
    )
    .expect("write catalog");
    let catalog_path = path.display().to_string();

    with_env(
        &[("COBUY_SEED_TRANSACTIONS", "150"), ("COBUY_CATALOG_PATH", catalog_path.as_str())],
        || {
            let known = parse_payload(&recommend::run(None, "Tesla Model Y", None, false).output);
            assert_eq!(known["data"]["catalogMatch"], true);

            let builtin = parse_payload(&recommend::run(None, "BMW X5", None, false).output);
            assert_eq!(builtin["data"]["catalogMatch"], false);
        },
    );
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "COBUY_MINING_MIN_SUPPORT",
        "COBUY_MINING_MIN_CONFIDENCE",
        "COBUY_RECOMMEND_DEFAULT_LIMIT",
        "COBUY_SEED_TRANSACTIONS",
        "COBUY_SEED_RNG_SEED",
        "COBUY_CATALOG_PATH",
        "COBUY_LOGGING_LEVEL",
        "COBUY_LOGGING_FORMAT",
        "COBUY_LOG_LEVEL",
        "COBUY_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
