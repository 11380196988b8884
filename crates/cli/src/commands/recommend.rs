use std::path::Path;

use cobuy_core::config::MAX_RECOMMEND_LIMIT;
use cobuy_core::{ApplicationError, ProductView, Recommendation, RelatedService};
use serde::Serialize;
use tracing::info;

use crate::commands::{CommandResult, Session};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendOutput {
    query: String,
    catalog_match: bool,
    recorded: bool,
    transactions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    view: Option<ProductView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendations: Option<Vec<Recommendation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<Vec<RelatedService>>,
}

pub fn run(
    config_path: Option<&Path>,
    name: &str,
    limit: Option<usize>,
    record: bool,
) -> CommandResult {
    let name = name.trim();
    if name.is_empty() {
        return CommandResult::failure("recommend", "invalid_argument", "product name is empty", 2);
    }
    if let Some(limit) = limit {
        if limit == 0 || limit > MAX_RECOMMEND_LIMIT {
            return CommandResult::failure(
                "recommend",
                "invalid_argument",
                format!("--limit must be in range 1..={MAX_RECOMMEND_LIMIT}"),
                2,
            );
        }
    }

    let mut session = match Session::start("recommend", config_path) {
        Ok(session) => session,
        Err(failure) => return failure,
    };
    let limit = limit.unwrap_or(session.config.recommend.default_limit);

    let Some(product) = session.catalog.find_by_name(name).cloned() else {
        let output = RecommendOutput {
            query: name.to_string(),
            catalog_match: false,
            recorded: false,
            transactions: session.engine.transaction_count(),
            view: None,
            recommendations: Some(session.engine.get_recommendations(name, limit)),
            services: Some(session.engine.get_related_services(name)),
        };
        return CommandResult::success(
            "recommend",
            format!("`{name}` is not in the catalog; showing rule candidates only"),
            output,
        );
    };

    let recorded = record && !product.attributes.is_empty();
    if recorded {
        let services = session.generator.purchase_services();
        if let Err(error) = session.engine.record_purchase(&product.attributes, &services) {
            return CommandResult::application_failure("recommend", &ApplicationError::from(error));
        }
        info!(
            event_name = "cli.recommend.recorded",
            product = %product.name,
            services = ?services,
            "recorded product view"
        );
    }

    let view = ProductView::build(&session.engine, &session.catalog, &product, limit);
    let message = format!(
        "{} {} recommendations for `{}`",
        view.recommendations.len(),
        if view.used_fallback { "similarity" } else { "rule-based" },
        product.name
    );

    CommandResult::success(
        "recommend",
        message,
        RecommendOutput {
            query: name.to_string(),
            catalog_match: true,
            recorded,
            transactions: session.engine.transaction_count(),
            view: Some(view),
            recommendations: None,
            services: None,
        },
    )
}
