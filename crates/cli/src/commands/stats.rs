use std::path::Path;

use crate::commands::{CommandResult, Session};

pub fn run(config_path: Option<&Path>) -> CommandResult {
    let session = match Session::start("stats", config_path) {
        Ok(session) => session,
        Err(failure) => return failure,
    };

    let stats = session.engine.get_stats();
    CommandResult::success(
        "stats",
        format!(
            "{} rules from {} frequent itemsets over {} transactions",
            stats.total_rules, stats.total_itemsets, stats.total_transactions
        ),
        stats,
    )
}
