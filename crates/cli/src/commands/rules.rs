use std::path::Path;

use cobuy_core::AssociationRule;
use serde::Serialize;

use crate::commands::{CommandResult, Session};

/// Rules listed when no `--top` is given.
pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Serialize)]
struct RulesOutput<'a> {
    total: usize,
    rules: &'a [AssociationRule],
}

pub fn run(config_path: Option<&Path>, top: Option<usize>) -> CommandResult {
    let session = match Session::start("rules", config_path) {
        Ok(session) => session,
        Err(failure) => return failure,
    };

    let rules = session.engine.rules();
    let shown = &rules[..rules.len().min(top.unwrap_or(DEFAULT_TOP))];

    CommandResult::success(
        "rules",
        format!("showing {} of {} rules", shown.len(), rules.len()),
        RulesOutput { total: rules.len(), rules: shown },
    )
}
