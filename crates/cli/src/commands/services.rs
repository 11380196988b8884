use std::path::Path;

use crate::commands::{CommandResult, Session};

pub fn run(config_path: Option<&Path>, name: &str) -> CommandResult {
    let session = match Session::start("services", config_path) {
        Ok(session) => session,
        Err(failure) => return failure,
    };

    let services = session.engine.get_related_services(name);
    CommandResult::success(
        "services",
        format!("{} related services for `{name}`", services.len()),
        services,
    )
}
