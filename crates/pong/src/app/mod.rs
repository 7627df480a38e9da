mod bootstrap;
mod court;
mod loop_runner;

use std::process::ExitCode;

pub(crate) fn run() -> ExitCode {
    let app = bootstrap::build_app();
    loop_runner::run(app)
}
