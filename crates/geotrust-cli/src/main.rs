//! `geotrust`: run the verification pipeline once.
//!
//! Configuration comes from the file named by `GEOTRUST_CONFIG` (or
//! `geotrust.toml` in the working directory) plus `GEOTRUST_*` overrides.
//! The JSON run report goes to stdout; the exit code is the run status
//! (0 success, 1 warning, 2 error, 3 aborted).

use std::path::PathBuf;
use std::process::ExitCode;

use geotrust_core::errors::GeotrustErrorCode;
use geotrust_core::models::RunStatus;
use geotrust_core::GeotrustConfig;
use geotrust_pipeline::Orchestrator;

const CONFIG_ENV: &str = "GEOTRUST_CONFIG";

fn main() -> ExitCode {
    geotrust_core::tracing::init_tracing();

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = match GeotrustConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error_code = e.error_code(), "{e}");
            eprintln!("{}", e.report_string());
            return exit_with(RunStatus::Aborted);
        }
    };

    let report = Orchestrator::new(config).run();
    match report.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize run report"),
    }
    exit_with(report.status)
}

fn exit_with(status: RunStatus) -> ExitCode {
    ExitCode::from(status.exit_code() as u8)
}
