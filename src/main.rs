use std::process::ExitCode;

fn main() -> ExitCode {
    match gdp_codemap_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "gdp-codemap failed");
            ExitCode::FAILURE
        }
    }
}
