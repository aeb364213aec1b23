use std::process::ExitCode;

fn main() -> ExitCode {
    // `RUST_LOG` overrides the default level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = premium_predictor::app::run() {
        log::debug!("exiting with {err:?}");
        eprintln!("{err}");
        return ExitCode::from(err.exit_code());
    }
    ExitCode::SUCCESS
}
