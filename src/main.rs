// src/main.rs

use watchdo::errors::WatchdoError;
use watchdo::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("watchdo error: {err:?}");
        std::process::exit(1);
    }

    if let Err(err) = run(args).await {
        eprintln!("watchdo: {err}");
        std::process::exit(exit_code(&err));
    }
}

/// Usage-type errors exit like clap's own argument errors.
fn exit_code(err: &WatchdoError) -> i32 {
    match err {
        WatchdoError::NoFiles
        | WatchdoError::UnknownDoer(_)
        | WatchdoError::UnknownWatcher(_)
        | WatchdoError::Glob { .. }
        | WatchdoError::ConfigError(_) => 2,
        _ => 1,
    }
}
