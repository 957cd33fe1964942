use std::process::ExitCode;

use clap::Parser;
use learnhub_lib::{bootstrap, run_app, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    // .env first so clap's env fallbacks and RUST_LOG see it
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(err) = bootstrap::tracing::init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {err}");
    }

    match run_app(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "learnhub exited with an error");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
