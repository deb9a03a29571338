//! Entrypoint of the admin scripts

use std::process::ExitCode;

use clap::Parser;
use scripts::cli::Cli;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing `.env` is fine, settings may come from the environment or flags
    let dotenv = dotenvy::dotenv();

    let Cli {
        priv_key,
        rpc_url,
        abi_dir,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt()
        .pretty()
        .with_writer(std::io::stderr)
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    match command
        .run(priv_key.as_deref(), rpc_url.as_deref(), &abi_dir)
        .await
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
