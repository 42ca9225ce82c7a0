//! Presale Scout - Crypto Presale Scouting CLI

use std::process::ExitCode;

use presale_scout::adapters::cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if it exists (API keys go here, not in scout.toml)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app).await
}
