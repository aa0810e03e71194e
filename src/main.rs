//! Tweet Alpha - LLM scoring of token tweets

use anyhow::Result;
use tweet_alpha::adapters::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app).await
}
