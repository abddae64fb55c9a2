use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::config::ApiConfig;
use slotbook_registry::seed::build_registry;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Seed the slot registry
    let registry = build_registry(config.seed_path.as_deref())?;

    // Start API server
    slotbook_api::start_server(config, registry).await?;

    Ok(())
}
