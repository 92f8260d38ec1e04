use gestio_api::setup;
use gestio_core::config::AppConfig;

// Use mimalloc as the global allocator.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize the application (stores, state, routes)
    let (_state, router) = setup::initialize_app(config.clone()).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
