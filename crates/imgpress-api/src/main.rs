use imgpress_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load .env if present, then configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    imgpress_api::telemetry::init_telemetry(config.is_production());

    // Initialize the application (storage, pipeline, routes)
    let (_state, router) = imgpress_api::initialize_app(config.clone()).await?;

    // Start the server
    imgpress_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
