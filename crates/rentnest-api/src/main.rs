use rentnest_api::setup;
use rentnest_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let (_state, app) = setup::initialize_app(config.clone()).await?;

    setup::server::start_server(&config, app).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
