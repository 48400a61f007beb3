use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use surfs_up_api::app::Application;
use surfs_up_api::config::Config;
use surfs_up_api::db;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,surfs_up_api=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    info!("Starting surfs-up api with config: {:?}", config);

    info!("Opening climate database at {}", config.database_url);
    let pool = db::connect(&config.database_url, config.database_max_connections).await?;
    info!("Database connection established");

    let app = Application::build(config, pool).await?;
    app.run_until_stopped().await
}
