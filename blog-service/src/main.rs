use blog_service::config::BlogConfig;
use blog_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = BlogConfig::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing("blog-service", &config.common.log_level, config.log_format);

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start blog-service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(port = app.port(), "blog-service started");

    app.run_until_stopped().await
}
