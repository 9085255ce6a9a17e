use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;

use mcp_weather_auth_server::{logging, Config, WeatherServer};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init_tracing(config.log_format);

    tracing::info!("Starting MCP weather server");

    let weather = WeatherServer::new(&config)?;
    let server = weather
        .serve(rmcp::transport::stdio())
        .await
        .inspect_err(|e| tracing::error!("Failed to start stdio transport: {}", e))?;
    tracing::info!("Weather MCP Server running on stdio");
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
