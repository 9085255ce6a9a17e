use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Implementation, ListResourcesResult, PaginatedRequestParam,
        ProtocolVersion, ReadResourceRequestParam, ReadResourceResult, ServerCapabilities,
        ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::config::Config;
use crate::identity::{FirebaseIdentity, IdentityProvider};
use crate::models::{AuthenticateRequest, GetAlertsRequest, GetForecastRequest};
use crate::session::Session;
use crate::upstream::WeatherClient;
use crate::{resources, tools};

/// Weather MCP service; the composition root owning the session
#[derive(Clone)]
pub struct WeatherServer {
    session: Arc<Session>,
    weather: WeatherClient,
    tool_router: ToolRouter<Self>,
}

impl WeatherServer {
    /// Builds the service against the backends named in `config`
    pub fn new(config: &Config) -> Result<Self> {
        let identity = FirebaseIdentity::new(
            config.identity_base_url.clone(),
            config.firebase_api_key.clone(),
        )?;
        if config.firebase_api_key.is_none() {
            tracing::warn!("FIREBASE_API_KEY is not set; authentication will fail");
        }
        let weather = WeatherClient::new(config.nws_base_url.clone(), &config.user_agent)?;
        Ok(Self::with_backends(Arc::new(identity), weather))
    }

    /// Builds the service from already constructed backends
    pub fn with_backends(identity: Arc<dyn IdentityProvider>, weather: WeatherClient) -> Self {
        Self {
            session: Arc::new(Session::new(identity)),
            weather,
            tool_router: Self::tool_router(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

fn invalid_params(message: String) -> McpError {
    McpError::invalid_params(message, None)
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather alerts and forecasts from the National Weather Service API for US locations. \
                Call 'authenticate' with your email and password before using 'get-alerts' or 'get-forecast'."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: resources::list(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        tracing::debug!("Reading resource: {}", request.uri);
        resources::read(&self.session, &request.uri)
    }
}

#[tool_router]
impl WeatherServer {
    /// Signs in to unlock the weather tools
    #[tool(
        name = "authenticate",
        description = "Authenticate with email and password. Required before using 'get-alerts' or 'get-forecast'."
    )]
    async fn authenticate(
        &self,
        Parameters(request): Parameters<AuthenticateRequest>,
    ) -> Result<CallToolResult, McpError> {
        request.validate().map_err(invalid_params)?;
        Ok(tools::authenticate(&self.session, request).await)
    }

    /// Gets active weather alerts for a US state
    #[tool(
        name = "get-alerts",
        description = "Get weather alerts for a state. Provide a two-letter state code (e.g. CA, NY). Requires authentication."
    )]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        request.validate().map_err(invalid_params)?;
        Ok(tools::get_alerts(&self.session, &self.weather, request).await)
    }

    /// Gets the weather forecast for a US location
    #[tool(
        name = "get-forecast",
        description = "Get weather forecast for a location. Provide latitude (-90 to 90) and longitude (-180 to 180). Only US locations are supported. Requires authentication."
    )]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        request.validate().map_err(invalid_params)?;
        Ok(tools::get_forecast(&self.session, &self.weather, request).await)
    }
}
