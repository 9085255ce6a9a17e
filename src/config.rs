use clap::{Parser, ValueEnum};

use crate::constants::{IDENTITY_TOOLKIT_BASE, NWS_API_BASE, USER_AGENT};

/// Output format for the stderr log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Runtime configuration, read from flags or the environment
#[derive(Debug, Clone, Parser)]
#[command(name = "mcp-weather-auth-server", version, about = "Authenticated MCP weather server over stdio")]
pub struct Config {
    /// Base URL of the National Weather Service API
    #[arg(long, env = "NWS_API_BASE", default_value = NWS_API_BASE)]
    pub nws_base_url: String,

    /// User-Agent sent to the weather API
    #[arg(long, env = "WEATHER_USER_AGENT", default_value = USER_AGENT)]
    pub user_agent: String,

    /// Base URL of the Firebase Identity Toolkit REST API
    #[arg(long, env = "IDENTITY_TOOLKIT_URL", default_value = IDENTITY_TOOLKIT_BASE)]
    pub identity_base_url: String,

    /// Firebase web API key; sign-in fails with a configuration error when unset
    #[arg(long, env = "FIREBASE_API_KEY", hide_env_values = true)]
    pub firebase_api_key: Option<String>,

    /// Log output format
    #[arg(long, env = "WEATHER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    /// Configuration pointing both backends at custom base URLs
    pub fn with_endpoints(
        nws_base_url: impl Into<String>,
        identity_base_url: impl Into<String>,
        firebase_api_key: Option<String>,
    ) -> Self {
        Self {
            nws_base_url: nws_base_url.into(),
            user_agent: USER_AGENT.to_string(),
            identity_base_url: identity_base_url.into(),
            firebase_api_key,
            log_format: LogFormat::Text,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_endpoints(NWS_API_BASE, IDENTITY_TOOLKIT_BASE, None)
    }
}
