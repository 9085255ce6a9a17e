/// User agent string sent with every weather API request
pub const USER_AGENT: &str = "weather-app/1.0";

/// Accept header value for the National Weather Service API
pub const GEO_JSON: &str = "application/geo+json";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Firebase Identity Toolkit REST base URL
pub const IDENTITY_TOOLKIT_BASE: &str = "https://identitytoolkit.googleapis.com/v1";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "mcp_weather_auth_server=info";
