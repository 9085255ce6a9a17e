use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// National Weather Service API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct AlertResponse {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub headline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsResponse {
    #[serde(default)]
    pub properties: PointsProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsProperties {
    /// Absolute URL of the forecast resource for this grid point
    pub forecast: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub properties: ForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastPeriod {
    pub name: Option<String>,
    pub temperature: Option<f64>,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: Option<String>,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<String>,
    #[serde(rename = "windDirection")]
    pub wind_direction: Option<String>,
    #[serde(rename = "shortForecast")]
    pub short_forecast: Option<String>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AuthenticateRequest {
    /// Email address of the account
    #[schemars(email)]
    pub email: String,
    /// Account password
    #[schemars(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code (e.g. CA, NY)
    #[schemars(length(min = 2, max = 2))]
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    #[schemars(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Longitude of the location
    #[schemars(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl AuthenticateRequest {
    /// Checks the declared input constraints
    pub fn validate(&self) -> Result<(), String> {
        if !is_email(&self.email) {
            return Err(format!("'{}' is not a valid email address", self.email));
        }
        if self.password.is_empty() {
            return Err("password must not be empty".to_string());
        }
        Ok(())
    }
}

impl GetAlertsRequest {
    /// Checks the declared input constraints
    pub fn validate(&self) -> Result<(), String> {
        if self.state.chars().count() != 2 {
            return Err(format!(
                "state must be a two-letter code, got '{}'",
                self.state
            ));
        }
        Ok(())
    }
}

impl GetForecastRequest {
    /// Checks the declared input constraints
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "latitude must be between -90 and 90, got {}",
                self.latitude
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "longitude must be between -180 and 180, got {}",
                self.longitude
            ));
        }
        Ok(())
    }
}

/// Loose structural email check: `local@domain.tld`, no whitespace.
///
/// This is the enforced rule; the `format: email` in the advertised schema is a
/// hint to callers and is not evaluated by the server.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.ends_with('.'),
        None => false,
    }
}
