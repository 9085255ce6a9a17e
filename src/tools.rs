//! Tool handlers.
//!
//! Every handler returns exactly one [`CallToolResult`]; upstream and identity
//! failures are turned into text here and never reach the dispatcher.

use rmcp::model::{CallToolResult, Content};

use crate::formatters::{format_alerts, format_forecast};
use crate::models::{AuthenticateRequest, GetAlertsRequest, GetForecastRequest};
use crate::session::{Session, SignIn};
use crate::upstream::WeatherClient;

pub const AUTH_SUCCESS: &str = "Authentication successful! You can now use the weather tools.";
pub const AUTH_FAILED: &str = "Authentication failed. Please check your credentials.";
pub const ALERTS_FAILED: &str = "Failed to retrieve alerts data";
pub const FORECAST_URL_MISSING: &str = "Failed to get forecast URL from grid point data";
pub const FORECAST_FAILED: &str = "Failed to retrieve forecast data";

fn text(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message.into())])
}

/// Signs in with the given credentials and reports the outcome as text
pub async fn authenticate(session: &Session, request: AuthenticateRequest) -> CallToolResult {
    tracing::info!("Authenticating user: {}", request.email);

    match session.sign_in(&request.email, &request.password).await {
        SignIn::Accepted(_) => text(AUTH_SUCCESS),
        SignIn::Rejected(_) => text(AUTH_FAILED),
        SignIn::Failed(e) => text(format!("Authentication error: {}", e)),
    }
}

/// Active alerts for a region, gated on an authenticated session
pub async fn get_alerts(
    session: &Session,
    weather: &WeatherClient,
    request: GetAlertsRequest,
) -> CallToolResult {
    if let Err(denied) = session.guard() {
        return denied.into();
    }

    let state = request.state.to_uppercase();
    tracing::info!("Getting alerts for state: {}", state);

    match weather.alerts(&state).await {
        Ok(alerts) => text(format_alerts(&state, &alerts.features)),
        Err(_) => text(ALERTS_FAILED),
    }
}

/// Forecast for a coordinate via its grid point, gated on an authenticated session
pub async fn get_forecast(
    session: &Session,
    weather: &WeatherClient,
    request: GetForecastRequest,
) -> CallToolResult {
    if let Err(denied) = session.guard() {
        return denied.into();
    }

    let GetForecastRequest {
        latitude,
        longitude,
    } = request;
    tracing::info!(
        "Getting forecast for coordinates: {}, {}",
        latitude,
        longitude
    );

    let points = match weather.grid_point(latitude, longitude).await {
        Ok(points) => points,
        Err(_) => {
            return text(format!(
                "Failed to retrieve grid point data for coordinates: {}, {}. \
                 This location may not be supported by the NWS API (only US locations are supported).",
                latitude, longitude
            ))
        }
    };

    let Some(forecast_url) = points.properties.forecast.filter(|url| !url.is_empty()) else {
        return text(FORECAST_URL_MISSING);
    };

    match weather.forecast(&forecast_url).await {
        Ok(forecast) => text(format_forecast(
            latitude,
            longitude,
            &forecast.properties.periods,
        )),
        Err(_) => text(FORECAST_FAILED),
    }
}
