use crate::models::{AlertFeature, ForecastPeriod};

/// Separator line closing every formatted record
const RECORD_END: &str = "---";

/// Placeholders substituted for missing upstream fields
pub mod placeholder {
    pub const UNKNOWN: &str = "Unknown";
    pub const NO_HEADLINE: &str = "No headline";
    pub const DEFAULT_UNIT: &str = "F";
    pub const NO_DIRECTION: &str = "";
    pub const NO_FORECAST: &str = "No forecast available";
}

/// Labels and placeholders of the alert block, in display order
const ALERT_FIELDS: [(&str, &str); 5] = [
    ("Event", placeholder::UNKNOWN),
    ("Area", placeholder::UNKNOWN),
    ("Severity", placeholder::UNKNOWN),
    ("Status", placeholder::UNKNOWN),
    ("Headline", placeholder::NO_HEADLINE),
];

/// Field names and placeholders of a forecast period, in display order
const PERIOD_FIELDS: [(&str, &str); 6] = [
    ("name", placeholder::UNKNOWN),
    ("temperature", placeholder::UNKNOWN),
    ("temperatureUnit", placeholder::DEFAULT_UNIT),
    ("windSpeed", placeholder::UNKNOWN),
    ("windDirection", placeholder::NO_DIRECTION),
    ("shortForecast", placeholder::NO_FORECAST),
];

/// Returns the field value, or the placeholder when it is missing or empty
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

/// Resolves each value against the placeholder in the same row of `table`
fn fill<'a, const N: usize>(
    table: &'a [(&'a str, &'a str); N],
    values: [Option<&'a str>; N],
) -> [&'a str; N] {
    std::array::from_fn(|i| or_placeholder(values[i], table[i].1))
}

/// Formats one alert feature as a fixed five-line block
pub fn format_alert(feature: &AlertFeature) -> String {
    let props = &feature.properties;
    let values = fill(
        &ALERT_FIELDS,
        [
            props.event.as_deref(),
            props.area_desc.as_deref(),
            props.severity.as_deref(),
            props.status.as_deref(),
            props.headline.as_deref(),
        ],
    );

    let mut lines: Vec<String> = ALERT_FIELDS
        .iter()
        .zip(values)
        .map(|((label, _), value)| format!("{}: {}", label, value))
        .collect();
    lines.push(RECORD_END.to_string());
    lines.join("\n")
}

/// Formats the alert list under a header naming the region
pub fn format_alerts(state: &str, features: &[AlertFeature]) -> String {
    if features.is_empty() {
        return format!("No active alerts for {}", state);
    }

    let blocks: Vec<String> = features.iter().map(format_alert).collect();
    format!("Active alerts for {}:\n\n{}", state, blocks.join("\n"))
}

/// Formats one forecast period as a fixed four-line block
pub fn format_period(period: &ForecastPeriod) -> String {
    let temperature = period.temperature.map(|t| t.to_string());
    let [name, temperature, unit, wind_speed, wind_direction, short_forecast] = fill(
        &PERIOD_FIELDS,
        [
            period.name.as_deref(),
            temperature.as_deref(),
            period.temperature_unit.as_deref(),
            period.wind_speed.as_deref(),
            period.wind_direction.as_deref(),
            period.short_forecast.as_deref(),
        ],
    );

    [
        format!("{}:", name),
        format!("Temperature: {}\u{00b0}{}", temperature, unit),
        format!("Wind: {} {}", wind_speed, wind_direction),
        short_forecast.to_string(),
        RECORD_END.to_string(),
    ]
    .join("\n")
}

/// Formats forecast periods under a header echoing the requested coordinates
pub fn format_forecast(latitude: f64, longitude: f64, periods: &[ForecastPeriod]) -> String {
    if periods.is_empty() {
        return "No forecast periods available".to_string();
    }

    let blocks: Vec<String> = periods.iter().map(format_period).collect();
    format!(
        "Forecast for {}, {}:\n\n{}",
        latitude,
        longitude,
        blocks.join("\n")
    )
}
