//! Extraction of structured weather fields from the assistant's prose reply.
//!
//! The reply is generated upstream and its phrasing is not under our
//! control, so every rule is a permissive, case-insensitive pattern that
//! takes the leftmost match and leaves the field empty otherwise.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::WeatherFields;

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Za-z\s]+),\s*([A-Za-z\s]+)\s+(?:Current Weather|Estimated Weather)")
        .expect("location pattern")
});

static TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Temperature[:\s]+(-?[0-9]+(?:\.[0-9]+)?°[CF](?:\s*\(-?[0-9.]+°[CF]\))?)")
        .expect("temperature pattern")
});

static HUMIDITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Humidity[:\s]+([0-9]+%)").expect("humidity pattern"));

static WIND_SPEED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Windspeed[:\s]+([0-9.]+\s*(?:km/h|mph)(?:\s*\([0-9.]+\s*(?:km/h|mph)\))?)")
        .expect("wind speed pattern")
});

// An inline "Today:"/"Tomorrow:" marker also ends the run, otherwise
// single-line replies would never yield conditions.
static CONDITIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Conditions[:\s]+([A-Za-z\s]+?)(?:\n|Forecast|Today\s*:|Tomorrow\s*:|$)")
        .expect("conditions pattern")
});

static TODAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Today[:\s]+([^.]+(?:°[CF][^.]*)?\.)").expect("today pattern")
});

static TOMORROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Tomorrow[:\s]+([^.]+(?:°[CF][^.]*)?\.)").expect("tomorrow pattern")
});

static FULL_FORECAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Forecast[:\s]+(.+?)(?:⚠|Please note|$)").expect("forecast pattern")
});

/// Extract whatever weather fields can be recognised in `raw_text`.
///
/// Never fails: unrecognised fields are `None`, and empty input yields
/// an empty record.
pub fn parse(raw_text: &str) -> WeatherFields {
    if raw_text.trim().is_empty() {
        return WeatherFields::default();
    }

    let fields = WeatherFields {
        location: location(raw_text),
        temperature: first_capture(&TEMPERATURE, raw_text),
        humidity: first_capture(&HUMIDITY, raw_text),
        wind_speed: first_capture(&WIND_SPEED, raw_text),
        conditions: first_capture(&CONDITIONS, raw_text),
        today_forecast: first_capture(&TODAY, raw_text),
        tomorrow_forecast: first_capture(&TOMORROW, raw_text),
        full_forecast_fallback: first_capture(&FULL_FORECAST, raw_text),
    };

    tracing::debug!(
        has_temperature = fields.temperature.is_some(),
        has_location = fields.location.is_some(),
        "parsed weather reply"
    );

    fields
}

fn location(text: &str) -> Option<String> {
    let caps = LOCATION.captures(text)?;
    let city = caps.get(1)?.as_str().trim();
    let region = caps.get(2)?.as_str().trim();

    Some(format!("{city}, {region}"))
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUNE: &str = "Pune, Maharashtra Current Weather ... Temperature: 29°C (84°F) \
        Humidity: 60% Windspeed: 12.5 km/h Conditions: Partly Cloudy \
        Today: Sunny with a high of 30°C. Tomorrow: Light rain expected, around 24°C.";

    #[test]
    fn empty_text_yields_empty_fields() {
        assert!(parse("").is_empty());
        assert!(parse("   \n").is_empty());
    }

    #[test]
    fn text_without_markers_yields_empty_fields() {
        let fields = parse("Hi! How can I help you with the weather today?");
        assert!(fields.is_empty());
    }

    #[test]
    fn full_reply_is_extracted() {
        let fields = parse(PUNE);

        assert_eq!(fields.location.as_deref(), Some("Pune, Maharashtra"));
        assert_eq!(fields.temperature.as_deref(), Some("29°C (84°F)"));
        assert_eq!(fields.humidity.as_deref(), Some("60%"));
        assert_eq!(fields.wind_speed.as_deref(), Some("12.5 km/h"));
        assert_eq!(fields.conditions.as_deref(), Some("Partly Cloudy"));
        assert_eq!(fields.today_forecast.as_deref(), Some("Sunny with a high of 30°C."));
        assert_eq!(
            fields.tomorrow_forecast.as_deref(),
            Some("Light rain expected, around 24°C.")
        );
        assert_eq!(fields.full_forecast_fallback, None);
    }

    #[test]
    fn humidity_has_no_upper_bound() {
        assert_eq!(parse("Humidity: 47%").humidity.as_deref(), Some("47%"));
        assert_eq!(parse("Humidity: 147%").humidity.as_deref(), Some("147%"));
    }

    #[test]
    fn markers_are_case_insensitive() {
        let fields = parse("temperature 18°C, humidity 40%");
        assert_eq!(fields.temperature.as_deref(), Some("18°C"));
        assert_eq!(fields.humidity.as_deref(), Some("40%"));
    }

    #[test]
    fn temperature_without_alternate_unit() {
        let fields = parse("Temperature: 59°F and dry");
        assert_eq!(fields.temperature.as_deref(), Some("59°F"));
    }

    #[test]
    fn negative_temperature() {
        let fields = parse("Temperature: -4.5°C (23.9°F)");
        assert_eq!(fields.temperature.as_deref(), Some("-4.5°C (23.9°F)"));
    }

    #[test]
    fn temperature_without_unit_is_not_recognised() {
        assert_eq!(parse("Temperature: 29 degrees").temperature, None);
    }

    #[test]
    fn wind_speed_with_alternate_unit() {
        let fields = parse("Windspeed: 10 mph (16.1 km/h)");
        assert_eq!(fields.wind_speed.as_deref(), Some("10 mph (16.1 km/h)"));
    }

    #[test]
    fn conditions_end_at_newline() {
        let fields = parse("Conditions: Light Rain\nHumidity: 80%");
        assert_eq!(fields.conditions.as_deref(), Some("Light Rain"));
    }

    #[test]
    fn conditions_end_at_forecast_marker() {
        let fields = parse("Conditions: Overcast Forecast: more clouds later");
        assert_eq!(fields.conditions.as_deref(), Some("Overcast"));
        assert_eq!(fields.full_forecast_fallback.as_deref(), Some("more clouds later"));
    }

    #[test]
    fn conditions_at_end_of_text() {
        assert_eq!(parse("Conditions: Mist").conditions.as_deref(), Some("Mist"));
    }

    #[test]
    fn conditions_keep_trailing_day_words() {
        let fields = parse("Conditions: Clear skies today\nHumidity: 30%");
        assert_eq!(fields.conditions.as_deref(), Some("Clear skies today"));
    }

    #[test]
    fn only_ascii_digits_are_numbers() {
        let fields = parse("Temperature: ２９°C Humidity: ٦٠% Windspeed: ١٢ km/h");
        assert_eq!(fields.temperature, None);
        assert_eq!(fields.humidity, None);
        assert_eq!(fields.wind_speed, None);
    }

    #[test]
    fn first_match_wins() {
        let fields = parse("Humidity: 10% later Humidity: 90%");
        assert_eq!(fields.humidity.as_deref(), Some("10%"));
    }

    #[test]
    fn location_accepts_estimated_marker() {
        let fields = parse("Oslo, Norway estimated weather for the evening");
        assert_eq!(fields.location.as_deref(), Some("Oslo, Norway"));
    }

    #[test]
    fn full_forecast_stops_before_warning_and_note() {
        let warned = parse("Forecast:\nShowers through the week.\n⚠️ Stay indoors.");
        assert_eq!(
            warned.full_forecast_fallback.as_deref(),
            Some("Showers through the week.")
        );

        let noted = parse("Forecast: Clear skies. Please note data may lag.");
        assert_eq!(noted.full_forecast_fallback.as_deref(), Some("Clear skies."));
    }

    #[test]
    fn parse_is_idempotent() {
        assert_eq!(parse(PUNE), parse(PUNE));
    }
}
