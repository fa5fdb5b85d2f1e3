//! Mapping from a query outcome to what should be displayed.
//!
//! Pure and synchronous: the caller decides how a [`DisplayState`] is
//! drawn (terminal, web, ...).

use crate::{
    model::{QueryResult, WeatherFields},
    parser,
};

/// Advisory shown under every structured summary.
pub const FOOTER_NOTE: &str = "Weather conditions are subject to change. For the most accurate \
    information, please check a reliable weather source.";

/// Decorative symbol chosen from the conditions text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionIcon {
    Sun,
    PartlyCloudy,
    Cloud,
    Rain,
    Storm,
    Snow,
    Fog,
    Wind,
    Generic,
}

/// Substring table checked in order; the first hit wins.
const ICON_RULES: &[(&[&str], ConditionIcon)] = &[
    (&["sunny", "clear"], ConditionIcon::Sun),
    (&["partly cloudy"], ConditionIcon::PartlyCloudy),
    (&["cloudy", "overcast"], ConditionIcon::Cloud),
    (&["rain", "shower"], ConditionIcon::Rain),
    (&["thunder", "storm"], ConditionIcon::Storm),
    (&["snow"], ConditionIcon::Snow),
    (&["fog", "mist"], ConditionIcon::Fog),
    (&["wind"], ConditionIcon::Wind),
];

impl ConditionIcon {
    pub fn from_conditions(conditions: Option<&str>) -> Self {
        let lower = conditions.unwrap_or_default().to_lowercase();

        ICON_RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
            .map(|(_, icon)| *icon)
            .unwrap_or(ConditionIcon::Generic)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionIcon::Sun => "☀️",
            ConditionIcon::PartlyCloudy => "⛅",
            ConditionIcon::Cloud => "☁️",
            ConditionIcon::Rain => "🌧️",
            ConditionIcon::Storm => "⛈️",
            ConditionIcon::Snow => "❄️",
            ConditionIcon::Fog => "🌫️",
            ConditionIcon::Wind => "💨",
            ConditionIcon::Generic => "🌤️",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Temperature,
    Humidity,
    WindSpeed,
    Conditions,
}

impl CardKind {
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Temperature => "Current Temperature",
            CardKind::Humidity => "Humidity",
            CardKind::WindSpeed => "Wind Speed",
            CardKind::Conditions => "Conditions",
        }
    }
}

/// One labelled value in the summary grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub kind: CardKind,
    pub icon: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastSection {
    /// At least one of the two is present.
    Daily {
        today: Option<String>,
        tomorrow: Option<String>,
    },
    Full(String),
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredView {
    pub icon: ConditionIcon,
    pub location: Option<String>,
    pub cards: Vec<Card>,
    pub forecast: ForecastSection,
    pub footer: &'static str,
}

/// The mutually exclusive states a result area can be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Idle,
    Error { message: String },
    /// No temperature could be recovered; show the reply as prose.
    Unstructured { text: String },
    Structured(StructuredView),
}

/// Select the display state for the current outcome.
///
/// Loading wins over any result. A failure is shown verbatim without
/// parsing. A success is shown structured only when a temperature was
/// recognised; otherwise the raw reply is shown as-is, even if other
/// fields were found.
pub fn render(result: Option<&QueryResult>, is_loading: bool) -> DisplayState {
    if is_loading {
        return DisplayState::Loading;
    }

    match result {
        None => DisplayState::Idle,
        Some(QueryResult::Failure { message }) => DisplayState::Error {
            message: message.clone(),
        },
        Some(QueryResult::Success { raw_text }) => {
            let fields = parser::parse(raw_text);
            if fields.temperature.is_none() {
                DisplayState::Unstructured {
                    text: raw_text.clone(),
                }
            } else {
                DisplayState::Structured(structured(fields))
            }
        }
    }
}

fn structured(fields: WeatherFields) -> StructuredView {
    let icon = ConditionIcon::from_conditions(fields.conditions.as_deref());

    let cards = [
        (CardKind::Temperature, "🌡️", fields.temperature),
        (CardKind::Humidity, "💧", fields.humidity),
        (CardKind::WindSpeed, "💨", fields.wind_speed),
        (CardKind::Conditions, icon.symbol(), fields.conditions),
    ]
    .into_iter()
    .filter_map(|(kind, symbol, value)| {
        value.map(|value| Card {
            kind,
            icon: symbol,
            value,
        })
    })
    .collect();

    let forecast = match (fields.today_forecast, fields.tomorrow_forecast) {
        (None, None) => fields
            .full_forecast_fallback
            .map_or(ForecastSection::Hidden, ForecastSection::Full),
        (today, tomorrow) => ForecastSection::Daily { today, tomorrow },
    };

    StructuredView {
        icon,
        location: fields.location,
        cards,
        forecast,
        footer: FOOTER_NOTE,
    }
}
