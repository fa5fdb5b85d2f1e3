use weather_query_core::{
    QueryError,
    render::{DisplayState, ForecastSection, StructuredView},
};

/// Terminal rendering of a display state. `Idle` renders as an empty string.
pub fn format_state(state: &DisplayState) -> String {
    match state {
        DisplayState::Loading => "⏳ Sending...".to_string(),
        DisplayState::Idle => String::new(),
        DisplayState::Error { message } => format!("⚠️  Unable to Process\n{message}"),
        DisplayState::Unstructured { text } => text.clone(),
        DisplayState::Structured(view) => format_structured(view),
    }
}

/// Inline message for a rejected submission.
pub fn format_input_error(err: &QueryError) -> String {
    format!("⚠️  {err}")
}

fn format_structured(view: &StructuredView) -> String {
    let mut lines = Vec::new();

    match &view.location {
        Some(location) => lines.push(format!("{}  📍 {location}", view.icon.symbol())),
        None => lines.push(view.icon.symbol().to_string()),
    }
    lines.push(String::new());

    for card in &view.cards {
        lines.push(format!("{}  {}: {}", card.icon, card.kind.label(), card.value));
    }

    match &view.forecast {
        ForecastSection::Daily { today, tomorrow } => {
            if let Some(text) = today {
                lines.push(String::new());
                lines.push("📅 Today".to_string());
                lines.push(format!("   {text}"));
            }
            if let Some(text) = tomorrow {
                lines.push(String::new());
                lines.push("🗓️ Tomorrow".to_string());
                lines.push(format!("   {text}"));
            }
        }
        ForecastSection::Full(text) => {
            lines.push(String::new());
            lines.push("📅 Forecast".to_string());
            lines.push(format!("   {text}"));
        }
        ForecastSection::Hidden => {}
    }

    lines.push(String::new());
    lines.push(format!("ℹ️  {}", view.footer));

    lines.join("\n")
}
