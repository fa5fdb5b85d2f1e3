use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// A validated, trimmed weather question. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trim the user's input and reject it if nothing is left.
    pub fn new(input: &str) -> Result<Self, QueryError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Success { raw_text: String },
    Failure { message: String },
}

impl QueryResult {
    pub fn success(raw_text: impl Into<String>) -> Self {
        QueryResult::Success {
            raw_text: raw_text.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        QueryResult::Failure {
            message: message.into(),
        }
    }
}

/// Best-effort fields extracted from a natural-language weather reply.
///
/// Every field is optional; a recognised field is never `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeatherFields {
    pub location: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub wind_speed: Option<String>,
    pub conditions: Option<String>,
    pub today_forecast: Option<String>,
    pub tomorrow_forecast: Option<String>,
    pub full_forecast_fallback: Option<String>,
}

impl WeatherFields {
    pub fn is_empty(&self) -> bool {
        *self == WeatherFields::default()
    }
}

/// Body of `POST /api/weather`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiRequest<'a> {
    pub query: &'a str,
}

/// Body returned by the remote service, for both success and failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
