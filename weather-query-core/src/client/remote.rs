use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{TransportError, UNEXPECTED_MESSAGE},
    model::{ApiRequest, ApiResponse, Query, QueryResult},
};

use super::QueryService;

/// Path of the single query route, relative to the endpoint base.
pub const QUERY_PATH: &str = "/api/weather";

/// Sends each query as one `POST` to the assistant backend.
#[derive(Debug, Clone)]
pub struct RemoteQueryClient {
    url: String,
    http: Client,
}

impl RemoteQueryClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            url: format!("{}{QUERY_PATH}", endpoint.trim_end_matches('/')),
            http: Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post_query(&self, query: &Query) -> Result<ApiResponse, TransportError> {
        tracing::debug!(url = %self.url, query = %query, "sending weather query");

        let res = self
            .http
            .post(&self.url)
            .json(&ApiRequest {
                query: query.as_str(),
            })
            .send()
            .await
            .map_err(|source| {
                let url = self.url.clone();
                if source.is_builder() {
                    TransportError::Request { url, source }
                } else {
                    TransportError::Unreachable { url, source }
                }
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| TransportError::Request {
            url: self.url.clone(),
            source,
        })?;

        tracing::debug!(status = status.as_u16(), "received weather reply");

        // Error statuses still carry a usable `{ success, message }` body.
        serde_json::from_str(&body).map_err(|_| TransportError::InvalidPayload {
            status: status.as_u16(),
            body: truncate_body(&body),
        })
    }
}

#[async_trait]
impl QueryService for RemoteQueryClient {
    async fn submit(&self, query: &Query) -> QueryResult {
        match self.post_query(query).await {
            Ok(payload) => into_result(payload),
            Err(err) => {
                tracing::warn!(error = %err, "weather query failed");
                QueryResult::failure(err.user_message())
            }
        }
    }
}

/// Anything without `success: true` is a failure.
fn into_result(payload: ApiResponse) -> QueryResult {
    if payload.success {
        QueryResult::success(payload.response.unwrap_or_default())
    } else {
        QueryResult::failure(
            payload
                .message
                .unwrap_or_else(|| UNEXPECTED_MESSAGE.to_string()),
        )
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
