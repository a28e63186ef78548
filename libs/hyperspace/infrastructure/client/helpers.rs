//! Shared HTTP helper functions for the marketplace clients
//!
//! Provides common patterns for error handling and response validation.

use super::query::QueryError;
use serde_json::Value;

/// Build an API error from a failed response
pub async fn extract_api_error(response: reqwest::Response, endpoint: &str) -> QueryError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    QueryError::Api {
        endpoint: endpoint.to_string(),
        status,
        body,
    }
}

/// Check if response is successful, returning the response or an error
pub async fn require_success(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<reqwest::Response, QueryError> {
    if !response.status().is_success() {
        return Err(extract_api_error(response, endpoint).await);
    }
    Ok(response)
}

/// Read a JSON response body, treating an empty body as `null`
pub async fn read_json(response: reqwest::Response) -> Result<Value, QueryError> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| QueryError::DeserializeFailed(e.to_string()))
}
