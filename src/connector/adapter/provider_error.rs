use reqwest::StatusCode;
use serde_json::Value;
use tracing::warn;

use crate::domain::DomainError;

/// Build a provider error from a non-success upstream response.
///
/// Both supported vendors report failures as `{"error": {"message": ...}}`.
/// The parsed body is kept as structured details; a body that is not JSON is
/// only logged.
pub(crate) fn from_error_body(vendor: &str, status: StatusCode, body: &str) -> DomainError {
    warn!("{vendor}: API returned {status}: {body}");

    match serde_json::from_str::<Value>(body) {
        Ok(details) => {
            let message = error_message(&details)
                .unwrap_or_else(|| format!("Error from {vendor} API (status {status})."));
            DomainError::provider_with_details(message, details)
        }
        Err(_) => DomainError::provider(format!("Error from {vendor} API (status {status}).")),
    }
}

pub(crate) fn from_transport(vendor: &str, err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::provider(format!("{vendor} API request timed out: {err}"))
    } else {
        DomainError::provider(format!("{vendor} API request failed: {err}"))
    }
}

/// Extract `error.message` (or a bare string `error`) from a vendor payload.
pub(crate) fn error_message(payload: &Value) -> Option<String> {
    let error = payload.get("error")?;
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
}
