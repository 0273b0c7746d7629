use serde::Deserialize;

/// Error payload of a non-success response.
///
/// The remote uses both `{"error": {"type": ..., "message": ...}}` and the
/// bare `{"error": "NOT_FOUND"}` form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Structured {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        message: Option<String>,
    },
    Code(String),
}

impl ErrorDetail {
    pub fn message(&self) -> String {
        match self {
            ErrorDetail::Structured {
                kind,
                message: Some(message),
            } => format!("{}: {}", kind, message),
            ErrorDetail::Structured { kind, message: None } => kind.clone(),
            ErrorDetail::Code(code) => code.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Best message for a failed response body: the structured error if one
/// parses, else the raw text, else the canonical reason for `status`.
pub fn remote_error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.error.message();
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}
