//! Error payload returned by the device on 4xx/5xx responses.

use reqwest::StatusCode;
use serde::Deserialize;

/// `<errors>` document.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(rename = "error", default)]
    pub errors: Vec<ErrorEntry>,
}

/// One `<error>` entry.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEntry {
    #[serde(rename = "error-tag", default)]
    pub tag: String,
    #[serde(rename = "error-urlpath", default)]
    pub url_path: String,
    #[serde(rename = "error-message", default)]
    pub message: String,
}

impl ErrorPayload {
    /// Entries rendered as `tag: message`, one per line.
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.tag, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Human-readable description of an error response.
///
/// Falls back to the status line when the body is empty, cannot be decoded,
/// or holds no entries.
pub fn describe_error(status: StatusCode, body: &[u8]) -> String {
    if body.is_empty() {
        return status_line(status);
    }
    match quick_xml::de::from_reader::<_, ErrorPayload>(body) {
        Ok(payload) if !payload.errors.is_empty() => payload.message(),
        _ => status_line(status),
    }
}

/// Status as `"403 Forbidden"`.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
