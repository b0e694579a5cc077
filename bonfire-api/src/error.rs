/// Errors that can occur while talking to the storefront backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the backend's `detail` when it sent
    /// one, otherwise `HTTP <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build the error for a failed response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = detail_message(body).unwrap_or_else(|| format!("HTTP {status}"));
        Self::Status { status, message }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status of a rejected request, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend answers `{"detail": "..."}`; request validation failures
/// carry a list of `{"msg": "..."}` objects instead.
fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_used_when_present() {
        let err = ApiError::from_response(400, r#"{"detail": "Spiel bereits in Bibliothek"}"#);
        assert_eq!(err.to_string(), "Spiel bereits in Bibliothek");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn generic_message_without_detail() {
        assert_eq!(ApiError::from_response(500, "").to_string(), "HTTP 500");
        assert_eq!(
            ApiError::from_response(502, "<html>Bad Gateway</html>").to_string(),
            "HTTP 502"
        );
        assert_eq!(ApiError::from_response(404, r#"{"error": "x"}"#).to_string(), "HTTP 404");
        assert!(ApiError::from_response(404, "").is_not_found());
    }

    #[test]
    fn validation_detail_list() {
        let body = r#"{"detail": [{"loc": ["body", "price"], "msg": "must be >= 0"},
                                  {"loc": ["body", "title"], "msg": "field required"}]}"#;
        assert_eq!(
            ApiError::from_response(422, body).to_string(),
            "must be >= 0; field required"
        );
    }
}
