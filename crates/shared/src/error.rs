use serde::{Deserialize, Serialize};

/// Error body returned by the admin backend on rejected requests.
///
/// Validation failures carry a human-readable `detail`; some endpoints use
/// `message` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            message: None,
        }
    }

    /// The server-provided text, if any non-blank one was sent.
    pub fn detail_text(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or(self.message.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_text_prefers_detail_over_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail":"Email already in use","message":"Bad Request"}"#)
                .expect("body");
        assert_eq!(body.detail_text(), Some("Email already in use"));
    }

    #[test]
    fn blank_detail_is_ignored() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"detail":"  "}"#).expect("body");
        assert_eq!(body.detail_text(), None);
        assert_eq!(ApiErrorBody::default().detail_text(), None);
    }
}
