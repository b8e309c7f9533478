use thiserror::Error;

/// Failure talking to one of the backend services. The widget collapses every variant into a
/// fixed user-visible message; nothing here escapes the UI boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// `message` field of the error body, when the backend sent one.
        message: Option<String>,
    },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text to show the user: the backend-provided message if there is one, else the error itself.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Invalid root URL".to_string()),
        };
        assert_eq!(err.user_message(), "Invalid root URL");
    }

    #[test]
    fn test_user_message_falls_back_to_display() {
        let err = ApiError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(err.user_message(), "Request failed with status code 502");

        let blank = ApiError::Status {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message(), "Request failed with status code 500");

        let transport = ApiError::Transport("connection refused".to_string());
        assert_eq!(transport.user_message(), "Transport error: connection refused");
    }
}
