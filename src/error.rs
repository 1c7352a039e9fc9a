/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum StardustError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Request could not be built from the supplied payload or overrides.
    #[error("encode error: {0}")]
    Encode(String),
    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// A polled operation kept failing with retryable errors until the
    /// iteration budget ran out.
    #[error("operation did not complete in a timely manner after {attempts} attempts: {last_error}")]
    RetryExhausted { attempts: u32, last_error: String },
    /// Invalid or missing environment configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl StardustError {
    /// HTTP status of a non-success response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parses the response body of an [`StardustError::Http`] as JSON.
    pub fn response_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Http { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// The `message` field of a JSON error body, as sent by the backend.
    pub fn response_message(&self) -> Option<String> {
        self.response_json()?
            .get("message")?
            .as_str()
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::StardustError;

    #[test]
    fn response_message_reads_json_body() {
        let err = StardustError::Http {
            status: 500,
            body: r#"{"message":"Unable to find player","statusCode":500}"#.to_owned(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.response_message().as_deref(), Some("Unable to find player"));
    }

    #[test]
    fn response_message_is_none_for_non_json_body() {
        let err = StardustError::Http {
            status: 502,
            body: "<html>bad gateway</html>".to_owned(),
        };
        assert_eq!(err.response_message(), None);
        assert_eq!(StardustError::Decode("x".to_owned()).status(), None);
    }
}
