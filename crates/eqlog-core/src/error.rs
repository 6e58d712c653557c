/// Errors raised while splitting a raw log line.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("{reason}: {line:?}")]
    InvalidLineFormat { line: String, reason: String },

    #[error("invalid timestamp '{text}': {source}")]
    InvalidTimestamp {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl LineError {
    pub(crate) fn invalid_format(line: &str) -> Self {
        LineError::InvalidLineFormat {
            line: line.to_string(),
            reason: "could not split line, invalid format".to_string(),
        }
    }
}
