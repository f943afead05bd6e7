//! Error types for the solrq-params crate.
//!
//! Flattening records into a query string never fails. Errors come from
//! record validation, document serialization, and query-string decoding.

/// Errors that can occur while building or decoding request parameters.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    /// A parameter value is outside what the engine accepts.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// The parameter key the value was meant for.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A document could not be converted into an update command.
    #[error("serialize error: {0}")]
    Serialize(String),

    /// A query string could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ParamsError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for solrq-params results.
pub type Result<T> = std::result::Result<T, ParamsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_value() {
        let err = ParamsError::invalid("tie", "must be between 0.0 and 1.0");
        assert_eq!(
            err.to_string(),
            "invalid value for tie: must be between 0.0 and 1.0"
        );
    }

    #[test]
    fn display_serialize() {
        let err = ParamsError::Serialize("key must be a string".into());
        assert_eq!(err.to_string(), "serialize error: key must be a string");
    }

    #[test]
    fn display_decode() {
        let err = ParamsError::Decode("empty key in pair 2".into());
        assert_eq!(err.to_string(), "decode error: empty key in pair 2");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParamsError>();
    }
}
