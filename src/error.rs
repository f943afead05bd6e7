//! Error types for the solrq client.
//!
//! Every failure a request can hit is classified into one variant so callers
//! can tell a misconfigured endpoint from an unreachable server from a query
//! Solr rejected.

use solrq_params::ParamsError;

/// Top-level error type for Solr requests.
#[derive(Debug, thiserror::Error)]
pub enum SolrError {
    /// Invalid client configuration or unresolvable endpoint.
    #[error("config error: {0}")]
    Config(String),

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Solr answered with an error status or a non-zero `responseHeader.status`.
    #[error("server error {status}: {message}")]
    Server {
        /// HTTP status, or the header status for errors reported with HTTP 200.
        status: u16,
        /// Solr's `error.msg`, or the start of the raw body.
        message: String,
    },

    /// A successful response body was not the JSON Solr is expected to send.
    #[error("decode error: {0}")]
    Decode(String),

    /// A parameter record failed validation.
    #[error("parameter error: {0}")]
    Params(#[from] ParamsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SolrError {
    /// Returns the Solr or HTTP status for [`SolrError::Server`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SolrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_server() {
        let err = SolrError::Server {
            status: 400,
            message: "undefined field foo".into(),
        };
        assert_eq!(err.to_string(), "server error 400: undefined field foo");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn display_timeout() {
        let err = SolrError::Timeout("exceeded 10s".into());
        assert_eq!(err.to_string(), "request timed out: exceeded 10s");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn params_error_converts() {
        let err: SolrError = ParamsError::Decode("bad pair".into()).into();
        assert_eq!(err.to_string(), "parameter error: decode error: bad pair");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SolrError>();
    }
}
