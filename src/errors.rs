use thiserror::Error;

/// Failures surfaced by the two RPC-backed operations. Config problems are
/// reported separately by [`crate::config::ConfigError`] before any network
/// call is made.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Network or protocol failure talking to the RPC endpoint. Carries the
    /// operation name and the identifier that was being queried.
    #[error("{operation}: rpc fetch failed for {subject}: {message}")]
    Fetch {
        operation: &'static str,
        subject: String,
        message: String,
    },
    /// The queried transaction hash yielded no data. A missing block is not
    /// an error for aggregation; a missing transaction is for inspection.
    #[error("transaction {0} not found")]
    NotFound(String),
    /// Malformed input to transfer-payload construction.
    #[error("cannot encode transfer payload: {0}")]
    Encoding(String),
}

impl ProbeError {
    pub fn fetch(
        operation: &'static str,
        subject: impl Into<String>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::Fetch {
            operation,
            subject: subject.into(),
            message: err.to_string(),
        }
    }
}
