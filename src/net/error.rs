use crate::ArcStr;

/// Failures of the networking layer.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// The request could not complete (DNS, connection, TLS, body read...)
    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("GET {url} answered with status {status}")]
    Status { url: String, status: u16 },
    /// The mock has no response registered for the URL
    #[error("GET {0} not found in mock responses")]
    NoMock(ArcStr),
}
