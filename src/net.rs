use std::collections::HashMap;

use anyhow::Context;
use tokio::sync::mpsc::Sender;

use crate::{ArcStr, log::Log};

mod core;
mod error;
mod message;
mod mock;

pub use error::NetError;
pub use mock::MockResponse;
use message::Message;

/// The networking actor that provides a thread-safe interface for HTTP
/// requests.
///
/// The catalog is read-only, so the only verb is GET. A non-2xx status is
/// reported as [`NetError::Status`] instead of handing the error body to the
/// caller.
///
/// # Examples
/// ```ignore
/// let net = Net::spawn(log);
/// let body = net.get(ArcStr::from("https://api.themoviedb.org/3/movie/550?api_key=...")).await?;
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Net {
    /// A real networking actor that performs HTTP requests
    Actual(Sender<Message>),
    /// A mock answering from a fixed table of responses
    Mock(mock::Mock),
}

impl Net {
    /// Creates a new networking instance and spawns its actor.
    pub fn spawn(log: Log) -> Self {
        let (net, _) = core::Core::new(log).spawn();
        net
    }

    /// Creates a mock networking instance answering from `responses`, keyed
    /// by the exact request URL.
    pub fn mock(responses: HashMap<ArcStr, MockResponse>) -> Self {
        Self::Mock(mock::Mock::new(responses))
    }

    /// Creates a mock networking instance that knows no URL.
    pub fn mock_empty() -> Self {
        Self::Mock(mock::Mock::new(HashMap::new()))
    }

    /// Performs an HTTP GET request and returns the response body.
    ///
    /// # Errors
    /// [`NetError::Request`] when the request cannot complete,
    /// [`NetError::Status`] when the server answers with a non-success status.
    pub async fn get(&self, url: ArcStr) -> Result<ArcStr, NetError> {
        match self {
            Net::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { url, tx })
                    .await
                    .context("Sending message to Net actor")
                    .expect("Net actor died");
                rx.await
                    .context("Awaiting response from Net actor")
                    .expect("Net actor died")
            }
            Net::Mock(mock) => mock.get(url).await,
        }
    }

    /// URLs requested so far. Only the mock records them.
    pub async fn requests(&self) -> Option<Vec<ArcStr>> {
        match self {
            Net::Actual(_) => None,
            Net::Mock(mock) => Some(mock.requests().await),
        }
    }
}

/// Replaces the value of the `api_key` query parameter so URLs can be logged.
pub fn redact(url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return url.to_string();
    };
    if parsed.query().is_none() {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "api_key" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_api_key() {
        assert_eq!(
            redact("https://host/3/search/movie?api_key=secret&query=alien"),
            "https://host/3/search/movie?api_key=***&query=alien"
        );
        assert_eq!(redact("https://host/3/tv/popular"), "https://host/3/tv/popular");
        assert_eq!(
            redact("https://host/3/search/tv?query=star+wars&api_key=secret&page=2"),
            "https://host/3/search/tv?query=star+wars&api_key=***&page=2"
        );
    }

    #[tokio::test]
    async fn test_mock_get_known_and_unknown_urls() {
        let url = ArcStr::from("https://host/3/movie/550");
        let net = Net::mock(HashMap::from([(
            url.clone(),
            MockResponse::ok("{\"runtime\": 139}"),
        )]));

        assert_eq!(&*net.get(url.clone()).await.unwrap(), "{\"runtime\": 139}");
        assert!(matches!(
            net.get(ArcStr::from("https://host/3/movie/1")).await,
            Err(NetError::NoMock(_))
        ));
        assert_eq!(net.requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_status_error() {
        let url = ArcStr::from("https://host/3/movie/0");
        let net = Net::mock(HashMap::from([(url.clone(), MockResponse::status(404))]));

        match net.get(url).await {
            Err(NetError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_actual_net_creation() {
        let net = Net::spawn(Log::mock());
        assert!(matches!(net, Net::Actual(_)));
        assert!(net.requests().await.is_none());
    }
}
