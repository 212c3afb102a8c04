use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::NetError;
use crate::ArcStr;

/// A canned response for the mock networking actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub body: ArcStr,
}

impl MockResponse {
    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<ArcStr>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// An empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: ArcStr::from(""),
        }
    }
}

/// Mock implementation of the Net actor for testing purposes.
///
/// Answers from a table keyed by the exact URL and records every URL it was
/// asked for, so tests can check how requests were built.
#[derive(Debug, Clone)]
pub struct Mock {
    responses: Arc<HashMap<ArcStr, MockResponse>>,
    requests: Arc<Mutex<Vec<ArcStr>>>,
}

impl Mock {
    pub fn new(responses: HashMap<ArcStr, MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            requests: Default::default(),
        }
    }

    pub async fn get(&self, url: ArcStr) -> Result<ArcStr, NetError> {
        self.requests.lock().await.push(url.clone());
        match self.responses.get(&url) {
            Some(response) if (200..300).contains(&response.status) => Ok(response.body.clone()),
            Some(response) => Err(NetError::Status {
                url: super::redact(&url),
                status: response.status,
            }),
            None => Err(NetError::NoMock(url)),
        }
    }

    pub async fn requests(&self) -> Vec<ArcStr> {
        self.requests.lock().await.clone()
    }
}
