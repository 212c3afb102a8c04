use reqwest::Client;
use tokio::task::JoinHandle;

use super::{Net, NetError, message::Message, redact};
use crate::{ArcStr, log::Log};

const SCOPE: &str = "net";

/// The core of the networking system that handles HTTP requests.
///
/// Wraps a reqwest [`Client`] (and its connection pool). Requests run in
/// their own tasks so a slow response never holds up the ones queued
/// behind it; the UI relies on that to keep fetching lists while a detail
/// request is outstanding.
#[derive(Debug)]
pub struct Core {
    /// Logging interface for operation logging
    log: Log,
    /// HTTP client for making requests
    client: Client,
}

impl Core {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            client: Client::new(),
        }
    }

    /// Transforms the networking core instance into an actor.
    pub fn spawn(self) -> (Net, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Message::Get { url, tx } => {
                        let client = self.client.clone();
                        let log = self.log.clone();
                        tokio::spawn(async move {
                            let response = Self::handle_get_request(&client, &url).await;
                            if let Err(err) = &response {
                                log.warn(SCOPE, err);
                            } else {
                                log.info(SCOPE, format!("GET {}", redact(&url)));
                            }
                            let _ = tx.send(response);
                        });
                    }
                }
            }
        });

        (Net::Actual(tx), handle)
    }

    async fn handle_get_request(client: &Client, url: &str) -> Result<ArcStr, NetError> {
        let request_error = |source| NetError::Request {
            url: redact(url),
            source,
        };

        let response = client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetError::Status {
                url: redact(url),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(request_error)?;
        Ok(ArcStr::from(text))
    }
}
