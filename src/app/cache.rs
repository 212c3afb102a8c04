//! Memoization of catalog lists.
//!
//! Screens ask the cache instead of the catalog, so switching back and forth
//! between screens does not refetch lists that were already shown. Only
//! successful pages are kept, and only for the life of the process.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::{Mutex, mpsc::Sender};

use crate::ArcStr;
use crate::api::catalog::{CatalogApi, Category, FetchError, ResultPage};
use crate::log::Log;
use message::Message;

mod core;
mod message;

/// Cache key: the category plus the keyword, which only search categories keep.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub category: Category,
    pub keyword: Option<ArcStr>,
}

impl QueryKey {
    /// Builds a key, dropping keywords that would not change the request.
    pub fn new(category: Category, keyword: Option<ArcStr>) -> Self {
        let keyword = keyword.filter(|keyword| category.is_search() && !keyword.is_empty());
        Self { category, keyword }
    }
}

/// The query cache actor.
#[derive(Debug, Clone)]
pub enum QueryCache {
    Actual(Sender<Message>),
    Mock(Arc<Mutex<HashMap<QueryKey, ResultPage>>>),
}

impl QueryCache {
    pub fn spawn(catalog: CatalogApi, log: Log) -> Self {
        let (cache, _) = core::Core::new(catalog, log).spawn();
        cache
    }

    /// Creates a mock cache serving `pages`. Keys that are not there fail as
    /// network errors.
    pub fn mock(pages: HashMap<QueryKey, ResultPage>) -> Self {
        Self::Mock(Arc::new(Mutex::new(pages)))
    }

    /// Gets the first page of `category`, fetching it on a miss.
    ///
    /// Concurrent misses on the same key share one request.
    pub async fn get(
        &self,
        category: Category,
        keyword: Option<ArcStr>,
    ) -> Result<ResultPage, FetchError> {
        let key = QueryKey::new(category, keyword);
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { key, tx })
                    .await
                    .context("Sending message to QueryCache actor")
                    .expect("QueryCache actor died");
                rx.await
                    .context("Awaiting response from QueryCache actor")
                    .expect("QueryCache actor died")
            }
            Self::Mock(pages) => pages.lock().await.get(&key).cloned().ok_or_else(|| {
                FetchError::Network(format!("no mock page for {}", key.category))
            }),
        }
    }

    /// Drops every cached page. Fetches still in flight are not stored.
    pub async fn invalidate(&self) {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Invalidate { tx })
                    .await
                    .context("Sending message to QueryCache actor")
                    .expect("QueryCache actor died");
                rx.await
                    .context("Awaiting response from QueryCache actor")
                    .expect("QueryCache actor died")
            }
            Self::Mock(_) => {}
        }
    }

    /// Number of cached pages.
    pub async fn len(&self) -> usize {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Len { tx })
                    .await
                    .context("Sending message to QueryCache actor")
                    .expect("QueryCache actor died");
                rx.await
                    .context("Awaiting response from QueryCache actor")
                    .expect("QueryCache actor died")
            }
            Self::Mock(pages) => pages.lock().await.len(),
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
