use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::{Category, DetailRecord, FetchError, ItemId, MediaKind, ResultPage};
use crate::ArcStr;

/// Canned catalog answers.
#[derive(Debug, Default)]
pub struct MockData {
    pub pages: HashMap<(Category, Option<ArcStr>), Result<ResultPage, FetchError>>,
    pub details: HashMap<(MediaKind, ItemId), Result<DetailRecord, FetchError>>,
    /// Number of list requests answered, hits and misses alike
    pub list_calls: usize,
    /// Number of detail requests answered, hits and misses alike
    pub detail_calls: usize,
    /// Page argument of every list request, in order
    pub requested_pages: Vec<Option<u32>>,
    /// Delay before a list request is answered
    pub latency: Option<Duration>,
}

impl MockData {
    pub fn with_page(mut self, category: Category, keyword: Option<&str>, page: ResultPage) -> Self {
        self.pages
            .insert((category, keyword.map(ArcStr::from)), Ok(page));
        self
    }

    pub fn with_page_error(
        mut self,
        category: Category,
        keyword: Option<&str>,
        error: FetchError,
    ) -> Self {
        self.pages
            .insert((category, keyword.map(ArcStr::from)), Err(error));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_details(mut self, kind: MediaKind, id: ItemId, detail: DetailRecord) -> Self {
        self.details.insert((kind, id), Ok(detail));
        self
    }
}

/// Mock implementation of the catalog actor for testing purposes.
#[derive(Debug, Clone)]
pub struct Mock(Arc<Mutex<MockData>>);

impl Mock {
    pub fn new(data: MockData) -> Self {
        Self(Arc::new(Mutex::new(data)))
    }

    pub async fn list(
        &self,
        category: Category,
        keyword: Option<ArcStr>,
        page: Option<u32>,
    ) -> Result<ResultPage, FetchError> {
        let latency = self.0.lock().await.latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut data = self.0.lock().await;
        data.list_calls += 1;
        data.requested_pages.push(page);
        data.pages
            .get(&(category, keyword.clone()))
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Network(format!(
                    "no mock page for {} {:?}",
                    category, keyword
                )))
            })
    }

    pub async fn details(&self, kind: MediaKind, id: ItemId) -> Result<DetailRecord, FetchError> {
        let mut data = self.0.lock().await;
        data.detail_calls += 1;
        data.details.get(&(kind, id)).cloned().unwrap_or_else(|| {
            Err(FetchError::Network(format!(
                "no mock detail for {} {}",
                kind, id
            )))
        })
    }

    pub async fn list_calls(&self) -> usize {
        self.0.lock().await.list_calls
    }

    pub async fn requested_pages(&self) -> Vec<Option<u32>> {
        self.0.lock().await.requested_pages.clone()
    }

    pub async fn detail_calls(&self) -> usize {
        self.0.lock().await.detail_calls
    }
}
