use reqwest::Url;
use tokio::task::JoinHandle;

use super::data::TvDetailRecord;
use super::{
    CatalogApi, Category, DetailRecord, FetchError, ItemId, MediaKind, ResultPage,
    message::Message,
};
use crate::{ArcStr, log::Log, net::Net};

const SCOPE: &str = "api.catalog";

/// The core of the catalog API that turns typed queries into HTTP requests.
///
/// Every request goes to `{base}/{endpoint}` with the `api_key` query
/// parameter; search requests add a `query` parameter, empty when there is no
/// keyword. Requests run in their own tasks, so answers may arrive in a
/// different order than the queries were sent.
#[derive(Debug, Clone)]
pub struct Core {
    net: Net,
    log: Log,
    base: ArcStr,
    api_key: ArcStr,
}

impl Core {
    pub fn new(net: Net, log: Log, base: ArcStr, api_key: ArcStr) -> Self {
        Self {
            net,
            log,
            base,
            api_key,
        }
    }

    /// Transforms the catalog core instance into an actor.
    pub fn spawn(self) -> (CatalogApi, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                let core = self.clone();
                match message {
                    Message::List {
                        category,
                        keyword,
                        page,
                        tx,
                    } => {
                        tokio::spawn(async move {
                            let response = core.handle_list(category, keyword, page).await;
                            let _ = tx.send(response);
                        });
                    }
                    Message::Details { kind, id, tx } => {
                        tokio::spawn(async move {
                            let response = core.handle_details(kind, id).await;
                            let _ = tx.send(response);
                        });
                    }
                }
            }
        });

        (CatalogApi::Actual(tx), handle)
    }

    /// Builds the URL of an endpoint, `api_key` first, then `extra` pairs in order.
    pub fn url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, FetchError> {
        let raw = format!("{}/{}", self.base.trim_end_matches('/'), endpoint);
        let mut url = Url::parse(&raw)
            .map_err(|err| FetchError::Network(format!("invalid url {}: {}", raw, err)))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            for (key, value) in extra {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn handle_list(
        &self,
        category: Category,
        keyword: Option<ArcStr>,
        page: Option<u32>,
    ) -> Result<ResultPage, FetchError> {
        let page = page.map(|page| page.to_string());
        let mut extra = Vec::new();
        if category.is_search() {
            extra.push(("query", keyword.as_deref().unwrap_or_default()));
        }
        if let Some(page) = &page {
            extra.push(("page", page.as_str()));
        }

        let url = self.url(category.endpoint(), &extra)?;
        let body = self.net.get(ArcStr::from(url.as_str())).await?;
        serde_json::from_str(&body).map_err(|err| {
            self.log
                .warn(SCOPE, format!("Malformed {} page: {}", category, err));
            FetchError::from(err)
        })
    }

    async fn handle_details(&self, kind: MediaKind, id: ItemId) -> Result<DetailRecord, FetchError> {
        let url = self.url(&format!("{}/{}", kind, id), &[])?;
        let body = self.net.get(ArcStr::from(url.as_str())).await?;
        let parsed = match kind {
            MediaKind::Movie => serde_json::from_str::<DetailRecord>(&body),
            MediaKind::Tv => serde_json::from_str::<TvDetailRecord>(&body).map(DetailRecord::from),
        };
        parsed.map_err(|err| {
            self.log
                .warn(SCOPE, format!("Malformed {} {} detail: {}", kind, id, err));
            FetchError::from(err)
        })
    }
}
