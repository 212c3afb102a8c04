use anyhow::Context;
use tokio::sync::{mpsc::Sender, oneshot};

use crate::{ArcStr, log::Log, net::Net};

mod core;
mod data;
pub mod image;
mod message;
mod mock;

pub use data::{
    Category, CatalogItem, DetailRecord, FetchError, Genre, ItemId, MediaKind, ResultPage,
    UnknownName,
};
pub use image::{ImageSize, make_image_path};
pub use mock::MockData;
use message::Message;

/// The catalog API actor, a typed front for the media catalog service.
///
/// Lists come back as [`ResultPage`]s and single items as [`DetailRecord`]s.
/// Failures are always reported through [`FetchError`], nothing is retried.
///
/// # Examples
/// ```ignore
/// let catalog = CatalogApi::spawn(net, log, base, api_key);
/// let page = catalog.now_playing_movies().await?;
/// ```
#[derive(Debug, Clone)]
pub enum CatalogApi {
    Actual(Sender<Message>),
    Mock(mock::Mock),
}

impl CatalogApi {
    /// Creates a new catalog actor talking to `base` with `api_key`.
    pub fn spawn(net: Net, log: Log, base: ArcStr, api_key: ArcStr) -> Self {
        let (catalog, _) = core::Core::new(net, log, base, api_key).spawn();
        catalog
    }

    /// Creates a mock catalog answering from `data`.
    pub fn mock(data: MockData) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    pub async fn now_playing_movies(&self) -> Result<ResultPage, FetchError> {
        self.list(Category::NowPlayingMovies, None).await
    }

    pub async fn top_rated_movies(&self) -> Result<ResultPage, FetchError> {
        self.list(Category::TopRatedMovies, None).await
    }

    pub async fn upcoming_movies(&self) -> Result<ResultPage, FetchError> {
        self.list(Category::UpcomingMovies, None).await
    }

    pub async fn airing_today_tvs(&self) -> Result<ResultPage, FetchError> {
        self.list(Category::AiringTodayTvs, None).await
    }

    pub async fn popular_tvs(&self) -> Result<ResultPage, FetchError> {
        self.list(Category::PopularTvs, None).await
    }

    pub async fn top_rated_tvs(&self) -> Result<ResultPage, FetchError> {
        self.list(Category::TopRatedTvs, None).await
    }

    /// Searches movies. A missing or empty keyword is still sent, as an empty query.
    pub async fn search_movies(&self, keyword: Option<ArcStr>) -> Result<ResultPage, FetchError> {
        self.list(Category::SearchMovies, keyword).await
    }

    /// Searches TV shows. A missing or empty keyword is still sent, as an empty query.
    pub async fn search_tvs(&self, keyword: Option<ArcStr>) -> Result<ResultPage, FetchError> {
        self.list(Category::SearchTvs, keyword).await
    }

    pub async fn movie_details(&self, id: ItemId) -> Result<DetailRecord, FetchError> {
        self.details(MediaKind::Movie, id).await
    }

    pub async fn tv_details(&self, id: ItemId) -> Result<DetailRecord, FetchError> {
        self.details(MediaKind::Tv, id).await
    }

    /// Fetches the first page of `category`. `keyword` only matters to search categories.
    pub async fn list(
        &self,
        category: Category,
        keyword: Option<ArcStr>,
    ) -> Result<ResultPage, FetchError> {
        self.list_page(category, keyword, None).await
    }

    /// Fetches a given page of `category`. `None` leaves the choice to the
    /// service, which answers with page 1.
    pub async fn list_page(
        &self,
        category: Category,
        keyword: Option<ArcStr>,
        page: Option<u32>,
    ) -> Result<ResultPage, FetchError> {
        match self {
            CatalogApi::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::List {
                        category,
                        keyword,
                        page,
                        tx,
                    })
                    .await
                    .context("Sending message to CatalogApi actor")
                    .expect("CatalogApi actor died");
                rx.await
                    .context("Awaiting response from CatalogApi actor")
                    .expect("CatalogApi actor died")
            }
            CatalogApi::Mock(mock) => mock.list(category, keyword, page).await,
        }
    }

    /// Fetches the detail record of item `id` of the given kind.
    pub async fn details(&self, kind: MediaKind, id: ItemId) -> Result<DetailRecord, FetchError> {
        match self {
            CatalogApi::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Details { kind, id, tx })
                    .await
                    .context("Sending message to CatalogApi actor")
                    .expect("CatalogApi actor died");
                rx.await
                    .context("Awaiting response from CatalogApi actor")
                    .expect("CatalogApi actor died")
            }
            CatalogApi::Mock(mock) => mock.details(kind, id).await,
        }
    }

    /// Number of list and detail requests a mock has answered.
    pub async fn mock_calls(&self) -> Option<(usize, usize)> {
        match self {
            CatalogApi::Actual(_) => None,
            CatalogApi::Mock(mock) => Some((mock.list_calls().await, mock.detail_calls().await)),
        }
    }

    /// Page argument of every list request a mock answered.
    pub async fn mock_requested_pages(&self) -> Option<Vec<Option<u32>>> {
        match self {
            CatalogApi::Actual(_) => None,
            CatalogApi::Mock(mock) => Some(mock.requested_pages().await),
        }
    }
}
