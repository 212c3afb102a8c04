use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::net::NetError;

/// Identifier of a catalog item.
///
/// Ids are unique inside one result set only; the same number may name a
/// movie and an unrelated show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Normalizes an id coming from text (route params, CLI arguments).
    ///
    /// Surrounding whitespace is ignored, anything else that is not a
    /// decimal number gives `None`.
    pub fn normalize(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(Self)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Whether a record describes a movie or a TV show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Tv => write!(f, "tv"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaKind::Movie),
            "tv" | "tvs" | "show" | "shows" => Ok(MediaKind::Tv),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

/// A list the catalog can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    NowPlayingMovies,
    TopRatedMovies,
    UpcomingMovies,
    AiringTodayTvs,
    PopularTvs,
    TopRatedTvs,
    SearchMovies,
    SearchTvs,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::NowPlayingMovies,
        Category::TopRatedMovies,
        Category::UpcomingMovies,
        Category::AiringTodayTvs,
        Category::PopularTvs,
        Category::TopRatedTvs,
        Category::SearchMovies,
        Category::SearchTvs,
    ];

    /// Short tag a screen uses to tell its sliders apart.
    ///
    /// Tags repeat across screens (`now` exists on both homes), so a tag
    /// only identifies a category together with its screen.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::NowPlayingMovies | Category::AiringTodayTvs => "now",
            Category::TopRatedMovies | Category::TopRatedTvs => "topRated",
            Category::UpcomingMovies => "upcoming",
            Category::PopularTvs => "popular",
            Category::SearchMovies => "movies",
            Category::SearchTvs => "tvs",
        }
    }

    /// Unique, command line friendly name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::NowPlayingMovies => "now-playing",
            Category::TopRatedMovies => "top-rated-movies",
            Category::UpcomingMovies => "upcoming",
            Category::AiringTodayTvs => "airing-today",
            Category::PopularTvs => "popular-tvs",
            Category::TopRatedTvs => "top-rated-tvs",
            Category::SearchMovies => "search-movies",
            Category::SearchTvs => "search-tvs",
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Category::NowPlayingMovies
            | Category::TopRatedMovies
            | Category::UpcomingMovies
            | Category::SearchMovies => MediaKind::Movie,
            Category::AiringTodayTvs
            | Category::PopularTvs
            | Category::TopRatedTvs
            | Category::SearchTvs => MediaKind::Tv,
        }
    }

    /// Path of the list endpoint, relative to the API base.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Category::NowPlayingMovies => "movie/now_playing",
            Category::TopRatedMovies => "movie/top_rated",
            Category::UpcomingMovies => "movie/upcoming",
            Category::AiringTodayTvs => "tv/airing_today",
            Category::PopularTvs => "tv/popular",
            Category::TopRatedTvs => "tv/top_rated",
            Category::SearchMovies => "search/movie",
            Category::SearchTvs => "search/tv",
        }
    }

    /// Search lists take a `query` parameter.
    pub fn is_search(&self) -> bool {
        matches!(self, Category::SearchMovies | Category::SearchTvs)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// A name that matches no variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name: {0}")]
pub struct UnknownName(pub String);

/// One entry of a list.
///
/// Movies carry a `title`, shows a `name`; both land in [`CatalogItem::title`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    #[serde(alias = "name", default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// A page of a list, as answered by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<CatalogItem>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl ResultPage {
    /// Finds an item of this page by id.
    pub fn find(&self, id: ItemId) -> Option<&CatalogItem> {
        self.results.iter().find(|item| item.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
}

/// Extra information about a single item, fetched when it is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Length in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
}

impl DetailRecord {
    /// Genre names joined for display.
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Shape of the TV detail endpoint, which names its fields differently.
#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct TvDetailRecord {
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    #[serde(default)]
    first_air_date: Option<String>,
    #[serde(default)]
    tagline: Option<String>,
}

impl From<TvDetailRecord> for DetailRecord {
    fn from(tv: TvDetailRecord) -> Self {
        Self {
            genres: tv.genres,
            runtime: tv.episode_run_time.first().copied(),
            release_date: tv.first_air_date,
            tagline: tv.tagline,
        }
    }
}

/// Why a catalog query produced no data.
///
/// Kept as text so results can be cloned into the UI state and the cache.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not complete
    #[error("network failure: {0}")]
    Network(String),
    /// The catalog answered, but not with what was expected
    #[error("bad response: {0}")]
    BadResponse(String),
}

impl From<NetError> for FetchError {
    fn from(err: NetError) -> Self {
        match err {
            NetError::Status { .. } => FetchError::BadResponse(err.to_string()),
            NetError::Request { .. } | NetError::NoMock(_) => FetchError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::BadResponse(err.to_string())
    }
}
