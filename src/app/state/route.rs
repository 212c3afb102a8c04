//! Paths naming what the UI shows, as in `/movies/42`.

use std::fmt::Display;
use std::str::FromStr;

use reqwest::Url;

use super::ScreenKind;
use crate::api::catalog::ItemId;

/// Error parsing a [`Route`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("malformed route {0}")]
    Malformed(String),
    #[error("no screen at {0}")]
    Unknown(String),
    #[error("invalid item id {0}")]
    BadId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Movies,
    /// `/movies/:movieId`
    Movie(ItemId),
    /// `/tv`
    Tv,
    /// `/tv/:tvId`
    Show(ItemId),
    /// `/search?keyword=...`
    Search { keyword: Option<String> },
    /// `/search/:searchId?keyword=...`
    SearchResult { id: ItemId, keyword: Option<String> },
}

impl Route {
    /// Parses a route. Same as [`FromStr`].
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        input.parse()
    }

    pub fn screen(&self) -> ScreenKind {
        match self {
            Route::Movies | Route::Movie(_) => ScreenKind::Movies,
            Route::Tv | Route::Show(_) => ScreenKind::Tv,
            Route::Search { .. } | Route::SearchResult { .. } => ScreenKind::Search,
        }
    }

    /// Id of the item opened in the overlay, if any.
    pub fn item(&self) -> Option<ItemId> {
        match self {
            Route::Movie(id) | Route::Show(id) | Route::SearchResult { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        match self {
            Route::Search { keyword } | Route::SearchResult { keyword, .. } => keyword.as_deref(),
            _ => None,
        }
    }

    /// The route of the same screen with no item open.
    pub fn root(&self) -> Route {
        match self {
            Route::Movies | Route::Movie(_) => Route::Movies,
            Route::Tv | Route::Show(_) => Route::Tv,
            Route::Search { keyword } | Route::SearchResult { keyword, .. } => Route::Search {
                keyword: keyword.clone(),
            },
        }
    }

    /// The route of the same screen with `id` open.
    pub fn with_item(&self, id: ItemId) -> Route {
        match self {
            Route::Movies | Route::Movie(_) => Route::Movie(id),
            Route::Tv | Route::Show(_) => Route::Show(id),
            Route::Search { keyword } | Route::SearchResult { keyword, .. } => {
                Route::SearchResult {
                    id,
                    keyword: keyword.clone(),
                }
            }
        }
    }
}

/// Routes are resolved against this URL, which only serves as a parser.
const ROUTE_BASE: &str = "app://cinedeck/";

fn parse_id(raw: &str) -> Result<ItemId, RouteError> {
    ItemId::normalize(raw).ok_or_else(|| RouteError::BadId(raw.to_string()))
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = Url::parse(ROUTE_BASE).map_err(|_| RouteError::Malformed(s.to_string()))?;
        let url = base
            .join(s.trim())
            .map_err(|_| RouteError::Malformed(s.to_string()))?;
        if url.host_str() != Some("cinedeck") {
            return Err(RouteError::Malformed(s.to_string()));
        }

        let keyword = url
            .query_pairs()
            .find(|(key, _)| key == "keyword")
            .map(|(_, value)| value.into_owned());
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Ok(Route::Movies),
            ["movies", id] => Ok(Route::Movie(parse_id(id)?)),
            ["tv"] => Ok(Route::Tv),
            ["tv", id] => Ok(Route::Show(parse_id(id)?)),
            ["search"] => Ok(Route::Search { keyword }),
            ["search", id] => Ok(Route::SearchResult {
                id: parse_id(id)?,
                keyword,
            }),
            _ => Err(RouteError::Unknown(s.to_string())),
        }
    }
}

fn keyword_query(keyword: &Option<String>) -> String {
    match keyword {
        Some(keyword) => {
            let Ok(mut url) = Url::parse(ROUTE_BASE) else {
                return String::new();
            };
            url.query_pairs_mut().append_pair("keyword", keyword);
            format!("?{}", url.query().unwrap_or_default())
        }
        None => String::new(),
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Movies => write!(f, "/"),
            Route::Movie(id) => write!(f, "/movies/{}", id),
            Route::Tv => write!(f, "/tv"),
            Route::Show(id) => write!(f, "/tv/{}", id),
            Route::Search { keyword } => write!(f, "/search{}", keyword_query(keyword)),
            Route::SearchResult { id, keyword } => {
                write!(f, "/search/{}{}", id, keyword_query(keyword))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Ok(Route::Movies));
        assert_eq!(Route::parse(""), Ok(Route::Movies));
        assert_eq!(Route::parse("/movies/42"), Ok(Route::Movie(ItemId(42))));
        assert_eq!(Route::parse("/tv"), Ok(Route::Tv));
        assert_eq!(Route::parse("/tv/7/"), Ok(Route::Show(ItemId(7))));
        assert_eq!(
            Route::parse("/search?keyword=star+wars"),
            Ok(Route::Search {
                keyword: Some("star wars".to_string())
            })
        );
        assert_eq!(
            Route::parse("/search/5?keyword=x"),
            Ok(Route::SearchResult {
                id: ItemId(5),
                keyword: Some("x".to_string())
            })
        );
        assert_eq!(Route::parse("/search"), Ok(Route::Search { keyword: None }));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Route::parse("/movies/abc"), Err(RouteError::BadId(_))));
        assert!(matches!(Route::parse("/music"), Err(RouteError::Unknown(_))));
        assert!(matches!(Route::parse("/movies"), Err(RouteError::Unknown(_))));
        assert!(matches!(
            Route::parse("https://example.org/tv"),
            Err(RouteError::Malformed(_))
        ));
    }

    #[test]
    fn test_display_round_trip() {
        let routes = [
            Route::Movies,
            Route::Movie(ItemId(1)),
            Route::Tv,
            Route::Show(ItemId(1399)),
            Route::Search { keyword: None },
            Route::Search {
                keyword: Some("the matrix & more".to_string()),
            },
            Route::SearchResult {
                id: ItemId(603),
                keyword: Some("matrix".to_string()),
            },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_string()), Ok(route.clone()));
        }
        assert_eq!(Route::Movie(ItemId(42)).to_string(), "/movies/42");
        assert_eq!(
            Route::Search {
                keyword: Some("a b".to_string())
            }
            .to_string(),
            "/search?keyword=a+b"
        );
    }

    #[test]
    fn test_root_and_with_item() {
        let route = Route::Search {
            keyword: Some("x".to_string()),
        };
        let opened = route.with_item(ItemId(3));
        assert_eq!(opened.item(), Some(ItemId(3)));
        assert_eq!(opened.keyword(), Some("x"));
        assert_eq!(opened.root(), route);
        assert_eq!(opened.screen(), ScreenKind::Search);
        assert_eq!(Route::Show(ItemId(1)).root(), Route::Tv);
    }
}
