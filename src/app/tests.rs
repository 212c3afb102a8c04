use super::core::Core;
use super::*;
use crate::api::catalog::{
    CatalogApi, CatalogItem, Category, DetailRecord, FetchError, Genre, ItemId, MediaKind,
    MockData as CatalogMock, ResultPage,
};
use crate::app::cache::QueryCache;
use crate::app::config::{Config, ConfigData};
use crate::log::Log;

fn item(id: u64, title: &str) -> CatalogItem {
    CatalogItem {
        id: ItemId(id),
        title: title.to_string(),
        overview: format!("About {}", title),
        backdrop_path: None,
        poster_path: Some(format!("/p{}.jpg", id)),
    }
}

fn page(items: Vec<CatalogItem>) -> ResultPage {
    ResultPage {
        page: 1,
        total_pages: 1,
        total_results: items.len() as u32,
        results: items,
    }
}

fn movies() -> ResultPage {
    page(vec![
        item(10, "Heat"),
        item(11, "Alien"),
        item(12, "Aliens"),
        item(13, "Ronin"),
    ])
}

fn core() -> (Core, CatalogApi) {
    let catalog = CatalogApi::mock(
        CatalogMock::default()
            .with_page(Category::NowPlayingMovies, None, movies())
            .with_page(Category::TopRatedMovies, None, page(vec![item(20, "Up")]))
            .with_page(Category::UpcomingMovies, None, page(vec![]))
            .with_page(Category::SearchMovies, Some("alien"), page(vec![item(11, "Alien")]))
            .with_page_error(
                Category::SearchTvs,
                Some("alien"),
                FetchError::BadResponse("status 500".to_string()),
            )
            .with_details(
                MediaKind::Movie,
                ItemId(11),
                DetailRecord {
                    genres: vec![
                        Genre {
                            name: "Horror".to_string(),
                        },
                        Genre {
                            name: "Science Fiction".to_string(),
                        },
                    ],
                    runtime: Some(117),
                    release_date: Some("1979-05-25".to_string()),
                    tagline: None,
                },
            ),
    );
    let log = Log::mock();
    let core = Core::new(
        Config::mock(ConfigData::default()),
        log.clone(),
        catalog.clone(),
        QueryCache::spawn(catalog.clone(), log),
    );
    (core, catalog)
}

#[tokio::test]
async fn test_list_command() {
    let (core, _) = core();
    let output = core
        .handle_command(Command::List {
            category: Category::NowPlayingMovies,
            keyword: Some("ignored".into()),
            page: None,
        })
        .await
        .unwrap();

    let mut lines = output.lines();
    assert_eq!(
        lines.next(),
        Some("now-playing (page 1 of 1, 4 results):")
    );
    assert_eq!(lines.next(), Some("1. Heat [10]"));
    assert_eq!(
        lines.next(),
        Some("   Image: https://image.tmdb.org/t/p/w500/p10.jpg")
    );
    assert!(output.contains("4. Ronin [13]"));
}

#[tokio::test]
async fn test_list_page_bypasses_cache() {
    let (core, catalog) = core();
    let command = Command::List {
        category: Category::TopRatedMovies,
        keyword: None,
        page: Some(2),
    };
    core.handle_command(command.clone()).await.unwrap();
    core.handle_command(command).await.unwrap();
    assert_eq!(catalog.mock_calls().await, Some((2, 0)));
    assert_eq!(
        catalog.mock_requested_pages().await,
        Some(vec![Some(2), Some(2)])
    );

    core.handle_command(Command::List {
        category: Category::TopRatedMovies,
        keyword: None,
        page: None,
    })
    .await
    .unwrap();
    assert_eq!(
        catalog.mock_requested_pages().await.unwrap().last(),
        Some(&None)
    );
}

#[tokio::test]
async fn test_empty_list() {
    let (core, _) = core();
    let output = core
        .handle_command(Command::List {
            category: Category::UpcomingMovies,
            keyword: None,
            page: None,
        })
        .await
        .unwrap();
    assert!(output.contains("nothing found"));
}

#[tokio::test]
async fn test_list_failure_is_an_error() {
    let (core, _) = core();
    let result = core
        .handle_command(Command::List {
            category: Category::PopularTvs,
            keyword: None,
            page: None,
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_search_reports_each_category() {
    let (core, _) = core();
    let output = core
        .handle_command(Command::Search {
            keyword: "alien".into(),
        })
        .await
        .unwrap();

    assert!(output.contains("search-movies for 'alien' (page 1 of 1, 1 results):"));
    assert!(output.contains("1. Alien [11]"));
    assert!(output.contains("search-tvs for 'alien': bad response: status 500"));
}

#[tokio::test]
async fn test_detail_command() {
    let (core, _) = core();
    let output = core
        .handle_command(Command::Detail {
            kind: MediaKind::Movie,
            id: ItemId(11),
        })
        .await
        .unwrap();
    assert_eq!(
        output,
        "movie 11\n   Genres: Horror, Science Fiction\n   Runtime: 117 min\n   Released: 1979-05-25\n"
    );

    let missing = core
        .handle_command(Command::Detail {
            kind: MediaKind::Tv,
            id: ItemId(11),
        })
        .await;
    assert!(missing.is_err());
}

#[tokio::test]
async fn test_open_route_with_item() {
    let (core, catalog) = core();
    let output = core
        .handle_command(Command::Open {
            route: Route::Movie(ItemId(11)),
        })
        .await
        .unwrap();

    assert!(output.starts_with("Route: /movies/11\n"));
    assert!(output.contains("Banner: Heat [10]"));
    assert!(output.contains("   Image: https://image.tmdb.org/t/p/original/p10.jpg"));
    assert!(output.contains("Now Playing:\n1. Alien [11]"));
    assert!(!output.contains("1. Heat"));
    assert!(output.contains("Open: Alien [11]"));
    assert!(output.contains("   Runtime: 117 min"));
    assert_eq!(catalog.mock_calls().await.map(|(_, d)| d), Some(1));
}

#[tokio::test]
async fn test_open_unknown_item() {
    let (core, _) = core();
    let output = core
        .handle_command(Command::Open {
            route: Route::Movie(ItemId(999)),
        })
        .await
        .unwrap();

    assert!(output.contains("Open: unknown item"));
    assert!(output.contains("Details unavailable"));
}

#[tokio::test]
async fn test_open_screen_root() {
    let (core, catalog) = core();
    let output = core
        .handle_command(Command::Open { route: Route::Tv })
        .await
        .unwrap();

    assert!(output.starts_with("Route: /tv\n"));
    assert!(!output.contains("Open:"));
    assert_eq!(catalog.mock_calls().await, Some((3, 0)));
}

#[tokio::test]
async fn test_browse_cannot_be_resolved() {
    let (core, _) = core();
    let result = core
        .handle_command(Command::Browse {
            route: Route::Movies,
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_mock_app() {
    let app = App::mock(MockData::default());
    let command = Command::Open { route: Route::Tv };
    app.resolve(command.clone()).await.unwrap();
    assert_eq!(app.mock_data().await, Some(vec![command]));

    let (_ui, handle) = app.spawn(Route::Movies).await.unwrap();
    handle.await.unwrap();
}
