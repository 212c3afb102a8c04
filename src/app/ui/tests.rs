use tokio::sync::mpsc;

use super::core::Core;
use super::*;
use crate::api::catalog::{
    CatalogItem, Category, DetailRecord, FetchError, Genre, ItemId, MediaKind, MockData as CatalogMock,
    ResultPage,
};
use crate::app::state::DetailSlot;
use crate::terminal::{MockData as TerminalMock, SliderContent};

fn page(ids: std::ops::Range<u64>) -> ResultPage {
    ResultPage {
        page: 1,
        total_results: ids.end.saturating_sub(ids.start) as u32,
        results: ids
            .map(|id| CatalogItem {
                id: ItemId(id),
                title: format!("Title {}", id),
                overview: format!("Overview {}", id),
                backdrop_path: Some(format!("/b{}.jpg", id)),
                poster_path: None,
            })
            .collect(),
        total_pages: 1,
    }
}

fn catalog() -> CatalogApi {
    CatalogApi::mock(
        CatalogMock::default()
            .with_page(Category::NowPlayingMovies, None, page(0..11))
            .with_page(Category::TopRatedMovies, None, page(100..103))
            .with_page_error(
                Category::UpcomingMovies,
                None,
                FetchError::Network("offline".to_string()),
            )
            .with_page(Category::AiringTodayTvs, None, page(200..207))
            .with_page(Category::PopularTvs, None, page(300..306))
            .with_page(Category::TopRatedTvs, None, page(400..406))
            .with_page(Category::SearchMovies, Some("alien"), page(500..504))
            .with_page(Category::SearchTvs, Some("alien"), page(600..602))
            .with_details(
                MediaKind::Movie,
                ItemId(1),
                DetailRecord {
                    genres: vec![Genre {
                        name: "Horror".to_string(),
                    }],
                    runtime: Some(117),
                    release_date: Some("1979-05-25".to_string()),
                    tagline: Some("In space no one can hear you scream.".to_string()),
                },
            ),
    )
}

struct Harness {
    core: Core,
    rx: mpsc::Receiver<Message>,
    catalog: CatalogApi,
    terminal: Terminal,
}

impl Harness {
    async fn new() -> Self {
        let catalog = catalog();
        let terminal = Terminal::mock(TerminalMock::default());
        let settings = UiSettings {
            transition_ms: 0,
            ..Default::default()
        };
        let (core, rx) = Core::new(
            Log::mock(),
            terminal.clone(),
            QueryCache::spawn(catalog.clone(), Log::mock()),
            catalog.clone(),
            settings,
        );
        let mut harness = Self {
            core,
            rx,
            catalog,
            terminal,
        };
        harness.navigate("/").await;
        harness.pump(3).await;
        harness
    }

    /// Handles the next `n` messages posted by spawned tasks.
    async fn pump(&mut self, n: usize) {
        for _ in 0..n {
            let message = self.rx.recv().await.unwrap();
            self.core.handle_message(message).await;
        }
    }

    async fn key(&mut self, event: UiEvent) {
        self.core.handle_message(Message::Event(event)).await;
    }

    async fn keys(&mut self, events: &[UiEvent]) {
        for event in events {
            self.key(*event).await;
        }
    }

    async fn navigate(&mut self, route: &str) {
        let (tx, _rx) = tokio::sync::oneshot::channel();
        self.core
            .handle_message(Message::Navigate {
                route: Route::parse(route).unwrap(),
                tx,
            })
            .await;
    }
}

#[tokio::test]
async fn test_initial_view() {
    let harness = Harness::new().await;
    let view = harness.core.view();

    assert_eq!(view.active_tab, 0);
    assert_eq!(view.route, "/");
    let banner = view.banner.unwrap();
    assert_eq!(banner.title, "Title 0");
    assert_eq!(banner.image, "https://image.tmdb.org/t/p/original/b0.jpg");
    assert!(view.banner_focused);

    match &view.sliders[0].content {
        SliderContent::Boxes(boxes) => {
            assert_eq!(boxes.len(), 5);
            assert_eq!(boxes[0].title, "Title 1");
            assert_eq!(boxes[0].image, "https://image.tmdb.org/t/p/w500/b1.jpg");
        }
        other => panic!("unexpected content: {:?}", other),
    }
    assert_eq!(view.sliders[0].page_count, 2);
    assert_eq!(
        view.sliders[2].content,
        SliderContent::Failed("network failure: offline".to_string())
    );

    let drawn = harness.terminal.mock_data().await.unwrap();
    assert_eq!(drawn.last_view, Some(harness.core.view()));
}

#[tokio::test]
async fn test_right_past_last_box_advances() {
    let mut harness = Harness::new().await;
    harness.key(UiEvent::Down).await;
    harness
        .keys(&[UiEvent::Right, UiEvent::Right, UiEvent::Right, UiEvent::Right])
        .await;
    assert_eq!(harness.core.focus(), Focus::Slider { row: 0, col: 4 });

    harness.key(UiEvent::Right).await;
    assert_eq!(harness.core.focus(), Focus::Slider { row: 0, col: 0 });
    let view = harness.core.view();
    assert_eq!(view.sliders[0].page_index, 1);
    assert!(harness.core.screen().sliders[0].pagination.transitioning);

    harness.pump(1).await;
    assert!(!harness.core.screen().sliders[0].pagination.transitioning);
}

#[tokio::test]
async fn test_enter_on_banner_advances_every_slider() {
    let mut harness = Harness::new().await;
    harness.key(UiEvent::Enter).await;

    let screen = harness.core.screen();
    assert_eq!(screen.sliders[0].pagination.page_index, 1);
    assert_eq!(screen.sliders[1].pagination.page_index, 0);
    assert!(screen.sliders.iter().all(|s| s.pagination.transitioning));

    harness.pump(3).await;
    assert!(
        harness
            .core
            .screen()
            .sliders
            .iter()
            .all(|s| !s.pagination.transitioning)
    );
}

#[tokio::test]
async fn test_slide_from_before_reload_keeps_gate_closed() {
    let mut harness = Harness::new().await;
    harness.key(UiEvent::Enter).await;
    let mut held = Vec::new();
    for _ in 0..3 {
        held.push(harness.rx.recv().await.unwrap());
    }

    harness.key(UiEvent::Char('r')).await;
    harness.pump(3).await;
    harness.key(UiEvent::Enter).await;
    assert_eq!(harness.core.screen().sliders[0].pagination.page_index, 1);

    for message in held {
        harness.core.handle_message(message).await;
    }
    assert!(harness.core.screen().sliders[0].pagination.transitioning);

    harness.key(UiEvent::Enter).await;
    assert_eq!(harness.core.screen().sliders[0].pagination.page_index, 1);

    harness.pump(3).await;
    assert!(!harness.core.screen().sliders[0].pagination.transitioning);
}

#[tokio::test]
async fn test_open_fetches_detail() {
    let mut harness = Harness::new().await;
    harness.keys(&[UiEvent::Down, UiEvent::Enter]).await;

    let view = harness.core.view();
    assert_eq!(view.route, "/movies/1");
    let overlay = view.overlay.unwrap();
    assert_eq!(overlay.title, "Title 1");
    assert_eq!(overlay.note.as_deref(), Some("Loading details..."));

    harness.pump(1).await;
    let overlay = harness.core.view().overlay.unwrap();
    assert_eq!(overlay.runtime, "117 min");
    assert_eq!(overlay.genres, "Horror");
    assert_eq!(overlay.release_date, "1979-05-25");
    assert_eq!(overlay.note, None);

    harness.key(UiEvent::Esc).await;
    let view = harness.core.view();
    assert!(view.overlay.is_none());
    assert_eq!(view.route, "/");
}

#[tokio::test]
async fn test_late_detail_does_not_reopen() {
    let mut harness = Harness::new().await;
    harness
        .keys(&[UiEvent::Down, UiEvent::Enter, UiEvent::Esc])
        .await;
    harness.pump(1).await;

    assert!(harness.core.view().overlay.is_none());
    assert!(!harness.core.screen().selection.is_open());
    assert_eq!(harness.core.screen().selection.detail(), &DetailSlot::Empty);
}

#[tokio::test]
async fn test_failed_detail_is_a_note() {
    let mut harness = Harness::new().await;
    harness
        .keys(&[UiEvent::Down, UiEvent::Right, UiEvent::Enter])
        .await;
    harness.pump(1).await;

    let overlay = harness.core.view().overlay.unwrap();
    assert_eq!(overlay.title, "Title 2");
    assert!(overlay.note.unwrap().starts_with("Details unavailable"));
}

#[tokio::test]
async fn test_tv_screen_skips_detail() {
    let mut harness = Harness::new().await;
    harness.key(UiEvent::NextScreen).await;
    harness.pump(3).await;

    harness.keys(&[UiEvent::Down, UiEvent::Enter]).await;
    let view = harness.core.view();
    assert_eq!(view.active_tab, 1);
    assert_eq!(view.route, "/tv/201");
    assert_eq!(view.overlay.unwrap().note, None);
    assert_eq!(harness.catalog.mock_calls().await.map(|(_, d)| d), Some(0));
}

#[tokio::test]
async fn test_search_input() {
    let mut harness = Harness::new().await;
    harness.key(UiEvent::Char('/')).await;
    harness
        .keys(&[
            UiEvent::Char('a'),
            UiEvent::Char('l'),
            UiEvent::Char('x'),
            UiEvent::Backspace,
            UiEvent::Char('i'),
            UiEvent::Char('e'),
            UiEvent::Char('n'),
        ])
        .await;
    assert_eq!(harness.core.view().search_input.as_deref(), Some("alien"));

    harness.key(UiEvent::Enter).await;
    harness.pump(2).await;

    let view = harness.core.view();
    assert_eq!(view.search_input, None);
    assert_eq!(view.active_tab, 2);
    assert_eq!(view.route, "/search?keyword=alien");
    assert_eq!(view.banner.unwrap().title, "Title 500");
}

#[tokio::test]
async fn test_q_is_text_while_typing() {
    let mut harness = Harness::new().await;
    harness.keys(&[UiEvent::Char('/'), UiEvent::Char('q')]).await;
    assert!(harness.core.is_running());

    harness.keys(&[UiEvent::Esc, UiEvent::Char('q')]).await;
    assert!(!harness.core.is_running());
    assert!(harness.terminal.mock_data().await.unwrap().quit_called);
}

#[tokio::test]
async fn test_navigate_to_item_route() {
    let mut harness = Harness::new().await;
    harness.navigate("/movies/101").await;

    let view = harness.core.view();
    assert_eq!(view.route, "/movies/101");
    assert_eq!(view.overlay.unwrap().title, "Title 101");

    harness.navigate("/movies/99999").await;
    let overlay = harness.core.view().overlay.unwrap();
    assert_eq!(overlay.title, "");
}

#[tokio::test]
async fn test_reload_refetches() {
    let mut harness = Harness::new().await;
    let before = harness.catalog.mock_calls().await.unwrap().0;

    harness.key(UiEvent::Char('r')).await;
    harness.pump(3).await;

    assert_eq!(harness.catalog.mock_calls().await.unwrap().0, before + 3);
}

#[tokio::test]
async fn test_switching_back_uses_cache() {
    let mut harness = Harness::new().await;
    harness.key(UiEvent::NextScreen).await;
    harness.pump(3).await;
    harness.key(UiEvent::PrevScreen).await;

    assert_eq!(harness.core.view().banner.unwrap().title, "Title 0");
    assert_eq!(harness.catalog.mock_calls().await.unwrap().0, 6);
}

#[tokio::test]
async fn test_mock_ui() {
    let ui = Ui::mock(MockData::default());
    ui.send_event(UiEvent::Enter).await;
    ui.navigate(Route::Tv).await;
    ui.quit().await;

    let data = ui.mock_data().await.unwrap();
    assert_eq!(data.events, vec![UiEvent::Enter]);
    assert_eq!(data.routes, vec![Route::Tv]);
    assert!(data.quit_called);
}
