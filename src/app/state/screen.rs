//! The three screens, all built from one [`ScreenSpec`].

use std::fmt::Display;

use super::{Overlay, PaginationState, Paginator, Route, SelectionState};
use crate::ArcStr;
use crate::api::catalog::{CatalogItem, Category, FetchError, ResultPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Movies,
    Tv,
    Search,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 3] = [ScreenKind::Movies, ScreenKind::Tv, ScreenKind::Search];

    pub fn title(&self) -> &'static str {
        match self {
            ScreenKind::Movies => "Movies",
            ScreenKind::Tv => "TV",
            ScreenKind::Search => "Search",
        }
    }

    pub fn next(&self) -> ScreenKind {
        match self {
            ScreenKind::Movies => ScreenKind::Tv,
            ScreenKind::Tv => ScreenKind::Search,
            ScreenKind::Search => ScreenKind::Movies,
        }
    }

    pub fn prev(&self) -> ScreenKind {
        match self {
            ScreenKind::Movies => ScreenKind::Search,
            ScreenKind::Tv => ScreenKind::Movies,
            ScreenKind::Search => ScreenKind::Tv,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ScreenKind::Movies => 0,
            ScreenKind::Tv => 1,
            ScreenKind::Search => 2,
        }
    }
}

impl Display for ScreenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Static description of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSpec {
    pub kind: ScreenKind,
    /// Route of the screen with no item open
    pub root: Route,
    /// Categories shown, top to bottom, with their headings. The banner is
    /// item 0 of the first one.
    pub sliders: Vec<(Category, &'static str)>,
    /// Whether opening an item fetches its detail record
    pub detail: bool,
}

impl ScreenSpec {
    pub fn new(kind: ScreenKind, detail: bool) -> Self {
        let (root, sliders) = match kind {
            ScreenKind::Movies => (
                Route::Movies,
                vec![
                    (Category::NowPlayingMovies, "Now Playing"),
                    (Category::TopRatedMovies, "Top Rated"),
                    (Category::UpcomingMovies, "Upcoming"),
                ],
            ),
            ScreenKind::Tv => (
                Route::Tv,
                vec![
                    (Category::AiringTodayTvs, "Airing Today"),
                    (Category::PopularTvs, "Popular"),
                    (Category::TopRatedTvs, "Top Rated"),
                ],
            ),
            ScreenKind::Search => (
                Route::Search { keyword: None },
                vec![
                    (Category::SearchMovies, "Movies"),
                    (Category::SearchTvs, "TV Shows"),
                ],
            ),
        };
        Self {
            kind,
            root,
            sliders,
            detail,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(ResultPage),
    Failed(FetchError),
}

impl LoadState {
    pub fn page(&self) -> Option<&ResultPage> {
        match self {
            LoadState::Loaded(page) => Some(page),
            _ => None,
        }
    }
}

/// One carousel of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    pub category: Category,
    pub heading: &'static str,
    pub load: LoadState,
    pub pagination: PaginationState,
}

impl Slider {
    pub fn items(&self) -> &[CatalogItem] {
        self.load
            .page()
            .map(|page| page.results.as_slice())
            .unwrap_or_default()
    }
}

/// A list fetch the screen is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub category: Category,
    pub keyword: Option<ArcStr>,
}

/// Live state of a screen.
#[derive(Debug, Clone)]
pub struct ScreenState {
    spec: ScreenSpec,
    paginator: Paginator,
    pub sliders: Vec<Slider>,
    pub selection: SelectionState,
    keyword: Option<ArcStr>,
    /// Bumped by every load so pages of an older load are dropped
    generation: u64,
    loaded_once: bool,
}

impl ScreenState {
    pub fn new(spec: ScreenSpec, paginator: Paginator) -> Self {
        let sliders = spec
            .sliders
            .iter()
            .map(|(category, heading)| Slider {
                category: *category,
                heading: *heading,
                load: LoadState::Loading,
                pagination: PaginationState::default(),
            })
            .collect();
        Self {
            spec,
            paginator,
            sliders,
            selection: SelectionState::new(),
            keyword: None,
            generation: 0,
            loaded_once: false,
        }
    }

    pub fn kind(&self) -> ScreenKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &ScreenSpec {
        &self.spec
    }

    pub fn paginator(&self) -> Paginator {
        self.paginator
    }

    pub fn keyword(&self) -> Option<&ArcStr> {
        self.keyword.as_ref()
    }

    pub fn detail_enabled(&self) -> bool {
        self.spec.detail
    }

    /// Whether [`ScreenState::begin_load`] was ever called.
    pub fn loaded_once(&self) -> bool {
        self.loaded_once
    }

    /// Puts every slider back to loading and returns the fetches to run.
    ///
    /// A keyword change closes the overlay, since the open item belonged to
    /// the previous results.
    pub fn begin_load(&mut self, keyword: Option<ArcStr>) -> Vec<LoadRequest> {
        if keyword != self.keyword {
            self.selection.close();
        }
        self.keyword = keyword;
        self.generation += 1;
        self.loaded_once = true;

        for slider in &mut self.sliders {
            slider.load = LoadState::Loading;
            slider.pagination = PaginationState::default();
        }
        self.sliders
            .iter()
            .map(|slider| LoadRequest {
                generation: self.generation,
                category: slider.category,
                keyword: self.keyword.clone(),
            })
            .collect()
    }

    /// Stores the result of a fetch from [`ScreenState::begin_load`].
    ///
    /// Returns `false` when the request belongs to an older load.
    pub fn apply_page(
        &mut self,
        request: &LoadRequest,
        result: Result<ResultPage, FetchError>,
    ) -> bool {
        if request.generation != self.generation {
            return false;
        }
        let Some(slider) = self
            .sliders
            .iter_mut()
            .find(|slider| slider.category == request.category)
        else {
            return false;
        };
        slider.load = match result {
            Ok(page) => LoadState::Loaded(page),
            Err(err) => LoadState::Failed(err),
        };
        slider.pagination = PaginationState::default();
        true
    }

    pub fn page_of(&self, category: Category) -> Option<&ResultPage> {
        self.sliders
            .iter()
            .find(|slider| slider.category == category)
            .and_then(|slider| slider.load.page())
    }

    /// Item 0 of the first slider.
    pub fn banner(&self) -> Option<&CatalogItem> {
        self.sliders.first()?.items().first()
    }

    /// Items of slider `index` on its current page.
    pub fn visible(&self, index: usize) -> &[CatalogItem] {
        match self.sliders.get(index) {
            Some(slider) => self
                .paginator
                .visible_slice(slider.items(), slider.pagination.page_index),
            None => &[],
        }
    }

    /// Advances slider `index`. Returns whether a transition started.
    pub fn advance(&mut self, index: usize) -> bool {
        let paginator = self.paginator;
        match self.sliders.get_mut(index) {
            Some(slider) => {
                let count = slider.items().len();
                paginator.advance(&mut slider.pagination, count)
            }
            None => false,
        }
    }

    /// Advances every slider, returning the ones that started a transition.
    pub fn advance_all(&mut self) -> Vec<usize> {
        (0..self.sliders.len())
            .filter(|index| self.advance(*index))
            .collect()
    }

    /// Load generation the sliders' pagination belongs to. Slides started
    /// now must finish with it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Clears the slide gate of slider `index`.
    ///
    /// A slide started before the last [`ScreenState::begin_load`] belongs to
    /// a pagination that was reset, so its end is ignored and `false` returned.
    pub fn finish_transition(&mut self, index: usize, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        let paginator = self.paginator;
        match self.sliders.get_mut(index) {
            Some(slider) => {
                paginator.finish_transition(&mut slider.pagination);
                true
            }
            None => false,
        }
    }

    /// The overlay to render, `None` when no item is open.
    pub fn overlay(&self) -> Option<Overlay> {
        self.selection.overlay(|category| self.page_of(category))
    }

    /// Route matching what the screen shows.
    pub fn route(&self) -> Route {
        let root = match (&self.spec.root, &self.keyword) {
            (Route::Search { .. }, Some(keyword)) => Route::Search {
                keyword: Some(keyword.to_string()),
            },
            (root, _) => root.clone(),
        };
        match self.selection.current() {
            Some((id, _)) => root.with_item(id),
            None => root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::catalog::ItemId;
    use crate::app::state::DetailSlot;

    fn page(count: u64) -> ResultPage {
        ResultPage {
            page: 1,
            results: (0..count)
                .map(|id| CatalogItem {
                    id: ItemId(id),
                    title: format!("#{}", id),
                    overview: String::new(),
                    backdrop_path: None,
                    poster_path: None,
                })
                .collect(),
            total_pages: 1,
            total_results: count as u32,
        }
    }

    fn screen(kind: ScreenKind) -> ScreenState {
        ScreenState::new(ScreenSpec::new(kind, true), Paginator::new(5))
    }

    #[test]
    fn test_specs() {
        let movies = ScreenSpec::new(ScreenKind::Movies, true);
        assert_eq!(movies.sliders.len(), 3);
        assert_eq!(movies.sliders[0], (Category::NowPlayingMovies, "Now Playing"));

        let tv = ScreenSpec::new(ScreenKind::Tv, false);
        assert_eq!(tv.root, Route::Tv);
        assert_eq!(tv.sliders[1].0, Category::PopularTvs);

        let search = ScreenSpec::new(ScreenKind::Search, false);
        assert_eq!(
            search.sliders.iter().map(|(c, _)| *c).collect::<Vec<_>>(),
            vec![Category::SearchMovies, Category::SearchTvs]
        );
    }

    #[test]
    fn test_screen_kind_cycles() {
        for kind in ScreenKind::ALL {
            assert_eq!(kind.next().prev(), kind);
        }
        assert_eq!(ScreenKind::Search.next(), ScreenKind::Movies);
    }

    #[test]
    fn test_load_and_apply() {
        let mut screen = screen(ScreenKind::Movies);
        let requests = screen.begin_load(None);
        assert_eq!(requests.len(), 3);
        assert!(screen.banner().is_none());

        assert!(screen.apply_page(&requests[0], Ok(page(11))));
        assert!(screen.apply_page(
            &requests[1],
            Err(FetchError::Network("down".to_string()))
        ));

        assert_eq!(screen.banner().map(|item| item.id), Some(ItemId(0)));
        assert_eq!(screen.visible(0).len(), 5);
        assert_eq!(screen.visible(0)[0].id, ItemId(1));
        assert!(matches!(screen.sliders[1].load, LoadState::Failed(_)));
        assert_eq!(screen.sliders[2].load, LoadState::Loading);
    }

    #[test]
    fn test_results_of_older_load_are_dropped() {
        let mut screen = screen(ScreenKind::Tv);
        let old = screen.begin_load(None);
        let new = screen.begin_load(None);

        assert!(!screen.apply_page(&old[0], Ok(page(3))));
        assert!(screen.apply_page(&new[0], Ok(page(3))));
    }

    #[test]
    fn test_advance_each_slider_independently() {
        let mut screen = screen(ScreenKind::Movies);
        let requests = screen.begin_load(None);
        screen.apply_page(&requests[0], Ok(page(11)));
        screen.apply_page(&requests[1], Ok(page(3)));

        assert_eq!(screen.advance_all(), vec![0, 1, 2]);
        assert_eq!(screen.sliders[0].pagination.page_index, 1);
        assert_eq!(screen.sliders[1].pagination.page_index, 0);
        assert!(screen.advance_all().is_empty());

        assert!(screen.finish_transition(0, screen.generation()));
        assert!(screen.advance(0));
        assert_eq!(screen.sliders[0].pagination.page_index, 0);
        assert!(!screen.advance(7));
    }

    #[test]
    fn test_slide_of_reset_pagination_is_ignored() {
        let mut screen = screen(ScreenKind::Movies);
        let requests = screen.begin_load(None);
        screen.apply_page(&requests[0], Ok(page(21)));
        assert!(screen.advance(0));
        let before_reload = screen.generation();

        let requests = screen.begin_load(None);
        screen.apply_page(&requests[0], Ok(page(21)));
        assert!(screen.advance(0));

        assert!(!screen.finish_transition(0, before_reload));
        assert!(screen.sliders[0].pagination.transitioning);
        assert!(!screen.advance(0));

        assert!(screen.finish_transition(0, screen.generation()));
        assert!(screen.advance(0));
        assert_eq!(screen.sliders[0].pagination.page_index, 2);
    }

    #[test]
    fn test_overlay_and_route() {
        let mut screen = screen(ScreenKind::Search);
        let requests = screen.begin_load(Some(ArcStr::from("alien")));
        screen.apply_page(&requests[1], Ok(page(4)));
        assert_eq!(
            screen.route(),
            Route::Search {
                keyword: Some("alien".to_string())
            }
        );

        screen.selection.open(ItemId(2), Category::SearchTvs);
        let overlay = screen.overlay().unwrap();
        assert_eq!(overlay.item.map(|item| item.title), Some("#2".to_string()));
        assert_eq!(overlay.detail, DetailSlot::Empty);
        assert_eq!(screen.route().to_string(), "/search/2?keyword=alien");

        screen.selection.open(ItemId(2), Category::SearchMovies);
        assert_eq!(screen.overlay().unwrap().item, None);

        screen.begin_load(Some(ArcStr::from("other")));
        assert!(screen.overlay().is_none());
    }
}
