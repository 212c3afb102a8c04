use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ArcStr;
use crate::api::catalog::{
    CatalogApi, CatalogItem, Category, DetailRecord, FetchError, ImageSize, ItemId,
    image::make_optional_image_path,
};
use crate::app::cache::QueryCache;
use crate::app::state::{
    DetailSlot, DetailTicket, LoadState, Overlay, Paginator, Route, ScreenKind, ScreenSpec,
    ScreenState,
};
use crate::log::Log;
use crate::terminal::{
    BannerView, BoxView, OverlayView, SliderContent, SliderView, Terminal, UiEvent, View,
};

use super::data::{Focus, UiSettings};
use super::message::Message;

const SCOPE: &str = "app.ui";

/// Core implementation of the UI actor.
///
/// Single owner of every screen's state. Fetches and slide timers run in
/// their own tasks and report back through the actor's own mailbox, so input
/// is handled while requests are in flight.
pub struct Core {
    log: Log,
    terminal: Terminal,
    cache: QueryCache,
    catalog: CatalogApi,
    settings: UiSettings,
    /// Indexed by [`ScreenKind::index`]
    screens: Vec<ScreenState>,
    active: ScreenKind,
    focus: Focus,
    /// Keyword being typed, `Some` while in search input mode
    input: Option<String>,
    /// Sender of the actor's own mailbox, for spawned tasks
    tx: mpsc::Sender<Message>,
    running: bool,
}

impl Core {
    /// Creates the core and the mailbox it reads from.
    pub fn new(
        log: Log,
        terminal: Terminal,
        cache: QueryCache,
        catalog: CatalogApi,
        settings: UiSettings,
    ) -> (Self, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(crate::BUFFER_SIZE);
        let paginator = Paginator::new(settings.window_size);
        let screens = ScreenKind::ALL
            .iter()
            .map(|kind| {
                ScreenState::new(ScreenSpec::new(*kind, settings.detail(*kind)), paginator)
            })
            .collect();
        let core = Self {
            log,
            terminal,
            cache,
            catalog,
            settings,
            screens,
            active: ScreenKind::Movies,
            focus: Focus::Banner,
            input: None,
            tx,
            running: true,
        };
        (core, rx)
    }

    /// Spawns the UI actor, which starts by showing `route`.
    ///
    /// The actor stops on quit; the returned handle completes then.
    pub fn spawn(
        mut self,
        mut rx: mpsc::Receiver<Message>,
        mut events: mpsc::Receiver<UiEvent>,
        route: Route,
    ) -> (super::Ui, JoinHandle<()>) {
        let ui = super::Ui::Actual(self.tx.clone());
        let handle = tokio::spawn(async move {
            self.log.info(SCOPE, format!("Starting at {}", route));
            self.navigate(route).await;
            self.render().await;

            while self.running {
                let message = tokio::select! {
                    Some(message) = rx.recv() => message,
                    Some(event) = events.recv() => Message::Event(event),
                    else => break,
                };
                self.handle_message(message).await;
            }
        });
        (ui, handle)
    }

    pub fn screen(&self) -> &ScreenState {
        &self.screens[self.active.index()]
    }

    fn screen_mut(&mut self, kind: ScreenKind) -> &mut ScreenState {
        &mut self.screens[kind.index()]
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handles one message, then redraws.
    pub async fn handle_message(&mut self, message: Message) {
        match message {
            Message::Event(event) => self.handle_event(event).await,
            Message::PageLoaded {
                screen,
                request,
                result,
            } => {
                if let Err(err) = &result {
                    self.log
                        .warn(SCOPE, format!("{} failed to load: {}", request.category, err));
                }
                self.screen_mut(screen).apply_page(&request, result);
            }
            Message::DetailLoaded {
                screen,
                ticket,
                result,
            } => {
                if !self.screen_mut(screen).selection.resolve_detail(&ticket, result) {
                    self.log
                        .info(SCOPE, format!("Dropped stale detail of {}", ticket.id));
                }
            }
            Message::TransitionDone {
                screen,
                slider,
                generation,
            } => {
                self.screen_mut(screen).finish_transition(slider, generation);
            }
            Message::Navigate { route, tx } => {
                self.navigate(route).await;
                let _ = tx.send(());
            }
            Message::GetView { tx } => {
                let _ = tx.send(self.view());
                return;
            }
            Message::Quit => self.quit().await,
        }
        if self.running {
            self.render().await;
        }
    }

    async fn handle_event(&mut self, event: UiEvent) {
        if event == UiEvent::Interrupt {
            self.quit().await;
            return;
        }

        if self.input.is_some() {
            self.handle_input(event);
            return;
        }

        if self.screen().selection.is_open() {
            match event {
                UiEvent::Esc => self.screen_mut(self.active).selection.close(),
                UiEvent::Char('q') => self.quit().await,
                UiEvent::NextScreen => self.switch_screen(self.active.next()),
                UiEvent::PrevScreen => self.switch_screen(self.active.prev()),
                _ => {}
            }
            return;
        }

        match event {
            UiEvent::Up => self.move_up(),
            UiEvent::Down => self.move_down(),
            UiEvent::Left => {
                if let Focus::Slider { row, col } = self.focus {
                    self.focus = Focus::Slider {
                        row,
                        col: col.saturating_sub(1),
                    };
                }
            }
            UiEvent::Right => self.move_right(),
            UiEvent::Enter => self.submit(),
            UiEvent::NextScreen => self.switch_screen(self.active.next()),
            UiEvent::PrevScreen => self.switch_screen(self.active.prev()),
            UiEvent::Char('/') => {
                let keyword = self.screens[ScreenKind::Search.index()]
                    .keyword()
                    .map(|keyword| keyword.to_string());
                self.input = Some(keyword.unwrap_or_default());
            }
            UiEvent::Char('r') => self.reload().await,
            UiEvent::Char('q') => self.quit().await,
            _ => {}
        }
    }

    /// Keys while typing a search keyword.
    fn handle_input(&mut self, event: UiEvent) {
        match event {
            UiEvent::Char(c) => {
                if let Some(input) = self.input.as_mut() {
                    input.push(c);
                }
            }
            UiEvent::Backspace => {
                if let Some(input) = self.input.as_mut() {
                    input.pop();
                }
            }
            UiEvent::Esc => self.input = None,
            UiEvent::Enter => {
                let keyword = self.input.take().unwrap_or_default();
                self.search(&keyword);
            }
            _ => {}
        }
    }

    fn move_up(&mut self) {
        self.focus = match self.focus {
            Focus::Slider { row: 0, .. } | Focus::Banner => Focus::Banner,
            Focus::Slider { row, col } => Focus::Slider { row: row - 1, col },
        };
    }

    fn move_down(&mut self) {
        let rows = self.screen().sliders.len();
        if rows == 0 {
            return;
        }
        self.focus = match self.focus {
            Focus::Banner => Focus::Slider { row: 0, col: 0 },
            Focus::Slider { row, col } => Focus::Slider {
                row: (row + 1).min(rows - 1),
                col,
            },
        };
    }

    /// Moves to the next box, or advances the carousel from the last one.
    fn move_right(&mut self) {
        let Focus::Slider { row, col } = self.focus else {
            return;
        };
        let visible = self.screen().visible(row).len();
        if col + 1 < visible {
            self.focus = Focus::Slider { row, col: col + 1 };
        } else if self.screen_mut(self.active).advance(row) {
            self.focus = Focus::Slider { row, col: 0 };
            self.schedule_transition(self.active, row);
        }
    }

    /// Opens the focused box, or advances every carousel from the banner.
    fn submit(&mut self) {
        match self.focus {
            Focus::Banner => {
                let kind = self.active;
                for row in self.screen_mut(kind).advance_all() {
                    self.schedule_transition(kind, row);
                }
            }
            Focus::Slider { row, col } => {
                let screen = self.screen();
                let Some(category) = screen.sliders.get(row).map(|slider| slider.category) else {
                    return;
                };
                let visible = screen.visible(row);
                let Some(item) = visible.get(col.min(visible.len().saturating_sub(1))) else {
                    return;
                };
                let id = item.id;
                self.open_item(self.active, id, category);
            }
        }
    }

    fn open_item(&mut self, kind: ScreenKind, id: ItemId, category: Category) {
        let screen = self.screen_mut(kind);
        let ticket = screen.selection.open(id, category);
        if screen.detail_enabled() {
            screen.selection.mark_loading(&ticket);
            self.fetch_detail(kind, ticket);
        }
    }

    fn fetch_detail(&self, screen: ScreenKind, ticket: DetailTicket) {
        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = catalog.details(ticket.category.kind(), ticket.id).await;
            let _ = tx
                .send(Message::DetailLoaded {
                    screen,
                    ticket,
                    result,
                })
                .await;
        });
    }

    fn schedule_transition(&self, screen: ScreenKind, slider: usize) {
        let tx = self.tx.clone();
        let delay = Duration::from_millis(self.settings.transition_ms);
        let generation = self.screens[screen.index()].generation();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx
                .send(Message::TransitionDone {
                    screen,
                    slider,
                    generation,
                })
                .await;
        });
    }

    /// Starts loading every slider of screen `kind`.
    fn load(&mut self, kind: ScreenKind, keyword: Option<ArcStr>) {
        for request in self.screen_mut(kind).begin_load(keyword) {
            let cache = self.cache.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let result = cache
                    .get(request.category, request.keyword.clone())
                    .await;
                let _ = tx
                    .send(Message::PageLoaded {
                        screen: kind,
                        request,
                        result,
                    })
                    .await;
            });
        }
    }

    fn switch_screen(&mut self, kind: ScreenKind) {
        self.active = kind;
        self.focus = Focus::Banner;
        if !self.screen().loaded_once() {
            self.load(kind, None);
        }
    }

    fn search(&mut self, keyword: &str) {
        let keyword = Some(keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .map(ArcStr::from);
        self.log
            .info(SCOPE, format!("Searching {:?}", keyword.as_deref()));
        self.active = ScreenKind::Search;
        self.focus = Focus::Banner;
        self.load(ScreenKind::Search, keyword);
    }

    async fn reload(&mut self) {
        self.cache.invalidate().await;
        let keyword = self.screen().keyword().cloned();
        self.load(self.active, keyword);
    }

    /// Shows the screen `route` names, opening its item if it has one.
    ///
    /// Route ids carry no category: the item is looked up in every loaded
    /// list of the screen, and the first list is assumed when none has it.
    async fn navigate(&mut self, route: Route) {
        let kind = route.screen();
        self.active = kind;
        self.focus = Focus::Banner;

        let keyword = route.keyword().filter(|k| !k.is_empty()).map(ArcStr::from);
        let screen = self.screen();
        if !screen.loaded_once() || (kind == ScreenKind::Search && screen.keyword() != keyword.as_ref())
        {
            self.load(kind, keyword);
        }

        match route.item() {
            Some(id) => {
                let screen = self.screen();
                let category = screen
                    .sliders
                    .iter()
                    .find(|slider| {
                        slider
                            .load
                            .page()
                            .is_some_and(|page| page.find(id).is_some())
                    })
                    .or(screen.sliders.first())
                    .map(|slider| slider.category);
                if let Some(category) = category {
                    self.open_item(kind, id, category);
                }
            }
            None => self.screen_mut(kind).selection.close(),
        }
    }

    async fn quit(&mut self) {
        self.log.info(SCOPE, "Quitting");
        self.running = false;
        if let Err(err) = self.terminal.quit().await {
            self.log.error(SCOPE, format!("Restoring terminal: {:#}", err));
        }
    }

    async fn render(&self) {
        let view = self.view();
        if let Err(err) = self.terminal.show(view).await {
            self.log.warn(SCOPE, format!("Drawing failed: {:#}", err));
        }
    }

    /// Builds the view of the active screen.
    pub fn view(&self) -> View {
        let screen = self.screen();
        let paginator = screen.paginator();

        let sliders = screen
            .sliders
            .iter()
            .enumerate()
            .map(|(row, slider)| {
                let visible = screen.visible(row);
                let content = match &slider.load {
                    LoadState::Loading => SliderContent::Loading,
                    LoadState::Failed(err) => SliderContent::Failed(err.to_string()),
                    LoadState::Loaded(_) => {
                        SliderContent::Boxes(visible.iter().map(box_view).collect())
                    }
                };
                let focused = match self.focus {
                    Focus::Slider { row: focus_row, col } if focus_row == row => {
                        Some(col.min(visible.len().saturating_sub(1)))
                    }
                    _ => None,
                };
                SliderView {
                    heading: slider.heading.to_string(),
                    content,
                    page_index: slider.pagination.page_index,
                    page_count: paginator.max_index(slider.items().len()).max(0) as usize + 1,
                    window_size: paginator.window_size(),
                    focused,
                }
            })
            .collect();

        View {
            tabs: ScreenKind::ALL.iter().map(|kind| kind.title()).collect(),
            active_tab: self.active.index(),
            route: screen.route().to_string(),
            banner: screen.banner().map(banner_view),
            banner_focused: self.focus == Focus::Banner,
            sliders,
            overlay: screen.overlay().map(overlay_view),
            search_input: self.input.clone(),
        }
    }
}

fn image_of(item: &CatalogItem, size: ImageSize) -> String {
    let path = item
        .backdrop_path
        .as_deref()
        .or(item.poster_path.as_deref());
    make_optional_image_path(path, size)
}

fn banner_view(item: &CatalogItem) -> BannerView {
    BannerView {
        title: item.title.clone(),
        overview: item.overview.clone(),
        image: image_of(item, ImageSize::Original),
    }
}

fn box_view(item: &CatalogItem) -> BoxView {
    BoxView {
        title: item.title.clone(),
        image: image_of(item, ImageSize::W500),
    }
}

fn overlay_view(overlay: Overlay) -> OverlayView {
    let mut view = match &overlay.item {
        Some(item) => OverlayView {
            title: item.title.clone(),
            overview: item.overview.clone(),
            image: image_of(item, ImageSize::Original),
            ..Default::default()
        },
        None => OverlayView::default(),
    };
    match overlay.detail {
        DetailSlot::Empty => {}
        DetailSlot::Loading => view.note = Some("Loading details...".to_string()),
        DetailSlot::Ready(detail) => fill_detail(&mut view, &detail),
        DetailSlot::Failed(err) => view.note = Some(detail_failure(&err)),
    }
    view
}

fn fill_detail(view: &mut OverlayView, detail: &DetailRecord) {
    view.tagline = detail.tagline.clone().unwrap_or_default();
    view.genres = detail.genre_names();
    view.runtime = detail
        .runtime
        .map(|minutes| format!("{} min", minutes))
        .unwrap_or_default();
    view.release_date = detail.release_date.clone().unwrap_or_default();
}

fn detail_failure(err: &FetchError) -> String {
    format!("Details unavailable: {}", err)
}
