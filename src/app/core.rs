use std::fmt::Write;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ArcStr;
use crate::api::catalog::{
    CatalogApi, CatalogItem, Category, DetailRecord, FetchError, ImageSize, ItemId, MediaKind,
    ResultPage, image::make_optional_image_path,
};
use crate::app::cache::QueryCache;
use crate::app::config::{Config, PathOpt, StrOpt, USizeOpt};
use crate::app::state::{DetailSlot, LoadState, Paginator, Route, ScreenSpec, ScreenState};
use crate::app::ui::{Ui, UiSettings};
use crate::env::Env;
use crate::fs::Fs;
use crate::log::Log;
use crate::net::Net;
use crate::terminal::Terminal;

use super::data::Command;

const SCOPE: &str = "app";

/// Core implementation of the App actor
#[derive(Debug)]
pub struct Core {
    /// Configuration actor
    config: Config,
    /// Logging actor
    log: Log,
    /// Catalog API actor
    catalog: CatalogApi,
    /// List cache shared by the CLI and the UI
    cache: QueryCache,
}

impl Core {
    /// Build a new App actor core with full initialization
    pub async fn build() -> Result<Self> {
        let env = Env::spawn();
        let fs = Fs::spawn();

        let config_path = Config::locate(&env).await?;
        let config = Config::spawn(env, fs.clone(), config_path.clone());
        let load_error = config.load_or_init().await;

        let log = Log::spawn(
            fs,
            config.log_level().await,
            config.usize(USizeOpt::MaxAge).await,
            config.path(PathOpt::LogDir).await,
        )
        .await?;

        if let Some(err) = load_error {
            log.warn(
                SCOPE,
                format!("Using default config, {} was not loaded: {:#}", config_path, err),
            );
        }

        let net = Net::spawn(log.clone());
        let catalog = CatalogApi::spawn(
            net,
            log.clone(),
            config.str(StrOpt::ApiBase).await,
            config.str(StrOpt::ApiKey).await,
        );
        let cache = QueryCache::spawn(catalog.clone(), log.clone());

        log.info(SCOPE, "App actor initialized successfully");
        Ok(Self::new(config, log, catalog, cache))
    }

    /// Assembles a core from actors that already run.
    pub fn new(config: Config, log: Log, catalog: CatalogApi, cache: QueryCache) -> Self {
        Self {
            config,
            log,
            catalog,
            cache,
        }
    }

    /// Spawns the terminal and UI actors and shows `route`.
    ///
    /// The returned handle completes once the user quits and the app shut
    /// down.
    pub async fn spawn_interactive(self, route: Route) -> Result<(Ui, JoinHandle<()>)> {
        let (events_tx, events_rx) = mpsc::channel(crate::BUFFER_SIZE);
        let terminal = Terminal::spawn(self.log.clone(), events_tx)?;
        let settings = UiSettings::from_config(&self.config).await;
        let (ui, ui_handle) = Ui::spawn(
            self.log.clone(),
            terminal,
            self.cache.clone(),
            self.catalog.clone(),
            settings,
            events_rx,
            route,
        );

        let handle = tokio::spawn(async move {
            if let Err(err) = ui_handle.await {
                self.log.error(SCOPE, format!("UI actor crashed: {}", err));
            }
            self.handle_shutdown().await;
        });
        Ok((ui, handle))
    }

    /// Runs a one-shot command and returns what it prints.
    pub async fn handle_command(&self, command: Command) -> Result<String> {
        match command {
            Command::Browse { .. } => Err(anyhow::anyhow!(
                "browse is interactive and cannot be resolved"
            )),
            Command::List {
                category,
                keyword,
                page,
            } => self.handle_list_command(category, keyword, page).await,
            Command::Search { keyword } => self.handle_search_command(keyword).await,
            Command::Detail { kind, id } => self.handle_detail_command(kind, id).await,
            Command::Open { route } => self.handle_open_command(route).await,
        }
    }

    /// Handle graceful shutdown
    ///
    /// Old logs are collected and the buffered messages printed. The logger
    /// cannot be used afterwards.
    pub async fn handle_shutdown(&self) {
        self.log.info(SCOPE, "Shutting down application");
        self.log.collect_garbage().await;
        let _ = self.log.clone().flush().await;
    }

    async fn handle_list_command(
        &self,
        category: Category,
        keyword: Option<ArcStr>,
        page: Option<u32>,
    ) -> Result<String> {
        let keyword = keyword.filter(|_| category.is_search());
        let result = match page {
            Some(page) => self.catalog.list_page(category, keyword.clone(), Some(page)).await,
            None => self.cache.get(category, keyword.clone()).await,
        };
        let list = result.with_context(|| format!("Fetching {}", category))?;

        let heading = match &keyword {
            Some(keyword) => format!("{} for '{}'", category, keyword),
            None => category.to_string(),
        };
        Ok(format_page(&heading, &list))
    }

    async fn handle_search_command(&self, keyword: ArcStr) -> Result<String> {
        let keyword = Some(keyword).filter(|keyword| !keyword.trim().is_empty());
        let mut out = String::new();
        for category in [Category::SearchMovies, Category::SearchTvs] {
            let heading = match &keyword {
                Some(keyword) => format!("{} for '{}'", category, keyword),
                None => category.to_string(),
            };
            match self.cache.get(category, keyword.clone()).await {
                Ok(list) => out.push_str(&format_page(&heading, &list)),
                Err(err) => {
                    let _ = writeln!(out, "{}: {}", heading, err);
                }
            }
            out.push('\n');
        }
        Ok(out)
    }

    async fn handle_detail_command(&self, kind: MediaKind, id: ItemId) -> Result<String> {
        let detail = self
            .catalog
            .details(kind, id)
            .await
            .with_context(|| format!("Fetching detail of {} {}", kind, id))?;

        let mut out = String::new();
        let _ = writeln!(out, "{} {}", kind, id);
        write_detail(&mut out, &detail);
        Ok(out)
    }

    /// Loads the screen of `route` the way the browser does, then prints it.
    async fn handle_open_command(&self, route: Route) -> Result<String> {
        let settings = UiSettings::from_config(&self.config).await;
        let kind = route.screen();
        let mut screen = ScreenState::new(
            ScreenSpec::new(kind, settings.detail(kind)),
            Paginator::new(settings.window_size),
        );

        let keyword = route.keyword().filter(|k| !k.is_empty()).map(ArcStr::from);
        for request in screen.begin_load(keyword) {
            let result = self
                .cache
                .get(request.category, request.keyword.clone())
                .await;
            if let Err(err) = &result {
                self.log
                    .warn(SCOPE, format!("{} failed to load: {}", request.category, err));
            }
            screen.apply_page(&request, result);
        }

        if let Some(id) = route.item() {
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
                let ticket = screen.selection.open(id, category);
                if screen.detail_enabled() {
                    screen.selection.mark_loading(&ticket);
                    let result = self.catalog.details(category.kind(), id).await;
                    screen.selection.resolve_detail(&ticket, result);
                }
            }
        }

        Ok(format_screen(&screen))
    }
}

fn image_of(item: &CatalogItem, size: ImageSize) -> String {
    let path = item
        .backdrop_path
        .as_deref()
        .or(item.poster_path.as_deref());
    make_optional_image_path(path, size)
}

/// Numbered listing of a page, one item per entry.
pub fn format_page(heading: &str, list: &ResultPage) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (page {} of {}, {} results):",
        heading, list.page, list.total_pages, list.total_results
    );
    if list.results.is_empty() {
        let _ = writeln!(out, "  nothing found");
        return out;
    }
    for (i, item) in list.results.iter().enumerate() {
        write_item(&mut out, i + 1, item);
    }
    out
}

fn write_item(out: &mut String, index: usize, item: &CatalogItem) {
    let _ = writeln!(out, "{}. {} [{}]", index, item.title, item.id);
    let image = image_of(item, ImageSize::W500);
    if !image.is_empty() {
        let _ = writeln!(out, "   Image: {}", image);
    }
}

fn write_detail(out: &mut String, detail: &DetailRecord) {
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "   Tagline: {}", tagline);
    }
    let genres = detail.genre_names();
    if !genres.is_empty() {
        let _ = writeln!(out, "   Genres: {}", genres);
    }
    if let Some(runtime) = detail.runtime {
        let _ = writeln!(out, "   Runtime: {} min", runtime);
    }
    if let Some(date) = detail.release_date.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "   Released: {}", date);
    }
}

fn write_failure(out: &mut String, heading: &str, err: &FetchError) {
    let _ = writeln!(out, "{}: {}", heading, err);
}

/// Text rendition of a screen: route, banner, the first page of every
/// slider and the open item, if any.
pub fn format_screen(screen: &ScreenState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Route: {}", screen.route());

    if let Some(banner) = screen.banner() {
        let _ = writeln!(out, "\nBanner: {} [{}]", banner.title, banner.id);
        let image = image_of(banner, ImageSize::Original);
        if !image.is_empty() {
            let _ = writeln!(out, "   Image: {}", image);
        }
        if !banner.overview.is_empty() {
            let _ = writeln!(out, "   {}", banner.overview);
        }
    }

    for (row, slider) in screen.sliders.iter().enumerate() {
        out.push('\n');
        if let LoadState::Failed(err) = &slider.load {
            write_failure(&mut out, slider.heading, err);
            continue;
        }
        let _ = writeln!(out, "{}:", slider.heading);
        let visible = screen.visible(row);
        if visible.is_empty() {
            let _ = writeln!(out, "  nothing to show");
        }
        for (i, item) in visible.iter().enumerate() {
            write_item(&mut out, i + 1, item);
        }
    }

    if let Some(overlay) = screen.overlay() {
        out.push('\n');
        match &overlay.item {
            Some(item) => {
                let _ = writeln!(out, "Open: {} [{}]", item.title, item.id);
                if !item.overview.is_empty() {
                    let _ = writeln!(out, "   {}", item.overview);
                }
            }
            None => {
                let _ = writeln!(out, "Open: unknown item");
            }
        }
        match &overlay.detail {
            DetailSlot::Ready(detail) => write_detail(&mut out, detail),
            DetailSlot::Failed(err) => write_failure(&mut out, "   Details unavailable", err),
            DetailSlot::Empty | DetailSlot::Loading => {}
        }
    }
    out
}
