use crate::app::config::{BoolOpt, Config, USizeOpt};
use crate::app::state::{Route, ScreenKind};
use crate::terminal::UiEvent;

/// What the arrow keys move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Banner,
    /// Box `col` of the visible page of slider `row`
    Slider { row: usize, col: usize },
}

/// Settings read from the configuration when the UI starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiSettings {
    pub window_size: usize,
    pub transition_ms: u64,
    pub movies_detail: bool,
    pub tv_detail: bool,
    pub search_detail: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_size: 5,
            transition_ms: 1000,
            movies_detail: true,
            tv_detail: false,
            search_detail: false,
        }
    }
}

impl UiSettings {
    pub async fn from_config(config: &Config) -> Self {
        Self {
            window_size: config.usize(USizeOpt::WindowSize).await,
            transition_ms: config.usize(USizeOpt::TransitionMs).await as u64,
            movies_detail: config.bool(BoolOpt::MoviesDetail).await,
            tv_detail: config.bool(BoolOpt::TvDetail).await,
            search_detail: config.bool(BoolOpt::SearchDetail).await,
        }
    }

    /// Whether opening an item on screen `kind` fetches its detail.
    pub fn detail(&self, kind: ScreenKind) -> bool {
        match kind {
            ScreenKind::Movies => self.movies_detail,
            ScreenKind::Tv => self.tv_detail,
            ScreenKind::Search => self.search_detail,
        }
    }
}

/// Mock data for testing the UI actor
#[derive(Debug, Clone, Default)]
pub struct MockData {
    /// Events received, in order
    pub events: Vec<UiEvent>,
    /// Routes navigated to, in order
    pub routes: Vec<Route>,
    pub quit_called: bool,
}
