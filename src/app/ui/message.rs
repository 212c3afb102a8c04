use tokio::sync::oneshot;

use crate::api::catalog::{DetailRecord, FetchError, ResultPage};
use crate::app::state::{DetailTicket, LoadRequest, Route, ScreenKind};
use crate::terminal::{UiEvent, View};

/// Messages for communicating with the UI actor
#[derive(Debug)]
pub enum Message {
    /// Key input
    Event(UiEvent),
    /// A list fetch finished
    PageLoaded {
        screen: ScreenKind,
        request: LoadRequest,
        result: Result<ResultPage, FetchError>,
    },
    /// A detail fetch finished
    DetailLoaded {
        screen: ScreenKind,
        ticket: DetailTicket,
        result: Result<DetailRecord, FetchError>,
    },
    /// A carousel slide is over. `generation` is the screen's load
    /// generation when the slide started.
    TransitionDone {
        screen: ScreenKind,
        slider: usize,
        generation: u64,
    },
    /// Show what `route` names
    Navigate { route: Route, tx: oneshot::Sender<()> },
    /// Get the view as it would be drawn now
    GetView { tx: oneshot::Sender<View> },
    Quit,
}
