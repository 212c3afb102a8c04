use anyhow::Context;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::api::catalog::CatalogApi;
use crate::app::cache::QueryCache;
use crate::app::state::Route;
use crate::log::Log;
use crate::terminal::{Terminal, UiEvent, View};

mod core;
mod data;
mod message;
mod mock;
#[cfg(test)]
mod tests;

pub use data::{Focus, MockData, UiSettings};
pub use message::Message;

/// UI actor - owns the screens and turns input into views.
///
/// Key presses arrive on the `events` channel given at spawn time (the
/// terminal writes there); every change is drawn through the terminal actor.
#[derive(Debug, Clone)]
pub enum Ui {
    /// Real implementation using message passing
    Actual(mpsc::Sender<Message>),
    /// Mock implementation for testing
    Mock(mock::Mock),
}

impl Ui {
    /// Create a new UI actor showing `route`.
    ///
    /// The join handle completes once the user quits.
    pub fn spawn(
        log: Log,
        terminal: Terminal,
        cache: QueryCache,
        catalog: CatalogApi,
        settings: UiSettings,
        events: mpsc::Receiver<UiEvent>,
        route: Route,
    ) -> (Self, JoinHandle<()>) {
        let (core, rx) = core::Core::new(log, terminal, cache, catalog, settings);
        core.spawn(rx, events, route)
    }

    /// Create a mock UI actor for testing
    pub fn mock(data: MockData) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    /// Feeds a key event, as the terminal would.
    pub async fn send_event(&self, event: UiEvent) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::Event(event)).await;
            }
            Self::Mock(mock) => mock.send_event(event).await,
        }
    }

    /// Shows what `route` names. Returns once the UI switched to it; the
    /// lists themselves may still be loading.
    pub async fn navigate(&self, route: Route) {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Navigate { route, tx })
                    .await
                    .context("Sending navigate message to UI actor")
                    .expect("UI actor died");
                rx.await
                    .context("Awaiting response for navigate from UI actor")
                    .expect("UI actor died")
            }
            Self::Mock(mock) => mock.navigate(route).await,
        }
    }

    /// The view as it would be drawn now.
    pub async fn view(&self) -> View {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::GetView { tx })
                    .await
                    .context("Sending get view message to UI actor")
                    .expect("UI actor died");
                rx.await
                    .context("Awaiting response for get view from UI actor")
                    .expect("UI actor died")
            }
            Self::Mock(mock) => mock.view().await,
        }
    }

    /// Asks the UI to stop. It gives the terminal back before exiting.
    pub async fn quit(&self) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::Quit).await;
            }
            Self::Mock(mock) => mock.quit().await,
        }
    }

    pub async fn mock_data(&self) -> Option<MockData> {
        match self {
            Self::Actual(_) => None,
            Self::Mock(mock) => Some(mock.get_data().await),
        }
    }
}
