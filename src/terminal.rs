//! Terminal actor: draws [`View`]s and reads key input.

use anyhow::Context;
use tokio::sync::{mpsc, oneshot};

use crate::log::Log;

mod core;
mod data;
mod draw;
mod message;
mod mock;

pub use data::{BannerView, BoxView, OverlayView, SliderContent, SliderView, UiEvent, View};
pub use mock::MockData;
use message::Message;

/// The terminal actor.
///
/// Spawning it takes over the terminal; [`Terminal::quit`] gives it back.
/// Key presses are sent to the `ui_events` channel given at spawn time.
#[derive(Debug, Clone)]
pub enum Terminal {
    Actual(mpsc::Sender<Message>),
    Mock(mock::Mock),
}

impl Terminal {
    /// Takes over the terminal and spawns the actor.
    ///
    /// # Errors
    /// Fails when stdout is not a terminal.
    pub fn spawn(log: Log, ui_events: mpsc::Sender<UiEvent>) -> anyhow::Result<Self> {
        let (terminal, _) = core::Core::build(log, ui_events)?.spawn();
        Ok(terminal)
    }

    pub fn mock(data: MockData) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    /// Draws `view`, replacing whatever was on screen.
    pub async fn show(&self, view: View) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Show { view, tx })
                    .await
                    .context("Sending message to Terminal actor")?;
                rx.await.context("Awaiting response from Terminal actor")?
            }
            Self::Mock(mock) => mock.show(view).await,
        }
    }

    /// Restores the terminal and stops the actor.
    pub async fn quit(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Quit { tx })
                    .await
                    .context("Sending message to Terminal actor")?;
                rx.await.context("Awaiting response from Terminal actor")?
            }
            Self::Mock(mock) => mock.quit().await,
        }
    }

    /// Mock data, for inspection in tests.
    pub async fn mock_data(&self) -> Option<MockData> {
        match self {
            Self::Actual(_) => None,
            Self::Mock(mock) => Some(mock.get_data().await),
        }
    }
}
