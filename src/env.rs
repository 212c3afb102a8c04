use std::env::VarError;

use anyhow::Context;
use tokio::sync::mpsc::Sender;

use crate::ArcStr;

mod core;
mod message;
mod mock;

use message::Message;

/// The environment actor that provides a thread-safe interface for reading
/// and writing environment variables.
///
/// The application only needs it to locate the configuration file, but routing
/// the access through an actor keeps the global state out of the rest of the
/// code and lets tests swap in an in-memory environment.
///
/// # Examples
/// ```ignore
/// let env = Env::spawn();
/// let home = env.env(ArcStr::from("HOME")).await?;
/// ```
#[derive(Debug, Clone)]
pub enum Env {
    /// A real environment actor that reads the process environment
    Actual(Sender<Message>),
    /// A mock implementation backed by an in-memory map
    Mock(mock::Mock),
}

impl Env {
    /// Creates a new environment instance and spawns its actor.
    pub fn spawn() -> Self {
        let (env, _) = core::Core::new().spawn();
        env
    }

    /// Creates an empty mock environment.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Creates a mock environment pre-populated with `variables`.
    pub fn mock_with<I, K, V>(variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ArcStr>,
        V: Into<ArcStr>,
    {
        Self::Mock(mock::Mock::with_variables(
            variables
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Sets an environment variable.
    ///
    /// # Arguments
    /// * `key` - The environment variable name
    /// * `value` - The value to set
    pub async fn set_env(&self, key: ArcStr, value: ArcStr) {
        match self {
            Self::Actual(sender) => {
                sender
                    .send(Message::Set { key, value })
                    .await
                    .context("Setting env var with Env actor")
                    .expect("Env actor died");
            }
            Self::Mock(mock) => mock.set_env(key, value).await,
        }
    }

    /// Removes an environment variable.
    pub async fn unset_env(&self, key: ArcStr) {
        match self {
            Self::Actual(sender) => {
                sender
                    .send(Message::Unset { key })
                    .await
                    .context("Unsetting env var with Env actor")
                    .expect("Env actor died");
            }
            Self::Mock(mock) => mock.unset_env(key).await,
        }
    }

    /// Gets the value of an environment variable.
    ///
    /// # Errors
    /// Returns [`VarError::NotPresent`] when the variable is not set and
    /// [`VarError::NotUnicode`] when its value is not valid UTF-8.
    pub async fn env(&self, key: ArcStr) -> Result<ArcStr, VarError> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get { key, tx })
                    .await
                    .context("Getting env var with Env actor")
                    .expect("Env actor died");
                rx.await
                    .context("Awaiting response for env var from Env actor")
                    .expect("Env actor died")
            }
            Self::Mock(mock) => mock.env(key).await,
        }
    }
}
