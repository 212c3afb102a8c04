use std::env::VarError;

use tokio::sync::{mpsc, oneshot};

use crate::ArcStr;

use super::message::Message;

/// The core of the Env actor, wrapping the process environment.
#[derive(Debug, Default)]
pub struct Core;

impl Core {
    pub fn new() -> Self {
        Default::default()
    }

    /// Transforms the core into an actor ready to receive messages.
    pub fn spawn(self) -> (super::Env, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::Set { key, value } => Self::set_env(&key, &value),
                    Message::Unset { key } => Self::unset_env(&key),
                    Message::Get { key, tx } => Self::get_env(&key, tx),
                }
            }
        });

        (super::Env::Actual(tx), handle)
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: every write to the environment goes through this actor, so
        // writes are serialized.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn unset_env(key: &str) {
        // SAFETY: see `set_env`.
        unsafe {
            std::env::remove_var(key);
        }
    }

    fn get_env(key: &str, tx: oneshot::Sender<Result<ArcStr, VarError>>) {
        let _ = tx.send(std::env::var(key).map(ArcStr::from));
    }
}
