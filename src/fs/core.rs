use std::{collections::LinkedList, io};

use tokio::{
    fs::{File, OpenOptions},
    sync::{mpsc, oneshot},
};

use crate::ArcPath;

use super::message::Message;

/// The core of the Fs actor, responsible for handling filesystem operations.
///
/// Stateless: every request opens its own handle, so the actor only
/// serializes access and keeps blocking-prone calls off the callers.
#[derive(Debug, Default)]
pub struct Core;

impl Core {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn spawn(self) -> (super::Fs, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                use Message::*;
                match msg {
                    OpenFile { path, tx } => Self::open_file(tx, path).await,
                    ReadFile { path, tx } => {
                        let _ = tx.send(tokio::fs::read_to_string(&path).await);
                    }
                    WriteFile { path, contents, tx } => {
                        let _ = tx.send(tokio::fs::write(&path, contents).await);
                    }
                    RemoveFile { path, tx } => {
                        let _ = tx.send(tokio::fs::remove_file(&path).await);
                    }
                    ReadDir { path, tx } => Self::read_dir(tx, path).await,
                    MkDir { path, tx } => {
                        let _ = tx.send(tokio::fs::create_dir_all(&path).await);
                    }
                }
            }
        });
        (super::Fs::Actual(tx), handle)
    }

    /// Opens a file in append mode, creating it when missing.
    async fn open_file(tx: oneshot::Sender<io::Result<File>>, path: ArcPath) {
        let res = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .await;
        let _ = tx.send(res);
    }

    async fn read_dir(tx: oneshot::Sender<io::Result<LinkedList<ArcPath>>>, path: ArcPath) {
        let res = async {
            let mut rd = tokio::fs::read_dir(&path).await?;
            let mut entries = LinkedList::new();
            while let Some(entry) = rd.next_entry().await? {
                entries.push_back(ArcPath::from(entry.path()));
            }
            Ok(entries)
        }
        .await;
        let _ = tx.send(res);
    }
}
