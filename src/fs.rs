use std::{collections::LinkedList, io};

use anyhow::Context;
use tokio::{fs::File, sync::mpsc::Sender};

use crate::ArcPath;

mod core;
mod message;
mod mock;
#[cfg(test)]
mod tests;

use message::Message;

/// The filesystem actor that provides a thread-safe interface for file
/// operations.
///
/// Used by the configuration actor to read and write the TOML file and by the
/// logging actor to create and rotate its log files.
///
/// # Examples
/// ```ignore
/// let fs = Fs::spawn();
/// fs.mkdir(ArcPath::from("/tmp/cinedeck")).await?;
/// fs.write_file(ArcPath::from("/tmp/cinedeck/a.toml"), ArcStr::from("x = 1")).await?;
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender or the mock handle.
#[derive(Debug, Clone)]
pub enum Fs {
    /// A real filesystem actor backed by tokio's fs module
    Actual(Sender<Message>),
    /// A mock rooted in a temporary directory
    Mock(mock::Mock),
}

impl Fs {
    /// Creates a new filesystem instance and spawns its actor.
    pub fn spawn() -> Self {
        let (fs, _) = core::Core::new().spawn();
        fs
    }

    /// Creates a mock filesystem. Every path is resolved inside a fresh
    /// temporary directory which is removed when the last clone is dropped.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Opens a file for appending, creating it if needed.
    pub async fn open_file(&self, path: ArcPath) -> io::Result<File> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::OpenFile { path, tx })
                    .await
                    .context("Opening file with Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response for open file from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.open_file(path).await,
        }
    }

    /// Reads a whole file into a string.
    pub async fn read_file(&self, path: ArcPath) -> io::Result<String> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::ReadFile { path, tx })
                    .await
                    .context("Reading file with Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response for read file from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.read_file(path).await,
        }
    }

    /// Replaces the contents of a file, creating it if needed.
    pub async fn write_file(&self, path: ArcPath, contents: String) -> io::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::WriteFile { path, contents, tx })
                    .await
                    .context("Writing file with Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response for write file from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.write_file(path, contents).await,
        }
    }

    /// Removes a file.
    pub async fn remove_file(&self, path: ArcPath) -> io::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::RemoveFile { path, tx })
                    .await
                    .context("Removing file with Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response for remove file from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.remove_file(path).await,
        }
    }

    /// Lists the entries of a directory.
    pub async fn read_dir(&self, path: ArcPath) -> io::Result<LinkedList<ArcPath>> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::ReadDir { path, tx })
                    .await
                    .context("Reading directory with Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response for read dir from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.read_dir(path).await,
        }
    }

    /// Creates a directory and all of its missing parents.
    pub async fn mkdir(&self, path: ArcPath) -> io::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::MkDir { path, tx })
                    .await
                    .context("Creating directory with Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response for mkdir from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.mkdir(path).await,
        }
    }
}
