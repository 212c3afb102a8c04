use std::{collections::LinkedList, io};

use tokio::{fs::File, sync::oneshot};

use crate::ArcPath;

/// Messages that can be sent to a [`Fs`](super::Fs) actor.
#[derive(Debug)]
pub enum Message {
    /// Opens a file for appending and returns its handle
    OpenFile {
        path: ArcPath,
        tx: oneshot::Sender<io::Result<File>>,
    },
    /// Reads a file into a string
    ReadFile {
        path: ArcPath,
        tx: oneshot::Sender<io::Result<String>>,
    },
    /// Truncates a file and writes new contents
    WriteFile {
        path: ArcPath,
        contents: String,
        tx: oneshot::Sender<io::Result<()>>,
    },
    /// Removes a file from the filesystem
    RemoveFile {
        path: ArcPath,
        tx: oneshot::Sender<io::Result<()>>,
    },
    /// Reads the contents of a directory
    ReadDir {
        path: ArcPath,
        tx: oneshot::Sender<io::Result<LinkedList<ArcPath>>>,
    },
    /// Creates a directory and its parents
    MkDir {
        path: ArcPath,
        tx: oneshot::Sender<io::Result<()>>,
    },
}
