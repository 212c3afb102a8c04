use std::{
    collections::LinkedList,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use tempfile::TempDir;
use tokio::fs::{File, OpenOptions};

use crate::ArcPath;

/// Mock implementation of the Fs actor for testing purposes.
///
/// Paths, absolute or relative, are re-rooted inside a temporary directory,
/// so tests can use realistic paths such as `/tmp/cinedeck/logs` without
/// touching them.
#[derive(Debug, Clone)]
pub struct Mock {
    root: Arc<TempDir>,
}

impl Mock {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir for Fs mock");
        Self {
            root: Arc::new(root),
        }
    }

    fn mock_path(&self, path: &Path) -> PathBuf {
        let relative = path.strip_prefix("/").unwrap_or(path);
        self.root.path().join(relative)
    }

    pub async fn open_file(&self, path: ArcPath) -> io::Result<File> {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.mock_path(&path))
            .await
    }

    pub async fn read_file(&self, path: ArcPath) -> io::Result<String> {
        tokio::fs::read_to_string(self.mock_path(&path)).await
    }

    pub async fn write_file(&self, path: ArcPath, contents: String) -> io::Result<()> {
        tokio::fs::write(self.mock_path(&path), contents).await
    }

    pub async fn remove_file(&self, path: ArcPath) -> io::Result<()> {
        tokio::fs::remove_file(self.mock_path(&path)).await
    }

    /// Lists a directory. Returned entries are mapped back out of the
    /// temporary root so they can be fed to the other operations.
    pub async fn read_dir(&self, path: ArcPath) -> io::Result<LinkedList<ArcPath>> {
        let mut rd = tokio::fs::read_dir(self.mock_path(&path)).await?;
        let mut entries = LinkedList::new();
        while let Some(entry) = rd.next_entry().await? {
            let real = entry.path();
            let virtual_path = match real.strip_prefix(self.root.path()) {
                Ok(relative) => Path::new("/").join(relative),
                Err(_) => real,
            };
            entries.push_back(ArcPath::from(virtual_path));
        }
        Ok(entries)
    }

    pub async fn mkdir(&self, path: ArcPath) -> io::Result<()> {
        tokio::fs::create_dir_all(self.mock_path(&path)).await
    }
}
