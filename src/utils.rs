use std::{
    fmt::Display,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// Cheaply clonable immutable string shared between actors.
pub type ArcStr = Arc<str>;

/// Cheaply clonable immutable path shared between actors.
///
/// Serializes as a plain path so it can live inside the TOML config.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "PathBuf", into = "PathBuf")]
pub struct ArcPath(Arc<Path>);

impl Deref for ArcPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for ArcPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for ArcPath {
    fn from(value: &str) -> Self {
        Self(Arc::from(Path::new(value)))
    }
}

impl From<&Path> for ArcPath {
    fn from(value: &Path) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&PathBuf> for ArcPath {
    fn from(value: &PathBuf) -> Self {
        Self(Arc::from(value.as_path()))
    }
}

impl From<PathBuf> for ArcPath {
    fn from(value: PathBuf) -> Self {
        Self(Arc::from(value))
    }
}

impl From<ArcPath> for PathBuf {
    fn from(value: ArcPath) -> Self {
        value.0.to_path_buf()
    }
}

impl Display for ArcPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Restores the terminal before the default panic hook prints the panic, so a
/// crash inside the TUI doesn't leave the shell in raw mode.
pub fn install_panic_hook() -> anyhow::Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_path_conversions() {
        let a = ArcPath::from("/tmp/cinedeck");
        let b = ArcPath::from(PathBuf::from("/tmp/cinedeck"));
        assert_eq!(a, b);
        assert_eq!(a.join("logs"), PathBuf::from("/tmp/cinedeck/logs"));
        assert_eq!(a.to_string(), "/tmp/cinedeck");
    }
}
