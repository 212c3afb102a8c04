use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub mod cache;
pub mod config;
pub mod state;
pub mod ui;

mod core;
mod data;
#[cfg(test)]
mod tests;

pub use self::core::{format_page, format_screen};
pub use data::{Command, MockData};

use state::Route;
use ui::Ui;

/// App actor - Central coordinator for the entire application
///
/// Builds every other actor from the configuration, then either resolves a
/// one-shot CLI command or hands control to the interactive UI.
#[derive(Debug)]
pub enum App {
    /// Ready to be used (built but not spawned)
    Ready(Arc<core::Core>),
    /// Mock implementation for testing
    Mock(Arc<Mutex<MockData>>),
}

impl App {
    /// Create a new App actor with full initialization (but not spawned)
    ///
    /// This performs all necessary setup including:
    /// - Actor initialization (env, fs, config, log, net, catalog, cache)
    /// - Configuration loading, writing the defaults when there is no file
    ///
    /// Returns the App actor ready for resolve() or spawn()
    pub async fn build() -> Result<Self> {
        let core = core::Core::build().await?;
        Ok(Self::Ready(Arc::new(core)))
    }

    /// Create a mock App actor for testing
    pub fn mock(data: MockData) -> Self {
        Self::Mock(Arc::new(Mutex::new(data)))
    }

    /// Execute a CLI command, print its output and shut down (resolve mode)
    pub async fn resolve(&self, command: Command) -> Result<()> {
        match self {
            Self::Ready(core) => {
                let result = core.handle_command(command).await;
                if let Ok(output) = &result {
                    print!("{}", output);
                }
                core.handle_shutdown().await;
                result.map(|_| ())
            }
            Self::Mock(data) => {
                data.lock().await.executed_commands.push(command);
                Ok(())
            }
        }
    }

    /// Spawn the interactive browser at `route`
    ///
    /// Returns the UI actor and a handle that completes once the user quit
    /// and the application shut down.
    pub async fn spawn(self, route: Route) -> Result<(Ui, JoinHandle<()>)> {
        match self {
            Self::Ready(core) => {
                let core = Arc::try_unwrap(core)
                    .map_err(|_| anyhow::anyhow!("Core still has references"))?;
                core.spawn_interactive(route).await
            }
            Self::Mock(data) => {
                data.lock().await.browsed_routes.push(route);
                let handle = tokio::spawn(async {});
                Ok((Ui::mock(Default::default()), handle))
            }
        }
    }

    pub async fn mock_data(&self) -> Option<Vec<Command>> {
        match self {
            Self::Ready(_) => None,
            Self::Mock(data) => Some(data.lock().await.executed_commands.clone()),
        }
    }
}
