use data::Data;
pub use data::{BoolOpt, MAX_WINDOW_SIZE, PathOpt, StrOpt, USizeOpt};
use message::Message;

use crate::{ArcPath, ArcStr, env::Env, fs::Fs, log::LogLevel};
use anyhow::Context;

mod core;
mod data;
mod message;
mod mock;

pub use self::core::API_KEY_VAR;
pub use data::Data as ConfigData;

/// Environment variable that overrides the location of the config file.
pub const CONFIG_PATH_VAR: &str = "CINEDECK_CONFIG";

/// The configuration actor that provides a thread-safe interface for configuration operations.
///
/// This enum represents either a real configuration actor or a mock implementation
/// for testing purposes. It provides a unified interface for configuration operations
/// regardless of the underlying implementation.
///
/// # Examples
/// ```ignore
/// let path = Config::locate(&env).await?;
/// let config = Config::spawn(env, fs, path);
/// config.load().await?;
/// let window = config.usize(USizeOpt::WindowSize).await;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender.
#[derive(Debug, Clone)]
pub enum Config {
    /// A real configuration actor that reads from and writes to a file
    Actual(tokio::sync::mpsc::Sender<Message>),
    /// A mock implementation for testing that stores data in memory
    Mock(mock::Mock),
}

impl Config {
    /// Creates a new configuration instance and spawns its actor.
    ///
    /// The actor starts with default values; call [`Config::load`] to read the file.
    pub fn spawn(env: Env, fs: Fs, path: ArcPath) -> Self {
        let (config, _) = core::Core::new(env, fs, path).spawn();
        config
    }

    /// Creates a new mock configuration instance for testing.
    pub fn mock(data: Data) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    /// Finds where the config file lives.
    ///
    /// `$CINEDECK_CONFIG` wins when set, otherwise the file is
    /// `$HOME/.config/cinedeck/config.toml`.
    ///
    /// # Errors
    /// Fails when neither variable is set.
    pub async fn locate(env: &Env) -> anyhow::Result<ArcPath> {
        if let Ok(path) = env.env(ArcStr::from(CONFIG_PATH_VAR)).await {
            return Ok(ArcPath::from(&*path));
        }
        let home = env
            .env(ArcStr::from("HOME"))
            .await
            .context("Neither CINEDECK_CONFIG nor HOME is set")?;
        Ok(ArcPath::from(
            std::path::Path::new(&*home).join(".config/cinedeck/config.toml"),
        ))
    }

    /// Loads the configuration from the file.
    ///
    /// For the mock implementation, this is a no-op that always succeeds.
    pub async fn load(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Load { tx })
                    .await
                    .context("Loading config with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for config load with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.load().await,
        }
    }

    /// Saves the current configuration to the file.
    ///
    /// For the mock implementation, this is a no-op that always succeeds.
    pub async fn save(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Save { tx })
                    .await
                    .context("Saving config with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for config save with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.save().await,
        }
    }

    /// Loads the file, or writes the defaults there when it cannot be loaded.
    ///
    /// Returns the load error, if any, so the caller can log it once a
    /// logger exists.
    pub async fn load_or_init(&self) -> Option<anyhow::Error> {
        match self.load().await {
            Ok(()) => None,
            Err(err) => {
                let _ = self.save().await;
                Some(err)
            }
        }
    }

    /// Gets a path-based configuration value.
    pub async fn path(&self, opt: PathOpt) -> ArcPath {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetPath { opt, tx })
                    .await
                    .context("Getting path with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for path with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.path(opt).await,
        }
    }

    /// Sets a path-based configuration value.
    pub async fn set_path(&self, opt: PathOpt, path: ArcPath) {
        match self {
            Self::Actual(sender) => {
                sender
                    .send(Message::SetPath { opt, path })
                    .await
                    .context("Setting path with Config actor")
                    .expect("Config actor died");
            }
            Self::Mock(mock) => mock.set_path(opt, path).await,
        }
    }

    /// Gets the current log level.
    pub async fn log_level(&self) -> LogLevel {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetLogLevel { tx })
                    .await
                    .context("Getting log level with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for log level with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.log_level().await,
        }
    }

    /// Sets the log level.
    pub async fn set_log_level(&self, level: LogLevel) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::SetLogLevel { level }).await;
            }
            Self::Mock(mock) => mock.set_log_level(level).await,
        }
    }

    /// Gets a numeric configuration value.
    pub async fn usize(&self, opt: USizeOpt) -> usize {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetUSize { opt, tx })
                    .await
                    .context("Getting numeric value with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for numeric value with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.usize(opt).await,
        }
    }

    /// Sets a numeric configuration value.
    pub async fn set_usize(&self, opt: USizeOpt, value: usize) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::SetUSize { opt, size: value }).await;
            }
            Self::Mock(mock) => mock.set_usize(opt, value).await,
        }
    }

    /// Gets a textual configuration value.
    pub async fn str(&self, opt: StrOpt) -> ArcStr {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetStr { opt, tx })
                    .await
                    .context("Getting text value with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for text value with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.str(opt).await,
        }
    }

    /// Sets a textual configuration value.
    pub async fn set_str(&self, opt: StrOpt, value: ArcStr) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::SetStr { opt, value }).await;
            }
            Self::Mock(mock) => mock.set_str(opt, value).await,
        }
    }

    /// Gets a switch.
    pub async fn bool(&self, opt: BoolOpt) -> bool {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::GetBool { opt, tx })
                    .await
                    .context("Getting switch with Config actor")
                    .expect("Config actor died");
                rx.await
                    .context("Awaiting response for switch with Config actor")
                    .expect("Config actor died")
            }
            Self::Mock(mock) => mock.bool(opt).await,
        }
    }

    /// Sets a switch.
    pub async fn set_bool(&self, opt: BoolOpt, value: bool) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::SetBool { opt, value }).await;
            }
            Self::Mock(mock) => mock.set_bool(opt, value).await,
        }
    }
}
