use std::fmt::Display;

use tokio::{sync::mpsc::Sender, task::JoinHandle};

use crate::{ArcPath, fs::Fs};

mod core;
mod data;
mod message;
mod mock;
#[cfg(test)]
mod tests;

pub use data::{LogLevel, LogMessage, UnknownLevel};
use message::Message;

/// The logging actor that provides a thread-safe interface for logging
/// operations.
///
/// Every message carries a static scope (`"app.ui"`, `"api.catalog"`, ...)
/// naming the actor that emitted it. Messages always go to the log files;
/// the ones at or above the configured level are also echoed to stderr when
/// the logger is flushed at exit, after the terminal has been restored.
///
/// # Examples
/// ```ignore
/// let log = Log::spawn(fs, LogLevel::Warning, 7, log_dir).await?;
/// log.info("app", "Starting cinedeck");
/// ```
///
/// # Thread Safety
/// Cloning is cheap as it only copies the channel sender or mock handle.
#[derive(Debug, Clone)]
pub enum Log {
    /// A real logging actor that writes to files and stderr
    Actual(Sender<Message>),
    /// A mock implementation that keeps messages in memory
    Mock(mock::Mock),
}

impl Log {
    /// Builds the logger core and spawns its actor.
    ///
    /// # Arguments
    /// * `fs` - Filesystem actor used to create the log files
    /// * `level` - Minimum level echoed to stderr on flush
    /// * `max_age` - Age in days after which old log files are collected (0 keeps them)
    /// * `log_dir` - Directory receiving the log files, created when missing
    ///
    /// # Errors
    /// Fails when the log directory or files cannot be created.
    pub async fn spawn(
        fs: Fs,
        level: LogLevel,
        max_age: usize,
        log_dir: ArcPath,
    ) -> anyhow::Result<Self> {
        let (log, _) = core::LogCore::build(fs, level, max_age, log_dir)
            .await?
            .spawn();
        Ok(log)
    }

    /// Creates a mock logger that records messages in memory.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Sends a message to the logger without blocking the caller.
    ///
    /// # Panics
    /// If the logger was flushed
    fn log(&self, scope: &'static str, message: String, level: LogLevel) {
        match self {
            Self::Actual(sender) => {
                let sender = sender.clone();
                tokio::spawn(async move {
                    sender
                        .send(Message::Log(LogMessage {
                            level,
                            scope,
                            message,
                        }))
                        .await
                        .expect("Attempt to use logger after a flush");
                });
            }
            Self::Mock(mock) => mock.log(scope, message, level),
        }
    }

    /// Log a message with the `INFO` level
    pub fn info<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Info);
    }

    /// Log a message with the `WARNING` level
    pub fn warn<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Warning);
    }

    /// Log a message with the `ERROR` level
    pub fn error<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Error);
    }

    /// Log a warning if the result is an error and return the result as is
    pub fn warn_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            self.log(scope, err.to_string(), LogLevel::Warning);
        }
        result
    }

    /// Log an error if the result is an error and return the result as is
    pub fn error_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            self.log(scope, err.to_string(), LogLevel::Error);
        }
        result
    }

    /// Flushes the logger by printing the buffered messages to stderr. After
    /// this the logger is destroyed and any further use panics.
    ///
    /// # Panics
    /// If called twice
    pub fn flush(self) -> JoinHandle<()> {
        match self {
            Self::Actual(sender) => tokio::spawn(async move {
                sender
                    .send(Message::Flush)
                    .await
                    .expect("Flushing a logger twice");
            }),
            Self::Mock(mock) => mock.flush(),
        }
    }

    /// Deletes log files older than the `max_age` given at build time.
    pub async fn collect_garbage(&self) {
        match self {
            Self::Actual(sender) => sender
                .send(Message::CollectGarbage)
                .await
                .expect("Attempt to use logger after a flush"),
            Self::Mock(_) => {}
        }
    }

    /// Messages recorded so far. Only the mock keeps them, so the real
    /// logger returns `None`.
    pub async fn get_messages(&self) -> Option<Vec<LogMessage>> {
        match self {
            Self::Actual(_) => None,
            Self::Mock(mock) => Some(mock.get_messages().await),
        }
    }
}
