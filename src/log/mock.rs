use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::log::{LogLevel, LogMessage};

/// Mock implementation of the Log actor for testing purposes.
///
/// Messages are recorded synchronously so tests can assert on them right
/// after the call that logged them.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    messages: Arc<Mutex<Vec<LogMessage>>>,
}

impl Mock {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn log(&self, scope: &'static str, message: String, level: LogLevel) {
        let mut messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        messages.push(LogMessage {
            level,
            scope,
            message,
        });
    }

    pub fn flush(self) -> JoinHandle<()> {
        tokio::spawn(async {})
    }

    pub async fn get_messages(&self) -> Vec<LogMessage> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
