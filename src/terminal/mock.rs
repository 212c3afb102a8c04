use std::sync::Arc;
use tokio::sync::Mutex;

use crate::terminal::data::View;

/// Mock data for testing terminal operations
#[derive(Debug, Clone, Default)]
pub struct MockData {
    /// Last view that was requested to be shown
    pub last_view: Option<View>,
    /// Number of views shown so far
    pub shown: usize,
    /// Whether quit was called
    pub quit_called: bool,
}

/// Mock implementation of the Terminal actor for testing purposes.
///
/// Views are stored instead of drawn, so tests can inspect what the UI
/// asked for.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<MockData>>,
}

impl Mock {
    pub fn new(data: MockData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn show(&self, view: View) -> anyhow::Result<()> {
        let mut data = self.data.lock().await;
        data.last_view = Some(view);
        data.shown += 1;
        Ok(())
    }

    pub async fn quit(&self) -> anyhow::Result<()> {
        self.data.lock().await.quit_called = true;
        Ok(())
    }

    pub async fn get_data(&self) -> MockData {
        self.data.lock().await.clone()
    }
}
