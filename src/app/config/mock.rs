use std::sync::Arc;
use tokio::sync::Mutex;

use crate::app::config::{BoolOpt, Data, PathOpt, StrOpt, USizeOpt};
use crate::{ArcPath, ArcStr, log::LogLevel};

/// Mock implementation of the Config actor for testing purposes.
///
/// This struct stores configuration data in memory,
/// allowing tests to run without creating actual configuration files.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<Data>>,
}

impl Mock {
    pub fn new(data: Data) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Mock implementation is a no-op that always succeeds.
    pub async fn load(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Mock implementation is a no-op that always succeeds.
    pub async fn save(&self) -> anyhow::Result<()> {
        Ok(())
    }

    pub async fn path(&self, opt: PathOpt) -> ArcPath {
        self.data.lock().await.path(opt)
    }

    pub async fn set_path(&self, opt: PathOpt, path: ArcPath) {
        self.data.lock().await.set_path(opt, path);
    }

    pub async fn log_level(&self) -> LogLevel {
        self.data.lock().await.log_level()
    }

    pub async fn set_log_level(&self, level: LogLevel) {
        self.data.lock().await.set_log_level(level);
    }

    pub async fn usize(&self, opt: USizeOpt) -> usize {
        self.data.lock().await.usize(opt)
    }

    pub async fn set_usize(&self, opt: USizeOpt, value: usize) {
        self.data.lock().await.set_usize(opt, value);
    }

    pub async fn str(&self, opt: StrOpt) -> ArcStr {
        self.data.lock().await.str(opt)
    }

    pub async fn set_str(&self, opt: StrOpt, value: ArcStr) {
        self.data.lock().await.set_str(opt, value);
    }

    pub async fn bool(&self, opt: BoolOpt) -> bool {
        self.data.lock().await.bool(opt)
    }

    pub async fn set_bool(&self, opt: BoolOpt, value: bool) {
        self.data.lock().await.set_bool(opt, value);
    }

    /// Gets a copy of the mock data for inspection in tests.
    pub async fn get_data(&self) -> Data {
        self.data.lock().await.clone()
    }
}
