use std::{collections::HashMap, env::VarError, sync::Arc};

use tokio::sync::Mutex;

use crate::ArcStr;

/// In-memory environment used by tests, so they never touch the real
/// process environment.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    variables: Arc<Mutex<HashMap<ArcStr, ArcStr>>>,
}

impl Mock {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_variables(variables: HashMap<ArcStr, ArcStr>) -> Self {
        Self {
            variables: Arc::new(Mutex::new(variables)),
        }
    }

    pub async fn set_env(&self, key: ArcStr, value: ArcStr) {
        self.variables.lock().await.insert(key, value);
    }

    pub async fn unset_env(&self, key: ArcStr) {
        self.variables.lock().await.remove(&key);
    }

    pub async fn env(&self, key: ArcStr) -> Result<ArcStr, VarError> {
        self.variables
            .lock()
            .await
            .get(&key)
            .cloned()
            .ok_or(VarError::NotPresent)
    }
}
