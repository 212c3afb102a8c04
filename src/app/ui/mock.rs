use std::sync::Arc;
use tokio::sync::Mutex;

use super::data::MockData;
use crate::app::state::Route;
use crate::terminal::{UiEvent, View};

/// Mock implementation of the UI actor, recording what it is asked to do.
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

    pub async fn send_event(&self, event: UiEvent) {
        self.data.lock().await.events.push(event);
    }

    pub async fn navigate(&self, route: Route) {
        self.data.lock().await.routes.push(route);
    }

    pub async fn view(&self) -> View {
        View::default()
    }

    pub async fn quit(&self) {
        self.data.lock().await.quit_called = true;
    }

    pub async fn get_data(&self) -> MockData {
        self.data.lock().await.clone()
    }
}
