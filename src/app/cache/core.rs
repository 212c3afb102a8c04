use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::{QueryCache, QueryKey, message::Message};
use crate::api::catalog::{CatalogApi, FetchError, ResultPage};
use crate::log::Log;

const SCOPE: &str = "app.cache";

type Waiters = Vec<oneshot::Sender<Result<ResultPage, FetchError>>>;

/// Core implementation for the query cache actor.
pub struct Core {
    catalog: CatalogApi,
    log: Log,
    entries: HashMap<QueryKey, ResultPage>,
    /// Callers waiting on a fetch that is in flight, per generation and key.
    /// Gets after an invalidation never join a fetch started before it.
    pending: HashMap<(u64, QueryKey), Waiters>,
    /// Bumped on invalidation so fetches started before it are not stored
    generation: u64,
}

impl Core {
    pub fn new(catalog: CatalogApi, log: Log) -> Self {
        Self {
            catalog,
            log,
            entries: HashMap::new(),
            pending: HashMap::new(),
            generation: 0,
        }
    }

    /// Spawns the actor and returns the public interface and join handle.
    pub fn spawn(self) -> (QueryCache, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(crate::BUFFER_SIZE);
        let weak = tx.downgrade();

        let handle = tokio::spawn(async move {
            let mut core = self;

            while let Some(message) = rx.recv().await {
                match message {
                    Message::Get { key, tx } => core.handle_get(key, tx, &weak),
                    Message::Fetched {
                        key,
                        generation,
                        result,
                    } => core.handle_fetched(key, generation, result),
                    Message::Invalidate { tx } => {
                        core.entries.clear();
                        core.generation += 1;
                        core.log.info(SCOPE, "Cache invalidated");
                        let _ = tx.send(());
                    }
                    Message::Len { tx } => {
                        let _ = tx.send(core.entries.len());
                    }
                }
            }
        });

        (QueryCache::Actual(tx), handle)
    }

    fn handle_get(
        &mut self,
        key: QueryKey,
        tx: oneshot::Sender<Result<ResultPage, FetchError>>,
        this: &mpsc::WeakSender<Message>,
    ) {
        if let Some(page) = self.entries.get(&key) {
            let _ = tx.send(Ok(page.clone()));
            return;
        }
        let generation = self.generation;
        if let Some(waiters) = self.pending.get_mut(&(generation, key.clone())) {
            waiters.push(tx);
            return;
        }

        self.pending.insert((generation, key.clone()), vec![tx]);
        let catalog = self.catalog.clone();
        let this = this.clone();
        tokio::spawn(async move {
            let result = catalog.list(key.category, key.keyword.clone()).await;
            if let Some(this) = this.upgrade() {
                let _ = this
                    .send(Message::Fetched {
                        key,
                        generation,
                        result,
                    })
                    .await;
            }
        });
    }

    fn handle_fetched(
        &mut self,
        key: QueryKey,
        generation: u64,
        result: Result<ResultPage, FetchError>,
    ) {
        match &result {
            Ok(page) if generation == self.generation => {
                self.entries.insert(key.clone(), page.clone());
            }
            Ok(_) => {}
            Err(err) => self
                .log
                .warn(SCOPE, format!("Fetching {} failed: {}", key.category, err)),
        }

        for waiter in self.pending.remove(&(generation, key)).unwrap_or_default() {
            let _ = waiter.send(result.clone());
        }
    }
}
