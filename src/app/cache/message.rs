use tokio::sync::oneshot::Sender;

use super::QueryKey;
use crate::api::catalog::{FetchError, ResultPage};

#[derive(Debug)]
pub enum Message {
    Get {
        key: QueryKey,
        tx: Sender<Result<ResultPage, FetchError>>,
    },
    /// Result of a fetch started by the actor itself
    Fetched {
        key: QueryKey,
        generation: u64,
        result: Result<ResultPage, FetchError>,
    },
    Invalidate {
        tx: Sender<()>,
    },
    Len {
        tx: Sender<usize>,
    },
}
