use tokio::sync::oneshot::Sender;

use super::{Category, DetailRecord, FetchError, ItemId, MediaKind, ResultPage};
use crate::ArcStr;

/// Messages that can be sent to the [`CatalogApi`](super::CatalogApi) actor.
#[derive(Debug)]
pub enum Message {
    /// Fetches one page of a list
    List {
        category: Category,
        keyword: Option<ArcStr>,
        page: Option<u32>,
        tx: Sender<Result<ResultPage, FetchError>>,
    },
    /// Fetches the detail record of one item
    Details {
        kind: MediaKind,
        id: ItemId,
        tx: Sender<Result<DetailRecord, FetchError>>,
    },
}
