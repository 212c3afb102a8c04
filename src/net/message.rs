use tokio::sync::oneshot::Sender;

use super::NetError;
use crate::ArcStr;

/// Messages that can be sent to the [`Net`](super::Net) actor.
#[derive(Debug)]
pub enum Message {
    /// Performs an HTTP GET request to the specified URL
    Get {
        url: ArcStr,
        tx: Sender<Result<ArcStr, NetError>>,
    },
}
