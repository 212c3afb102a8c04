use std::env::VarError;

use tokio::sync::oneshot;

use crate::ArcStr;

/// Messages that can be sent to an [`Env`](super::Env) actor.
#[derive(Debug)]
pub enum Message {
    /// Sets an environment variable to a specified value
    Set { key: ArcStr, value: ArcStr },
    /// Unsets an environment variable
    Unset { key: ArcStr },
    /// Gets an environment variable
    Get {
        key: ArcStr,
        /// Channel to send the result back to the caller
        tx: oneshot::Sender<Result<ArcStr, VarError>>,
    },
}
