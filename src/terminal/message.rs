use tokio::sync::oneshot;

use super::data::View;

/// Messages that can be sent to the terminal actor.
#[derive(Debug)]
pub enum Message {
    /// Draw the given view
    Show {
        view: View,
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
    /// Restore the terminal and stop reading input
    Quit { tx: oneshot::Sender<anyhow::Result<()>> },
}
