use super::data::LogMessage;

/// Messages that can be sent to a [`LogCore`](super::core::LogCore) actor.
#[derive(Debug)]
pub enum Message {
    /// Logs a message with the specified level and content
    Log(LogMessage),
    /// Writes buffered messages to stderr and destroys the logger
    Flush,
    /// Runs the log garbage collector to delete old log files
    CollectGarbage,
}
