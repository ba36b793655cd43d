/*!
 * Completion Notification
 * Best-effort, non-blocking delivery of "process done" messages
 */

mod channel;
mod message;
mod stream;

pub use channel::ChannelNotifier;
pub use message::{ProcessMessage, RequestKind, MESSAGE_WIRE_SIZE};
pub use stream::StreamNotifier;

use crate::core::types::{NotifyResult, NotifyTarget};

/// Outbound side of the completion channel
///
/// Implementations must never block: a send either lands immediately or
/// fails with a [`NotifyError`](crate::core::errors::NotifyError). Callers
/// report failures and move on; nothing is retried.
pub trait Notifier: Send + Sync {
    fn notify(&self, target: NotifyTarget, message: &ProcessMessage) -> NotifyResult<()>;
}

/// Drops every message. For runs where nobody is listening.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _target: NotifyTarget, _message: &ProcessMessage) -> NotifyResult<()> {
        Ok(())
    }
}
