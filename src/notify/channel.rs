/*!
 * Channel Notifier
 * Per-target bounded flume channels
 */

use super::{Notifier, ProcessMessage};
use crate::core::errors::NotifyError;
use crate::core::types::{NotifyResult, NotifyTarget};
use ahash::RandomState;
use dashmap::DashMap;
use log::debug;

/// Delivers completions over one bounded channel per target
///
/// Sends use `try_send`, so a slow receiver shows up as
/// [`NotifyError::Full`] instead of stalling the tick.
pub struct ChannelNotifier {
    capacity: usize,
    targets: DashMap<NotifyTarget, flume::Sender<ProcessMessage>, RandomState>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            targets: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Register a target and hand back its receiving end
    ///
    /// Registering an existing target replaces its channel.
    pub fn register(&self, target: NotifyTarget) -> flume::Receiver<ProcessMessage> {
        let (tx, rx) = flume::bounded(self.capacity);
        self.targets.insert(target, tx);
        debug!("Notification target {} registered", target);
        rx
    }

    pub fn unregister(&self, target: NotifyTarget) -> bool {
        self.targets.remove(&target).is_some()
    }

    pub fn is_registered(&self, target: NotifyTarget) -> bool {
        self.targets.contains_key(&target)
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, target: NotifyTarget, message: &ProcessMessage) -> NotifyResult<()> {
        let result = match self.targets.get(&target) {
            Some(tx) => tx.try_send(*message),
            None => return Err(NotifyError::UnknownTarget(target)),
        };

        match result {
            Ok(()) => Ok(()),
            Err(flume::TrySendError::Full(_)) => Err(NotifyError::Full(target)),
            Err(flume::TrySendError::Disconnected(_)) => {
                self.targets.remove(&target);
                debug!("Notification target {} disconnected, dropped", target);
                Err(NotifyError::Disconnected(target))
            }
        }
    }
}
