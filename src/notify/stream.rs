/*!
 * Stream Notifier
 * Writes encoded completions to per-target byte sinks (sockets, pipes, buffers)
 */

use super::{Notifier, ProcessMessage};
use crate::core::errors::NotifyError;
use crate::core::types::{NotifyResult, NotifyTarget};
use ahash::HashMap;
use parking_lot::Mutex;
use std::io::Write;

/// Writes each message with a single `write` call
///
/// A short write is reported as [`NotifyError::PartialWrite`] and the rest
/// of the message is discarded; sinks are expected to be non-blocking.
pub struct StreamNotifier<W: Write + Send> {
    sinks: Mutex<HashMap<NotifyTarget, W>>,
}

impl<W: Write + Send> StreamNotifier<W> {
    pub fn new() -> Self {
        Self {
            sinks: Mutex::new(HashMap::default()),
        }
    }

    /// Attach a sink for `target`, returning the one it replaces
    pub fn attach(&self, target: NotifyTarget, sink: W) -> Option<W> {
        self.sinks.lock().insert(target, sink)
    }

    /// Detach and return the sink for `target`
    pub fn detach(&self, target: NotifyTarget) -> Option<W> {
        self.sinks.lock().remove(&target)
    }
}

impl<W: Write + Send> Default for StreamNotifier<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Notifier for StreamNotifier<W> {
    fn notify(&self, target: NotifyTarget, message: &ProcessMessage) -> NotifyResult<()> {
        let bytes = message.encode()?;

        let mut sinks = self.sinks.lock();
        let sink = sinks
            .get_mut(&target)
            .ok_or(NotifyError::UnknownTarget(target))?;

        let written = sink.write(&bytes).map_err(|e| NotifyError::Io {
            target,
            message: e.to_string().into(),
        })?;

        if written != bytes.len() {
            return Err(NotifyError::PartialWrite {
                target,
                written,
                expected: bytes.len(),
            });
        }
        Ok(())
    }
}
