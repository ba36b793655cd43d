/*!
 * Notification Tests
 * Completion delivery through each notifier, including failed deliveries
 */

use pretty_assertions::assert_eq;
use sched_sim::notify::MESSAGE_WIRE_SIZE;
use sched_sim::{
    ChannelNotifier, ProcessMessage, ProcessRecord, SchedulingPolicy, Simulation,
    StreamNotifier, Timing,
};
use std::io::{self, Write};
use std::sync::Arc;

/// Sink that never accepts more than `limit` bytes in one write
struct ShortWriter {
    limit: usize,
    data: Vec<u8>,
}

impl Write for ShortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.limit);
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink whose peer has gone away
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn round_robin(notifier: Arc<dyn sched_sim::Notifier>) -> Simulation {
    Simulation::new(SchedulingPolicy::RoundRobin, Timing::default(), notifier)
}

#[test]
fn test_unknown_target_still_releases() {
    let notifier = Arc::new(ChannelNotifier::new(4));
    let mut sim = round_robin(notifier);
    sim.admit(ProcessRecord::new(1, 300, 42)).unwrap();

    let summary = sim.run_until_idle(100);

    assert!(!summary.truncated);
    assert!(sim.cpu().is_idle());
    assert_eq!(summary.stats.completions, 1);
    assert_eq!(summary.stats.notify_failures, 1);
    assert_eq!(summary.completions.len(), 1);
}

#[test]
fn test_disconnected_receiver() {
    let notifier = Arc::new(ChannelNotifier::new(4));
    drop(notifier.register(1));
    let mut sim = round_robin(notifier.clone());
    sim.admit(ProcessRecord::new(1, 200, 1)).unwrap();

    let summary = sim.run_until_idle(100);

    assert_eq!(summary.stats.notify_failures, 1);
    assert_eq!(summary.completions.len(), 1);
    assert!(!notifier.is_registered(1));
}

#[test]
fn test_full_channel_drops_notice() {
    let notifier = Arc::new(ChannelNotifier::new(1));
    let rx = notifier.register(7);
    let mut sim = round_robin(notifier);
    sim.admit(ProcessRecord::new(1, 100, 7)).unwrap();
    sim.admit(ProcessRecord::new(2, 100, 7)).unwrap();

    let summary = sim.run_until_idle(100);

    assert_eq!(summary.stats.completions, 2);
    assert_eq!(summary.stats.notify_failures, 1);
    let received: Vec<ProcessMessage> = rx.try_iter().collect();
    assert_eq!(received, vec![ProcessMessage::done(1, 100)]);
}

#[test]
fn test_one_notice_per_process() {
    let notifier = Arc::new(ChannelNotifier::new(8));
    let rx = notifier.register(1);
    let mut sim = Simulation::new(SchedulingPolicy::Mlfq, Timing::default(), notifier);
    for pid in 1..=4 {
        sim.admit(ProcessRecord::new(pid, 600, 1)).unwrap();
    }

    sim.run_until_idle(1000);

    let mut pids: Vec<u32> = rx.try_iter().map(|m| m.pid).collect();
    pids.sort_unstable();
    assert_eq!(pids, vec![1, 2, 3, 4]);
}

#[test]
fn test_stream_delivery_encodes_message() {
    let notifier = Arc::new(StreamNotifier::<Vec<u8>>::new());
    notifier.attach(3, Vec::new());
    let mut sim = round_robin(notifier.clone());
    sim.admit(ProcessRecord::new(5, 1200, 3)).unwrap();

    sim.run_until_idle(100);

    let bytes = notifier.detach(3).unwrap();
    assert_eq!(bytes.len(), MESSAGE_WIRE_SIZE);
    assert_eq!(
        ProcessMessage::decode(&bytes).unwrap(),
        ProcessMessage::done(5, 1200)
    );
}

#[test]
fn test_partial_write_counted_not_retried() {
    let notifier = Arc::new(StreamNotifier::new());
    notifier.attach(
        1,
        ShortWriter {
            limit: 4,
            data: Vec::new(),
        },
    );
    let mut sim = round_robin(notifier.clone());
    sim.admit(ProcessRecord::new(1, 300, 1)).unwrap();

    let summary = sim.run_until_idle(100);

    assert_eq!(summary.stats.notify_failures, 1);
    assert!(sim.cpu().is_idle());
    assert_eq!(notifier.detach(1).unwrap().data.len(), 4);
}

#[test]
fn test_write_error_counted() {
    let notifier = Arc::new(StreamNotifier::new());
    notifier.attach(1, BrokenPipe);
    let mut sim = round_robin(notifier);
    sim.admit(ProcessRecord::new(1, 100, 1)).unwrap();

    let summary = sim.run_until_idle(100);

    assert_eq!(summary.stats.notify_failures, 1);
    assert_eq!(summary.completions.len(), 1);
}
