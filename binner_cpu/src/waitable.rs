// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Completion tracking for dispatched tasks.

use crossbeam_channel::{Receiver, Sender};

/// Waits for the completion of a number of dispatched tasks.
///
/// Every task gets a [`BinSignal`] from [`arm`](BinWaitable::arm) and fires it once it's done.
/// [`wait_for_all`](BinWaitable::wait_for_all) then blocks until all armed signals have
/// fired. The waitable can be reused for any number of dispatch cycles.
#[derive(Debug)]
pub struct BinWaitable {
    sender: Sender<()>,
    receiver: Receiver<()>,
    pending: usize,
}

/// The completion handle of a single task.
///
/// Signalling consumes the handle, so each task signals exactly once. A handle that is dropped
/// without signalling, for example while a panicking task unwinds, signals on drop.
#[derive(Debug)]
#[must_use = "dropping the signal marks the task as completed right away"]
pub struct BinSignal {
    sender: Option<Sender<()>>,
}

impl BinWaitable {
    /// Create a new waitable without any pending task.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();

        Self {
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Register one more pending task and return its completion handle.
    pub fn arm(&mut self) -> BinSignal {
        self.pending += 1;

        BinSignal {
            sender: Some(self.sender.clone()),
        }
    }

    /// The number of armed tasks that haven't been waited for yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Block until every armed task has signalled.
    ///
    /// Returns immediately if nothing is pending. There is no timeout.
    pub fn wait_for_all(&mut self) {
        while self.pending > 0 {
            // We hold a sender ourselves, so the channel can't disconnect.
            if self.receiver.recv().is_err() {
                break;
            }

            self.pending -= 1;
        }
    }
}

impl Default for BinWaitable {
    fn default() -> Self {
        Self::new()
    }
}

impl BinSignal {
    /// Mark the task as completed.
    pub fn signal(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(sender) = self.sender.take() {
            // Can only fail if the waitable is gone, in which case nobody is waiting anymore.
            let _ = sender.send(());
        }
    }
}

impl Drop for BinSignal {
    fn drop(&mut self) {
        self.fire();
    }
}

#[cfg(test)]
mod tests {
    use crate::waitable::BinWaitable;
    use std::thread;

    #[test]
    fn nothing_pending_returns_immediately() {
        let mut waitable = BinWaitable::new();
        waitable.wait_for_all();
        assert_eq!(waitable.pending(), 0);
    }

    #[test]
    fn waits_for_all_signals() {
        let mut waitable = BinWaitable::new();

        let handles = (0..4)
            .map(|_| {
                let signal = waitable.arm();
                thread::spawn(move || signal.signal())
            })
            .collect::<Vec<_>>();
        assert_eq!(waitable.pending(), 4);

        waitable.wait_for_all();
        assert_eq!(waitable.pending(), 0);

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn dropped_signal_counts_as_completed() {
        let mut waitable = BinWaitable::new();
        let signal = waitable.arm();
        waitable.arm().signal();

        let handle = thread::spawn(move || {
            let _signal = signal;
            panic!("task failed");
        });
        assert!(handle.join().is_err());

        waitable.wait_for_all();
        assert_eq!(waitable.pending(), 0);
    }

    #[test]
    fn reusable_across_cycles() {
        let mut waitable = BinWaitable::new();

        for cycle in 1..4 {
            for _ in 0..cycle {
                waitable.arm().signal();
            }
            waitable.wait_for_all();
            assert_eq!(waitable.pending(), 0);
        }
    }
}
