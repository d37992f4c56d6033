// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::{Display, Formatter};

/// Why the queued primitives were flushed or drained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlushReason {
    /// [`BinManager::flush`](crate::BinManager::flush) was called.
    Explicit,
    /// [`BinManager::drain`](crate::BinManager::drain) was called with unflushed primitives.
    Drain,
    /// The state history was full when a new state snapshot arrived.
    States,
    /// The item queue was full when a new primitive arrived.
    Items,
    /// New work was submitted while the previous flush was still being rasterized.
    Resubmit,
}

impl FlushReason {
    /// The number of different reasons.
    pub const COUNT: usize = 5;

    /// All reasons, in the order used by [`BinStats::flushes`].
    pub const ALL: [Self; Self::COUNT] = [
        Self::Explicit,
        Self::Drain,
        Self::States,
        Self::Items,
        Self::Resubmit,
    ];

    fn idx(self) -> usize {
        self as usize
    }

    /// A short, human readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Drain => "drain",
            Self::States => "states",
            Self::Items => "items",
            Self::Resubmit => "resubmit",
        }
    }
}

impl Display for FlushReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters describing the work done by a [`BinManager`](crate::BinManager).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinStats {
    /// Calls to [`BinManager::update_state`](crate::BinManager::update_state).
    pub state_updates: u64,
    /// Primitives that were queued.
    pub items_enqueued: u64,
    /// Primitives that were dropped because they lie outside of the scissor.
    pub items_culled: u64,
    /// Tasks handed to the rasterizer.
    pub tasks_dispatched: u64,
    /// Flushes that were split into more than one task.
    pub split_flushes: u64,
    flushes: [u64; FlushReason::COUNT],
    drains: [u64; FlushReason::COUNT],
}

impl BinStats {
    /// The number of flushes caused by `reason`.
    pub fn flushes(&self, reason: FlushReason) -> u64 {
        self.flushes[reason.idx()]
    }

    /// The number of flushes for any reason.
    pub fn total_flushes(&self) -> u64 {
        self.flushes.iter().sum()
    }

    /// The number of times the manager blocked on in-flight tasks because of `reason`.
    ///
    /// Never counted for [`FlushReason::Explicit`], since flushing doesn't wait.
    pub fn drains(&self, reason: FlushReason) -> u64 {
        self.drains[reason.idx()]
    }

    pub(crate) fn record_flush(&mut self, reason: FlushReason, tasks: usize, split: bool) {
        self.flushes[reason.idx()] += 1;
        self.tasks_dispatched += tasks as u64;
        self.split_flushes += u64::from(split);
    }

    pub(crate) fn record_drain(&mut self, reason: FlushReason) {
        self.drains[reason.idx()] += 1;
    }
}

#[cfg(test)]
mod tests {
    use crate::stats::{BinStats, FlushReason};

    #[test]
    fn reasons_are_counted_separately() {
        let mut stats = BinStats::default();
        stats.record_flush(FlushReason::Items, 4, true);
        stats.record_flush(FlushReason::Items, 1, false);
        stats.record_flush(FlushReason::Drain, 2, true);

        assert_eq!(stats.flushes(FlushReason::Items), 2);
        assert_eq!(stats.flushes(FlushReason::Drain), 1);
        assert_eq!(stats.flushes(FlushReason::Explicit), 0);
        assert_eq!(stats.total_flushes(), 3);
        assert_eq!(stats.tasks_dispatched, 7);
        assert_eq!(stats.split_flushes, 2);
    }

    #[test]
    fn drains_are_tracked_apart_from_flushes() {
        let mut stats = BinStats::default();
        stats.record_flush(FlushReason::Explicit, 1, false);
        stats.record_drain(FlushReason::Resubmit);

        assert_eq!(stats.flushes(FlushReason::Resubmit), 0);
        assert_eq!(stats.drains(FlushReason::Resubmit), 1);
        assert_eq!(stats.drains(FlushReason::Explicit), 0);
        assert_eq!(stats.total_flushes(), 1);
    }

    #[test]
    fn all_reasons_have_distinct_slots() {
        for (i, reason) in FlushReason::ALL.into_iter().enumerate() {
            assert_eq!(reason.idx(), i, "{reason}");
        }
    }
}
