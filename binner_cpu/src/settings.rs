// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::error::BinError;

/// The largest number of tasks a single flush can be split into.
pub const MAX_POSSIBLE_TASKS: u16 = 64;

/// Settings to apply to a [`BinManager`](crate::BinManager).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BinSettings {
    /// The number of worker threads that should be used for rasterization. Setting this
    /// to 0 means that all tasks run on the thread that flushes the queue.
    ///
    /// A flush is split into at most `max(num_threads, 1)` tasks. If the `multithreading`
    /// feature is disabled, any value is treated like 0.
    pub num_threads: u16,
}

impl BinSettings {
    /// Use one worker thread per available CPU core, capped at [`MAX_POSSIBLE_TASKS`].
    ///
    /// Falls back to a single thread if the available parallelism can't be queried.
    pub fn from_available_parallelism() -> Self {
        let num_threads = std::thread::available_parallelism()
            .map(|n| u16::try_from(n.get()).unwrap_or(MAX_POSSIBLE_TASKS))
            .unwrap_or(1)
            .min(MAX_POSSIBLE_TASKS);

        Self { num_threads }
    }

    /// The maximum number of tasks a flush is split into.
    pub fn max_tasks(self) -> u16 {
        self.num_threads.max(1)
    }

    pub(crate) fn validate(self) -> Result<(), BinError> {
        if self.num_threads > MAX_POSSIBLE_TASKS {
            return Err(BinError::TooManyThreads {
                requested: self.num_threads,
                max: MAX_POSSIBLE_TASKS,
            });
        }

        Ok(())
    }
}
