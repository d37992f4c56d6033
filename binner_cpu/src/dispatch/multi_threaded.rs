// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::batch::Batch;
use crate::dispatch::Dispatcher;
use crate::error::BinError;
use crate::rasterizer::Rasterizer;
use crate::waitable::BinWaitable;
use binner_common::coords::BinCoords;
use core::fmt::{Debug, Formatter};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// Runs the tasks of a flush on a dedicated pool of worker threads.
pub(crate) struct MultiThreadedDispatcher {
    thread_pool: ThreadPool,
    num_threads: u16,
}

impl MultiThreadedDispatcher {
    pub(crate) fn new(num_threads: u16) -> Result<Self, BinError> {
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(usize::from(num_threads))
            .thread_name(|idx| format!("binner-worker-{idx}"))
            .build()?;

        Ok(Self {
            thread_pool,
            num_threads,
        })
    }
}

impl<R: Rasterizer> Dispatcher<R> for MultiThreadedDispatcher {
    fn dispatch(
        &mut self,
        rasterizer: &Arc<R>,
        batch: &Arc<Batch<R>>,
        ranges: &[BinCoords],
        waitable: &mut BinWaitable,
    ) {
        for &range in ranges {
            let signal = waitable.arm();
            let rasterizer = rasterizer.clone();
            let batch = batch.clone();

            self.thread_pool.spawn(move || {
                batch.run_task(&rasterizer, range);

                // The manager reclaims exclusive access to the batch as soon as all signals have
                // fired, so our reference must be gone by then.
                drop(batch);
                signal.signal();
            });
        }
    }
}

impl Debug for MultiThreadedDispatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MultiThreadedDispatcher")
            .field("num_threads", &self.num_threads)
            .finish_non_exhaustive()
    }
}
