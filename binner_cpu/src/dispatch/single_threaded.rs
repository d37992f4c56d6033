// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::batch::Batch;
use crate::dispatch::Dispatcher;
use crate::rasterizer::Rasterizer;
use crate::waitable::BinWaitable;
use binner_common::coords::BinCoords;
use std::sync::Arc;

/// Runs all tasks of a flush on the calling thread, before `dispatch` returns.
#[derive(Debug, Default)]
pub(crate) struct SingleThreadedDispatcher;

impl<R: Rasterizer> Dispatcher<R> for SingleThreadedDispatcher {
    fn dispatch(
        &mut self,
        rasterizer: &Arc<R>,
        batch: &Arc<Batch<R>>,
        ranges: &[BinCoords],
        waitable: &mut BinWaitable,
    ) {
        for &range in ranges {
            let signal = waitable.arm();
            batch.run_task(rasterizer, range);
            signal.signal();
        }
    }
}
