// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "multithreading")]
pub(crate) mod multi_threaded;
pub(crate) mod single_threaded;

use crate::batch::Batch;
use crate::rasterizer::Rasterizer;
use crate::waitable::BinWaitable;
use binner_common::coords::BinCoords;
use core::fmt::Debug;
use std::sync::Arc;

/// Runs the tasks of a flush.
pub(crate) trait Dispatcher<R: Rasterizer>: Debug + Send + Sync {
    /// Start one task per range, each drawing the items of `batch` that overlap its range.
    ///
    /// Every task arms a signal on `waitable` and fires it after it has released its reference
    /// to `batch`.
    fn dispatch(
        &mut self,
        rasterizer: &Arc<R>,
        batch: &Arc<Batch<R>>,
        ranges: &[BinCoords],
        waitable: &mut BinWaitable,
    );
}
