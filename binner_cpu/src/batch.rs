// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::manager::{MAX_ITEMS, MAX_STATES};
use crate::rasterizer::Rasterizer;
use binner_common::coords::BinCoords;
use binner_common::item::BinItem;
use binner_common::queue::BinQueue;
use core::fmt::{Debug, Formatter};

/// The queues of one flush cycle.
///
/// The manager is the only one mutating a batch. Between a flush and the following drain, the
/// batch is shared read-only with the tasks rasterizing it.
pub(crate) struct Batch<R: Rasterizer> {
    pub(crate) states: BinQueue<R::State, MAX_STATES>,
    pub(crate) items: BinQueue<BinItem<R::Vertex>, MAX_ITEMS>,
}

impl<R: Rasterizer> Batch<R> {
    pub(crate) fn new() -> Self {
        Self {
            states: BinQueue::new(),
            items: BinQueue::new(),
        }
    }

    /// Draw every queued item overlapping `range`, in submission order.
    pub(crate) fn run_task(&self, rasterizer: &R, range: BinCoords) {
        for item in self.items.iter() {
            let clip = item.range.intersect(range);

            if clip.is_invalid() {
                continue;
            }

            rasterizer.draw(item, &self.states[item.state], clip);
        }
    }
}

impl<R: Rasterizer> Debug for Batch<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Batch")
            .field("states", &self.states)
            .field("items", &self.items)
            .finish()
    }
}
