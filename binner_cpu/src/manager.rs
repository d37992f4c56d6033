// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queueing primitives and flushing them to the rasterizer.

use crate::batch::Batch;
use crate::dispatch::single_threaded::SingleThreadedDispatcher;
use crate::dispatch::Dispatcher;
use crate::error::BinError;
use crate::rasterizer::Rasterizer;
use crate::settings::BinSettings;
use crate::stats::{BinStats, FlushReason};
use crate::waitable::BinWaitable;
use binner_common::coords::BinCoords;
use binner_common::item::{BinItem, BinItemType, BinVertex};
use binner_common::partition::split_rows;
use binner_common::queue::Slot;
use core::fmt::{Debug, Formatter};
use smallvec::{smallvec, SmallVec};
use std::sync::Arc;

/// The number of state snapshots that can be referenced by queued primitives at once.
pub const MAX_STATES: usize = 32;
/// The number of primitives that can be queued at once.
pub const MAX_ITEMS: usize = 1024;

/// Where a [`BinManager`] is in its submission cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinPhase {
    /// No primitive is queued.
    Empty,
    /// Primitives are queued but haven't been flushed yet.
    Accumulating,
    /// The queued primitives are being rasterized.
    Dispatched,
}

/// Bins primitives by the screen range they cover and hands them to a [`Rasterizer`].
///
/// All methods must be called from the same thread. Rasterization happens during
/// [`flush`](BinManager::flush), either on the calling thread or on a pool of worker threads,
/// depending on the [`BinSettings`] the manager was created with.
///
/// Submitting new work while a flush is still being rasterized first waits for that flush to
/// complete, so the queues are never mutated while worker threads read them.
pub struct BinManager<R: Rasterizer> {
    rasterizer: Arc<R>,
    batch: Arc<Batch<R>>,
    /// The state snapshot new primitives are drawn with.
    state: Slot,
    /// Whether any queued primitive refers to `state`.
    state_in_use: bool,
    scissor: BinCoords,
    /// The union of the ranges of all queued primitives.
    queue_range: BinCoords,
    max_tasks: u16,
    tasks_split: bool,
    task_ranges: Vec<BinCoords>,
    waitable: BinWaitable,
    dispatcher: Box<dyn Dispatcher<R>>,
    phase: BinPhase,
    stats: BinStats,
}

impl<R: Rasterizer> BinManager<R> {
    /// Create a new manager that rasterizes on the calling thread.
    pub fn new(rasterizer: R) -> Self {
        Self::with_dispatcher(rasterizer, 1, Box::new(SingleThreadedDispatcher))
    }

    /// Create a new manager with the given settings.
    pub fn with_settings(rasterizer: R, settings: BinSettings) -> Result<Self, BinError> {
        settings.validate()?;

        if settings.num_threads == 0 {
            return Ok(Self::new(rasterizer));
        }

        Self::with_worker_threads(rasterizer, settings)
    }

    #[cfg(feature = "multithreading")]
    fn with_worker_threads(rasterizer: R, settings: BinSettings) -> Result<Self, BinError> {
        use crate::dispatch::multi_threaded::MultiThreadedDispatcher;

        let dispatcher = MultiThreadedDispatcher::new(settings.num_threads)?;

        Ok(Self::with_dispatcher(
            rasterizer,
            settings.max_tasks(),
            Box::new(dispatcher),
        ))
    }

    #[cfg(not(feature = "multithreading"))]
    fn with_worker_threads(rasterizer: R, settings: BinSettings) -> Result<Self, BinError> {
        log::warn!(
            "requested {} worker threads, but the `multithreading` feature is disabled",
            settings.num_threads
        );

        Ok(Self::new(rasterizer))
    }

    fn with_dispatcher(
        rasterizer: R,
        max_tasks: u16,
        dispatcher: Box<dyn Dispatcher<R>>,
    ) -> Self {
        let mut batch = Batch::<R>::new();
        let state = batch.states.push(R::State::default());

        Self {
            rasterizer: Arc::new(rasterizer),
            batch: Arc::new(batch),
            state,
            state_in_use: false,
            scissor: BinCoords::UNBOUNDED,
            queue_range: BinCoords::INVALID,
            max_tasks,
            tasks_split: false,
            task_ranges: Vec::with_capacity(usize::from(max_tasks)),
            waitable: BinWaitable::new(),
            dispatcher,
            phase: BinPhase::Empty,
            stats: BinStats::default(),
        }
    }

    /// Make `state` the snapshot subsequent primitives are drawn with, and `scissor` the
    /// rectangle they are clipped to.
    ///
    /// Call this whenever the rasterizer configuration changed since the last primitive was
    /// submitted. If the state history is full, the queue is drained first.
    pub fn update_state(&mut self, state: R::State, scissor: BinCoords) {
        self.wait_for_dispatched();

        if !self.state_in_use {
            // Nothing refers to the current snapshot yet, so there is no point in keeping it.
            let slot = self.state;
            self.batch_mut().states[slot] = state;
        } else {
            if self.batch.states.is_full() {
                self.drain_with(FlushReason::States);
            }

            self.state = self.batch_mut().states.push(state);
            self.state_in_use = false;
        }

        self.scissor = scissor;
        self.stats.state_updates += 1;
    }

    /// The snapshot new primitives are drawn with.
    pub fn state(&self) -> &R::State {
        &self.batch.states[self.state]
    }

    /// The rectangle new primitives are clipped to.
    pub fn scissor(&self) -> BinCoords {
        self.scissor
    }

    /// Queue a triangle.
    pub fn add_triangle(&mut self, v0: &R::Vertex, v1: &R::Vertex, v2: &R::Vertex) {
        let range = range3(v0, v1, v2);
        self.enqueue(
            BinItemType::Triangle,
            range,
            smallvec![v0.clone(), v1.clone(), v2.clone()],
        );
    }

    /// Queue a clear of the rectangle spanned by `v0` and `v1`.
    pub fn add_clear_rect(&mut self, v0: &R::Vertex, v1: &R::Vertex) {
        let range = range2(v0, v1);
        self.enqueue(
            BinItemType::ClearRect,
            range,
            smallvec![v0.clone(), v1.clone()],
        );
    }

    /// Queue a sprite spanned by `v0` and `v1`.
    pub fn add_sprite(&mut self, v0: &R::Vertex, v1: &R::Vertex) {
        let range = range2(v0, v1);
        self.enqueue(BinItemType::Sprite, range, smallvec![v0.clone(), v1.clone()]);
    }

    /// Queue a line from `v0` to `v1`.
    pub fn add_line(&mut self, v0: &R::Vertex, v1: &R::Vertex) {
        let range = range2(v0, v1);
        self.enqueue(BinItemType::Line, range, smallvec![v0.clone(), v1.clone()]);
    }

    /// Queue a point.
    pub fn add_point(&mut self, v0: &R::Vertex) {
        let range = point_range(v0);
        self.enqueue(BinItemType::Point, range, smallvec![v0.clone()]);
    }

    /// Start rasterizing all queued primitives.
    ///
    /// The queued range is split into up to [`max_tasks`](BinManager::max_tasks) bands, and one
    /// task is started per band. This doesn't wait for the tasks to complete, use
    /// [`drain`](BinManager::drain) for that. Does nothing if no primitive is queued, or if the
    /// queue was already flushed.
    pub fn flush(&mut self) {
        self.flush_with(FlushReason::Explicit);
    }

    /// Rasterize all queued primitives and wait until that's done.
    ///
    /// Afterwards, the queue is empty and only the current state snapshot is retained. Returns
    /// immediately if no primitive is queued.
    pub fn drain(&mut self) {
        self.drain_with(FlushReason::Drain);
    }

    /// The union of the ranges of all queued primitives, or an invalid rectangle if the queue
    /// is empty.
    pub fn queue_range(&self) -> BinCoords {
        self.queue_range
    }

    /// The number of queued primitives.
    pub fn queued_items(&self) -> usize {
        self.batch.items.len()
    }

    /// The number of state snapshots in the state history.
    pub fn queued_states(&self) -> usize {
        self.batch.states.len()
    }

    /// Iterate over the queued primitives in submission order.
    pub fn items(&self) -> impl Iterator<Item = &BinItem<R::Vertex>> + '_ {
        self.batch.items.iter()
    }

    /// The task ranges of the current flush. Empty if the queue hasn't been flushed.
    pub fn task_ranges(&self) -> &[BinCoords] {
        &self.task_ranges
    }

    /// Whether the current flush was split into more than one task.
    pub fn tasks_split(&self) -> bool {
        self.tasks_split
    }

    /// The maximum number of tasks a flush is split into.
    pub fn max_tasks(&self) -> u16 {
        self.max_tasks
    }

    /// Where the manager is in its submission cycle.
    pub fn phase(&self) -> BinPhase {
        self.phase
    }

    /// The rasterization back end.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Counters describing the work done so far.
    pub fn stats(&self) -> &BinStats {
        &self.stats
    }

    /// Reset all counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats = BinStats::default();
    }

    fn enqueue(
        &mut self,
        kind: BinItemType,
        range: BinCoords,
        vertices: SmallVec<[R::Vertex; 3]>,
    ) {
        let range = self.clip_to_scissor(range);

        if range.is_invalid() {
            log::trace!("dropping {kind:?} outside of the scissor");
            self.stats.items_culled += 1;
            return;
        }

        self.wait_for_dispatched();

        if self.batch.items.is_full() {
            self.drain_with(FlushReason::Items);
        }

        let item = BinItem::new(kind, self.state, range, vertices);
        self.batch_mut().items.push(item);
        self.state_in_use = true;
        self.stats.items_enqueued += 1;

        self.expand(range);
        self.phase = BinPhase::Accumulating;
    }

    fn clip_to_scissor(&self, range: BinCoords) -> BinCoords {
        range.intersect(self.scissor)
    }

    fn expand(&mut self, range: BinCoords) {
        if self.queue_range.is_invalid() {
            self.queue_range = range;
        } else if !range.is_invalid() {
            self.queue_range = BinCoords {
                x1: self.queue_range.x1.min(range.x1),
                y1: self.queue_range.y1.min(range.y1),
                x2: self.queue_range.x2.max(range.x2),
                y2: self.queue_range.y2.max(range.y2),
            };
        }
    }

    fn flush_with(&mut self, reason: FlushReason) {
        if self.phase != BinPhase::Accumulating {
            return;
        }

        self.tasks_split = split_rows(self.queue_range, self.max_tasks, &mut self.task_ranges);

        log::debug!(
            "flushing {} items over {:?} in {} tasks ({reason})",
            self.batch.items.len(),
            self.queue_range,
            self.task_ranges.len()
        );

        self.stats
            .record_flush(reason, self.task_ranges.len(), self.tasks_split);
        self.dispatcher.dispatch(
            &self.rasterizer,
            &self.batch,
            &self.task_ranges,
            &mut self.waitable,
        );
        self.phase = BinPhase::Dispatched;
    }

    fn drain_with(&mut self, reason: FlushReason) {
        match self.phase {
            BinPhase::Empty => return,
            BinPhase::Accumulating => self.flush_with(reason),
            BinPhase::Dispatched => {}
        }

        if reason != FlushReason::Drain {
            log::debug!("implicit drain ({reason})");
        }
        self.stats.record_drain(reason);

        self.waitable.wait_for_all();
        self.reset();
    }

    /// Wait for the previous flush before the queues are mutated again.
    fn wait_for_dispatched(&mut self) {
        if self.phase == BinPhase::Dispatched {
            self.drain_with(FlushReason::Resubmit);
        }
    }

    fn reset(&mut self) {
        self.phase = BinPhase::Empty;

        let batch = self.batch_mut();
        batch.items.reset();
        // The current snapshot is the most recent one, so it survives.
        while batch.states.len() > 1 {
            batch.states.skip_next();
        }

        self.state_in_use = false;
        self.queue_range = BinCoords::INVALID;
        self.tasks_split = false;
        self.task_ranges.clear();
    }

    fn batch_mut(&mut self) -> &mut Batch<R> {
        debug_assert_ne!(self.phase, BinPhase::Dispatched);

        // Tasks release the batch before they signal completion, so after waiting for them
        // we are the only owner again.
        Arc::get_mut(&mut self.batch).expect("bin queues are still shared with running tasks")
    }
}

impl<R: Rasterizer> Drop for BinManager<R> {
    fn drop(&mut self) {
        // Running tasks only hold onto shared data, but the rasterizer may expect all of its
        // work to be finished once the manager is gone.
        self.waitable.wait_for_all();
    }
}

impl<R: Rasterizer> Debug for BinManager<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BinManager")
            .field("phase", &self.phase)
            .field("scissor", &self.scissor)
            .field("queue_range", &self.queue_range)
            .field("max_tasks", &self.max_tasks)
            .field("batch", &self.batch)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

fn range3<V: BinVertex>(v0: &V, v1: &V, v2: &V) -> BinCoords {
    BinCoords::bounding([v0.screen_pos(), v1.screen_pos(), v2.screen_pos()])
}

fn range2<V: BinVertex>(v0: &V, v1: &V) -> BinCoords {
    BinCoords::bounding([v0.screen_pos(), v1.screen_pos()])
}

fn point_range<V: BinVertex>(v0: &V) -> BinCoords {
    let (x, y) = v0.screen_pos();
    let size = v0.point_size().max(1);

    BinCoords::new(
        x,
        y,
        x.saturating_add(size - 1),
        y.saturating_add(size - 1),
    )
}
