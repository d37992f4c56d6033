// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate implements the binning stage of a CPU-based rasterizer emulating a fixed-function
//! GPU.
//!
//! Primitives (triangles, clear rectangles, sprites, lines and points) are submitted to a
//! [`BinManager`] together with a snapshot of the rasterizer state they should be drawn with.
//! The manager computes the screen range each primitive covers, clips it to the active scissor
//! and queues it. Once the queue is flushed, the accumulated screen range is split into
//! non-overlapping horizontal bands, and each band is handed to the [`Rasterizer`] back end as
//! an independent task. Since no two tasks touch the same pixel, they can run in parallel
//! without any per-pixel locking.
//!
//! # Usage
//!
//! ```
//! use binner_cpu::{BinCoords, BinItem, BinManager, BinVertex, Rasterizer};
//!
//! #[derive(Clone, Debug)]
//! struct Vertex {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl BinVertex for Vertex {
//!     fn screen_pos(&self) -> (i32, i32) {
//!         (self.x, self.y)
//!     }
//! }
//!
//! struct Counter(std::sync::atomic::AtomicUsize);
//!
//! impl Rasterizer for Counter {
//!     type State = ();
//!     type Vertex = Vertex;
//!
//!     fn draw(&self, _item: &BinItem<Vertex>, _state: &(), _clip: BinCoords) {
//!         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!     }
//! }
//!
//! let mut binner = BinManager::new(Counter(Default::default()));
//! binner.update_state((), BinCoords::new(0, 0, 479, 271));
//! binner.add_triangle(
//!     &Vertex { x: 0, y: 0 },
//!     &Vertex { x: 10, y: 0 },
//!     &Vertex { x: 0, y: 10 },
//! );
//! binner.drain();
//!
//! assert_eq!(binner.rasterizer().0.load(std::sync::atomic::Ordering::Relaxed), 1);
//! ```
//!
//! # Features
//!
//! - `multithreading` (enabled by default): Rasterize the bands of a flush on a pool of worker
//!   threads, see [`BinSettings::num_threads`].
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod batch;
mod dispatch;
mod error;
mod manager;
mod rasterizer;
mod settings;
mod stats;
mod waitable;

pub use binner_common;
pub use binner_common::coords::BinCoords;
pub use binner_common::item::{BinItem, BinItemType, BinVertex};
pub use binner_common::queue::Slot;
pub use error::BinError;
pub use manager::{BinManager, BinPhase, MAX_ITEMS, MAX_STATES};
pub use rasterizer::Rasterizer;
pub use settings::{BinSettings, MAX_POSSIBLE_TASKS};
pub use stats::{BinStats, FlushReason};
pub use waitable::{BinSignal, BinWaitable};
