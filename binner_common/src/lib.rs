// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate includes the data structures used by the binning stage of a CPU rasterizer,
//! shared between the [`binner_cpu`][binner_cpu] manager and its rasterization back ends.
//!
//! # Usage
//!
//! This crate should not be used on its own, and you should instead use [`binner_cpu`][binner_cpu],
//! which drives these structures. Back ends implementing the `Rasterizer` trait of that crate will
//! however see the types defined here, most notably [`BinItem`](item::BinItem) and
//! [`BinCoords`](coords::BinCoords).
//!
//! # Contents
//!
//! - [`coords`]: inclusive integer clip rectangles.
//! - [`queue`]: a fixed-capacity ring queue addressed through stable slot handles.
//! - [`item`]: queued primitives and the vertex interface the binner needs.
//! - [`partition`]: the deterministic rule splitting a screen range into task ranges.
//!
//! [binner_cpu]: https://crates.io/crates/binner_cpu
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
#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod coords;
pub mod item;
pub mod partition;
pub mod queue;

pub use smallvec;
