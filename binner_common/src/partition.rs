// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting a screen range into task ranges that can be rasterized concurrently.
//!
//! The split is deterministic: the same range and task count always produce the same bands.

use crate::coords::BinCoords;
use alloc::vec::Vec;

/// The smallest number of rows a band is allowed to have.
///
/// Ranges lower than two bands are never split.
pub const MIN_BAND_HEIGHT: i64 = 16;

/// Split `range` into up to `max_tasks` horizontal bands and store them in `out`.
///
/// Every band spans the full width of `range`. Bands are equally high, the first
/// `height % bands` of them getting one extra row, and are emitted from top to bottom. They
/// don't overlap and their union is exactly `range`.
///
/// Returns whether the range was actually split. If it wasn't, `out` contains `range` itself,
/// or nothing at all if `range` is invalid.
pub fn split_rows(range: BinCoords, max_tasks: u16, out: &mut Vec<BinCoords>) -> bool {
    out.clear();

    if range.is_invalid() {
        return false;
    }

    let height = range.height();
    let bands = (height / MIN_BAND_HEIGHT).clamp(1, i64::from(max_tasks.max(1)));

    if bands == 1 {
        out.push(range);
        return false;
    }

    let base = height / bands;
    let extra = height % bands;
    let mut y = i64::from(range.y1);

    for i in 0..bands {
        let band_height = base + i64::from(i < extra);
        let y2 = y + band_height - 1;

        // Both ends lie within `range`, so they fit into an `i32`.
        out.push(BinCoords::new(range.x1, y as i32, range.x2, y2 as i32));
        y = y2 + 1;
    }

    log::trace!("split {range:?} into {bands} bands");

    true
}
