// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inclusive integer screen rectangles.

/// An axis-aligned screen rectangle in whole pixels.
///
/// Both corners are inclusive, so `BinCoords::new(0, 0, 0, 0)` covers exactly one pixel.
/// A rectangle with `x2 < x1` or `y2 < y1` is invalid and covers nothing. Invalid rectangles
/// are a regular result of [`BinCoords::intersect`], so callers must check
/// [`is_invalid`](BinCoords::is_invalid) instead of assuming a non-empty result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BinCoords {
    /// The leftmost covered column.
    pub x1: i32,
    /// The topmost covered row.
    pub y1: i32,
    /// The rightmost covered column.
    pub x2: i32,
    /// The bottommost covered row.
    pub y2: i32,
}

impl BinCoords {
    /// An empty rectangle that behaves as the identity when computing a bounding union.
    pub const INVALID: Self = Self {
        x1: i32::MAX,
        y1: i32::MAX,
        x2: i32::MIN,
        y2: i32::MIN,
    };

    /// A rectangle covering every representable pixel, i.e. an unrestricted scissor.
    pub const UNBOUNDED: Self = Self {
        x1: i32::MIN,
        y1: i32::MIN,
        x2: i32::MAX,
        y2: i32::MAX,
    };

    /// Create a new rectangle from its inclusive corners.
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Whether the rectangle covers no pixel at all.
    #[inline]
    pub const fn is_invalid(&self) -> bool {
        self.x2 < self.x1 || self.y2 < self.y1
    }

    /// Return the overlap of both rectangles.
    ///
    /// The result is invalid if the rectangles don't overlap.
    #[inline]
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        Self {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        }
    }

    /// Whether `other` lies completely inside of `self`.
    ///
    /// Invalid rectangles are never contained, and never contain anything.
    pub fn contains(&self, other: &Self) -> bool {
        !self.is_invalid()
            && !other.is_invalid()
            && self.x1 <= other.x1
            && self.y1 <= other.y1
            && self.x2 >= other.x2
            && self.y2 >= other.y2
    }

    /// The number of covered columns, or 0 for an invalid rectangle.
    pub fn width(&self) -> i64 {
        if self.is_invalid() {
            0
        } else {
            i64::from(self.x2) - i64::from(self.x1) + 1
        }
    }

    /// The number of covered rows, or 0 for an invalid rectangle.
    pub fn height(&self) -> i64 {
        if self.is_invalid() {
            0
        } else {
            i64::from(self.y2) - i64::from(self.y1) + 1
        }
    }

    /// The smallest rectangle covering all of the given pixel positions.
    ///
    /// Returns [`BinCoords::INVALID`] if `points` is empty.
    pub fn bounding(points: impl IntoIterator<Item = (i32, i32)>) -> Self {
        points
            .into_iter()
            .fold(Self::INVALID, |acc, (x, y)| Self {
                x1: acc.x1.min(x),
                y1: acc.y1.min(y),
                x2: acc.x2.max(x),
                y2: acc.y2.max(y),
            })
    }
}
