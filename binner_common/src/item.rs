// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Queued primitives.

use crate::coords::BinCoords;
use crate::queue::Slot;
use smallvec::SmallVec;

/// The vertex interface required for binning.
///
/// Vertices are opaque to the binner apart from their screen position, which is used to compute
/// the range a primitive covers. Everything else (depth, colors, texture coordinates, ...) is
/// only interpreted by the rasterization back end.
pub trait BinVertex {
    /// The position of the vertex in whole screen pixels.
    fn screen_pos(&self) -> (i32, i32);

    /// The width and height in pixels of the square covered when the vertex is drawn as a point.
    fn point_size(&self) -> i32 {
        1
    }
}

/// The kind of a queued primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinItemType {
    /// A triangle defined by three vertices.
    Triangle,
    /// A framebuffer clear covering the rectangle spanned by two corner vertices.
    ClearRect,
    /// An axis-aligned textured rectangle spanned by two corner vertices.
    Sprite,
    /// A line between two vertices.
    Line,
    /// A single point.
    Point,
}

impl BinItemType {
    /// The number of vertices a primitive of this kind carries.
    pub const fn vertex_count(self) -> usize {
        match self {
            Self::Triangle => 3,
            Self::ClearRect | Self::Sprite | Self::Line => 2,
            Self::Point => 1,
        }
    }
}

/// A primitive waiting in the bin queue.
#[derive(Clone, Debug)]
pub struct BinItem<V> {
    /// What kind of primitive this is.
    pub kind: BinItemType,
    /// The rasterizer state snapshot the primitive is drawn with.
    pub state: Slot,
    /// The screen range covered by the primitive, already clipped to the scissor.
    pub range: BinCoords,
    vertices: SmallVec<[V; 3]>,
}

impl<V> BinItem<V> {
    /// Create a new item.
    ///
    /// # Panics
    ///
    /// Panics if the number of vertices doesn't match `kind`.
    pub fn new(
        kind: BinItemType,
        state: Slot,
        range: BinCoords,
        vertices: SmallVec<[V; 3]>,
    ) -> Self {
        assert_eq!(
            vertices.len(),
            kind.vertex_count(),
            "a {kind:?} needs {} vertices",
            kind.vertex_count()
        );

        Self {
            kind,
            state,
            range,
            vertices,
        }
    }

    /// All vertices of the primitive. The length always equals `kind.vertex_count()`.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// The first vertex.
    pub fn v0(&self) -> &V {
        &self.vertices[0]
    }

    /// The second vertex, if the primitive has one.
    pub fn v1(&self) -> Option<&V> {
        self.vertices.get(1)
    }

    /// The third vertex, if the primitive has one.
    pub fn v2(&self) -> Option<&V> {
        self.vertices.get(2)
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::BinCoords;
    use crate::item::{BinItem, BinItemType};
    use crate::queue::BinQueue;
    use smallvec::smallvec;

    #[test]
    fn vertex_counts() {
        assert_eq!(BinItemType::Triangle.vertex_count(), 3);
        assert_eq!(BinItemType::ClearRect.vertex_count(), 2);
        assert_eq!(BinItemType::Sprite.vertex_count(), 2);
        assert_eq!(BinItemType::Line.vertex_count(), 2);
        assert_eq!(BinItemType::Point.vertex_count(), 1);
    }

    #[test]
    fn vertex_accessors() {
        let mut states = BinQueue::<(), 1>::new();
        let state = states.push(());

        let item = BinItem::new(
            BinItemType::Line,
            state,
            BinCoords::new(0, 0, 4, 4),
            smallvec![(0, 0), (4, 4)],
        );

        assert_eq!(item.v0(), &(0, 0));
        assert_eq!(item.v1(), Some(&(4, 4)));
        assert_eq!(item.v2(), None);
        assert_eq!(item.vertices().len(), 2);
    }

    #[test]
    #[should_panic(expected = "needs 3 vertices")]
    fn mismatched_vertex_count_panics() {
        let mut states = BinQueue::<(), 1>::new();
        let state = states.push(());

        BinItem::new(
            BinItemType::Triangle,
            state,
            BinCoords::new(0, 0, 1, 1),
            smallvec![(0, 0)],
        );
    }
}
