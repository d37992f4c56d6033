// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use binner_common::coords::BinCoords;
use binner_common::item::{BinItem, BinVertex};

/// The back end doing the actual per-pixel work for binned primitives.
///
/// During a flush, [`draw`](Rasterizer::draw) is called from several threads at once, each
/// thread working on its own task range. Every call receives a `clip` rectangle that lies inside
/// of the calling task's range, and implementations must never write pixels outside of it.
/// Within one task, items are drawn in the order they were submitted.
pub trait Rasterizer: Send + Sync + 'static {
    /// A snapshot of the configuration (blending, depth test, texturing, ...) a primitive is
    /// drawn with.
    ///
    /// The binner starts out with the default snapshot.
    type State: Default + Send + Sync + 'static;
    /// A vertex of a primitive.
    type Vertex: BinVertex + Clone + Send + Sync + 'static;

    /// Rasterize the part of `item` that lies inside of `clip`.
    fn draw(&self, item: &BinItem<Self::Vertex>, state: &Self::State, clip: BinCoords);
}
