// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use binner_cpu::{BinCoords, BinItem, BinItemType, BinManager, BinVertex, Rasterizer};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TestVertex {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) size: i32,
}

impl BinVertex for TestVertex {
    fn screen_pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn point_size(&self) -> i32 {
        self.size
    }
}

pub(crate) fn vtx(x: i32, y: i32) -> TestVertex {
    TestVertex { x, y, size: 1 }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TestState {
    pub(crate) color: u32,
}

pub(crate) fn color(color: u32) -> TestState {
    TestState { color }
}

/// A single call to [`Rasterizer::draw`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Draw {
    pub(crate) kind: BinItemType,
    pub(crate) range: BinCoords,
    pub(crate) vertices: Vec<TestVertex>,
    pub(crate) state: TestState,
    pub(crate) clip: BinCoords,
}

/// Records every draw call, in the order they arrive.
#[derive(Debug, Default)]
pub(crate) struct RecordingRasterizer {
    draws: Mutex<Vec<Draw>>,
}

impl RecordingRasterizer {
    pub(crate) fn draws(&self) -> Vec<Draw> {
        self.draws.lock().unwrap().clone()
    }
}

impl Rasterizer for RecordingRasterizer {
    type State = TestState;
    type Vertex = TestVertex;

    fn draw(&self, item: &BinItem<TestVertex>, state: &TestState, clip: BinCoords) {
        self.draws.lock().unwrap().push(Draw {
            kind: item.kind,
            range: item.range,
            vertices: item.vertices().to_vec(),
            state: *state,
            clip,
        });
    }
}

pub(crate) fn recording() -> BinManager<RecordingRasterizer> {
    BinManager::new(RecordingRasterizer::default())
}

/// Fills the clipped range of every item with the color of its state.
#[derive(Debug)]
pub(crate) struct PaintingRasterizer {
    width: u16,
    height: u16,
    pixels: Vec<AtomicU32>,
}

impl PaintingRasterizer {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        let pixels = (0..usize::from(width) * usize::from(height))
            .map(|_| AtomicU32::new(0))
            .collect();

        Self {
            width,
            height,
            pixels,
        }
    }

    pub(crate) fn pixels(&self) -> Vec<u32> {
        self.pixels
            .iter()
            .map(|p| p.load(Ordering::Relaxed))
            .collect()
    }
}

impl Rasterizer for PaintingRasterizer {
    type State = TestState;
    type Vertex = TestVertex;

    fn draw(&self, _item: &BinItem<TestVertex>, state: &TestState, clip: BinCoords) {
        let frame = BinCoords::new(0, 0, i32::from(self.width) - 1, i32::from(self.height) - 1);
        let clip = clip.intersect(frame);

        if clip.is_invalid() {
            return;
        }

        for y in clip.y1..=clip.y2 {
            for x in clip.x1..=clip.x2 {
                let idx = y as usize * usize::from(self.width) + x as usize;
                self.pixels[idx].store(state.color, Ordering::Relaxed);
            }
        }
    }
}

/// Submit a deterministic mix of overlapping primitives, states and scissors.
pub(crate) fn submit_scene<R>(binner: &mut BinManager<R>)
where
    R: Rasterizer<State = TestState, Vertex = TestVertex>,
{
    // Park-Miller, so the scene is the same on every run.
    let mut seed = 42_u32;
    let mut next = |max: i32| {
        seed = ((u64::from(seed) * 48_271) % 0x7fff_ffff) as u32;
        (seed % max as u32) as i32
    };

    for i in 0..600_u32 {
        if i % 25 == 0 {
            let x1 = next(64);
            let y1 = next(128);
            binner.update_state(
                color(i + 1),
                BinCoords::new(x1, y1, x1 + 32 + next(96), y1 + 64 + next(192)),
            );
        } else if i % 5 == 0 {
            let scissor = binner.scissor();
            binner.update_state(color(i + 1), scissor);
        }

        let (x, y) = (next(160) - 16, next(288) - 16);
        match i % 5 {
            0 => {
                let (w, h) = (next(40), next(80));
                binner.add_triangle(&vtx(x, y), &vtx(x + w, y), &vtx(x, y + h));
            }
            1 => binner.add_clear_rect(&vtx(x, y), &vtx(x + next(20), y + next(20))),
            2 => binner.add_sprite(&vtx(x + next(30), y + next(30)), &vtx(x, y)),
            3 => binner.add_line(&vtx(x, y), &vtx(x + next(50), y + next(3))),
            _ => binner.add_point(&TestVertex {
                x,
                y,
                size: 1 + next(6),
            }),
        }

        if i % 97 == 0 {
            binner.flush();
        }
    }

    binner.drain();
}
