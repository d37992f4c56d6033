// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the state history.

use crate::util::{color, recording, vtx};
use binner_cpu::BinCoords;

#[test]
fn unused_state_is_replaced_in_place() {
    let mut binner = recording();
    binner.update_state(color(1), BinCoords::UNBOUNDED);
    binner.update_state(color(2), BinCoords::UNBOUNDED);
    binner.update_state(color(3), BinCoords::UNBOUNDED);

    assert_eq!(binner.queued_states(), 1);
    assert_eq!(binner.state(), &color(3));
    assert_eq!(binner.stats().state_updates, 3);

    binner.add_point(&vtx(0, 0));
    binner.drain();
    assert_eq!(binner.rasterizer().draws()[0].state, color(3));
}

#[test]
fn referenced_state_is_kept() {
    let mut binner = recording();
    binner.update_state(color(1), BinCoords::UNBOUNDED);
    binner.add_point(&vtx(0, 0));
    binner.update_state(color(2), BinCoords::UNBOUNDED);
    binner.add_point(&vtx(1, 0));

    assert_eq!(binner.queued_states(), 2);

    binner.drain();
    let states = binner
        .rasterizer()
        .draws()
        .into_iter()
        .map(|draw| draw.state)
        .collect::<Vec<_>>();
    assert_eq!(states, [color(1), color(2)]);
}

#[test]
fn drain_retains_only_current_state() {
    let mut binner = recording();

    for i in 0..5 {
        binner.update_state(color(i), BinCoords::new(0, 0, 99, 99));
        binner.add_point(&vtx(1, 1));
    }
    binner.drain();

    assert_eq!(binner.queued_states(), 1);
    assert_eq!(binner.state(), &color(4));
    assert_eq!(binner.scissor(), BinCoords::new(0, 0, 99, 99));

    // Primitives submitted without a new state keep using the retained one.
    binner.add_point(&vtx(2, 2));
    binner.drain();
    let draws = binner.rasterizer().draws();
    assert_eq!(draws.last().unwrap().state, color(4));
}

#[test]
fn default_state_is_used_initially() {
    let mut binner = recording();
    binner.add_point(&vtx(0, 0));
    binner.drain();

    assert_eq!(binner.rasterizer().draws()[0].state, color(0));
}
