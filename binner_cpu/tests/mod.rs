// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]
#![cfg_attr(
    not(feature = "multithreading"),
    allow(dead_code, reason = "the painting helpers are only used with worker threads")
)]

mod state;
mod util;
