// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors that can occur when setting up a [`BinManager`](crate::BinManager).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BinError {
    /// More worker threads were requested than a flush can ever produce tasks for.
    #[error("requested {requested} worker threads, but at most {max} are supported")]
    TooManyThreads {
        /// The requested number of threads.
        requested: u16,
        /// The largest supported number of threads.
        max: u16,
    },
    /// The worker thread pool couldn't be created.
    #[cfg(feature = "multithreading")]
    #[error("failed to create the worker thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
