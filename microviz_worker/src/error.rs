// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Why a bridged request did not produce a model.
///
/// These are channel-level failures only: `compute` itself never fails, it degrades.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The bridge was closed before the request was answered.
    #[error("compute bridge closed")]
    Closed,
    /// The worker side went away without answering.
    #[error("compute worker disconnected")]
    Disconnected,
    /// The worker panicked while computing this request.
    #[error("compute worker failed: {0}")]
    Worker(String),
    /// A bridge thread could not be started.
    #[error("failed to spawn compute thread")]
    Spawn(#[from] std::io::Error),
}
