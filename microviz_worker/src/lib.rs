// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Off-thread execution for `microviz_charts`.
//!
//! [`ComputeBridge`] owns a worker thread running [`microviz_charts::compute`] and hands out a
//! [`PendingResponse`] future per request. Responses are matched to requests by a monotonically
//! increasing [`RequestId`]:
//! - each request resolves exactly once, with a model or a [`BridgeError`]
//! - responses for unknown ids are discarded as stale
//! - closing the bridge fails every request still waiting with [`BridgeError::Closed`]
//!
//! Only channel-level problems surface as errors; malformed chart input degrades inside the
//! returned model as it does for a direct `compute` call.
//!
//! ```
//! use futures::executor::block_on;
//! use microviz_charts::ComputeInput;
//! use microviz_worker::ComputeBridge;
//! use serde_json::json;
//!
//! let bridge = ComputeBridge::spawn().unwrap();
//! let response = bridge.request(ComputeInput {
//!     data: json!([1, 4, 2, 8]),
//!     size: json!({ "width": 80, "height": 16 }),
//!     spec: json!({ "type": "sparkline" }),
//! });
//! let model = block_on(response).unwrap();
//! assert_eq!(model.width, 80.0);
//! ```

mod bridge;
mod error;
mod pending;

pub use bridge::ComputeBridge;
pub use error::BridgeError;
pub use pending::{BridgeResult, PendingRequests, PendingResponse, RequestId};
