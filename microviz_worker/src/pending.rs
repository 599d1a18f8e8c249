// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request/response correlation.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use microviz_core::RenderModel;

use crate::BridgeError;

/// The outcome delivered to a pending request.
pub type BridgeResult = Result<RenderModel, BridgeError>;

/// Identifies one request; ids increase monotonically per [`PendingRequests`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// In-flight requests keyed by id.
///
/// Every registered request is resolved exactly once: by [`resolve`](Self::resolve) with its
/// response, or by [`close_all`](Self::close_all) with [`BridgeError::Closed`].
#[derive(Debug, Default)]
pub struct PendingRequests {
    next: u64,
    waiting: HashMap<RequestId, oneshot::Sender<BridgeResult>>,
}

impl PendingRequests {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id and returns the future that will receive its response.
    pub fn register(&mut self) -> (RequestId, PendingResponse) {
        self.next += 1;
        let id = RequestId(self.next);
        let (tx, rx) = oneshot::channel();
        self.waiting.insert(id, tx);
        (id, PendingResponse { id, rx })
    }

    /// Delivers `result` to request `id`.
    ///
    /// Returns `false` for ids that are not pending (already resolved, closed, or never issued);
    /// such stale responses are discarded.
    pub fn resolve(&mut self, id: RequestId, result: BridgeResult) -> bool {
        let Some(tx) = self.waiting.remove(&id) else {
            tracing::debug!(%id, "discarding stale response");
            return false;
        };
        if tx.send(result).is_err() {
            tracing::debug!(%id, "response dropped; caller stopped waiting");
        }
        true
    }

    /// Fails every outstanding request with [`BridgeError::Closed`] and clears the table.
    pub fn close_all(&mut self) {
        for (id, tx) in self.waiting.drain() {
            tracing::debug!(%id, "closing pending request");
            let _ = tx.send(Err(BridgeError::Closed));
        }
    }

    /// Number of requests still waiting for a response.
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    /// Returns `true` if no request is waiting.
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

/// The response to one request; resolves once.
///
/// If the resolving side is dropped without answering, the future yields
/// [`BridgeError::Disconnected`].
#[derive(Debug)]
pub struct PendingResponse {
    id: RequestId,
    rx: oneshot::Receiver<BridgeResult>,
}

impl PendingResponse {
    /// The id this response is correlated by.
    pub fn id(&self) -> RequestId {
        self.id
    }
}

impl Future for PendingResponse {
    type Output = BridgeResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(BridgeError::Disconnected)),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn ids_increase_monotonically() {
        let mut pending = PendingRequests::new();
        let (a, _ra) = pending.register();
        let (b, _rb) = pending.register();
        assert!(b > a);
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn resolve_reaches_the_matching_request() {
        let mut pending = PendingRequests::new();
        let (a, ra) = pending.register();
        let (b, rb) = pending.register();
        assert!(pending.resolve(b, Ok(RenderModel::empty(2.0, 2.0))));
        assert!(pending.resolve(a, Ok(RenderModel::empty(1.0, 1.0))));
        assert_eq!(block_on(ra).unwrap().width, 1.0);
        assert_eq!(block_on(rb).unwrap().width, 2.0);
        assert!(pending.is_empty());
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut pending = PendingRequests::new();
        let (a, ra) = pending.register();
        assert!(pending.resolve(a, Ok(RenderModel::empty(1.0, 1.0))));
        assert!(!pending.resolve(a, Ok(RenderModel::empty(9.0, 9.0))));
        assert!(!pending.resolve(RequestId(42), Ok(RenderModel::empty(9.0, 9.0))));
        assert_eq!(block_on(ra).unwrap().width, 1.0);
    }

    #[test]
    fn close_all_fails_outstanding_requests() {
        let mut pending = PendingRequests::new();
        let (_, ra) = pending.register();
        let (_, rb) = pending.register();
        pending.close_all();
        assert!(pending.is_empty());
        assert!(matches!(block_on(ra), Err(BridgeError::Closed)));
        assert!(matches!(block_on(rb), Err(BridgeError::Closed)));
    }

    #[test]
    fn dropped_table_disconnects() {
        let mut pending = PendingRequests::new();
        let (_, ra) = pending.register();
        drop(pending);
        assert!(matches!(block_on(ra), Err(BridgeError::Disconnected)));
    }

    #[test]
    fn abandoned_responses_still_count_as_resolved() {
        let mut pending = PendingRequests::new();
        let (a, ra) = pending.register();
        drop(ra);
        assert!(pending.resolve(a, Err(BridgeError::Worker(String::from("boom")))));
    }
}
