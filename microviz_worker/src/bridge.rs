// Copyright 2025 the Microviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The worker thread and its dispatcher.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use microviz_charts::{ComputeInput, compute};
use microviz_core::RenderModel;

use crate::BridgeError;
use crate::pending::{BridgeResult, PendingRequests, PendingResponse, RequestId};

/// What the worker runs for each request.
pub(crate) type Handler = fn(&ComputeInput) -> RenderModel;

struct Job {
    id: RequestId,
    input: ComputeInput,
}

/// Runs [`compute`] on a dedicated worker thread.
///
/// Requests are queued in order; responses are correlated back to their [`PendingResponse`] by
/// [`RequestId`] on a separate dispatcher thread, so a caller never blocks the worker. Closing
/// the bridge (explicitly or on drop) fails every unanswered request with
/// [`BridgeError::Closed`].
#[derive(Debug)]
pub struct ComputeBridge {
    jobs: Option<mpsc::Sender<Job>>,
    pending: Arc<Mutex<PendingRequests>>,
    worker: Option<JoinHandle<()>>,
    dispatcher: Option<JoinHandle<()>>,
}

impl ComputeBridge {
    /// Starts the worker and dispatcher threads.
    pub fn spawn() -> Result<Self, BridgeError> {
        Self::spawn_with(compute)
    }

    pub(crate) fn spawn_with(handler: Handler) -> Result<Self, BridgeError> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (reply_tx, reply_rx) = mpsc::channel::<(RequestId, BridgeResult)>();
        let pending = Arc::new(Mutex::new(PendingRequests::new()));

        let worker = thread::Builder::new()
            .name("microviz-compute".into())
            .spawn(move || worker_loop(handler, &job_rx, &reply_tx))?;

        let table = Arc::clone(&pending);
        let dispatcher = thread::Builder::new()
            .name("microviz-dispatch".into())
            .spawn(move || {
                for (id, result) in reply_rx {
                    lock(&table).resolve(id, result);
                }
                // The worker is gone; nothing else will answer.
                lock(&table).close_all();
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            pending,
            worker: Some(worker),
            dispatcher: Some(dispatcher),
        })
    }

    /// Queues `input` and returns the future of its model.
    ///
    /// Never blocks. On a closed bridge the returned future fails with [`BridgeError::Closed`];
    /// if the worker has gone away it fails with [`BridgeError::Disconnected`].
    pub fn request(&self, input: ComputeInput) -> PendingResponse {
        let (id, response) = lock(&self.pending).register();
        let Some(jobs) = &self.jobs else {
            lock(&self.pending).resolve(id, Err(BridgeError::Closed));
            return response;
        };
        if jobs.send(Job { id, input }).is_err() {
            tracing::warn!(%id, "compute worker is gone");
            lock(&self.pending).resolve(id, Err(BridgeError::Disconnected));
        }
        response
    }

    /// Number of requests still waiting for a response.
    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Returns `true` once [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.jobs.is_none()
    }

    /// Stops accepting requests, waits for both threads, and fails whatever is still pending.
    ///
    /// Requests already queued are still computed and delivered before the worker exits.
    /// Idempotent.
    pub fn close(&mut self) {
        drop(self.jobs.take());
        for handle in [self.worker.take(), self.dispatcher.take()].into_iter().flatten() {
            if handle.join().is_err() {
                tracing::warn!("compute bridge thread panicked");
            }
        }
        lock(&self.pending).close_all();
    }
}

impl Drop for ComputeBridge {
    fn drop(&mut self) {
        self.close();
    }
}

fn lock(pending: &Mutex<PendingRequests>) -> MutexGuard<'_, PendingRequests> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

fn worker_loop(
    handler: Handler,
    jobs: &mpsc::Receiver<Job>,
    replies: &mpsc::Sender<(RequestId, BridgeResult)>,
) {
    for Job { id, input } in jobs {
        let result = catch_unwind(AssertUnwindSafe(|| handler(&input))).map_err(|payload| {
            let message = panic_message(payload.as_ref());
            tracing::warn!(%id, %message, "compute panicked");
            BridgeError::Worker(message)
        });
        if replies.send((id, result)).is_err() {
            return;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("unknown panic")
    }
}
