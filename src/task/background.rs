//! One-shot background task with lifecycle events.
//!
//! A [`BackgroundTask`] runs a zero-argument operation on the worker pool and
//! reports `Started`, then exactly one of `Finished` or `Failed`, through an
//! [`EventQueue`] drained by the owning (UI) task. A panic inside the
//! operation is reported as `Failed`. No cancellation, retry or timeout.
use std::future::Future;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::task::pool::WorkerPool;

#[derive(Debug)]
pub enum TaskEvent<T> {
    Started { task_id: Uuid },
    Finished { task_id: Uuid, result: T },
    Failed { task_id: Uuid, error: AppError },
}

impl<T> TaskEvent<T> {
    pub fn task_id(&self) -> Uuid {
        match self {
            TaskEvent::Started { task_id }
            | TaskEvent::Finished { task_id, .. }
            | TaskEvent::Failed { task_id, .. } => *task_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskEvent::Started { .. })
    }
}

/// Single-consumer queue of task events, drained on the UI task.
#[derive(Debug)]
pub struct EventQueue<T> {
    tx: mpsc::UnboundedSender<TaskEvent<T>>,
    rx: mpsc::UnboundedReceiver<TaskEvent<T>>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        EventQueue { tx, rx }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<TaskEvent<T>> {
        self.tx.clone()
    }

    /// Wait for the next event. Never returns `None` while the queue is
    /// alive, since it holds a sender itself.
    pub async fn recv(&mut self) -> Option<TaskEvent<T>> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<TaskEvent<T>> {
        self.rx.try_recv().ok()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BackgroundTask<T> {
    id: Uuid,
    events: mpsc::UnboundedSender<TaskEvent<T>>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    pub fn new(events: mpsc::UnboundedSender<TaskEvent<T>>) -> Self {
        BackgroundTask { id: Uuid::new_v4(), events }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Schedule `operation` on `pool`. Consumes the task, so each instance
    /// runs at most once.
    pub fn run<F, Fut>(self, pool: &WorkerPool, operation: F) -> Uuid
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let BackgroundTask { id, events } = self;
        pool.spawn(async move {
            emit(&events, TaskEvent::Started { task_id: id });
            // Nested spawn so a panic surfaces as a JoinError instead of
            // tearing down the worker.
            let outcome = match tokio::spawn(async move { operation().await }).await {
                Ok(Ok(result)) => TaskEvent::Finished { task_id: id, result },
                Ok(Err(error)) => {
                    tracing::error!("Background task {} failed: {}", id, error);
                    TaskEvent::Failed { task_id: id, error }
                }
                Err(join) => {
                    let message = panic_message(join);
                    tracing::error!("Background task {} panicked: {}", id, message);
                    TaskEvent::Failed { task_id: id, error: AppError::TaskPanicked(message) }
                }
            };
            emit(&events, outcome);
        });
        id
    }
}

fn emit<T>(events: &mpsc::UnboundedSender<TaskEvent<T>>, event: TaskEvent<T>) {
    let task_id = event.task_id();
    if events.send(event).is_err() {
        tracing::debug!("Event receiver gone, dropping event for task {}", task_id);
    }
}

fn panic_message(join: tokio::task::JoinError) -> String {
    if !join.is_panic() {
        return join.to_string();
    }
    let payload = join.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
