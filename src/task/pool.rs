//! Bounded worker pool on top of the tokio runtime.
use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::error::{AppError, AppResult};

/// Process-wide pool; clones share the same concurrency limit.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    handle: Handle,
    permits: Arc<Semaphore>,
    max_concurrency: usize,
}

impl WorkerPool {
    /// Build a pool on the current runtime. Fails outside a tokio runtime.
    pub fn new(max_concurrency: usize) -> AppResult<Self> {
        let handle = Handle::try_current().map_err(|e| AppError::Pool(e.to_string()))?;
        Ok(Self::with_handle(handle, max_concurrency))
    }

    pub fn with_handle(handle: Handle, max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        WorkerPool {
            handle,
            permits: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Number of workers currently idle.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `job` once a worker slot is free. The slot is held until the job
    /// completes.
    pub fn spawn<F>(&self, job: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        self.handle.spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::error!("Worker pool closed, dropping job");
                    return;
                }
            };
            job.await;
        })
    }
}
