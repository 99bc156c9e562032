//! Admission Gate
//!
//! Counting semaphore bounding how many requests execute at once.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;

use crate::error::{ProxyError, Result};

// == Admission Gate ==
/// Fixed ceiling on simultaneously executing requests.
///
/// Requests over the ceiling wait rather than being rejected. Tokio's
/// semaphore hands out permits in FIFO order, so every waiter is admitted
/// eventually.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
}

/// Proof of admission. The slot is released when the permit is dropped,
/// whichever way the holder exits: return, error, panic or cancellation.
#[derive(Debug)]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionGate {
    /// # Errors
    /// `InvalidConfiguration` when `max_concurrent` is zero.
    pub fn new(max_concurrent: usize) -> Result<Self> {
        if max_concurrent == 0 {
            return Err(ProxyError::InvalidConfiguration(
                "max concurrent clients must be greater than 0".to_string(),
            ));
        }
        if max_concurrent > Semaphore::MAX_PERMITS {
            return Err(ProxyError::InvalidConfiguration(format!(
                "max concurrent clients must not exceed {}",
                Semaphore::MAX_PERMITS
            )));
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        })
    }

    // == Admit ==
    /// Waits until a slot is free and takes it.
    pub async fn admit(&self) -> Result<AdmissionPermit> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| ProxyError::Internal("admission gate closed".to_string()))?;
        trace!(in_flight = self.in_flight(), "Request admitted");
        Ok(AdmissionPermit { _permit: permit })
    }

    // == Run ==
    /// Runs `work` while holding a slot.
    pub async fn run<F>(&self, work: F) -> Result<F::Output>
    where
        F: Future,
    {
        let _permit = self.admit().await?;
        Ok(work.await)
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Slots currently held.
    pub fn in_flight(&self) -> usize {
        self.max_concurrent - self.available()
    }
}
