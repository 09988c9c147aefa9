//! Cancellable deferred jobs.
//!
//! Each job races its delay against a [`CancellationToken`], so a manual
//! action (e.g. a donor releasing funds) can supersede a scheduled one (the
//! escrow auto-release). Withdrawal jobs are scheduled but never cancelled;
//! they are fire-and-forget once initiated.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Identifies the pending job for an entity. Scheduling a new job under an
/// existing key cancels the old one.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum JobKey {
    /// Escrow auto-release for a milestone left in review.
    MilestoneReview { project_id: u64, milestone_id: u64 },
    /// Processing pipeline for an initiated withdrawal.
    Withdrawal { request_id: u64 },
    /// Auto-accept for a pending connection request.
    ConnectionAccept { request_id: u64 },
}

#[derive(Clone, Default)]
pub struct Scheduler {
    jobs: Arc<Mutex<HashMap<JobKey, CancellationToken>>>,
}

impl Scheduler {
    /// Run `job` after `delay` unless the key is cancelled first.
    pub fn schedule<F>(&self, key: JobKey, delay: Duration, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        {
            let mut jobs = self.jobs.lock().expect("scheduler mutex poisoned");
            if let Some(old) = jobs.insert(key.clone(), token.clone()) {
                old.cancel();
            }
        }

        let jobs = Arc::clone(&self.jobs);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(?key, "scheduled job cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    job.await;
                }
            }
            jobs.lock().expect("scheduler mutex poisoned").remove(&key);
        });
    }

    /// Invalidate the pending job for `key`, if any.
    pub fn cancel(&self, key: &JobKey) {
        if let Some(token) = self
            .jobs
            .lock()
            .expect("scheduler mutex poisoned")
            .remove(key)
        {
            token.cancel();
        }
    }
}
