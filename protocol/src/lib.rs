//! # Texora Funding Engine
//!
//! Core of the Texora milestone-based crowdfunding platform: the rules
//! governing how a project's milestones progress through states, how fund
//! releases and investments mutate linked entities, and how withdrawal and
//! connection workflows run their asynchronous lifecycles.
//!
//! | Concern       | Entry point(s)                                             |
//! |---------------|------------------------------------------------------------|
//! | Projects      | [`Platform::create_project`]                               |
//! | Milestones    | [`Platform::submit_milestone`], [`Platform::reject_milestone`] |
//! | Ledger        | [`Platform::release_funds`], [`Platform::create_investment`] |
//! | Withdrawals   | [`Platform::initiate_withdrawal`]                          |
//! | Payouts       | `add_payment_method`, `set_default_payment_method`, `delete_payment_method` |
//! | Connections   | [`Platform::request_connection`]                           |
//! | Queries       | `transactions_by_user`, `investments_by_donor`, `payment_methods_by_user`, `connection_status` |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`Store`]; capability checks to
//! [`access`]; deferred work to the [`scheduler`]. Each workflow module
//! contributes an `impl Platform` block with its operations, and every
//! operation performs all of its sub-writes under a single write guard so no
//! reader observes a partially applied result.
//!
//! "Smart contract" behaviour is simulated: confirmation latency is a
//! configurable sleep and transaction hashes are random opaque strings.

pub mod access;
mod connections;
mod errors;
mod ledger;
mod milestones;
mod payment_methods;
mod projects;
mod scheduler;
pub mod seed;
mod storage;
pub mod types;
mod withdrawals;

#[cfg(test)]
mod test_workflows;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

pub use errors::{ErrorKind, ProtocolError, Result};
pub use storage::Store;

use scheduler::Scheduler;
use types::{
    ConnectionStatus, Investment, PaymentMethod, Project, ProjectId, Transaction, User, UserId,
    WithdrawalRequest,
};

/// Artificial pacing for the simulated contract and workflow timers.
///
/// Purely for UX pacing; correctness never depends on the exact values.
#[derive(Copy, Clone, Debug)]
pub struct Delays {
    /// Simulated network/confirmation latency on ledger operations.
    pub confirmation: Duration,
    /// How long a milestone may sit in review before escrow auto-releases.
    pub review_timeout: Duration,
    /// Initiation → processing delay for withdrawals.
    pub withdrawal_processing: Duration,
    /// Processing → settlement delay for withdrawals.
    pub withdrawal_settlement: Duration,
    /// Delay before a pending connection request is auto-accepted.
    pub connection_accept: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Delays {
            confirmation: Duration::from_secs(2),
            review_timeout: Duration::from_secs(10),
            withdrawal_processing: Duration::from_secs(2),
            withdrawal_settlement: Duration::from_secs(4),
            connection_accept: Duration::from_secs(8),
        }
    }
}

/// The funding engine. Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct Platform {
    store: Arc<RwLock<Store>>,
    scheduler: Scheduler,
    delays: Delays,
}

impl Platform {
    pub fn new(store: Store) -> Self {
        Self::with_delays(store, Delays::default())
    }

    pub fn with_delays(store: Store, delays: Delays) -> Self {
        Platform {
            store: Arc::new(RwLock::new(store)),
            scheduler: Scheduler::default(),
            delays,
        }
    }

    pub(crate) fn store(&self) -> &Arc<RwLock<Store>> {
        &self.store
    }

    pub(crate) fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub(crate) fn delays(&self) -> Delays {
        self.delays
    }

    // ─────────────────────────────────────────────────────────
    // Read queries
    // ─────────────────────────────────────────────────────────

    pub async fn users(&self) -> Vec<User> {
        self.store.read().await.users.clone()
    }

    pub async fn user(&self, id: UserId) -> Result<User> {
        self.store.read().await.user(id).cloned()
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.store.read().await.projects.clone()
    }

    pub async fn project(&self, id: ProjectId) -> Result<Project> {
        self.store.read().await.project(id).cloned()
    }

    /// All transactions for a user, newest first.
    pub async fn transactions_by_user(&self, user_id: UserId) -> Vec<Transaction> {
        self.store.read().await.transactions_by_user(user_id)
    }

    pub async fn investments_by_donor(&self, donor_id: UserId) -> Vec<Investment> {
        self.store.read().await.investments_by_donor(donor_id)
    }

    pub async fn payment_methods_by_user(&self, user_id: UserId) -> Vec<PaymentMethod> {
        self.store.read().await.payment_methods_by_user(user_id)
    }

    pub async fn connection_status(
        &self,
        creator_id: UserId,
        donor_id: UserId,
    ) -> ConnectionStatus {
        self.store
            .read()
            .await
            .connection_status(creator_id, donor_id)
    }

    pub async fn withdrawal_request(&self, id: u64) -> Result<WithdrawalRequest> {
        self.store
            .read()
            .await
            .withdrawal_requests
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(ProtocolError::WithdrawalNotFound(id))
    }
}
