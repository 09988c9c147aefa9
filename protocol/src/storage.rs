//! # Storage
//!
//! The in-memory entity store backing the engine. One [`Store`] lives for
//! the process lifetime, seeded at boot and wrapped in a single
//! `Arc<RwLock>` by [`crate::Platform`].
//!
//! | Collection            | Type                     | Mutated by                        |
//! |-----------------------|--------------------------|-----------------------------------|
//! | `users`               | `Vec<User>`              | ledger, withdrawals               |
//! | `projects`            | `Vec<Project>`           | projects, milestones, ledger      |
//! | `transactions`        | `Vec<Transaction>`       | ledger, withdrawals (append/status) |
//! | `investments`         | `Vec<Investment>`        | ledger (append only)              |
//! | `payment_methods`     | `Vec<PaymentMethod>`     | payment_methods                   |
//! | `withdrawal_requests` | `Vec<WithdrawalRequest>` | withdrawals                       |
//! | `connection_requests` | `Vec<ConnectionRequest>` | connections                       |
//!
//! IDs for every entity come from a single auto-increment counter via
//! [`Store::allocate_id`], so an ID never repeats across collections.
//!
//! Each business operation performs all of its sub-writes while holding the
//! platform's write guard; readers outside the operation never observe a
//! partially applied result.

use crate::errors::{ProtocolError, Result};
use crate::types::{
    ConnectionRequest, ConnectionStatus, Investment, PaymentMethod, Project, ProjectId,
    Transaction, User, UserId, WithdrawalRequest,
};

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub transactions: Vec<Transaction>,
    pub investments: Vec<Investment>,
    pub payment_methods: Vec<PaymentMethod>,
    pub withdrawal_requests: Vec<WithdrawalRequest>,
    pub connection_requests: Vec<ConnectionRequest>,
}

impl Store {
    /// Return the next free ID and advance the counter.
    pub fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Bump the counter past externally assigned IDs (used by seeding).
    pub fn reserve_ids_through(&mut self, id: u64) {
        if id > self.next_id {
            self.next_id = id;
        }
    }

    // ─────────────────────────────────────────────────────────
    // Typed accessors
    // ─────────────────────────────────────────────────────────

    pub fn user(&self, id: UserId) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(ProtocolError::UserNotFound(id))
    }

    pub fn user_mut(&mut self, id: UserId) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ProtocolError::UserNotFound(id))
    }

    pub fn project(&self, id: ProjectId) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or(ProtocolError::ProjectNotFound(id))
    }

    pub fn project_mut(&mut self, id: ProjectId) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProtocolError::ProjectNotFound(id))
    }

    pub fn payment_method(&self, id: u64) -> Result<&PaymentMethod> {
        self.payment_methods
            .iter()
            .find(|pm| pm.id == id)
            .ok_or(ProtocolError::PaymentMethodNotFound(id))
    }

    pub fn withdrawal_mut(&mut self, id: u64) -> Result<&mut WithdrawalRequest> {
        self.withdrawal_requests
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(ProtocolError::WithdrawalNotFound(id))
    }

    pub fn transaction_mut(&mut self, id: u64) -> Result<&mut Transaction> {
        self.transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ProtocolError::TransactionNotFound(id))
    }

    pub fn connection_mut(&mut self, id: u64) -> Result<&mut ConnectionRequest> {
        self.connection_requests
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ProtocolError::ConnectionNotFound(id))
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// All transactions for a user, newest first.
    pub fn transactions_by_user(&self, user_id: UserId) -> Vec<Transaction> {
        let mut txs: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        // Ties on the timestamp fall back to insertion order.
        txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        txs
    }

    pub fn investments_by_donor(&self, donor_id: UserId) -> Vec<Investment> {
        self.investments
            .iter()
            .filter(|inv| inv.donor_id == donor_id)
            .cloned()
            .collect()
    }

    pub fn payment_methods_by_user(&self, user_id: UserId) -> Vec<PaymentMethod> {
        self.payment_methods
            .iter()
            .filter(|pm| pm.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Latest relationship state for a (creator, donor) pair; `None` when no
    /// request has ever been made.
    pub fn connection_status(&self, creator_id: UserId, donor_id: UserId) -> ConnectionStatus {
        self.connection_requests
            .iter()
            .rev()
            .find(|req| req.creator_id == creator_id && req.donor_id == donor_id)
            .map(|req| req.status)
            .unwrap_or(ConnectionStatus::None)
    }
}
