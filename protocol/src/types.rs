//! # Types
//!
//! Shared data structures used across all modules of the Texora engine.
//!
//! ## Design decisions
//!
//! ### Milestone status as a Finite-State Machine
//!
//! [`MilestoneStatus`] enforces a strict sequential-unlock lifecycle:
//!
//! ```text
//! Locked ──► PendingSubmission ──► InReview ──► Approved
//!                    ▲                 │
//!                    │                 ▼
//!                    └──────────── Rejected
//! ```
//!
//! A milestone starts `Locked` and is unlocked to `PendingSubmission` when
//! its predecessor is approved (the first milestone of a project starts
//! `PendingSubmission`). Submission moves it to `InReview`; a reviewer either
//! releases funds (`Approved`, terminal) or rejects with feedback
//! (`Rejected`), after which the creator may resubmit. Transitions are
//! validated by the operations in [`crate::milestones`] and
//! [`crate::ledger`]; backward transitions and transitions out of `Approved`
//! are rejected.
//!
//! ### Stable foreign keys
//!
//! A withdrawal's request and its paired [`Transaction`] reference each other
//! by ID (`WithdrawalRequest::transaction_id` /
//! `Transaction::withdrawal_request_id`), so status updates never have to
//! correlate records by timestamp.
//!
//! ### Money
//!
//! All monetary amounts are whole units of a single implied currency,
//! represented as `i128`. Operations validate non-negativity; display
//! formatting and currency conversion belong to the client.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Auto-incremented identifiers allocated by the store.
pub type UserId = u64;
pub type ProjectId = u64;
pub type MilestoneId = u64;

/// Role a user holds on the platform.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Runs projects and receives released funds.
    Creator,
    /// Funds projects and verifies milestones.
    Donor,
}

/// A platform participant.
///
/// Both roles share the same shape; the role-specific aggregates are simply
/// zero for the other role.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: UserRole,
    /// Spendable funds plus any amount currently held for withdrawals.
    pub balance: i128,
    /// Funds held by in-flight withdrawals; released or debited at settlement.
    pub reserved: i128,
    /// Interest tags used for creator/donor matching.
    pub interests: Vec<String>,
    // Creator aggregates.
    pub total_raised: i128,
    pub active_projects: u32,
    // Donor aggregates.
    pub total_invested: i128,
    pub active_investments: u32,
}

impl User {
    /// Balance available to new investments and withdrawals.
    pub fn available_balance(&self) -> i128 {
        self.balance - self.reserved
    }
}

/// Lifecycle status of a milestone. See the module docs for the FSM.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneStatus {
    Locked,
    PendingSubmission,
    InReview,
    Approved,
    Rejected,
}

/// A fixed-amount deliverable phase of a project, gated by sequential unlock.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    pub description: String,
    /// Portion of the project's funding goal released on approval.
    pub amount: i128,
    pub status: MilestoneStatus,
    pub due_date: NaiveDate,
    /// Reference to the proof artifact attached at submission.
    pub proof_document_url: Option<String>,
    /// Reviewer feedback recorded on rejection.
    pub feedback: Option<String>,
}

/// A funding project owned by exactly one creator.
///
/// Milestone order is significant: it defines the unlock cascade.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub creator_id: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub funding_goal: i128,
    /// Monotonically non-decreasing; grows via releases and investments.
    pub current_funding: i128,
    /// Opaque display string; not a real contract address.
    pub smart_contract_address: String,
    pub milestones: Vec<Milestone>,
}

impl Project {
    pub fn milestone(&self, id: MilestoneId) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    /// Index of a milestone within the ordered sequence.
    pub fn milestone_position(&self, id: MilestoneId) -> Option<usize> {
        self.milestones.iter().position(|m| m.id == id)
    }
}

/// Kind of ledger event a [`Transaction`] records.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    FundRelease,
    Withdrawal,
    Deposit,
    Investment,
}

/// Processing status shared by transactions and withdrawal requests.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Completed,
}

/// A ledger event. Appended alongside every balance-affecting operation;
/// only withdrawal transactions transition status after creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: i128,
    pub project_id: Option<ProjectId>,
    pub milestone_id: Option<MilestoneId>,
    /// Stable link to the withdrawal request this transaction mirrors.
    pub withdrawal_request_id: Option<u64>,
    /// Human-readable other party (milestone title, payout destination, ...).
    pub counterparty: Option<String>,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
    /// Opaque hash-like reference, generated at completion. Cosmetic only.
    pub tx_hash: Option<String>,
    pub description: Option<String>,
}

/// Whether an investment's project is still running.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    Active,
    Completed,
}

/// A donor's capital contribution to a project. Never mutated after creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: u64,
    pub donor_id: UserId,
    pub project_id: ProjectId,
    pub amount: i128,
    pub date: DateTime<Utc>,
    pub status: InvestmentStatus,
}

/// Destination details for a payout method.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodDetails {
    BankAccount {
        bank_name: String,
        account_number: String,
        account_name: String,
    },
    MobileMoney {
        provider: String,
        phone_number: String,
        registered_name: String,
    },
}

impl PaymentMethodDetails {
    /// Short label used as the counterparty on withdrawal transactions.
    pub fn display_label(&self) -> String {
        match self {
            PaymentMethodDetails::BankAccount { bank_name, .. } => bank_name.clone(),
            PaymentMethodDetails::MobileMoney {
                provider,
                phone_number,
                ..
            } => format!("{provider} - {phone_number}"),
        }
    }
}

/// A payout destination owned by one user.
///
/// At most one method per user has `is_default = true` at any instant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: u64,
    pub user_id: UserId,
    #[serde(flatten)]
    pub details: PaymentMethodDetails,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Tracks a withdrawal's asynchronous lifecycle, mirrored on its paired
/// transaction via `transaction_id`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub id: u64,
    pub user_id: UserId,
    pub amount: i128,
    pub payment_method_id: u64,
    /// Stable link to the mirrored [`Transaction`].
    pub transaction_id: u64,
    pub status: TransactionStatus,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Relationship state between a creator and a donor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    None,
    Pending,
    Connected,
    /// Kept for API compatibility; no current flow produces it.
    Rejected,
}

/// An introduction handshake between a creator and a donor.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    pub id: u64,
    pub creator_id: UserId,
    pub donor_id: UserId,
    pub status: ConnectionStatus,
    pub introduction_message: Option<String>,
    pub requested_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}
