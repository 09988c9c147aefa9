//! Funding ledger.
//!
//! The two balance-moving entry points: releasing escrowed milestone funds
//! to a creator and recording a donor's investment. Both simulate
//! confirmation latency, then apply every sub-write (milestone status,
//! project funding, user balance and aggregates, transaction record) under
//! one write guard.

use chrono::Utc;

use crate::access;
use crate::errors::{ProtocolError, Result};
use crate::scheduler::JobKey;
use crate::types::{
    Investment, InvestmentStatus, MilestoneId, MilestoneStatus, ProjectId, Transaction,
    TransactionStatus, TransactionType, UserId, UserRole,
};
use crate::Platform;

/// Opaque hash-like reference for simulated contract activity.
pub(crate) fn random_hash() -> String {
    let bytes: [u8; 20] = rand::random();
    format!("0x{}", hex::encode(bytes))
}

impl Platform {
    /// Verify a milestone and release its funds to the project creator.
    ///
    /// The approver must hold the donor role; the escrow timer takes the
    /// same path via [`Platform::release_to_creator`].
    pub async fn release_funds(
        &self,
        approver_id: UserId,
        project_id: ProjectId,
        milestone_id: MilestoneId,
    ) -> Result<Transaction> {
        {
            let store = self.store().read().await;
            access::require_approver(&store, approver_id)?;
        }

        // Simulated transaction confirmation.
        tokio::time::sleep(self.delays().confirmation).await;

        self.release_to_creator(project_id, milestone_id).await
    }

    /// Core release path, shared by manual approval and the escrow timer.
    ///
    /// Preconditions are re-checked under the write guard, so a timer firing
    /// while a manual approval is in flight can never double-credit.
    pub(crate) async fn release_to_creator(
        &self,
        project_id: ProjectId,
        milestone_id: MilestoneId,
    ) -> Result<Transaction> {
        let tx = {
            let mut store = self.store().write().await;

            let project = store.project(project_id)?;
            let creator_id = project.creator_id;
            let position = project
                .milestone_position(milestone_id)
                .ok_or(ProtocolError::MilestoneNotFound(milestone_id))?;
            let milestone = &project.milestones[position];
            match milestone.status {
                MilestoneStatus::InReview => {}
                MilestoneStatus::Approved => return Err(ProtocolError::MilestoneAlreadyReleased),
                actual => {
                    return Err(ProtocolError::MilestoneNotInState {
                        expected: MilestoneStatus::InReview,
                        actual,
                    })
                }
            }
            let amount = milestone.amount;
            let title = milestone.title.clone();

            let tx_id = store.allocate_id();
            let project = store.project_mut(project_id)?;
            project.milestones[position].status = MilestoneStatus::Approved;
            project.current_funding += amount;
            // Sequential unlock: only the immediately following milestone.
            if let Some(next) = project.milestones.get_mut(position + 1) {
                if next.status == MilestoneStatus::Locked {
                    next.status = MilestoneStatus::PendingSubmission;
                }
            }

            let creator = store.user_mut(creator_id)?;
            creator.balance += amount;
            creator.total_raised += amount;

            let tx = Transaction {
                id: tx_id,
                user_id: creator_id,
                tx_type: TransactionType::FundRelease,
                amount,
                project_id: Some(project_id),
                milestone_id: Some(milestone_id),
                withdrawal_request_id: None,
                counterparty: Some(format!("Milestone: {title}")),
                date: Utc::now(),
                status: TransactionStatus::Completed,
                tx_hash: Some(random_hash()),
                description: Some(format!("Fund release for \"{title}\"")),
            };
            store.transactions.push(tx.clone());
            tx
        };

        // A completed release supersedes any pending escrow timer.
        self.scheduler().cancel(&JobKey::MilestoneReview {
            project_id,
            milestone_id,
        });

        tracing::info!(
            project_id,
            milestone_id,
            amount = tx.amount,
            "milestone funds released"
        );
        Ok(tx)
    }

    /// Record a donor's investment in a project.
    pub async fn create_investment(
        &self,
        donor_id: UserId,
        project_id: ProjectId,
        amount: i128,
    ) -> Result<Investment> {
        if amount <= 0 {
            return Err(ProtocolError::InvalidAmount(amount));
        }

        // Simulated transaction confirmation.
        tokio::time::sleep(self.delays().confirmation).await;

        let mut store = self.store().write().await;
        access::require_role(&store, donor_id, UserRole::Donor)?;
        let project_title = store.project(project_id)?.title.clone();

        let available = store.user(donor_id)?.available_balance();
        if amount > available {
            return Err(ProtocolError::InsufficientBalance {
                requested: amount,
                available,
            });
        }

        let investment_id = store.allocate_id();
        let tx_id = store.allocate_id();
        let now = Utc::now();

        let donor = store.user_mut(donor_id)?;
        donor.balance -= amount;
        donor.total_invested += amount;
        donor.active_investments += 1;

        store.project_mut(project_id)?.current_funding += amount;

        let investment = Investment {
            id: investment_id,
            donor_id,
            project_id,
            amount,
            date: now,
            status: InvestmentStatus::Active,
        };
        store.investments.push(investment.clone());
        store.transactions.push(Transaction {
            id: tx_id,
            user_id: donor_id,
            tx_type: TransactionType::Investment,
            amount,
            project_id: Some(project_id),
            milestone_id: None,
            withdrawal_request_id: None,
            counterparty: Some(project_title.clone()),
            date: now,
            status: TransactionStatus::Completed,
            tx_hash: Some(random_hash()),
            description: Some(format!("Investment in \"{project_title}\"")),
        });

        tracing::info!(donor_id, project_id, amount, "investment recorded");
        Ok(investment)
    }
}
