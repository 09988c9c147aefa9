//! Withdrawal workflow.
//!
//! `Pending → Processing → Completed`, mirrored on the paired transaction
//! through stable foreign keys. Funds are placed on hold at initiation
//! (`user.reserved`), so concurrent withdrawals cannot pass a stale balance
//! check; the balance itself is debited only at settlement. Once initiated,
//! the pipeline is fire-and-forget.

use chrono::Utc;

use crate::access;
use crate::errors::{ProtocolError, Result};
use crate::ledger::random_hash;
use crate::scheduler::JobKey;
use crate::types::{
    Transaction, TransactionStatus, TransactionType, UserId, WithdrawalRequest,
};
use crate::Platform;

impl Platform {
    /// Request a withdrawal to one of the caller's payment methods.
    ///
    /// Creates the request and its paired transaction (both `Pending`),
    /// holds the funds, and schedules asynchronous processing.
    pub async fn initiate_withdrawal(
        &self,
        user_id: UserId,
        amount: i128,
        payment_method_id: u64,
    ) -> Result<WithdrawalRequest> {
        if amount <= 0 {
            return Err(ProtocolError::InvalidAmount(amount));
        }

        let request = {
            let mut store = self.store().write().await;

            let method = store.payment_method(payment_method_id)?;
            access::require_method_owner(method, user_id)?;
            let destination = method.details.display_label();

            let available = store.user(user_id)?.available_balance();
            if amount > available {
                return Err(ProtocolError::InsufficientBalance {
                    requested: amount,
                    available,
                });
            }

            let request_id = store.allocate_id();
            let tx_id = store.allocate_id();
            let now = Utc::now();

            let request = WithdrawalRequest {
                id: request_id,
                user_id,
                amount,
                payment_method_id,
                transaction_id: tx_id,
                status: TransactionStatus::Pending,
                requested_at: now,
                processed_at: None,
                completed_at: None,
            };
            store.withdrawal_requests.push(request.clone());
            store.transactions.push(Transaction {
                id: tx_id,
                user_id,
                tx_type: TransactionType::Withdrawal,
                amount,
                project_id: None,
                milestone_id: None,
                withdrawal_request_id: Some(request_id),
                counterparty: Some(destination.clone()),
                date: now,
                status: TransactionStatus::Pending,
                tx_hash: None,
                description: Some(format!("Withdrawal to {destination}")),
            });

            // Hold the funds until settlement.
            store.user_mut(user_id)?.reserved += amount;
            request
        };

        let platform = self.clone();
        let request_id = request.id;
        self.scheduler().schedule(
            JobKey::Withdrawal { request_id },
            self.delays().withdrawal_processing,
            async move {
                platform.run_withdrawal_pipeline(request_id).await;
            },
        );

        tracing::info!(user_id, amount, request_id = request.id, "withdrawal initiated");
        Ok(request)
    }

    async fn run_withdrawal_pipeline(&self, request_id: u64) {
        if let Err(e) = self.mark_withdrawal_processing(request_id).await {
            tracing::warn!(request_id, error = %e, "withdrawal processing failed");
            return;
        }
        tokio::time::sleep(self.delays().withdrawal_settlement).await;
        if let Err(e) = self.settle_withdrawal(request_id).await {
            tracing::warn!(request_id, error = %e, "withdrawal settlement failed");
        }
    }

    async fn mark_withdrawal_processing(&self, request_id: u64) -> Result<()> {
        let mut store = self.store().write().await;
        let request = store.withdrawal_mut(request_id)?;
        request.status = TransactionStatus::Processing;
        request.processed_at = Some(Utc::now());
        let tx_id = request.transaction_id;
        store.transaction_mut(tx_id)?.status = TransactionStatus::Processing;
        Ok(())
    }

    /// Final phase: mark both records completed and debit the balance.
    async fn settle_withdrawal(&self, request_id: u64) -> Result<()> {
        let mut store = self.store().write().await;

        let request = store.withdrawal_mut(request_id)?;
        request.status = TransactionStatus::Completed;
        request.completed_at = Some(Utc::now());
        let (user_id, amount, tx_id) = (request.user_id, request.amount, request.transaction_id);

        let tx = store.transaction_mut(tx_id)?;
        tx.status = TransactionStatus::Completed;
        tx.tx_hash = Some(random_hash());

        let user = store.user_mut(user_id)?;
        user.balance -= amount;
        user.reserved -= amount;

        tracing::info!(user_id, amount, request_id, "withdrawal settled");
        Ok(())
    }
}
