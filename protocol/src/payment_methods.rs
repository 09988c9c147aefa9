//! Payment method management.
//!
//! Invariant: at most one method per user is the default at any instant.
//! The first method a user adds becomes their default; `set_default` clears
//! the flag on siblings. Only the owner may manage a method.

use chrono::Utc;

use crate::access;
use crate::errors::Result;
use crate::types::{PaymentMethod, PaymentMethodDetails, UserId};
use crate::Platform;

impl Platform {
    pub async fn add_payment_method(
        &self,
        user_id: UserId,
        details: PaymentMethodDetails,
    ) -> Result<PaymentMethod> {
        let mut store = self.store().write().await;
        store.user(user_id)?;

        let is_default = !store.payment_methods.iter().any(|pm| pm.user_id == user_id);
        let method = PaymentMethod {
            id: store.allocate_id(),
            user_id,
            details,
            is_default,
            created_at: Utc::now(),
        };
        store.payment_methods.push(method.clone());
        tracing::info!(user_id, method_id = method.id, "payment method added");
        Ok(method)
    }

    pub async fn set_default_payment_method(&self, user_id: UserId, method_id: u64) -> Result<()> {
        let mut store = self.store().write().await;
        let method = store.payment_method(method_id)?;
        access::require_method_owner(method, user_id)?;

        for pm in store
            .payment_methods
            .iter_mut()
            .filter(|pm| pm.user_id == user_id)
        {
            pm.is_default = pm.id == method_id;
        }
        Ok(())
    }

    pub async fn delete_payment_method(&self, user_id: UserId, method_id: u64) -> Result<()> {
        let mut store = self.store().write().await;
        let method = store.payment_method(method_id)?;
        access::require_method_owner(method, user_id)?;

        store.payment_methods.retain(|pm| pm.id != method_id);
        tracing::info!(user_id, method_id, "payment method deleted");
        Ok(())
    }
}
