//! Connection workflow.
//!
//! A creator introduces themself to a donor: `None → Pending → Connected`.
//! The demo auto-accepts pending requests after a configurable delay. A
//! pair can hold at most one live relationship; duplicate requests are
//! rejected rather than stacked.

use chrono::Utc;

use crate::access;
use crate::errors::{ProtocolError, Result};
use crate::scheduler::JobKey;
use crate::types::{ConnectionRequest, ConnectionStatus, UserId, UserRole};
use crate::Platform;

impl Platform {
    /// Send an introduction request from a creator to a donor.
    pub async fn request_connection(
        &self,
        creator_id: UserId,
        donor_id: UserId,
        message: Option<String>,
    ) -> Result<ConnectionRequest> {
        let request = {
            let mut store = self.store().write().await;
            access::require_role(&store, creator_id, UserRole::Creator)?;
            access::require_role(&store, donor_id, UserRole::Donor)?;

            let status = store.connection_status(creator_id, donor_id);
            if status != ConnectionStatus::None {
                return Err(ProtocolError::ConnectionAlreadyExists {
                    creator_id,
                    donor_id,
                    status,
                });
            }

            let request = ConnectionRequest {
                id: store.allocate_id(),
                creator_id,
                donor_id,
                status: ConnectionStatus::Pending,
                introduction_message: message,
                requested_at: Utc::now(),
                responded_at: None,
            };
            store.connection_requests.push(request.clone());
            request
        };

        let platform = self.clone();
        let request_id = request.id;
        self.scheduler().schedule(
            JobKey::ConnectionAccept { request_id },
            self.delays().connection_accept,
            async move {
                if let Err(e) = platform.accept_connection(request_id).await {
                    tracing::debug!(request_id, error = %e, "auto-accept skipped");
                }
            },
        );

        tracing::info!(creator_id, donor_id, request_id = request.id, "connection requested");
        Ok(request)
    }

    /// Accept a pending request, recording the response time. Called by the
    /// auto-accept timer; exposed so a donor action could take the same path.
    pub async fn accept_connection(&self, request_id: u64) -> Result<ConnectionRequest> {
        let mut store = self.store().write().await;
        let request = store.connection_mut(request_id)?;
        match request.status {
            ConnectionStatus::Pending => {}
            actual => {
                return Err(ProtocolError::ConnectionNotInState {
                    expected: ConnectionStatus::Pending,
                    actual,
                })
            }
        }
        request.status = ConnectionStatus::Connected;
        request.responded_at = Some(Utc::now());
        tracing::info!(
            request_id,
            creator_id = request.creator_id,
            donor_id = request.donor_id,
            "connection accepted"
        );
        Ok(request.clone())
    }
}
