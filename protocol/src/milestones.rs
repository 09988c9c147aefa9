//! Milestone state machine.
//!
//! Submission and rejection live here; approval is a ledger operation
//! ([`Platform::release_funds`]) because it moves money. Submitting a
//! milestone arms the escrow timer: a milestone left in review for the
//! configured timeout is released automatically, as if a donor had verified
//! it. A manual release or rejection cancels the timer.

use crate::access;
use crate::errors::{ProtocolError, Result};
use crate::scheduler::JobKey;
use crate::types::{MilestoneId, MilestoneStatus, ProjectId, UserId};
use crate::Platform;

impl Platform {
    /// Submit a milestone for review, attaching a proof reference.
    ///
    /// Valid from `PendingSubmission` or `Rejected` (resubmission). Empty
    /// notes or proof are rejected up front rather than silently ignored.
    pub async fn submit_milestone(
        &self,
        creator_id: UserId,
        project_id: ProjectId,
        milestone_id: MilestoneId,
        notes: &str,
        proof_ref: &str,
    ) -> Result<()> {
        if notes.trim().is_empty() {
            return Err(ProtocolError::MissingField("notes"));
        }
        if proof_ref.trim().is_empty() {
            return Err(ProtocolError::MissingField("proof"));
        }

        // Simulated upload + network latency.
        tokio::time::sleep(self.delays().confirmation).await;

        {
            let mut store = self.store().write().await;
            access::require_project_creator(&store, creator_id, project_id)?;

            let project = store.project_mut(project_id)?;
            let milestone = project
                .milestones
                .iter_mut()
                .find(|m| m.id == milestone_id)
                .ok_or(ProtocolError::MilestoneNotFound(milestone_id))?;

            match milestone.status {
                MilestoneStatus::PendingSubmission | MilestoneStatus::Rejected => {}
                actual => {
                    return Err(ProtocolError::MilestoneNotInState {
                        expected: MilestoneStatus::PendingSubmission,
                        actual,
                    })
                }
            }
            milestone.status = MilestoneStatus::InReview;
            milestone.proof_document_url = Some(proof_ref.to_string());
            milestone.feedback = None;
        }

        // Arm the escrow timer. The job re-checks state under the lock, so a
        // manual release that wins the race leaves it a harmless no-op.
        let platform = self.clone();
        self.scheduler().schedule(
            JobKey::MilestoneReview {
                project_id,
                milestone_id,
            },
            self.delays().review_timeout,
            async move {
                if let Err(e) = platform.release_to_creator(project_id, milestone_id).await {
                    tracing::debug!(project_id, milestone_id, error = %e, "auto-release skipped");
                }
            },
        );

        tracing::info!(project_id, milestone_id, creator_id, "milestone submitted for review");
        Ok(())
    }

    /// Reject an in-review milestone with feedback, returning it to the
    /// creator for resubmission.
    pub async fn reject_milestone(
        &self,
        reviewer_id: UserId,
        project_id: ProjectId,
        milestone_id: MilestoneId,
        feedback: &str,
    ) -> Result<()> {
        if feedback.trim().is_empty() {
            return Err(ProtocolError::MissingField("feedback"));
        }

        {
            let mut store = self.store().write().await;
            access::require_approver(&store, reviewer_id)?;

            let project = store.project_mut(project_id)?;
            let milestone = project
                .milestones
                .iter_mut()
                .find(|m| m.id == milestone_id)
                .ok_or(ProtocolError::MilestoneNotFound(milestone_id))?;

            match milestone.status {
                MilestoneStatus::InReview => {}
                actual => {
                    return Err(ProtocolError::MilestoneNotInState {
                        expected: MilestoneStatus::InReview,
                        actual,
                    })
                }
            }
            milestone.status = MilestoneStatus::Rejected;
            milestone.feedback = Some(feedback.to_string());
        }

        // A rejected milestone must not auto-release.
        self.scheduler().cancel(&JobKey::MilestoneReview {
            project_id,
            milestone_id,
        });

        tracing::info!(project_id, milestone_id, reviewer_id, "milestone rejected");
        Ok(())
    }
}
