//! Project creation.
//!
//! New projects are registered with a three-milestone template that splits
//! the funding goal 20/50/30, the remainder folded into the last milestone
//! so the amounts always sum exactly to the goal.

use chrono::{Duration as ChronoDuration, Utc};

use crate::access;
use crate::errors::{ProtocolError, Result};
use crate::ledger::random_hash;
use crate::types::{Milestone, MilestoneStatus, Project, UserId, UserRole};
use crate::Platform;

/// Template phases: title, description, percent of goal, due in days.
const MILESTONE_TEMPLATE: [(&str, &str, i128, i64); 3] = [
    (
        "Project Kickoff",
        "Initial setup and resource allocation.",
        20,
        90,
    ),
    (
        "Development Phase",
        "Core product development.",
        50,
        180,
    ),
    (
        "Final Delivery",
        "Project completion and impact assessment.",
        30,
        270,
    ),
];

impl Platform {
    /// Register a new funding project.
    ///
    /// The caller must hold the creator role. The first milestone starts
    /// `PendingSubmission`; all subsequent milestones start `Locked`.
    pub async fn create_project(
        &self,
        creator_id: UserId,
        title: &str,
        description: &str,
        category: &str,
        funding_goal: i128,
    ) -> Result<Project> {
        if title.trim().is_empty() {
            return Err(ProtocolError::MissingField("title"));
        }
        if description.trim().is_empty() {
            return Err(ProtocolError::MissingField("description"));
        }
        if funding_goal <= 0 {
            return Err(ProtocolError::InvalidAmount(funding_goal));
        }

        let mut store = self.store().write().await;
        access::require_role(&store, creator_id, UserRole::Creator)?;

        let today = Utc::now().date_naive();
        let mut milestones = Vec::with_capacity(MILESTONE_TEMPLATE.len());
        let mut allocated: i128 = 0;
        for (i, (m_title, m_desc, percent, due_days)) in MILESTONE_TEMPLATE.iter().enumerate() {
            let last = i == MILESTONE_TEMPLATE.len() - 1;
            // The last phase absorbs integer-division remainders.
            let amount = if last {
                funding_goal - allocated
            } else {
                funding_goal * percent / 100
            };
            allocated += amount;
            milestones.push(Milestone {
                id: store.allocate_id(),
                title: (*m_title).to_string(),
                description: (*m_desc).to_string(),
                amount,
                status: if i == 0 {
                    MilestoneStatus::PendingSubmission
                } else {
                    MilestoneStatus::Locked
                },
                due_date: today + ChronoDuration::days(*due_days),
                proof_document_url: None,
                feedback: None,
            });
        }
        debug_assert_eq!(allocated, funding_goal);

        let project = Project {
            id: store.allocate_id(),
            creator_id,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            funding_goal,
            current_funding: 0,
            smart_contract_address: random_hash(),
            milestones,
        };
        store.projects.push(project.clone());
        store.user_mut(creator_id)?.active_projects += 1;

        tracing::info!(
            project_id = project.id,
            creator_id,
            funding_goal,
            "project created"
        );
        Ok(project)
    }
}
