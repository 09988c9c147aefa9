//! Axum REST API handlers.
//!
//! Thin adapters between HTTP and the engine: deserialize the request,
//! invoke the operation, map the typed failure to a status code. No
//! business logic lives here.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use texora_protocol::{types::PaymentMethodDetails, ErrorKind, Platform, ProtocolError};

#[derive(Clone)]
pub struct ApiState {
    pub platform: Platform,
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub creator_id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub funding_goal: i128,
}

#[derive(Deserialize)]
pub struct SubmitMilestoneRequest {
    pub creator_id: u64,
    pub notes: String,
    pub proof_ref: String,
}

#[derive(Deserialize)]
pub struct ReleaseFundsRequest {
    pub approver_id: u64,
}

#[derive(Deserialize)]
pub struct RejectMilestoneRequest {
    pub reviewer_id: u64,
    pub feedback: String,
}

#[derive(Deserialize)]
pub struct CreateInvestmentRequest {
    pub donor_id: u64,
    pub project_id: u64,
    pub amount: i128,
}

#[derive(Deserialize)]
pub struct InitiateWithdrawalRequest {
    pub user_id: u64,
    pub amount: i128,
    pub payment_method_id: u64,
}

#[derive(Deserialize)]
pub struct AddPaymentMethodRequest {
    pub user_id: u64,
    #[serde(flatten)]
    pub details: PaymentMethodDetails,
}

#[derive(Deserialize)]
pub struct MethodOwnerRequest {
    pub user_id: u64,
}

#[derive(Deserialize)]
pub struct RequestConnectionRequest {
    pub creator_id: u64,
    pub donor_id: u64,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ConnectionStatusResponse {
    pub creator_id: u64,
    pub donor_id: u64,
    pub status: texora_protocol::types::ConnectionStatus,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(e: ProtocolError) -> Response {
    let status = match e.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Precondition => StatusCode::CONFLICT,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
    };
    (
        status,
        Json(serde_json::json!(ErrorResponse {
            error: e.to_string(),
        })),
    )
        .into_response()
}

fn json_result<T: Serialize>(result: Result<T, ProtocolError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => error_response(e),
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /users`
pub async fn list_users(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    Json(state.platform.users().await)
}

/// `GET /users/:id`
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    json_result(state.platform.user(id).await)
}

/// `GET /projects`
pub async fn list_projects(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    Json(state.platform.projects().await)
}

/// `GET /projects/:id`
pub async fn get_project(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    json_result(state.platform.project(id).await)
}

/// `POST /projects`
pub async fn create_project(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .create_project(
                req.creator_id,
                &req.title,
                &req.description,
                &req.category,
                req.funding_goal,
            )
            .await,
    )
}

/// `POST /projects/:id/milestones/:mid/submit`
pub async fn submit_milestone(
    State(state): State<Arc<ApiState>>,
    Path((project_id, milestone_id)): Path<(u64, u64)>,
    Json(req): Json<SubmitMilestoneRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .submit_milestone(
                req.creator_id,
                project_id,
                milestone_id,
                &req.notes,
                &req.proof_ref,
            )
            .await,
    )
}

/// `POST /projects/:id/milestones/:mid/release`
pub async fn release_funds(
    State(state): State<Arc<ApiState>>,
    Path((project_id, milestone_id)): Path<(u64, u64)>,
    Json(req): Json<ReleaseFundsRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .release_funds(req.approver_id, project_id, milestone_id)
            .await,
    )
}

/// `POST /projects/:id/milestones/:mid/reject`
pub async fn reject_milestone(
    State(state): State<Arc<ApiState>>,
    Path((project_id, milestone_id)): Path<(u64, u64)>,
    Json(req): Json<RejectMilestoneRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .reject_milestone(req.reviewer_id, project_id, milestone_id, &req.feedback)
            .await,
    )
}

/// `POST /investments`
pub async fn create_investment(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<CreateInvestmentRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .create_investment(req.donor_id, req.project_id, req.amount)
            .await,
    )
}

/// `POST /withdrawals`
pub async fn initiate_withdrawal(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<InitiateWithdrawalRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .initiate_withdrawal(req.user_id, req.amount, req.payment_method_id)
            .await,
    )
}

/// `GET /users/:id/transactions`
pub async fn get_user_transactions(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<u64>,
) -> impl IntoResponse {
    Json(state.platform.transactions_by_user(user_id).await)
}

/// `GET /users/:id/investments`
pub async fn get_donor_investments(
    State(state): State<Arc<ApiState>>,
    Path(donor_id): Path<u64>,
) -> impl IntoResponse {
    Json(state.platform.investments_by_donor(donor_id).await)
}

/// `GET /users/:id/payment-methods`
pub async fn get_payment_methods(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<u64>,
) -> impl IntoResponse {
    Json(state.platform.payment_methods_by_user(user_id).await)
}

/// `POST /payment-methods`
pub async fn add_payment_method(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<AddPaymentMethodRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .add_payment_method(req.user_id, req.details)
            .await,
    )
}

/// `POST /payment-methods/:id/default`
pub async fn set_default_payment_method(
    State(state): State<Arc<ApiState>>,
    Path(method_id): Path<u64>,
    Json(req): Json<MethodOwnerRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .set_default_payment_method(req.user_id, method_id)
            .await,
    )
}

/// `DELETE /payment-methods/:id`
pub async fn delete_payment_method(
    State(state): State<Arc<ApiState>>,
    Path(method_id): Path<u64>,
    Json(req): Json<MethodOwnerRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .delete_payment_method(req.user_id, method_id)
            .await,
    )
}

/// `POST /connections`
pub async fn request_connection(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<RequestConnectionRequest>,
) -> impl IntoResponse {
    json_result(
        state
            .platform
            .request_connection(req.creator_id, req.donor_id, req.message)
            .await,
    )
}

/// `GET /connections/:creator_id/:donor_id`
pub async fn get_connection_status(
    State(state): State<Arc<ApiState>>,
    Path((creator_id, donor_id)): Path<(u64, u64)>,
) -> impl IntoResponse {
    let status = state.platform.connection_status(creator_id, donor_id).await;
    Json(ConnectionStatusResponse {
        creator_id,
        donor_id,
        status,
    })
}
