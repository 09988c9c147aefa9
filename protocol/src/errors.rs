//! Engine-wide error types.
//!
//! Every mutating operation returns a typed failure instead of a bare
//! boolean, so callers can distinguish "insufficient balance" from "project
//! not found" and map each to the right user-facing handling.

use thiserror::Error;

use crate::types::{ConnectionStatus, MilestoneStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("user {0} not found")]
    UserNotFound(u64),

    #[error("project {0} not found")]
    ProjectNotFound(u64),

    #[error("milestone {0} not found")]
    MilestoneNotFound(u64),

    #[error("payment method {0} not found")]
    PaymentMethodNotFound(u64),

    #[error("withdrawal request {0} not found")]
    WithdrawalNotFound(u64),

    #[error("connection request {0} not found")]
    ConnectionNotFound(u64),

    #[error("transaction {0} not found")]
    TransactionNotFound(u64),

    #[error("amount must be positive, got {0}")]
    InvalidAmount(i128),

    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: i128, available: i128 },

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("milestone is {actual:?}, expected {expected:?}")]
    MilestoneNotInState {
        expected: MilestoneStatus,
        actual: MilestoneStatus,
    },

    #[error("milestone funds already released")]
    MilestoneAlreadyReleased,

    #[error("connection request is {actual:?}, expected {expected:?}")]
    ConnectionNotInState {
        expected: ConnectionStatus,
        actual: ConnectionStatus,
    },

    #[error("connection between creator {creator_id} and donor {donor_id} already {status:?}")]
    ConnectionAlreadyExists {
        creator_id: u64,
        donor_id: u64,
        status: ConnectionStatus,
    },

    #[error("user {0} is not authorized to perform this action")]
    NotAuthorized(u64),
}

/// Coarse classification used by the API layer to pick HTTP statuses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Precondition,
    Forbidden,
}

impl ProtocolError {
    pub fn kind(&self) -> ErrorKind {
        use ProtocolError::*;
        match self {
            UserNotFound(_)
            | ProjectNotFound(_)
            | MilestoneNotFound(_)
            | PaymentMethodNotFound(_)
            | WithdrawalNotFound(_)
            | ConnectionNotFound(_)
            | TransactionNotFound(_) => ErrorKind::NotFound,
            InvalidAmount(_) | InsufficientBalance { .. } | MissingField(_) => ErrorKind::Validation,
            MilestoneNotInState { .. }
            | MilestoneAlreadyReleased
            | ConnectionNotInState { .. }
            | ConnectionAlreadyExists { .. } => ErrorKind::Precondition,
            NotAuthorized(_) => ErrorKind::Forbidden,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
