//! Application configuration loaded from environment variables.

use std::time::Duration;

use texora_protocol::Delays;

use crate::errors::{ApiError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the REST API server
    pub api_port: u16,
    /// Simulated confirmation latency on ledger operations (ms)
    pub confirmation_ms: u64,
    /// Escrow auto-release timeout for milestones left in review (ms)
    pub review_timeout_ms: u64,
    /// Withdrawal initiation → processing delay (ms)
    pub withdrawal_processing_ms: u64,
    /// Withdrawal processing → settlement delay (ms)
    pub withdrawal_settlement_ms: u64,
    /// Connection request auto-accept delay (ms)
    pub connection_accept_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            api_port: parse_or("API_PORT", 3001)?,
            confirmation_ms: parse_or("CONFIRMATION_MS", 2_000)?,
            review_timeout_ms: parse_or("REVIEW_TIMEOUT_MS", 10_000)?,
            withdrawal_processing_ms: parse_or("WITHDRAWAL_PROCESSING_MS", 2_000)?,
            withdrawal_settlement_ms: parse_or("WITHDRAWAL_SETTLEMENT_MS", 4_000)?,
            connection_accept_ms: parse_or("CONNECTION_ACCEPT_MS", 8_000)?,
        })
    }

    /// Workflow pacing handed to the engine.
    pub fn delays(&self) -> Delays {
        Delays {
            confirmation: Duration::from_millis(self.confirmation_ms),
            review_timeout: Duration::from_millis(self.review_timeout_ms),
            withdrawal_processing: Duration::from_millis(self.withdrawal_processing_ms),
            withdrawal_settlement: Duration::from_millis(self.withdrawal_settlement_ms),
            connection_accept: Duration::from_millis(self.connection_accept_ms),
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ApiError::Config(format!("Invalid {key}"))),
        Err(_) => Ok(default),
    }
}
