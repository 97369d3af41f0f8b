//! Error types for the dashboard service

use scout_engine::EngineError;
use thiserror::Error;

/// Result type for dashboard service operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors that can occur while assembling a dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] EngineError),

    #[error("Team not found (import first): {0}")]
    TeamNotFound(i64),

    #[error("Upstream {source_name} unavailable: {message}")]
    Upstream { source_name: &'static str, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DashboardError {
    pub fn upstream(source_name: &'static str, message: impl Into<String>) -> Self {
        DashboardError::Upstream { source_name, message: message.into() }
    }

    /// Whether the caller sent a bad request, as opposed to a lookup or upstream failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, DashboardError::InvalidRequest(_))
    }
}
