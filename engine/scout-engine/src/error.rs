//! Error types for the scout engine
//!
//! Aggregation itself never fails; these cover structural input validation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("missing/invalid team_id: {0}")]
    InvalidTeamId(String),

    #[error("invalid home/away filter: {0} (use true|false)")]
    InvalidFilter(String),

    #[error("invalid pos {code} for {kind} drilldown (use {allowed})")]
    InvalidPosition { code: String, kind: &'static str, allowed: &'static str },

    #[error("invalid drilldown kind: {0} (use offense|defense)")]
    InvalidDrilldownKind(String),

    #[error("invalid scout weight table: {0}")]
    InvalidWeightTable(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
