//! Scout Dashboard Service
//!
//! Loads a fantasy team's imported rounds and picks, runs the scout engine over
//! them and assembles the season dashboard and efficiency drilldowns.

pub mod cli;
mod config;
mod error;
mod logging;
mod service;
pub mod stores;
mod types;

pub use cli::{Cli, CliHandler, Commands};
pub use config::{DashboardConfig, LoggingConfig, StoreConfig};
pub use error::{DashboardError, Result};
pub use logging::initialize_logging;
pub use service::DashboardService;
pub use stores::{
    ClubDirectory, DashboardStore, InMemoryStore, JsonFileStore, PickStore, RoundStore,
    TeamDirectory,
};
pub use types::{
    parse_home_filter, pick_badge, AppliedFilters, ClubInfo, DashboardResponse, DrilldownEntry,
    DrilldownResponse, TeamId, TeamInfo, UNKNOWN_CLUB_NAME,
};

/// Re-export the engine for downstream consumers
pub use scout_engine;
