//! Scout Engine
//!
//! Pure aggregation over one fantasy team's imported rounds and picks: the
//! 38-round points and asset value series, positional averages, clean-sheet and
//! goal/assist efficiency tables, scout point contributions and the best player
//! per position. Nothing here performs I/O; loosely shaped upstream rows enter
//! through [`normalization`].

pub mod calculator;
pub mod config;
pub mod drilldown;
pub mod efficiency;
pub mod error;
pub mod models;
pub mod normalization;
pub mod positions;
pub mod scouts;
pub mod series;
pub mod stars;
pub mod weights;

pub use calculator::{MetricsCalculator, SeasonReport};
pub use config::EngineConfig;
pub use drilldown::DrilldownScope;
pub use error::{EngineError, Result};
pub use models::*;
pub use weights::{ScoutWeight, ScoutWeightTable, WeightScheme};
