use crate::config::EngineConfig;
use crate::drilldown::{drilldown_rows, DrilldownScope};
use crate::efficiency::{clean_sheet_efficiency, offensive_efficiency};
use crate::error::Result;
use crate::models::*;
use crate::positions::average_points_by_position;
use crate::scouts::points_by_scout;
use crate::series::{build_round_series, season_totals};
use crate::stars::rank_star_players;
use crate::weights::ScoutWeightTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the engine derives for one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonReport {
    pub totals: SeasonTotals,
    pub series: RoundSeries,
    pub metrics: MetricsBundle,
}

/// Stateless calculator over one team's rounds and picks
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    config: EngineConfig,
    weights: ScoutWeightTable,
}

impl MetricsCalculator {
    /// Create a calculator, resolving the configured weight table
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let weights = config.weight_table()?;
        Ok(Self { config, weights })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn weights(&self) -> &ScoutWeightTable {
        &self.weights
    }

    pub fn round_series(&self, rounds: &[RoundRecord]) -> RoundSeries {
        build_round_series(rounds, self.config.moving_average_window)
    }

    pub fn totals(&self, rounds: &[RoundRecord]) -> SeasonTotals {
        season_totals(rounds)
    }

    /// Pick metrics. The filter is applied once so every metric sees the same picks.
    pub fn metrics(&self, picks: &[PickRecord], filter: HomeAwayFilter) -> MetricsBundle {
        let picks = filter.apply(picks);
        debug!(picks = picks.len(), ?filter, "Computing pick metrics");

        MetricsBundle {
            avg_points_by_position: average_points_by_position(&picks),
            points_by_scout: points_by_scout(&picks, &self.weights, self.config.scout_epsilon),
            clean_sheet_efficiency: clean_sheet_efficiency(&picks),
            offensive_efficiency: offensive_efficiency(&picks),
            star_players: rank_star_players(&picks),
        }
    }

    pub fn report(
        &self,
        rounds: &[RoundRecord],
        picks: &[PickRecord],
        filter: HomeAwayFilter,
    ) -> SeasonReport {
        SeasonReport {
            totals: self.totals(rounds),
            series: self.round_series(rounds),
            metrics: self.metrics(picks, filter),
        }
    }

    pub fn drilldown(
        &self,
        rounds: &[RoundRecord],
        picks: &[PickRecord],
        scope: DrilldownScope,
        filter: HomeAwayFilter,
    ) -> Vec<DrilldownRow> {
        drilldown_rows(&filter.apply(picks), rounds, scope)
    }
}
