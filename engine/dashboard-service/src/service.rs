//! Dashboard service implementation
//!
//! Reads one team's imported rounds and picks from the configured store, runs the
//! scout engine over them and resolves club badges with a single batched lookup.

use crate::error::{DashboardError, Result};
use crate::stores::DashboardStore;
use crate::types::{
    DashboardResponse, DrilldownEntry, DrilldownResponse, TeamId, TeamInfo, UNKNOWN_CLUB_NAME,
};
use chrono::Utc;
use scout_engine::stars::{attach_badges, club_ids_to_resolve};
use scout_engine::{
    DrilldownKind, DrilldownScope, EngineConfig, HomeAwayFilter, MetricsCalculator, RoundId,
    RoundRecord,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Assembles dashboards and drilldowns for imported teams
pub struct DashboardService {
    calculator: MetricsCalculator,
    store: Arc<dyn DashboardStore>,
}

impl DashboardService {
    pub fn new(config: EngineConfig, store: Arc<dyn DashboardStore>) -> Result<Self> {
        let calculator = MetricsCalculator::new(config)
            .map_err(|e| DashboardError::Configuration(e.to_string()))?;
        info!(
            weights = calculator.weights().len(),
            window = calculator.config().moving_average_window,
            "Dashboard service ready"
        );
        Ok(Self { calculator, store })
    }

    pub fn calculator(&self) -> &MetricsCalculator {
        &self.calculator
    }

    /// Build the full dashboard of a team
    pub async fn build_dashboard(
        &self,
        team_id: TeamId,
        filter: HomeAwayFilter,
    ) -> Result<DashboardResponse> {
        let (team, rounds) = self.load_team_rounds(team_id).await?;
        let round_ids: Vec<RoundId> = rounds.iter().map(|r| r.id).collect();
        let picks = self.store.picks_for_rounds(team_id, &round_ids).await?;

        info!(
            team_id = team_id.get(),
            rounds = rounds.len(),
            picks = picks.len(),
            ?filter,
            "Building dashboard"
        );

        let mut report = self.calculator.report(&rounds, &picks, filter);

        let club_ids = club_ids_to_resolve(&report.metrics.star_players);
        let clubs = self.store.clubs(&club_ids).await?;
        let badges: HashMap<i64, Option<String>> =
            clubs.into_iter().map(|club| (club.id, club.badge_url)).collect();
        if badges.len() < club_ids.len() {
            debug!(
                requested = club_ids.len(),
                resolved = badges.len(),
                "Some star player clubs are unknown to the directory"
            );
        }
        attach_badges(&mut report.metrics.star_players, &badges);

        Ok(DashboardResponse {
            team_id: team_id.get(),
            team,
            filters: filter.into(),
            totals: report.totals,
            series: report.series,
            metrics: report.metrics,
            generated_at: Utc::now(),
        })
    }

    /// List the picks behind one row of an efficiency table
    pub async fn drilldown(
        &self,
        team_id: TeamId,
        kind: DrilldownKind,
        position_code: &str,
        filter: HomeAwayFilter,
    ) -> Result<DrilldownResponse> {
        let scope = DrilldownScope::parse(kind, position_code)?;

        let (_team, rounds) = self.load_team_rounds(team_id).await?;
        let round_ids: Vec<RoundId> = rounds.iter().map(|r| r.id).collect();
        let picks = self.store.picks_for_rounds(team_id, &round_ids).await?;

        let rows = self.calculator.drilldown(&rounds, &picks, scope, filter);
        debug!(team_id = team_id.get(), pos = scope.label(), rows = rows.len(), "Drilldown rows");

        let club_ids: Vec<i64> =
            rows.iter().filter_map(|row| row.club_id).collect::<BTreeSet<_>>().into_iter().collect();
        let clubs: HashMap<i64, _> =
            self.store.clubs(&club_ids).await?.into_iter().map(|club| (club.id, club)).collect();

        let rows = rows
            .into_iter()
            .map(|row| {
                let club = row.club_id.and_then(|id| clubs.get(&id));
                DrilldownEntry {
                    round: row.round,
                    player_name: row.player_name,
                    club_id: row.club_id,
                    club_name: club
                        .map(|c| c.name.clone())
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| UNKNOWN_CLUB_NAME.to_string()),
                    club_badge_url: club.and_then(|c| c.badge_url.clone()),
                    points: row.points,
                    ok: row.ok,
                }
            })
            .collect();

        Ok(DrilldownResponse {
            team_id: team_id.get(),
            kind,
            pos: scope.label().to_string(),
            filters: filter.into(),
            rows,
        })
    }

    /// Team identity and rounds, read concurrently
    async fn load_team_rounds(&self, team_id: TeamId) -> Result<(TeamInfo, Vec<RoundRecord>)> {
        let (team, rounds) = tokio::try_join!(
            self.store.team(team_id),
            self.store.rounds_for_team(team_id)
        )?;

        let Some(team) = team else {
            warn!(team_id = team_id.get(), "Team not imported");
            return Err(DashboardError::TeamNotFound(team_id.get()));
        };

        Ok((team, rounds))
    }
}
