//! Data sources behind the dashboard
//!
//! Each collaborator is an async trait so the service can run against imported
//! JSON files, an in-memory fixture, or any future backend.

use crate::error::{DashboardError, Result};
use crate::types::{ClubInfo, TeamId, TeamInfo};
use scout_engine::normalization::{coerce_i64, first_present, normalize_pick, normalize_round};
use scout_engine::{PickRecord, RoundId, RoundRecord};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const TEAMS_FILE: &str = "teams.json";
pub const ROUNDS_FILE: &str = "team_rounds.json";
pub const PICKS_FILE: &str = "picks.json";
pub const CLUBS_FILE: &str = "clubs.json";

/// Looks up team identity
#[async_trait::async_trait]
pub trait TeamDirectory: Send + Sync {
    async fn team(&self, team_id: TeamId) -> Result<Option<TeamInfo>>;
}

/// Imported rounds per team
#[async_trait::async_trait]
pub trait RoundStore: Send + Sync {
    async fn rounds_for_team(&self, team_id: TeamId) -> Result<Vec<RoundRecord>>;
}

/// A team's picks for a set of its round records
#[async_trait::async_trait]
pub trait PickStore: Send + Sync {
    async fn picks_for_rounds(
        &self,
        team_id: TeamId,
        round_ids: &[RoundId],
    ) -> Result<Vec<PickRecord>>;
}

/// Batched club lookup. Ids that are not known are simply absent from the answer.
#[async_trait::async_trait]
pub trait ClubDirectory: Send + Sync {
    async fn clubs(&self, club_ids: &[i64]) -> Result<Vec<ClubInfo>>;
}

/// Everything the dashboard needs from its data sources
pub trait DashboardStore: TeamDirectory + RoundStore + PickStore + ClubDirectory {}

impl<T> DashboardStore for T where T: TeamDirectory + RoundStore + PickStore + ClubDirectory {}

/// Normalized rows held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    teams: HashMap<i64, TeamInfo>,
    rounds: HashMap<i64, Vec<RoundRecord>>,
    picks: HashMap<RoundId, Vec<PickRecord>>,
    clubs: HashMap<i64, ClubInfo>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from raw upstream rows. Rows that fail normalization are skipped.
    pub fn from_rows(teams: &[Value], rounds: &[Value], picks: &[Value], clubs: &[Value]) -> Self {
        let mut store = Self::new();

        for team in teams.iter().filter_map(TeamInfo::from_row) {
            store.teams.insert(team.team_id, team);
        }

        for row in rounds {
            let team_id = row
                .as_object()
                .and_then(|object| first_present(object, &["team_id", "time_id"]))
                .and_then(coerce_i64);
            match (team_id, normalize_round(row)) {
                (Some(team_id), Some(round)) => store.rounds.entry(team_id).or_default().push(round),
                _ => debug!("Skipping round row without team id"),
            }
        }

        for pick in picks.iter().filter_map(normalize_pick) {
            store.picks.entry(pick.round_ref).or_default().push(pick);
        }

        for club in clubs.iter().filter_map(ClubInfo::from_row) {
            store.clubs.insert(club.id, club);
        }

        debug!(
            teams = store.teams.len(),
            teams_with_rounds = store.rounds.len(),
            clubs = store.clubs.len(),
            "Built in-memory store"
        );
        store
    }

    pub fn insert_team(&mut self, team: TeamInfo) {
        self.teams.insert(team.team_id, team);
    }

    pub fn insert_round(&mut self, team_id: i64, round: RoundRecord) {
        self.rounds.entry(team_id).or_default().push(round);
    }

    pub fn insert_pick(&mut self, pick: PickRecord) {
        self.picks.entry(pick.round_ref).or_default().push(pick);
    }

    pub fn insert_club(&mut self, club: ClubInfo) {
        self.clubs.insert(club.id, club);
    }
}

#[async_trait::async_trait]
impl TeamDirectory for InMemoryStore {
    async fn team(&self, team_id: TeamId) -> Result<Option<TeamInfo>> {
        Ok(self.teams.get(&team_id.get()).cloned())
    }
}

#[async_trait::async_trait]
impl RoundStore for InMemoryStore {
    async fn rounds_for_team(&self, team_id: TeamId) -> Result<Vec<RoundRecord>> {
        Ok(self.rounds.get(&team_id.get()).cloned().unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl PickStore for InMemoryStore {
    // Round record ids are unique across teams, so they alone select the picks
    async fn picks_for_rounds(
        &self,
        _team_id: TeamId,
        round_ids: &[RoundId],
    ) -> Result<Vec<PickRecord>> {
        let mut seen = HashSet::new();
        Ok(round_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.picks.get(id))
            .flatten()
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ClubDirectory for InMemoryStore {
    async fn clubs(&self, club_ids: &[i64]) -> Result<Vec<ClubInfo>> {
        let mut seen = HashSet::new();
        Ok(club_ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.clubs.get(id))
            .cloned()
            .collect())
    }
}

/// Reads the imported JSON files on every request
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read_rows(&self, file: &'static str) -> Result<Vec<Value>> {
        let path = self.data_dir.join(file);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DashboardError::upstream(file, format!("{}: {e}", path.display())))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| DashboardError::upstream(file, format!("{}: {e}", path.display())))?;

        match value {
            Value::Array(rows) => Ok(rows),
            _ => Err(DashboardError::upstream(file, "expected a JSON array of rows")),
        }
    }

    async fn load_one(&self, file: &'static str) -> Result<InMemoryStore> {
        let rows = self.read_rows(file).await?;
        let empty: &[Value] = &[];
        Ok(match file {
            TEAMS_FILE => InMemoryStore::from_rows(&rows, empty, empty, empty),
            ROUNDS_FILE => InMemoryStore::from_rows(empty, &rows, empty, empty),
            PICKS_FILE => InMemoryStore::from_rows(empty, empty, &rows, empty),
            _ => InMemoryStore::from_rows(empty, empty, empty, &rows),
        })
    }
}

#[async_trait::async_trait]
impl TeamDirectory for JsonFileStore {
    async fn team(&self, team_id: TeamId) -> Result<Option<TeamInfo>> {
        self.load_one(TEAMS_FILE).await?.team(team_id).await
    }
}

#[async_trait::async_trait]
impl RoundStore for JsonFileStore {
    async fn rounds_for_team(&self, team_id: TeamId) -> Result<Vec<RoundRecord>> {
        self.load_one(ROUNDS_FILE).await?.rounds_for_team(team_id).await
    }
}

#[async_trait::async_trait]
impl PickStore for JsonFileStore {
    async fn picks_for_rounds(
        &self,
        team_id: TeamId,
        round_ids: &[RoundId],
    ) -> Result<Vec<PickRecord>> {
        if round_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.load_one(PICKS_FILE).await?.picks_for_rounds(team_id, round_ids).await
    }
}

#[async_trait::async_trait]
impl ClubDirectory for JsonFileStore {
    async fn clubs(&self, club_ids: &[i64]) -> Result<Vec<ClubInfo>> {
        if club_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.load_one(CLUBS_FILE).await?.clubs(club_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_rows() -> (Vec<Value>, Vec<Value>, Vec<Value>, Vec<Value>) {
        let teams = vec![json!({"team_id": 10, "slug": "galo-doido", "name": "Galo Doido"})];
        let rounds = vec![
            json!({"id": 100, "team_id": 10, "round": 1, "points": 55.2}),
            json!({"id": 101, "team_id": 10, "rodada": "2", "pontos": 40}),
            json!({"id": 200, "team_id": 11, "round": 1, "points": 12}),
            json!({"id": 300, "round": 1}),
        ];
        let picks = vec![
            json!({"team_round_id": 100, "player_id": 1, "position_id": 5, "points": 8.0}),
            json!({"team_round_id": 101, "atleta_id": 2, "posicao_id": 1, "pontos_num": 5.0}),
            json!({"team_round_id": 200, "player_id": 3, "position_id": 3}),
        ];
        let clubs = vec![
            json!({"id": 262, "name": "Flamengo", "badge_60": "fla.png"}),
            json!({"id": 282, "nome": "Atlético-MG"}),
        ];
        (teams, rounds, picks, clubs)
    }

    fn create_test_store() -> InMemoryStore {
        let (teams, rounds, picks, clubs) = create_test_rows();
        InMemoryStore::from_rows(&teams, &rounds, &picks, &clubs)
    }

    #[tokio::test]
    async fn test_in_memory_rounds_grouped_by_team() {
        let store = create_test_store();
        let team = TeamId::new(10).unwrap();

        let rounds = store.rounds_for_team(team).await.unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[1].round, 2);
        assert_eq!(rounds[1].points, Some(40.0));

        let none = store.rounds_for_team(TeamId::new(99).unwrap()).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_picks_and_clubs() {
        let store = create_test_store();

        let team = TeamId::new(10).unwrap();
        let picks = store.picks_for_rounds(team, &[100, 101, 100]).await.unwrap();
        assert_eq!(picks.len(), 2);

        let clubs = store.clubs(&[262, 999]).await.unwrap();
        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].badge_url.as_deref(), Some("fla.png"));
    }

    #[tokio::test]
    async fn test_json_file_store_reads_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (teams, rounds, picks, clubs) = create_test_rows();
        for (file, rows) in [
            (TEAMS_FILE, teams),
            (ROUNDS_FILE, rounds),
            (PICKS_FILE, picks),
            (CLUBS_FILE, clubs),
        ] {
            std::fs::write(dir.path().join(file), serde_json::to_string(&rows).unwrap()).unwrap();
        }

        let store = JsonFileStore::new(dir.path());
        let team = store.team(TeamId::new(10).unwrap()).await.unwrap().unwrap();
        assert_eq!(team.name, "Galo Doido");

        let rounds = store.rounds_for_team(TeamId::new(10).unwrap()).await.unwrap();
        assert_eq!(rounds.len(), 2);

        let clubs = store.clubs(&[282]).await.unwrap();
        assert_eq!(clubs[0].name, "Atlético-MG");
        assert_eq!(clubs[0].badge_url, None);
    }

    #[tokio::test]
    async fn test_missing_file_is_upstream_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let err = store.team(TeamId::new(1).unwrap()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Upstream { source_name: TEAMS_FILE, .. }));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_non_array_file_is_upstream_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CLUBS_FILE), r#"{"id": 1}"#).unwrap();
        let store = JsonFileStore::new(dir.path());

        let err = store.clubs(&[1]).await.unwrap_err();
        assert!(matches!(err, DashboardError::Upstream { .. }));
    }
}
