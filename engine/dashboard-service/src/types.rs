//! Type definitions for the dashboard service

use chrono::{DateTime, Utc};
use scout_engine::normalization::{coerce_i64, first_present};
use scout_engine::{
    DrilldownKind, EngineError, HomeAwayFilter, MetricsBundle, RoundSeries, SeasonTotals,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Candidate badge fields on a club row, in priority order
pub const BADGE_FIELDS: &[&str] = &[
    "badge_60",
    "badge_45",
    "badge_30",
    "badge_url",
    "escudo_png",
    "escudo_svg",
    "url_escudo_png",
    "url_escudo_svg",
    "shield_url",
    "shield_png",
    "shield_svg",
];

const CLUB_NAME_FIELDS: &[&str] = &["name", "nome"];

/// Club name shown when a club id cannot be resolved
pub const UNKNOWN_CLUB_NAME: &str = "—";

/// Validated team identifier (strictly positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(i64);

impl TeamId {
    pub fn new(id: i64) -> Result<Self, EngineError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(EngineError::InvalidTeamId(id.to_string()))
        }
    }

    pub fn parse(value: &str) -> Result<Self, EngineError> {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| EngineError::InvalidTeamId(value.to_string()))
            .and_then(Self::new)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Parse an `is_home` query value: `true`, `false` or absent/empty for no filter
pub fn parse_home_filter(value: Option<&str>) -> Result<HomeAwayFilter, EngineError> {
    match value.map(str::trim) {
        None | Some("") => Ok(HomeAwayFilter::All),
        Some("true") => Ok(HomeAwayFilter::Home),
        Some("false") => Ok(HomeAwayFilter::Away),
        Some(other) => Err(EngineError::InvalidFilter(other.to_string())),
    }
}

/// Identity of a fantasy team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team_id: i64,
    pub slug: String,
    pub name: String,
    pub owner_name: Option<String>,
    pub badge_url: Option<String>,
}

impl TeamInfo {
    /// Build from a raw team row; the slug and name fall back to `time-<id>`
    pub fn from_row(row: &Value) -> Option<Self> {
        let object = row.as_object()?;
        let team_id = first_present(object, &["team_id", "id"]).and_then(coerce_i64)?;
        let text = |fields: &[&str]| {
            first_present(object, fields)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let slug = text(&["slug"]).unwrap_or_else(|| format!("time-{team_id}"));
        let name = text(&["name", "nome"]).unwrap_or_else(|| slug.clone());

        Some(Self {
            team_id,
            slug,
            name,
            owner_name: text(&["owner_name", "cartoleiro_name", "nome_cartola"]),
            badge_url: text(&["badge_url", "url_escudo_png", "url_escudo_svg"]),
        })
    }
}

/// Club as returned by the club directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubInfo {
    pub id: i64,
    pub name: String,
    pub badge_url: Option<String>,
}

impl ClubInfo {
    pub fn from_row(row: &Value) -> Option<Self> {
        let object = row.as_object()?;
        let id = object.get("id").and_then(coerce_i64)?;
        let name = first_present(object, CLUB_NAME_FIELDS)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(Self { id, name, badge_url: pick_badge(row) })
    }
}

/// First non-empty badge reference among [`BADGE_FIELDS`]
pub fn pick_badge(row: &Value) -> Option<String> {
    let object = row.as_object()?;
    BADGE_FIELDS
        .iter()
        .filter_map(|field| object.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .find(|badge| !badge.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFilters {
    pub is_home: Option<bool>,
}

impl From<HomeAwayFilter> for AppliedFilters {
    fn from(filter: HomeAwayFilter) -> Self {
        Self { is_home: filter.is_home() }
    }
}

/// Full dashboard for one team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub team_id: i64,
    pub team: TeamInfo,
    pub filters: AppliedFilters,
    pub totals: SeasonTotals,
    pub series: RoundSeries,
    pub metrics: MetricsBundle,
    pub generated_at: DateTime<Utc>,
}

/// Drilldown row with its club resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrilldownEntry {
    pub round: u8,
    pub player_name: String,
    pub club_id: Option<i64>,
    pub club_name: String,
    pub club_badge_url: Option<String>,
    pub points: Option<f64>,
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrilldownResponse {
    pub team_id: i64,
    pub kind: DrilldownKind,
    pub pos: String,
    pub filters: AppliedFilters,
    pub rows: Vec<DrilldownEntry>,
}
