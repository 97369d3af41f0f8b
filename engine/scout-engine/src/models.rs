use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of rounds in a season
pub const SEASON_ROUNDS: u8 = 38;

/// Sentinel position id used for the captain row
pub const CAPTAIN_ROW_ID: u8 = 99;

/// Position id used for aggregated TOTAL rows
pub const TOTAL_ROW_ID: u8 = 0;

pub const CAPTAIN_LABEL: &str = "CAP";
pub const TOTAL_LABEL: &str = "TOT";

/// Store-assigned identifier of an imported round
pub type RoundId = i64;

/// Scout code -> occurrence count for a single pick
pub type ScoutCounts = BTreeMap<String, f64>;

/// Roster position of a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    FullBack,
    CenterBack,
    Midfielder,
    Forward,
    Coach,
}

impl Position {
    /// All positions in ascending id order
    pub const ALL: [Position; 6] = [
        Position::Goalkeeper,
        Position::FullBack,
        Position::CenterBack,
        Position::Midfielder,
        Position::Forward,
        Position::Coach,
    ];

    /// Positions covered by the clean-sheet table, in display order
    pub const DEFENSIVE: [Position; 3] =
        [Position::Goalkeeper, Position::FullBack, Position::CenterBack];

    /// Positions covered by the goal/assist table, in display order
    pub const OFFENSIVE: [Position; 4] =
        [Position::Forward, Position::Midfielder, Position::FullBack, Position::CenterBack];

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Position::Goalkeeper),
            2 => Some(Position::FullBack),
            3 => Some(Position::CenterBack),
            4 => Some(Position::Midfielder),
            5 => Some(Position::Forward),
            6 => Some(Position::Coach),
            _ => None,
        }
    }

    /// Parse a short position code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "GOL" => Some(Position::Goalkeeper),
            "LAT" => Some(Position::FullBack),
            "ZAG" => Some(Position::CenterBack),
            "MEI" => Some(Position::Midfielder),
            "ATA" => Some(Position::Forward),
            "TEC" => Some(Position::Coach),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Position::Goalkeeper => 1,
            Position::FullBack => 2,
            Position::CenterBack => 3,
            Position::Midfielder => 4,
            Position::Forward => 5,
            Position::Coach => 6,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GOL",
            Position::FullBack => "LAT",
            Position::CenterBack => "ZAG",
            Position::Midfielder => "MEI",
            Position::Forward => "ATA",
            Position::Coach => "TEC",
        }
    }

    pub fn is_defensive(self) -> bool {
        Self::DEFENSIVE.contains(&self)
    }

    /// Outfield line players (excludes goalkeeper and coach)
    pub fn is_offensive(self) -> bool {
        Self::OFFENSIVE.contains(&self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One imported round of a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub id: RoundId,
    pub round: u8,
    pub points: Option<f64>,
    pub asset_value: Option<f64>,
}

/// One roster slot filled by one player in one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickRecord {
    pub round_ref: RoundId,
    /// Raw position id as delivered upstream; unknown ids are kept and excluded later
    pub position_id: i64,
    pub position_name: String,
    pub player_id: Option<i64>,
    pub player_name: String,
    pub club_id: Option<i64>,
    pub points: Option<f64>,
    pub is_captain: bool,
    pub is_home: Option<bool>,
    pub had_clean_sheet: bool,
    pub had_goal: bool,
    pub had_assist: bool,
    pub scout_counts: Option<ScoutCounts>,
}

impl PickRecord {
    pub fn position(&self) -> Option<Position> {
        Position::from_id(self.position_id)
    }

    /// Points if they are a finite number
    pub fn finite_points(&self) -> Option<f64> {
        self.points.filter(|p| p.is_finite())
    }

    pub fn had_goal_involvement(&self) -> bool {
        self.had_goal || self.had_assist
    }
}

/// Home/away restriction applied to the pick list before aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeAwayFilter {
    #[default]
    All,
    Home,
    Away,
}

impl HomeAwayFilter {
    pub fn from_is_home(is_home: Option<bool>) -> Self {
        match is_home {
            Some(true) => HomeAwayFilter::Home,
            Some(false) => HomeAwayFilter::Away,
            None => HomeAwayFilter::All,
        }
    }

    /// The `is_home` value this filter selects, if any
    pub fn is_home(self) -> Option<bool> {
        match self {
            HomeAwayFilter::All => None,
            HomeAwayFilter::Home => Some(true),
            HomeAwayFilter::Away => Some(false),
        }
    }

    /// Picks with an unknown home flag never match an active filter
    pub fn matches(self, pick: &PickRecord) -> bool {
        match self.is_home() {
            None => true,
            Some(wanted) => pick.is_home == Some(wanted),
        }
    }

    pub fn apply(self, picks: &[PickRecord]) -> Vec<PickRecord> {
        picks.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Entry of the 38-round points series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsSeriesEntry {
    pub round: u8,
    pub points: Option<f64>,
    pub moving_avg: Option<f64>,
}

/// Entry of the 38-round asset value series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetValueSeriesEntry {
    pub round: u8,
    pub asset_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSeries {
    pub points: Vec<PointsSeriesEntry>,
    pub asset_value: Vec<AssetValueSeriesEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonTotals {
    pub points_total: f64,
    /// Latest non-null asset value, scanning from the last round backwards
    pub asset_value_current: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionAverage {
    pub position_id: u8,
    pub position: String,
    pub n: u32,
    pub avg_points: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRow {
    pub position_id: u8,
    pub position: String,
    pub n: u32,
    pub ok: u32,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyTable {
    pub by_position: Vec<EfficiencyRow>,
    pub total: EfficiencyRow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutPoints {
    pub scout: String,
    pub points: f64,
}

/// Best contributor of a position, or a placeholder when the position was never picked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarPlayer {
    pub position_id: u8,
    pub position: String,
    pub player_id: Option<i64>,
    pub player_name: String,
    pub club_id: Option<i64>,
    pub n: u32,
    pub sum_points: Option<f64>,
    pub avg_points: Option<f64>,
    pub badge_url: Option<String>,
}

impl StarPlayer {
    pub fn placeholder(position: Position) -> Self {
        Self {
            position_id: position.id(),
            position: position.code().to_string(),
            player_id: None,
            player_name: String::new(),
            club_id: None,
            n: 0,
            sum_points: None,
            avg_points: None,
            badge_url: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.player_id.is_none()
    }
}

/// All pick-derived metrics, computed over the same filtered pick list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub avg_points_by_position: Vec<PositionAverage>,
    pub points_by_scout: Vec<ScoutPoints>,
    pub clean_sheet_efficiency: EfficiencyTable,
    pub offensive_efficiency: EfficiencyTable,
    pub star_players: Vec<StarPlayer>,
}

/// Which efficiency table a drilldown expands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrilldownKind {
    Offense,
    Defense,
}

/// One pick behind an efficiency rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrilldownRow {
    pub round: u8,
    pub player_name: String,
    pub club_id: Option<i64>,
    pub points: Option<f64>,
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(is_home: Option<bool>) -> PickRecord {
        PickRecord {
            round_ref: 1,
            position_id: 5,
            position_name: "ATA".to_string(),
            player_id: Some(10),
            player_name: "Hulk".to_string(),
            club_id: Some(282),
            points: Some(4.0),
            is_captain: false,
            is_home,
            had_clean_sheet: false,
            had_goal: false,
            had_assist: false,
            scout_counts: None,
        }
    }

    #[test]
    fn test_position_ids_round_trip() {
        for position in Position::ALL {
            assert_eq!(Position::from_id(position.id() as i64), Some(position));
            assert_eq!(Position::from_code(position.code()), Some(position));
        }
        assert_eq!(Position::from_id(0), None);
        assert_eq!(Position::from_id(7), None);
        assert_eq!(Position::from_code("ata"), Some(Position::Forward));
        assert_eq!(Position::from_code("TOT"), None);
    }

    #[test]
    fn test_position_groups() {
        assert!(Position::Goalkeeper.is_defensive());
        assert!(!Position::Goalkeeper.is_offensive());
        assert!(!Position::Coach.is_defensive());
        assert!(!Position::Coach.is_offensive());
        assert!(Position::FullBack.is_defensive() && Position::FullBack.is_offensive());
    }

    #[test]
    fn test_home_away_filter() {
        let picks = vec![pick(Some(true)), pick(Some(false)), pick(None)];

        assert_eq!(HomeAwayFilter::All.apply(&picks).len(), 3);
        assert_eq!(HomeAwayFilter::Home.apply(&picks).len(), 1);
        assert_eq!(HomeAwayFilter::Away.apply(&picks).len(), 1);
        assert_eq!(HomeAwayFilter::from_is_home(Some(false)), HomeAwayFilter::Away);
        assert_eq!(HomeAwayFilter::Home.is_home(), Some(true));
    }
}
