//! Per-pick breakdown behind an efficiency rate

use crate::error::{EngineError, Result};
use crate::models::{
    DrilldownKind, DrilldownRow, PickRecord, Position, RoundId, RoundRecord, TOTAL_LABEL,
};
use std::collections::HashMap;

impl DrilldownKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "offense" => Ok(DrilldownKind::Offense),
            "defense" => Ok(DrilldownKind::Defense),
            _ => Err(EngineError::InvalidDrilldownKind(value.to_string())),
        }
    }

    pub fn positions(self) -> &'static [Position] {
        match self {
            DrilldownKind::Offense => &Position::OFFENSIVE,
            DrilldownKind::Defense => &Position::DEFENSIVE,
        }
    }

    fn allowed_codes(self) -> &'static str {
        match self {
            DrilldownKind::Offense => "ATA|MEI|LAT|ZAG|TOT",
            DrilldownKind::Defense => "GOL|LAT|ZAG|TOT",
        }
    }

    fn name(self) -> &'static str {
        match self {
            DrilldownKind::Offense => "offense",
            DrilldownKind::Defense => "defense",
        }
    }

    fn is_ok(self, pick: &PickRecord) -> bool {
        match self {
            DrilldownKind::Offense => pick.had_goal_involvement(),
            DrilldownKind::Defense => pick.had_clean_sheet,
        }
    }
}

/// Position selection of a drilldown: one position or the whole table (TOT)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrilldownScope {
    pub kind: DrilldownKind,
    pub position: Option<Position>,
}

impl DrilldownScope {
    /// Validate a position code against the table of `kind`
    pub fn parse(kind: DrilldownKind, code: &str) -> Result<Self> {
        let normalized = code.trim().to_ascii_uppercase();
        if normalized == TOTAL_LABEL {
            return Ok(Self { kind, position: None });
        }
        match Position::from_code(&normalized) {
            Some(position) if kind.positions().contains(&position) => {
                Ok(Self { kind, position: Some(position) })
            }
            _ => Err(EngineError::InvalidPosition {
                code: code.to_string(),
                kind: kind.name(),
                allowed: kind.allowed_codes(),
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        self.position.map(Position::code).unwrap_or(TOTAL_LABEL)
    }

    fn includes(&self, pick: &PickRecord) -> bool {
        match (pick.position(), self.position) {
            (Some(position), Some(wanted)) => position == wanted,
            (Some(position), None) => self.kind.positions().contains(&position),
            (None, _) => false,
        }
    }
}

/// Picks behind a table row, ordered by round. Picks whose round reference is
/// not among `rounds` are dropped.
pub fn drilldown_rows(
    picks: &[PickRecord],
    rounds: &[RoundRecord],
    scope: DrilldownScope,
) -> Vec<DrilldownRow> {
    let round_numbers: HashMap<RoundId, u8> = rounds.iter().map(|r| (r.id, r.round)).collect();

    let mut rows: Vec<DrilldownRow> = picks
        .iter()
        .filter(|pick| scope.includes(pick))
        .filter_map(|pick| {
            let round = *round_numbers.get(&pick.round_ref)?;
            Some(DrilldownRow {
                round,
                player_name: pick.player_name.clone(),
                club_id: pick.club_id,
                points: pick.points,
                ok: scope.kind.is_ok(pick),
            })
        })
        .collect();

    rows.sort_by_key(|row| row.round);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(round_ref: RoundId, position_id: i64, name: &str, goal: bool, sg: bool) -> PickRecord {
        PickRecord {
            round_ref,
            position_id,
            position_name: String::new(),
            player_id: Some(1),
            player_name: name.to_string(),
            club_id: Some(262),
            points: Some(3.0),
            is_captain: false,
            is_home: None,
            had_clean_sheet: sg,
            had_goal: goal,
            had_assist: false,
            scout_counts: None,
        }
    }

    fn rounds() -> Vec<RoundRecord> {
        vec![
            RoundRecord { id: 100, round: 1, points: None, asset_value: None },
            RoundRecord { id: 101, round: 2, points: None, asset_value: None },
        ]
    }

    #[test]
    fn test_scope_validation() {
        assert!(DrilldownScope::parse(DrilldownKind::Offense, "ata").is_ok());
        assert!(DrilldownScope::parse(DrilldownKind::Offense, "TOT").unwrap().position.is_none());
        assert!(matches!(
            DrilldownScope::parse(DrilldownKind::Offense, "GOL"),
            Err(EngineError::InvalidPosition { .. })
        ));
        assert!(DrilldownScope::parse(DrilldownKind::Defense, "GOL").is_ok());
        assert!(DrilldownScope::parse(DrilldownKind::Defense, "MEI").is_err());
        assert!(DrilldownScope::parse(DrilldownKind::Defense, "XYZ").is_err());
        assert_eq!(DrilldownKind::parse("Defense"), Ok(DrilldownKind::Defense));
        assert!(DrilldownKind::parse("midfield").is_err());
    }

    #[test]
    fn test_offense_rows_sorted_by_round() {
        let picks = vec![
            pick(101, 5, "Pedro", true, false),
            pick(100, 5, "Pedro", false, false),
            pick(100, 4, "Gerson", false, false),
            pick(100, 1, "Rossi", true, true),
            pick(999, 5, "Orphan", true, false),
        ];
        let scope = DrilldownScope::parse(DrilldownKind::Offense, "TOT").unwrap();
        let rows = drilldown_rows(&picks, &rounds(), scope);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|r| r.round).collect::<Vec<_>>(), vec![1, 1, 2]);
        assert_eq!(rows[0].player_name, "Pedro");
        assert!(!rows[0].ok);
        assert!(rows[2].ok);
        assert_eq!(scope.label(), "TOT");

        let forwards = DrilldownScope::parse(DrilldownKind::Offense, "ATA").unwrap();
        assert_eq!(drilldown_rows(&picks, &rounds(), forwards).len(), 2);
    }

    #[test]
    fn test_defense_uses_clean_sheet() {
        let picks = vec![pick(100, 1, "Rossi", false, true), pick(101, 3, "Leo", true, false)];
        let scope = DrilldownScope::parse(DrilldownKind::Defense, "TOT").unwrap();
        let rows = drilldown_rows(&picks, &rounds(), scope);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ok);
        assert!(!rows[1].ok);
    }
}
