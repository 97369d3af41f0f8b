//! Positional efficiency tables
//!
//! Each table has one row per covered position and a TOTAL row recomputed over
//! the union of those positions (never an average of the per-position rates).
//! Every pick with a matching position counts towards `n`, with or without points.

use crate::models::{
    EfficiencyRow, EfficiencyTable, PickRecord, Position, TOTAL_LABEL, TOTAL_ROW_ID,
};

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    n: u32,
    ok: u32,
}

impl Tally {
    fn record(&mut self, ok: bool) {
        self.n += 1;
        if ok {
            self.ok += 1;
        }
    }

    fn into_row(self, position_id: u8, label: &str) -> EfficiencyRow {
        EfficiencyRow {
            position_id,
            position: label.to_string(),
            n: self.n,
            ok: self.ok,
            rate: (self.n > 0).then(|| self.ok as f64 / self.n as f64),
        }
    }
}

/// Build a table over `positions` (in display order) using `is_ok` as the success flag
fn efficiency_table(
    picks: &[PickRecord],
    positions: &[Position],
    is_ok: impl Fn(&PickRecord) -> bool,
) -> EfficiencyTable {
    let mut tallies = vec![Tally::default(); positions.len()];
    let mut total = Tally::default();

    for pick in picks {
        let Some(position) = pick.position() else { continue };
        let Some(slot) = positions.iter().position(|p| *p == position) else { continue };
        let ok = is_ok(pick);
        tallies[slot].record(ok);
        total.record(ok);
    }

    EfficiencyTable {
        by_position: positions
            .iter()
            .zip(tallies)
            .map(|(position, tally)| tally.into_row(position.id(), position.code()))
            .collect(),
        total: total.into_row(TOTAL_ROW_ID, TOTAL_LABEL),
    }
}

/// Clean-sheet rate for goalkeepers, full backs and center backs
pub fn clean_sheet_efficiency(picks: &[PickRecord]) -> EfficiencyTable {
    efficiency_table(picks, &Position::DEFENSIVE, |p| p.had_clean_sheet)
}

/// Goal-or-assist rate for outfield line players (forward, midfielder, full back, center back)
pub fn offensive_efficiency(picks: &[PickRecord]) -> EfficiencyTable {
    efficiency_table(picks, &Position::OFFENSIVE, PickRecord::had_goal_involvement)
}
