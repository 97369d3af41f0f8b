//! Per-round series for a full season
//!
//! Every series is materialized with one entry per round 1..=38. Rounds that were
//! never imported stay as `None` holes; nothing is interpolated.

use crate::models::{
    AssetValueSeriesEntry, PointsSeriesEntry, RoundRecord, RoundSeries, SeasonTotals,
    SEASON_ROUNDS,
};

/// Index round records by round number. Duplicate rounds resolve last-seen-wins.
pub fn rounds_by_number(rounds: &[RoundRecord]) -> Vec<Option<&RoundRecord>> {
    let mut slots: Vec<Option<&RoundRecord>> = vec![None; SEASON_ROUNDS as usize];
    for record in rounds {
        if (1..=SEASON_ROUNDS).contains(&record.round) {
            slots[record.round as usize - 1] = Some(record);
        }
    }
    slots
}

/// Trailing average over the last `window` slots, skipping `None` values
pub fn moving_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = values[start..=i]
                .iter()
                .flatten()
                .fold((0.0_f64, 0u32), |(sum, count), v| (sum + v, count + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}

pub fn build_round_series(rounds: &[RoundRecord], window: usize) -> RoundSeries {
    let slots = rounds_by_number(rounds);
    let points: Vec<Option<f64>> = slots.iter().map(|r| r.and_then(|r| r.points)).collect();
    let averages = moving_average(&points, window);

    let points_series = points
        .iter()
        .zip(averages)
        .enumerate()
        .map(|(idx, (points, moving_avg))| PointsSeriesEntry {
            round: idx as u8 + 1,
            points: *points,
            moving_avg,
        })
        .collect();

    let asset_series = slots
        .iter()
        .enumerate()
        .map(|(idx, r)| AssetValueSeriesEntry {
            round: idx as u8 + 1,
            asset_value: r.and_then(|r| r.asset_value),
        })
        .collect();

    RoundSeries { points: points_series, asset_value: asset_series }
}

/// Season point sum and most recent known asset value
pub fn season_totals(rounds: &[RoundRecord]) -> SeasonTotals {
    let slots = rounds_by_number(rounds);
    let points_total: f64 = slots.iter().flatten().filter_map(|r| r.points).sum();
    let asset_value_current = slots.iter().rev().flatten().find_map(|r| r.asset_value);
    SeasonTotals { points_total, asset_value_current }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(id: i64, round: u8, points: Option<f64>, asset_value: Option<f64>) -> RoundRecord {
        RoundRecord { id, round, points, asset_value }
    }

    #[test]
    fn test_series_always_full_season() {
        let series = build_round_series(&[], 3);
        assert_eq!(series.points.len(), 38);
        assert_eq!(series.asset_value.len(), 38);
        assert!(series.points.iter().all(|e| e.points.is_none() && e.moving_avg.is_none()));
        assert_eq!(series.points[0].round, 1);
        assert_eq!(series.asset_value[37].round, 38);
    }

    #[test]
    fn test_moving_average_is_causal() {
        let values = [Some(10.0), None, Some(20.0), Some(30.0)];
        assert_eq!(
            moving_average(&values, 3),
            vec![Some(10.0), Some(10.0), Some(15.0), Some(25.0)]
        );
    }

    #[test]
    fn test_moving_average_empty_window_is_none() {
        let values = [Some(6.0), None, None, None, Some(3.0)];
        assert_eq!(moving_average(&values, 3), vec![Some(6.0), Some(6.0), Some(6.0), None, Some(3.0)]);
    }

    #[test]
    fn test_sparse_rounds_leave_holes() {
        let rounds = vec![
            round(3, 3, Some(40.0), Some(105.0)),
            round(1, 1, Some(50.0), Some(100.0)),
        ];
        let series = build_round_series(&rounds, 3);

        assert_eq!(series.points[0].points, Some(50.0));
        assert_eq!(series.points[1].points, None);
        assert_eq!(series.points[1].moving_avg, Some(50.0));
        assert_eq!(series.points[2].moving_avg, Some(45.0));
        assert_eq!(series.asset_value[1].asset_value, None);
        assert_eq!(series.asset_value[2].asset_value, Some(105.0));
        assert!(series.points[3..].iter().all(|e| e.points.is_none()));
        // window moves past round 3 after two more rounds
        assert_eq!(series.points[4].moving_avg, Some(40.0));
        assert_eq!(series.points[5].moving_avg, None);
    }

    #[test]
    fn test_duplicate_round_last_seen_wins() {
        let rounds = vec![round(1, 2, Some(10.0), None), round(2, 2, Some(30.0), None)];
        let series = build_round_series(&rounds, 3);
        assert_eq!(series.points[1].points, Some(30.0));
    }

    #[test]
    fn test_season_totals() {
        let rounds = vec![
            round(1, 1, Some(5.0), Some(100.0)),
            round(2, 2, None, Some(102.5)),
            round(3, 3, Some(15.0), None),
        ];
        let totals = season_totals(&rounds);
        assert_eq!(totals.points_total, 20.0);
        assert_eq!(totals.asset_value_current, Some(102.5));

        let empty = season_totals(&[]);
        assert_eq!(empty.points_total, 0.0);
        assert_eq!(empty.asset_value_current, None);
    }
}
