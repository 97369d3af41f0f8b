use crate::models::{PickRecord, ScoutPoints};
use crate::weights::ScoutWeightTable;

/// Points contributed by each scout action across all picks.
///
/// Codes missing from a pick contribute nothing; codes outside the weight table are
/// ignored. Totals within `epsilon` of zero are dropped, the rest sorted by points
/// descending with ties kept in table order.
pub fn points_by_scout(
    picks: &[PickRecord],
    weights: &ScoutWeightTable,
    epsilon: f64,
) -> Vec<ScoutPoints> {
    let mut rows: Vec<ScoutPoints> = weights
        .iter()
        .map(|weight| {
            let count: f64 = picks
                .iter()
                .filter_map(|p| p.scout_counts.as_ref())
                .filter_map(|scouts| scouts.get(&weight.code))
                .filter(|count| count.is_finite())
                .sum();
            ScoutPoints { scout: weight.code.clone(), points: count * weight.points }
        })
        .filter(|row| row.points.abs() > epsilon)
        .collect();

    // sort_by is stable, so equal totals keep declaration order
    rows.sort_by(|a, b| b.points.total_cmp(&a.points));
    rows
}
