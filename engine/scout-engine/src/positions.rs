use crate::models::{PickRecord, Position, PositionAverage, CAPTAIN_LABEL, CAPTAIN_ROW_ID};

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: u32,
}

impl Accumulator {
    fn add(&mut self, points: f64) {
        self.sum += points;
        self.count += 1;
    }

    fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Average points per position (ids 1..=6) followed by the captain row.
///
/// Only picks with finite points count. A captain pick is added to both its
/// position bucket and the captain bucket.
pub fn average_points_by_position(picks: &[PickRecord]) -> Vec<PositionAverage> {
    let mut buckets = [Accumulator::default(); 6];
    let mut captain = Accumulator::default();

    for pick in picks {
        let (Some(position), Some(points)) = (pick.position(), pick.finite_points()) else {
            continue;
        };
        buckets[position.id() as usize - 1].add(points);
        if pick.is_captain {
            captain.add(points);
        }
    }

    let mut rows: Vec<PositionAverage> = Position::ALL
        .iter()
        .map(|position| {
            let bucket = buckets[position.id() as usize - 1];
            PositionAverage {
                position_id: position.id(),
                position: position.code().to_string(),
                n: bucket.count,
                avg_points: bucket.average(),
            }
        })
        .collect();

    rows.push(PositionAverage {
        position_id: CAPTAIN_ROW_ID,
        position: CAPTAIN_LABEL.to_string(),
        n: captain.count,
        avg_points: captain.average(),
    });

    rows
}
