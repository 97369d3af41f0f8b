//! Best contributor per position
//!
//! Picks are grouped by `(position, player)`. The winner of each position is the
//! group with the highest point sum, then the highest per-appearance average, then
//! the alphabetically first name, then the lowest player id. Picks without a
//! player id cannot be grouped and are left out of the ranking.

use crate::models::{PickRecord, Position, StarPlayer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone)]
struct PlayerGroup {
    player_id: i64,
    player_name: String,
    club_id: Option<i64>,
    sum_points: f64,
    n: u32,
}

impl PlayerGroup {
    fn new(player_id: i64) -> Self {
        Self {
            player_id,
            player_name: String::new(),
            club_id: None,
            sum_points: 0.0,
            n: 0,
        }
    }

    fn add(&mut self, pick: &PickRecord) {
        self.n += 1;
        // null points still count as an appearance
        self.sum_points += pick.finite_points().unwrap_or(0.0);
        if self.club_id.is_none() {
            self.club_id = pick.club_id;
        }
        if self.player_name.is_empty() {
            self.player_name = pick.player_name.clone();
        }
    }

    fn average(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.sum_points / self.n as f64
        }
    }

    /// `Ordering::Less` means `self` ranks ahead of `other`
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .sum_points
            .total_cmp(&self.sum_points)
            .then_with(|| other.average().total_cmp(&self.average()))
            .then_with(|| self.player_name.cmp(&other.player_name))
            .then_with(|| self.player_id.cmp(&other.player_id))
    }

    fn into_star(self, position: Position) -> StarPlayer {
        let avg_points = self.average();
        StarPlayer {
            position_id: position.id(),
            position: position.code().to_string(),
            player_id: Some(self.player_id),
            player_name: self.player_name,
            club_id: self.club_id,
            n: self.n,
            sum_points: Some(self.sum_points),
            avg_points: Some(avg_points),
            badge_url: None,
        }
    }
}

/// One row per position in id order; badges are left unresolved
pub fn rank_star_players(picks: &[PickRecord]) -> Vec<StarPlayer> {
    let mut groups: BTreeMap<(Position, i64), PlayerGroup> = BTreeMap::new();
    for pick in picks {
        let (Some(position), Some(player_id)) = (pick.position(), pick.player_id) else {
            continue;
        };
        groups
            .entry((position, player_id))
            .or_insert_with(|| PlayerGroup::new(player_id))
            .add(pick);
    }

    Position::ALL
        .iter()
        .map(|&position| {
            groups
                .range((position, i64::MIN)..=(position, i64::MAX))
                .map(|(_, group)| group)
                .min_by(|a, b| a.rank_cmp(b))
                .cloned()
                .map(|group| group.into_star(position))
                .unwrap_or_else(|| StarPlayer::placeholder(position))
        })
        .collect()
}

/// Distinct club ids that need a badge lookup, in ascending order
pub fn club_ids_to_resolve(stars: &[StarPlayer]) -> Vec<i64> {
    stars.iter().filter_map(|s| s.club_id).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Merge resolved badges into the ranking; unknown clubs keep a `None` badge
pub fn attach_badges(stars: &mut [StarPlayer], badges: &HashMap<i64, Option<String>>) {
    for star in stars.iter_mut() {
        star.badge_url = star.club_id.and_then(|id| badges.get(&id).cloned().flatten());
    }
}
