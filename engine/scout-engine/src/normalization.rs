//! Normalization of loosely shaped upstream rows into strict engine records

use crate::models::{PickRecord, Position, RoundRecord, ScoutCounts, SEASON_ROUNDS};
use serde_json::{Map, Value};
use tracing::debug;

const ROUND_ID_FIELDS: &[&str] = &["id"];
const ROUND_NUMBER_FIELDS: &[&str] = &["round", "rodada", "rodada_id"];
const ROUND_POINTS_FIELDS: &[&str] = &["points", "pontos", "pontuacao"];
const ASSET_VALUE_FIELDS: &[&str] = &["asset_value", "patrimonio"];

const ROUND_REF_FIELDS: &[&str] = &["team_round_id", "round_ref"];
const POSITION_FIELDS: &[&str] = &["position_id", "posicao_id"];
const POSITION_NAME_FIELDS: &[&str] = &["position_name"];
const PLAYER_ID_FIELDS: &[&str] = &["player_id", "atleta_id"];
const PLAYER_NAME_FIELDS: &[&str] = &["player_name", "atleta_name", "apelido"];
const CLUB_FIELDS: &[&str] = &["club_id", "clube_id"];
const PICK_POINTS_FIELDS: &[&str] = &["points", "pontos_num", "pontos"];
const SCOUT_FIELDS: &[&str] = &["scouts", "scout"];

/// Return the first candidate field that is present and not null
pub fn first_present<'a>(row: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields.iter().filter_map(|f| row.get(*f)).find(|v| !v.is_null())
}

/// Coerce a JSON number or numeric string to a finite f64
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Coerce to an integer id; fractional values are rejected
pub fn coerce_i64(value: &Value) -> Option<i64> {
    let integral = |f: f64| (f.is_finite() && f.fract() == 0.0).then_some(f as i64);
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

/// Booleans also arrive as `"true"`/`"false"` strings or 0/1 flags
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => Some(false),
            Some(f) if f == 1.0 => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn f64_field(row: &Map<String, Value>, fields: &[&str]) -> Option<f64> {
    first_present(row, fields).and_then(coerce_f64)
}

fn i64_field(row: &Map<String, Value>, fields: &[&str]) -> Option<i64> {
    first_present(row, fields).and_then(coerce_i64)
}

/// Keep only scout entries with a finite numeric count
pub fn normalize_scouts(value: &Value) -> Option<ScoutCounts> {
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .filter_map(|(code, count)| coerce_f64(count).map(|c| (code.clone(), c)))
            .collect(),
    )
}

fn scout_flag(scouts: Option<&ScoutCounts>, code: &str) -> bool {
    scouts.and_then(|s| s.get(code)).is_some_and(|count| *count != 0.0)
}

/// Convert a raw round row. Rows without an id or a round in 1..=38 are rejected.
pub fn normalize_round(value: &Value) -> Option<RoundRecord> {
    let Some(row) = value.as_object() else {
        debug!("Skipping round row that is not an object");
        return None;
    };

    let id = i64_field(row, ROUND_ID_FIELDS);
    let round = i64_field(row, ROUND_NUMBER_FIELDS)
        .filter(|r| (1..=SEASON_ROUNDS as i64).contains(r))
        .map(|r| r as u8);

    let (Some(id), Some(round)) = (id, round) else {
        debug!(?id, ?round, "Skipping round row without id or valid round number");
        return None;
    };

    Some(RoundRecord {
        id,
        round,
        points: f64_field(row, ROUND_POINTS_FIELDS),
        asset_value: f64_field(row, ASSET_VALUE_FIELDS),
    })
}

/// Convert a raw pick row. Rows without a round reference are rejected; every other
/// missing field falls back to a neutral default. A missing player id only keeps the
/// pick out of the star ranking.
pub fn normalize_pick(value: &Value) -> Option<PickRecord> {
    let Some(row) = value.as_object() else {
        debug!("Skipping pick row that is not an object");
        return None;
    };

    let Some(round_ref) = i64_field(row, ROUND_REF_FIELDS) else {
        debug!("Skipping pick row without round reference");
        return None;
    };
    let player_id = i64_field(row, PLAYER_ID_FIELDS);

    // Unknown position ids are kept as 0 and excluded by the aggregators
    let position_id = i64_field(row, POSITION_FIELDS).unwrap_or(0);
    let position_name = first_present(row, POSITION_NAME_FIELDS)
        .and_then(coerce_string)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| match Position::from_id(position_id) {
            Some(position) => position.code().to_string(),
            None => format!("POS_{position_id}"),
        });

    let scout_counts = first_present(row, SCOUT_FIELDS).and_then(normalize_scouts);
    let flag = |field: &str, scout_code: &str| {
        row.get(field)
            .and_then(coerce_bool)
            .unwrap_or_else(|| scout_flag(scout_counts.as_ref(), scout_code))
    };

    Some(PickRecord {
        round_ref,
        position_id,
        position_name,
        player_id,
        player_name: first_present(row, PLAYER_NAME_FIELDS)
            .and_then(coerce_string)
            .unwrap_or_default(),
        club_id: i64_field(row, CLUB_FIELDS),
        points: f64_field(row, PICK_POINTS_FIELDS),
        is_captain: row.get("is_captain").and_then(coerce_bool).unwrap_or(false),
        is_home: row.get("is_home").and_then(coerce_bool),
        had_clean_sheet: flag("had_sg", "SG"),
        had_goal: flag("had_goal", "G"),
        had_assist: flag("had_assist", "A"),
        scout_counts,
    })
}

pub fn normalize_rounds(rows: &[Value]) -> Vec<RoundRecord> {
    rows.iter().filter_map(normalize_round).collect()
}

pub fn normalize_picks(rows: &[Value]) -> Vec<PickRecord> {
    rows.iter().filter_map(normalize_pick).collect()
}
