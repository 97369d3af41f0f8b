//! Scout action weights
//!
//! A weight table is an ordered list of `(code, points per occurrence)`.
//! Declaration order is the tie-break order of the scout scorer.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutWeight {
    pub code: String,
    pub points: f64,
}

/// Named weight table versions shipped with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightScheme {
    /// Full table including the defensive codes SG, DE, DP and GS
    Canonical,
    /// Earlier 15-code table without the defensive codes
    Legacy,
}

impl WeightScheme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "canonical" => Some(WeightScheme::Canonical),
            "legacy" => Some(WeightScheme::Legacy),
            _ => None,
        }
    }
}

const LEGACY_WEIGHTS: [(&str, f64); 15] = [
    ("DS", 1.5),
    ("FC", -0.3),
    ("GC", -3.0),
    ("CA", -1.0),
    ("CV", -3.0),
    ("FS", 0.5),
    ("FT", 3.0),
    ("FD", 1.2),
    ("FF", 0.8),
    ("G", 8.0),
    ("I", -0.1),
    ("PP", -4.0),
    ("PC", -1.0),
    ("OS", 1.0),
    ("A", 5.0),
];

const DEFENSIVE_WEIGHTS: [(&str, f64); 4] = [("SG", 5.0), ("DE", 1.3), ("DP", 7.0), ("GS", -1.0)];

/// Validated weight table. Deserialization goes through [`ScoutWeightTable::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScoutWeight>", into = "Vec<ScoutWeight>")]
pub struct ScoutWeightTable {
    weights: Vec<ScoutWeight>,
}

impl TryFrom<Vec<ScoutWeight>> for ScoutWeightTable {
    type Error = EngineError;

    fn try_from(weights: Vec<ScoutWeight>) -> Result<Self> {
        Self::new(weights)
    }
}

impl From<ScoutWeightTable> for Vec<ScoutWeight> {
    fn from(table: ScoutWeightTable) -> Self {
        table.weights
    }
}

impl ScoutWeightTable {
    /// Build a table from explicit weights, rejecting duplicate or empty codes
    pub fn new(weights: Vec<ScoutWeight>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for weight in &weights {
            if weight.code.trim().is_empty() {
                return Err(EngineError::InvalidWeightTable("empty scout code".to_string()));
            }
            if !weight.points.is_finite() {
                return Err(EngineError::InvalidWeightTable(format!(
                    "non-finite weight for {}",
                    weight.code
                )));
            }
            if !seen.insert(weight.code.as_str()) {
                return Err(EngineError::InvalidWeightTable(format!(
                    "duplicate scout code {}",
                    weight.code
                )));
            }
        }
        Ok(Self { weights })
    }

    pub fn canonical() -> Self {
        Self::from_pairs(LEGACY_WEIGHTS.iter().chain(DEFENSIVE_WEIGHTS.iter()))
    }

    pub fn legacy() -> Self {
        Self::from_pairs(LEGACY_WEIGHTS.iter())
    }

    pub fn for_scheme(scheme: WeightScheme) -> Self {
        match scheme {
            WeightScheme::Canonical => Self::canonical(),
            WeightScheme::Legacy => Self::legacy(),
        }
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = &'a (&'static str, f64)>) -> Self {
        let weights = pairs
            .map(|(code, points)| ScoutWeight { code: (*code).to_string(), points: *points })
            .collect();
        Self { weights }
    }

    pub fn weight(&self, code: &str) -> Option<f64> {
        self.weights.iter().find(|w| w.code == code).map(|w| w.points)
    }

    /// Weights in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ScoutWeight> {
        self.weights.iter()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for ScoutWeightTable {
    fn default() -> Self {
        Self::canonical()
    }
}
