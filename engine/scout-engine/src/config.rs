use crate::error::{EngineError, Result};
use crate::weights::{ScoutWeight, ScoutWeightTable, WeightScheme};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 3;
pub const DEFAULT_SCOUT_EPSILON: f64 = 1e-9;

/// Configuration for the aggregation engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Trailing window of the points moving average (current round included)
    pub moving_average_window: usize,

    /// Scout totals with an absolute value at or below this are dropped
    pub scout_epsilon: f64,

    /// Shipped weight table to use when no custom table is given
    pub weight_scheme: WeightScheme,

    /// Explicit weight table, overrides `weight_scheme`
    pub custom_weights: Option<Vec<ScoutWeight>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            scout_epsilon: DEFAULT_SCOUT_EPSILON,
            weight_scheme: WeightScheme::Canonical,
            custom_weights: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.moving_average_window == 0 {
            return Err(EngineError::Config("moving_average_window must be at least 1".to_string()));
        }
        if !self.scout_epsilon.is_finite() || self.scout_epsilon < 0.0 {
            return Err(EngineError::Config(format!(
                "scout_epsilon must be a non-negative number, got {}",
                self.scout_epsilon
            )));
        }
        self.weight_table().map(|_| ())
    }

    /// Resolve the weight table this configuration selects
    pub fn weight_table(&self) -> Result<ScoutWeightTable> {
        match &self.custom_weights {
            Some(weights) => ScoutWeightTable::new(weights.clone()),
            None => Ok(ScoutWeightTable::for_scheme(self.weight_scheme)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.moving_average_window, 3);
        assert_eq!(config.scout_epsilon, 1e-9);
        assert!(config.validate().is_ok());
        assert_eq!(config.weight_table().unwrap(), ScoutWeightTable::canonical());
    }

    #[test]
    fn test_invalid_window() {
        let config = EngineConfig { moving_average_window: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_custom_weights_override_scheme() {
        let config = EngineConfig {
            weight_scheme: WeightScheme::Legacy,
            custom_weights: Some(vec![ScoutWeight { code: "G".to_string(), points: 9.0 }]),
            ..Default::default()
        };
        let table = config.weight_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.weight("G"), Some(9.0));
    }
}
