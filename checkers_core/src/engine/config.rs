use crate::logic::eval_constants::{
    BONUS_ATTRITION, BONUS_COUNT_PARITY, BONUS_MATERIAL, CROWDED_MEN_THRESHOLD,
    DEFAULT_ALPHA_BOUND, DEFAULT_BETA_BOUND, DEFAULT_SEARCH_DEPTH, EVAL_SCALE, KING,
    MAN_BACK_ROW_CROWDED, MAN_BACK_ROW_SPARSE, MAN_OTHER, MAN_THREAT_ZONE,
    OPP_MAN_BACK_ROW_CROWDED, OPP_MAN_BACK_ROW_SPARSE, OPP_MAN_OTHER, OPP_MAN_THREAT_ZONE,
    OPP_KING,
};
use crate::logic::board::MAX_PIECES_PER_SIDE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("alpha/beta bounds ({alpha}, {beta}) must lie strictly outside [-1, 1]")]
    BoundsTooNarrow { alpha: f64, beta: f64 },
    #[error("evaluation scale must be positive, got {0}")]
    BadScale(f64),
    #[error("evaluation weights can total {bound}, which scale {scale} does not keep inside (-1, 1)")]
    WeightsTooLarge { bound: i64, scale: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    // Mover
    pub man_back_row_crowded: i32,
    pub man_back_row_sparse: i32,
    pub man_threat_zone: i32,
    pub man_other: i32,
    pub king: i32,

    // Opponent (subtracted)
    pub opp_man_back_row_crowded: i32,
    pub opp_man_back_row_sparse: i32,
    pub opp_man_threat_zone: i32,
    pub opp_man_other: i32,
    pub opp_king: i32,

    pub crowded_men_threshold: usize,
    pub count_parity: i32,
    pub attrition: i32,
    pub material: i32,
    pub scale: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            man_back_row_crowded: MAN_BACK_ROW_CROWDED,
            man_back_row_sparse: MAN_BACK_ROW_SPARSE,
            man_threat_zone: MAN_THREAT_ZONE,
            man_other: MAN_OTHER,
            king: KING,

            opp_man_back_row_crowded: OPP_MAN_BACK_ROW_CROWDED,
            opp_man_back_row_sparse: OPP_MAN_BACK_ROW_SPARSE,
            opp_man_threat_zone: OPP_MAN_THREAT_ZONE,
            opp_man_other: OPP_MAN_OTHER,
            opp_king: OPP_KING,

            crowded_men_threshold: CROWDED_MEN_THRESHOLD,
            count_parity: BONUS_COUNT_PARITY,
            attrition: BONUS_ATTRITION,
            material: BONUS_MATERIAL,
            scale: EVAL_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Search Parameters
    pub search_depth: u8,
    pub alpha_bound: f64,
    pub beta_bound: f64,

    // Evaluation Parameters
    pub weights: EvalWeights,
}

impl EvalWeights {
    /// Largest absolute weighted total any position can produce before
    /// scaling, with at most `MAX_PIECES_PER_SIDE` pieces a side.
    pub fn total_bound(&self) -> i64 {
        let mine = [
            self.man_back_row_crowded,
            self.man_back_row_sparse,
            self.man_threat_zone,
            self.man_other,
            self.king,
        ];
        let theirs = [
            self.opp_man_back_row_crowded,
            self.opp_man_back_row_sparse,
            self.opp_man_threat_zone,
            self.opp_man_other,
            self.opp_king,
        ];
        let highest = |ws: &[i32]| ws.iter().copied().max().map_or(0, i64::from).max(0);
        let lowest = |ws: &[i32]| ws.iter().copied().min().map_or(0, i64::from).min(0);

        let pieces = i64::try_from(MAX_PIECES_PER_SIDE).unwrap_or(i64::MAX);
        let terms = i64::from(self.count_parity).abs()
            + i64::from(self.attrition).abs()
            + i64::from(self.material).abs();

        let upper = pieces * highest(&mine) - pieces * lowest(&theirs) + terms;
        let lower = pieces * lowest(&mine) - pieces * highest(&theirs) - terms;
        upper.max(-lower)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            alpha_bound: DEFAULT_ALPHA_BOUND,
            beta_bound: DEFAULT_BETA_BOUND,
            weights: EvalWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a config where every missing field keeps its default.
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::load_from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        // Sentinels must stay out of reach of real scores, terminal ones included.
        if self.alpha_bound >= -1.0 || self.beta_bound <= 1.0 {
            return Err(ConfigError::BoundsTooNarrow {
                alpha: self.alpha_bound,
                beta: self.beta_bound,
            });
        }
        if self.weights.scale <= 0.0 || self.weights.scale.is_nan() {
            return Err(ConfigError::BadScale(self.weights.scale));
        }
        // Heuristic scores must never reach the terminal values.
        let bound = self.weights.total_bound();
        #[allow(clippy::cast_precision_loss)]
        let reach = bound as f64;
        if reach >= self.weights.scale {
            return Err(ConfigError::WeightsTooLarge {
                bound,
                scale: self.weights.scale,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search_depth, 6);
        assert_eq!(config.weights.man_back_row_crowded, 15);
        assert!((config.weights.scale - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{
            "search_depth": 4,
            "weights": { "king": 9 }
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.search_depth, 4);
        assert_eq!(config.weights.king, 9);
        // Others should be default
        assert_eq!(config.weights.opp_king, OPP_KING);
        assert!((config.beta_bound - DEFAULT_BETA_BOUND).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let result = EngineConfig::load_from_json("{ invalid json }");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_rejects_zero_depth() {
        let result = EngineConfig::load_from_json(r#"{ "search_depth": 0 }"#);
        assert!(matches!(result, Err(ConfigError::ZeroDepth)));
    }

    #[test]
    fn test_rejects_bounds_inside_score_range() {
        let result = EngineConfig::load_from_json(r#"{ "alpha_bound": -1.0 }"#);
        assert!(matches!(result, Err(ConfigError::BoundsTooNarrow { .. })));

        let result = EngineConfig::load_from_json(r#"{ "beta_bound": 0.5 }"#);
        assert!(matches!(result, Err(ConfigError::BoundsTooNarrow { .. })));

        let config = EngineConfig::load_from_json(r#"{ "alpha_bound": -2, "beta_bound": 2 }"#)
            .unwrap();
        assert!((config.alpha_bound + 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let result = EngineConfig::load_from_json(r#"{ "weights": { "scale": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::BadScale(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = EngineConfig::load_from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_default_weights_stay_below_scale() {
        let weights = EvalWeights::default();
        // 12 crowded back-row men, no opponent credit, all three terms.
        assert_eq!(weights.total_bound(), 191);
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_weights_reaching_terminal_scores() {
        let result = EngineConfig::load_from_json(r#"{ "weights": { "scale": 1 } }"#);
        assert!(matches!(
            result,
            Err(ConfigError::WeightsTooLarge { bound: 191, .. })
        ));

        let result = EngineConfig::load_from_json(r#"{ "weights": { "opp_king": 20 } }"#);
        assert!(matches!(result, Err(ConfigError::WeightsTooLarge { .. })));

        let result = EngineConfig::load_from_json(r#"{ "weights": { "man_other": -30 } }"#);
        assert!(matches!(result, Err(ConfigError::WeightsTooLarge { .. })));

        let config =
            EngineConfig::load_from_json(r#"{ "weights": { "king": 9, "scale": 400 } }"#).unwrap();
        assert_eq!(config.weights.king, 9);
    }
}
