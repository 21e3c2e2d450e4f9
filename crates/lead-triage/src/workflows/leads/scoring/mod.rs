mod config;
mod rules;

pub use config::{FlagThresholds, RoleTiers, ScoreWeights, ScoringConfig, ScoringConfigError};

use super::domain::{AssessmentRecord, LeadFlag, RoleTier, ScoredAssessment};
use serde::{Deserialize, Serialize};

/// Stateless scorer that applies the scoring configuration to a record.
///
/// Role terms are normalized once at construction so scoring a batch does not
/// re-fold the configured lists for every record.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    hot_terms: Vec<String>,
    warm_terms: Vec<String>,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        let hot_terms = rules::normalize_terms(&config.role_tiers.hot);
        let warm_terms = rules::normalize_terms(&config.role_tiers.warm);
        Self {
            config,
            hot_terms,
            warm_terms,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, record: &AssessmentRecord) -> ScoreOutcome {
        let role_tier = rules::role_tier(record.role.as_deref(), &self.hot_terms, &self.warm_terms);
        let role_points = role_tier.map(RoleTier::points).unwrap_or(0.0);
        let base_points = record.base_score.unwrap_or(0.0);

        let weights = &self.config.weights;
        let combined = role_points * weights.role + base_points * weights.base_score;

        ScoreOutcome {
            value: rules::round_score(combined),
            flag: rules::flag_for(combined, &self.config.thresholds),
            breakdown: ScoreBreakdown {
                role_tier,
                role_points,
                base_points,
                combined,
            },
        }
    }

    /// Attach the derived score and flag to an owned record.
    pub fn score_record(&self, record: AssessmentRecord) -> ScoredAssessment {
        let outcome = self.score(&record);
        ScoredAssessment {
            record,
            score: outcome.value,
            flag: outcome.flag,
        }
    }
}

/// Score a single record against a configuration.
pub fn score(record: &AssessmentRecord, config: &ScoringConfig) -> ScoreOutcome {
    ScoringEngine::new(config.clone()).score(record)
}

/// Derived score and temperature for a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub value: u8,
    pub flag: LeadFlag,
    pub breakdown: ScoreBreakdown,
}

/// Inputs to the combined score, kept for audits of a lead's temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub role_tier: Option<RoleTier>,
    pub role_points: f64,
    pub base_points: f64,
    pub combined: f64,
}
