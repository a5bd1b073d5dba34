mod recommendation;
mod rules;

pub use recommendation::{
    RecommendationEngine, RecommendationSet, RecommendationTier, FALLBACK_ADVISORY,
    MAX_RECOMMENDATIONS,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogError, CourseCatalog};
use super::domain::{Decision, StudentProfile};

/// Stateless evaluator applying catalog rules to validated profiles and
/// cascading into the recommendation search on failure.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    catalog: Arc<CourseCatalog>,
    recommender: RecommendationEngine,
}

impl EligibilityEngine {
    pub fn new(catalog: Arc<CourseCatalog>) -> Self {
        let recommender = RecommendationEngine::new(catalog.clone());
        Self {
            catalog,
            recommender,
        }
    }

    /// Evaluate one profile. The catalog lookup can only fail when the
    /// profile bypassed intake validation, so the error maps to an
    /// internal fault at the boundary.
    pub fn evaluate(&self, profile: &StudentProfile) -> Result<EvaluationOutcome, CatalogError> {
        let course = self.catalog.get(&profile.desired_course)?;
        let (reasons, required_mean) = rules::assess_profile(course, profile);

        let recommendations = if reasons.is_empty() {
            None
        } else {
            Some(self.recommender.recommend(profile))
        };

        Ok(EvaluationOutcome {
            eligible: reasons.is_empty(),
            reasons,
            required_mean,
            recommendations,
        })
    }
}

/// Evaluation output keeping the tier that fired and the computed mean
/// visible for audits; flattens into the wire-facing [`Decision`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub eligible: bool,
    pub reasons: Vec<String>,
    pub required_mean: Option<f64>,
    pub recommendations: Option<RecommendationSet>,
}

impl EvaluationOutcome {
    pub fn tier(&self) -> Option<RecommendationTier> {
        self.recommendations.as_ref().map(|set| set.tier)
    }

    pub fn into_decision(self) -> Decision {
        if self.eligible {
            Decision::eligible()
        } else {
            Decision {
                eligible: false,
                reasons: self.reasons,
                recommendations: self
                    .recommendations
                    .map(RecommendationSet::into_entries)
                    .unwrap_or_default(),
            }
        }
    }
}
