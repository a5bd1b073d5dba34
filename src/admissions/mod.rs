//! Course eligibility pipeline: catalog, intake validation, evaluation,
//! and the tiered recommendation cascade, with a repository-backed service
//! facade and HTTP router on top.

pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CourseCatalog, CourseDefinition, CourseFamily};
pub use domain::{
    Decision, EligibilityReport, EligibilityRequest, Gender, StudentId, StudentProfile,
};
pub use evaluation::{
    EligibilityEngine, EvaluationOutcome, RecommendationEngine, RecommendationSet,
    RecommendationTier, FALLBACK_ADVISORY, MAX_RECOMMENDATIONS,
};
pub use repository::{
    DecisionRecord, InMemoryRepository, RepositoryError, StudentRecord, StudentRepository,
};
pub use router::admissions_router;
pub use service::{EligibilityService, ServiceError};
pub use validation::{IntakeValidator, ValidationReport};
