use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::catalog::{CatalogError, CourseCatalog};
use super::domain::{EligibilityReport, EligibilityRequest, StudentId, StudentProfile};
use super::evaluation::EligibilityEngine;
use super::repository::{DecisionRecord, RepositoryError, StudentRecord, StudentRepository};
use super::validation::{IntakeValidator, ValidationReport};

static STUDENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static DECISION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_student_id() -> StudentId {
    let id = STUDENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    StudentId(format!("stu-{id:06}"))
}

fn next_decision_id() -> String {
    let id = DECISION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("dec-{id:06}")
}

/// Service composing the intake validator, eligibility engine, and the
/// repository seam. One `check` call runs the whole pipeline: validate,
/// register the student, evaluate, persist the decision.
pub struct EligibilityService<R> {
    validator: IntakeValidator,
    engine: EligibilityEngine,
    repository: Arc<R>,
}

impl<R> EligibilityService<R>
where
    R: StudentRepository + 'static,
{
    pub fn new(catalog: Arc<CourseCatalog>, repository: Arc<R>) -> Self {
        Self {
            validator: IntakeValidator::new(catalog.clone()),
            engine: EligibilityEngine::new(catalog),
            repository,
        }
    }

    pub fn check(&self, request: EligibilityRequest) -> Result<EligibilityReport, ServiceError> {
        let mut profile = self
            .validator
            .profile_from_request(request)
            .map_err(ServiceError::Validation)?;
        profile.student_id = next_student_id();

        self.repository.upsert_student(student_record(&profile))?;

        let outcome = self.engine.evaluate(&profile)?;
        let tier = outcome.tier();
        let decision = outcome.into_decision();

        self.repository.record_decision(DecisionRecord {
            decision_id: next_decision_id(),
            student_id: profile.student_id.clone(),
            desired_course: profile.desired_course.clone(),
            decision: decision.clone(),
            tier,
            created_at: Utc::now(),
        })?;

        info!(
            student_id = %profile.student_id.0,
            desired_course = %profile.desired_course,
            eligible = decision.eligible,
            reasons = decision.reasons.len(),
            ?tier,
            "eligibility decision issued"
        );

        Ok(EligibilityReport::new(
            profile.student_id,
            profile.desired_course,
            decision,
        ))
    }

    /// Most recent stored decision for a student, for status lookups.
    pub fn latest_decision(&self, id: &StudentId) -> Result<DecisionRecord, ServiceError> {
        self.repository
            .latest_decision(id)?
            .ok_or(ServiceError::Repository(RepositoryError::NotFound))
    }
}

fn student_record(profile: &StudentProfile) -> StudentRecord {
    StudentRecord {
        student_id: profile.student_id.clone(),
        fingerprint: profile.fingerprint(),
        name: profile.name.clone(),
        age: profile.age,
        gender: profile.gender,
        desired_course: profile.desired_course.clone(),
        created_at: Utc::now(),
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("submission failed validation: {0}")]
    Validation(ValidationReport),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
