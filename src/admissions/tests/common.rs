use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::admissions::catalog::CourseCatalog;
use crate::admissions::domain::{EligibilityRequest, Gender, StudentId, StudentProfile};
use crate::admissions::evaluation::{EligibilityEngine, RecommendationEngine};
use crate::admissions::repository::InMemoryRepository;
use crate::admissions::router::admissions_router;
use crate::admissions::service::EligibilityService;
use crate::admissions::validation::IntakeValidator;

pub(super) fn catalog() -> Arc<CourseCatalog> {
    Arc::new(CourseCatalog::standard())
}

pub(super) fn marks(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(subject, value)| (subject.to_string(), *value))
        .collect()
}

pub(super) fn exams(entries: &[(&str, bool)]) -> HashMap<String, bool> {
    entries
        .iter()
        .map(|(code, passed)| (code.to_string(), *passed))
        .collect()
}

/// Well-formed request that misses the CSE cutoff (mean 72.67 < 75) while
/// holding a JEE pass.
pub(super) fn engineering_request() -> EligibilityRequest {
    EligibilityRequest {
        name: "Asha Verma".to_string(),
        age: 18,
        gender: "Female".to_string(),
        desired_course: "Computer Science Engineering".to_string(),
        marks: marks(&[
            ("Physics", 80.0),
            ("Chemistry", 78.0),
            ("Mathematics", 60.0),
        ]),
        qualification_exams: exams(&[("JEE", true)]),
    }
}

/// Request that clears every CSE requirement.
pub(super) fn eligible_request() -> EligibilityRequest {
    EligibilityRequest {
        marks: marks(&[
            ("Physics", 90.0),
            ("Chemistry", 85.0),
            ("Mathematics", 80.0),
        ]),
        ..engineering_request()
    }
}

/// MBBS applicant who has not qualified NEET.
pub(super) fn medicine_request() -> EligibilityRequest {
    EligibilityRequest {
        name: "Rohan Gupta".to_string(),
        age: 19,
        gender: "male".to_string(),
        desired_course: "MBBS".to_string(),
        marks: marks(&[("Physics", 92.0), ("Chemistry", 90.0), ("Biology", 94.0)]),
        qualification_exams: exams(&[("NEET", false)]),
    }
}

pub(super) fn profile(
    desired_course: &str,
    mark_entries: &[(&str, f64)],
    exam_entries: &[(&str, bool)],
) -> StudentProfile {
    StudentProfile {
        student_id: StudentId("stu-test".to_string()),
        name: "Test Student".to_string(),
        age: 18,
        gender: Gender::Other,
        desired_course: desired_course.to_string(),
        marks: mark_entries
            .iter()
            .map(|(subject, value)| (subject.to_string(), *value))
            .collect(),
        exam_qualifications: exam_entries
            .iter()
            .map(|(code, passed)| (code.to_ascii_uppercase(), *passed))
            .collect(),
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(catalog())
}

pub(super) fn recommender() -> RecommendationEngine {
    RecommendationEngine::new(catalog())
}

pub(super) fn validator() -> IntakeValidator {
    IntakeValidator::new(catalog())
}

pub(super) fn build_service() -> (
    EligibilityService<InMemoryRepository>,
    Arc<InMemoryRepository>,
) {
    let repository = Arc::new(InMemoryRepository::new());
    let service = EligibilityService::new(catalog(), repository.clone());
    (service, repository)
}

pub(super) fn build_router() -> axum::Router {
    let (service, _) = build_service();
    admissions_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
