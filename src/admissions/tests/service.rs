use super::common::*;
use crate::admissions::domain::{EligibilityRequest, StudentId};
use crate::admissions::evaluation::RecommendationTier;
use crate::admissions::repository::StudentRepository;
use crate::admissions::service::ServiceError;

#[test]
fn invalid_submissions_surface_every_validation_error() {
    let (service, repository) = build_service();
    let request = EligibilityRequest {
        age: 42,
        gender: "robot".to_string(),
        ..engineering_request()
    };

    match service.check(request) {
        Err(ServiceError::Validation(report)) => {
            assert_eq!(report.errors.len(), 2);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    // Nothing is persisted when validation fails.
    assert_eq!(repository.student_count(), 0);
    assert_eq!(repository.decision_count(), 0);
}

#[test]
fn eligible_submission_returns_clean_report_and_persists() {
    let (service, repository) = build_service();

    let report = service.check(eligible_request()).expect("check succeeds");
    assert!(report.eligible);
    assert!(report.reasons.is_empty());
    assert!(report.recommendations.is_empty());
    assert!(report.student_id.0.starts_with("stu-"));
    assert_eq!(report.desired_course, "Computer Science Engineering");

    let stored = repository
        .fetch_student(&report.student_id)
        .expect("fetch succeeds")
        .expect("student stored");
    assert_eq!(stored.desired_course, "Computer Science Engineering");

    let decision = service
        .latest_decision(&report.student_id)
        .expect("decision stored");
    assert!(decision.decision.eligible);
    assert_eq!(decision.tier, None);
}

#[test]
fn ineligible_submission_records_tier_and_recommendations() {
    let (service, _) = build_service();

    let report = service
        .check(engineering_request())
        .expect("check succeeds");
    assert!(!report.eligible);
    assert_eq!(report.reasons.len(), 1);
    assert_eq!(report.recommendations.len(), 4);

    let decision = service
        .latest_decision(&report.student_id)
        .expect("decision stored");
    assert_eq!(decision.tier, Some(RecommendationTier::FullyViable));
    assert_eq!(decision.decision.recommendations, report.recommendations);
}

#[test]
fn resubmission_by_same_person_replaces_prior_record() {
    let (service, repository) = build_service();

    let first = service
        .check(engineering_request())
        .expect("first check succeeds");
    let second = service
        .check(eligible_request())
        .expect("second check succeeds");

    assert_ne!(first.student_id, second.student_id);
    assert_eq!(repository.student_count(), 1, "fingerprint dedupe replaces");
    assert_eq!(repository.decision_count(), 1, "old decisions dropped");

    // The superseded identity is gone along with its decision trail.
    assert!(repository
        .fetch_student(&first.student_id)
        .expect("fetch succeeds")
        .is_none());
    match service.latest_decision(&first.student_id) {
        Err(ServiceError::Repository(_)) => {}
        other => panic!("expected missing decision, got {other:?}"),
    }

    let latest = service
        .latest_decision(&second.student_id)
        .expect("decision stored");
    assert!(latest.decision.eligible);
}

#[test]
fn distinct_people_keep_distinct_records() {
    let (service, repository) = build_service();

    service.check(engineering_request()).expect("first person");
    service.check(medicine_request()).expect("second person");

    assert_eq!(repository.student_count(), 2);
    assert_eq!(repository.decision_count(), 2);
}

#[test]
fn latest_decision_for_unknown_student_is_not_found() {
    let (service, _) = build_service();
    match service.latest_decision(&StudentId("stu-unknown".to_string())) {
        Err(ServiceError::Repository(err)) => {
            assert_eq!(err.to_string(), "record not found");
        }
        other => panic!("expected repository not found, got {other:?}"),
    }
}

#[test]
fn repeated_checks_yield_identical_decisions() {
    let (service, _) = build_service();

    let first = service.check(engineering_request()).expect("first");
    let second = service.check(engineering_request()).expect("second");

    assert_eq!(first.eligible, second.eligible);
    assert_eq!(first.reasons, second.reasons);
    assert_eq!(first.recommendations, second.recommendations);
}
