use std::sync::Arc;

use super::common::*;
use crate::admissions::catalog::{CourseCatalog, CourseDefinition, CourseFamily};
use crate::admissions::evaluation::{
    RecommendationEngine, RecommendationTier, FALLBACK_ADVISORY, MAX_RECOMMENDATIONS,
};

#[test]
fn lower_cutoff_courses_are_fully_viable_alternatives() {
    // Mean 72.67 misses the CSE cutoff of 75 but clears every other
    // engineering cutoff; JEE is in hand.
    let profile = profile(
        "Computer Science Engineering",
        &[("Physics", 80.0), ("Chemistry", 78.0), ("Mathematics", 60.0)],
        &[("JEE", true)],
    );

    let set = recommender().recommend(&profile);
    assert_eq!(set.tier, RecommendationTier::FullyViable);
    assert_eq!(
        set.entries,
        vec![
            "Mechanical Engineering".to_string(),
            "Electrical Engineering".to_string(),
            "Civil Engineering".to_string(),
            "Electronics and Communication Engineering".to_string(),
        ]
    );
}

#[test]
fn results_exclude_desired_course_and_cap_at_five() {
    let profile = profile(
        "BA in History",
        &[
            ("History", 40.0),
            ("Political Science", 40.0),
            ("Geography", 40.0),
            ("Psychology", 40.0),
            ("Sociology", 40.0),
            ("English", 40.0),
            ("Accountancy", 40.0),
            ("Business Studies", 40.0),
            ("Economics", 40.0),
        ],
        &[],
    );

    let set = recommender().recommend(&profile);
    assert_eq!(set.tier, RecommendationTier::FullyViable);
    assert_eq!(set.entries.len(), MAX_RECOMMENDATIONS);
    assert!(!set.entries.contains(&"BA in History".to_string()));
    // Catalog order: the four commerce courses precede the humanities ones.
    assert_eq!(
        set.entries,
        vec![
            "B.Com".to_string(),
            "BBA".to_string(),
            "BBM".to_string(),
            "CA".to_string(),
            "BA in Psychology".to_string(),
        ]
    );
}

#[test]
fn cutoff_failures_everywhere_fall_back_to_subject_and_exam_tier() {
    // PCB averages of 60 miss even the lowest medicine cutoff (70), so no
    // course is fully viable; subject and exam matches remain.
    let profile = profile(
        "MBBS",
        &[("Physics", 60.0), ("Chemistry", 60.0), ("Biology", 60.0)],
        &[("NEET", true)],
    );

    let set = recommender().recommend(&profile);
    assert_eq!(set.tier, RecommendationTier::SubjectAndExam);
    assert_eq!(
        set.entries,
        vec![
            "BDS".to_string(),
            "BAMS".to_string(),
            "BHMS".to_string(),
            "BPT".to_string(),
        ]
    );
}

#[test]
fn commerce_profile_requesting_medicine_gets_commerce_matches() {
    let profile = profile(
        "MBBS",
        &[
            ("Accountancy", 75.0),
            ("Business Studies", 70.0),
            ("Economics", 72.0),
        ],
        &[("NEET", false)],
    );

    let set = recommender().recommend(&profile);
    assert_eq!(set.tier, RecommendationTier::FullyViable);
    assert_eq!(
        set.entries,
        vec![
            "B.Com".to_string(),
            "BBA".to_string(),
            "BBM".to_string(),
            "CA".to_string(),
        ]
    );
}

#[test]
fn family_fallback_fires_when_humanities_courses_are_exam_gated() {
    // In the standard catalog every Humanities/Commerce course is ungated,
    // so tiers A/B subsume tier C. A gated catalog exercises the tier.
    let catalog = CourseCatalog::from_definitions(vec![
        CourseDefinition {
            name: "Aerospace Engineering".to_string(),
            family: CourseFamily::Engineering,
            required_subjects: vec!["Physics".to_string(), "Mathematics".to_string()],
            cutoff: Some(90),
            qualifying_exam: Some("JEE".to_string()),
        },
        CourseDefinition {
            name: "BA in Fine Arts".to_string(),
            family: CourseFamily::Humanities,
            required_subjects: vec!["English".to_string()],
            cutoff: None,
            qualifying_exam: Some("NIFT".to_string()),
        },
    ])
    .expect("catalog builds");

    let engine = RecommendationEngine::new(Arc::new(catalog));
    let profile = profile("Aerospace Engineering", &[("English", 80.0)], &[]);

    let set = engine.recommend(&profile);
    assert_eq!(set.tier, RecommendationTier::FamilyFallback);
    assert_eq!(set.entries, vec!["BA in Fine Arts".to_string()]);
}

#[test]
fn advisory_is_returned_only_when_every_tier_is_empty() {
    let profile = profile(
        "MBBS",
        &[("Sanskrit", 90.0), ("Music", 85.0), ("Astronomy", 88.0)],
        &[],
    );

    let set = recommender().recommend(&profile);
    assert_eq!(set.tier, RecommendationTier::Advisory);
    assert_eq!(set.entries, vec![FALLBACK_ADVISORY.to_string()]);
}

#[test]
fn recommendation_is_pure_across_calls() {
    let profile = profile(
        "Computer Science Engineering",
        &[("Physics", 80.0), ("Chemistry", 78.0), ("Mathematics", 60.0)],
        &[("JEE", true)],
    );

    let engine = recommender();
    assert_eq!(engine.recommend(&profile), engine.recommend(&profile));
}
