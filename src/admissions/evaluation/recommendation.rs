use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::super::catalog::{CourseCatalog, CourseDefinition, CourseFamily};
use super::super::domain::StudentProfile;
use super::rules::required_subject_mean;

pub const MAX_RECOMMENDATIONS: usize = 5;

/// Terminal advisory returned when no tier yields a viable alternative.
pub const FALLBACK_ADVISORY: &str =
    "Consider improving exam eligibility or marks and reapplying.";

/// Relaxation level that produced a recommendation set, in strict
/// priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationTier {
    /// Subjects covered, exam satisfied, cutoff met.
    FullyViable,
    /// Subjects covered and exam satisfied; cutoff ignored.
    SubjectAndExam,
    /// Humanities/Commerce courses matched on subjects alone.
    FamilyFallback,
    /// Nothing matched; a single advisory string stands in.
    Advisory,
}

/// Ordered alternatives plus the tier that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub tier: RecommendationTier,
    pub entries: Vec<String>,
}

impl RecommendationSet {
    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

/// Searches the catalog under progressively relaxed constraints when a
/// student misses their desired course. Pure over the shared catalog.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Arc<CourseCatalog>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<CourseCatalog>) -> Self {
        Self { catalog }
    }

    /// Run the tiers in order and stop at the first that yields at least
    /// one course. The desired course is excluded from every tier.
    pub fn recommend(&self, profile: &StudentProfile) -> RecommendationSet {
        let fully_viable = self.tier(profile, |course| {
            subjects_covered(course, profile)
                && exam_satisfied(course, profile)
                && cutoff_met(course, profile)
        });
        if !fully_viable.is_empty() {
            return RecommendationSet {
                tier: RecommendationTier::FullyViable,
                entries: fully_viable,
            };
        }

        let subject_and_exam = self.tier(profile, |course| {
            subjects_covered(course, profile) && exam_satisfied(course, profile)
        });
        if !subject_and_exam.is_empty() {
            return RecommendationSet {
                tier: RecommendationTier::SubjectAndExam,
                entries: subject_and_exam,
            };
        }

        let family_fallback = self.tier(profile, |course| {
            matches!(
                course.family,
                CourseFamily::Humanities | CourseFamily::Commerce
            ) && subjects_covered(course, profile)
        });
        if !family_fallback.is_empty() {
            return RecommendationSet {
                tier: RecommendationTier::FamilyFallback,
                entries: family_fallback,
            };
        }

        RecommendationSet {
            tier: RecommendationTier::Advisory,
            entries: vec![FALLBACK_ADVISORY.to_string()],
        }
    }

    /// One filter stage: catalog order, desired course excluded, capped.
    fn tier<F>(&self, profile: &StudentProfile, accepts: F) -> Vec<String>
    where
        F: Fn(&CourseDefinition) -> bool,
    {
        self.catalog
            .courses()
            .iter()
            .filter(|course| course.name != profile.desired_course)
            .filter(|course| accepts(course))
            .take(MAX_RECOMMENDATIONS)
            .map(|course| course.name.clone())
            .collect()
    }
}

fn subjects_covered(course: &CourseDefinition, profile: &StudentProfile) -> bool {
    course
        .required_subjects
        .iter()
        .all(|subject| profile.marks.contains_key(subject))
}

fn exam_satisfied(course: &CourseDefinition, profile: &StudentProfile) -> bool {
    match &course.qualifying_exam {
        Some(exam) => profile.passed_exam(exam),
        None => true,
    }
}

fn cutoff_met(course: &CourseDefinition, profile: &StudentProfile) -> bool {
    match course.cutoff {
        Some(cutoff) => required_subject_mean(course, &profile.marks)
            .map(|mean| mean >= f64::from(cutoff))
            .unwrap_or(false),
        None => true,
    }
}
