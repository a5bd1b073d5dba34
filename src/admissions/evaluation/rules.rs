use std::collections::BTreeMap;

use super::super::catalog::CourseDefinition;
use super::super::domain::StudentProfile;

/// Apply the course rules to a profile in the fixed reason order: exam
/// gate, missing subjects (all of them, catalog order), then the cutoff.
/// Also returns the required-subject mean when it was computable, so the
/// caller can expose it for audits.
pub(crate) fn assess_profile(
    course: &CourseDefinition,
    profile: &StudentProfile,
) -> (Vec<String>, Option<f64>) {
    let mut reasons = Vec::new();

    if let Some(exam) = &course.qualifying_exam {
        if !profile.passed_exam(exam) {
            reasons.push(format!("{} requires qualifying {}.", course.name, exam));
        }
    }

    for subject in &course.required_subjects {
        if !profile.marks.contains_key(subject) {
            reasons.push(format!("Missing required subject: {subject}."));
        }
    }

    let required_mean = required_subject_mean(course, &profile.marks);

    if let (Some(cutoff), Some(mean)) = (course.cutoff, required_mean) {
        if mean < f64::from(cutoff) {
            reasons.push(format!(
                "Average across required subjects {} is {}%, below cutoff {cutoff}%.",
                course.required_subjects.join(", "),
                format_mean(mean),
            ));
        }
    }

    (reasons, required_mean)
}

/// Arithmetic mean across the course's required subjects, or `None` when
/// any of them is missing from the marks.
pub(crate) fn required_subject_mean(
    course: &CourseDefinition,
    marks: &BTreeMap<String, f64>,
) -> Option<f64> {
    let mut total = 0.0;
    for subject in &course.required_subjects {
        total += marks.get(subject)?;
    }
    Some(total / course.required_subjects.len() as f64)
}

/// Render a mean to one decimal place with half-up rounding, so 72.25
/// prints as `72.3`. Rounding the scaled tenths keeps the tie-break exact
/// instead of inheriting the formatter's round-to-even behavior.
pub(crate) fn format_mean(mean: f64) -> String {
    let tenths = (mean * 10.0).round() as i64;
    format!("{}.{}", tenths / 10, (tenths % 10).abs())
}
