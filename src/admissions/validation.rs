use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::Serialize;

use super::catalog::CourseCatalog;
use super::domain::{EligibilityRequest, Gender, StudentId, StudentProfile};

const MIN_AGE: i64 = 17;
const MAX_AGE: i64 = 25;
const MIN_MARK_ENTRIES: usize = 3;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z ]+$").expect("name pattern is valid"))
}

/// Accumulated validation failures for one submission.
///
/// Validation never fails fast: every problem is reported at once, in a
/// fixed field order, so callers see the full picture in one round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

/// Validates raw submissions against domain rules and the course catalog,
/// producing a normalized [`StudentProfile`] on success.
#[derive(Debug, Clone)]
pub struct IntakeValidator {
    catalog: Arc<CourseCatalog>,
}

impl IntakeValidator {
    pub fn new(catalog: Arc<CourseCatalog>) -> Self {
        Self { catalog }
    }

    /// Run every check and either build the profile or return the full
    /// error list. The profile carries a placeholder id until the service
    /// assigns a real one.
    pub fn profile_from_request(
        &self,
        request: EligibilityRequest,
    ) -> Result<StudentProfile, ValidationReport> {
        let mut errors = Vec::new();

        let name = request.name.trim();
        if !name_pattern().is_match(name) {
            errors.push("Invalid name: only letters and spaces allowed.".to_string());
        }

        if !(MIN_AGE..=MAX_AGE).contains(&request.age) {
            errors.push(format!(
                "Invalid age: must be an integer between {MIN_AGE} and {MAX_AGE}."
            ));
        }

        let gender = Gender::parse(&request.gender);
        if gender.is_none() {
            errors.push(
                "Invalid gender: must be one of \"Male\", \"Female\", \"Other\".".to_string(),
            );
        }

        let desired_course = request.desired_course.trim();
        if !self.catalog.contains(desired_course) {
            errors.push(
                "Invalid desired_course: must be one of the predefined courses.".to_string(),
            );
        }

        if request.marks.len() < MIN_MARK_ENTRIES {
            errors.push(format!(
                "Invalid marks: provide at least {MIN_MARK_ENTRIES} subject marks."
            ));
        } else {
            // JSON maps carry no reliable order; report offenders
            // lexicographically so the error list is deterministic.
            let mut subjects: Vec<&String> = request.marks.keys().collect();
            subjects.sort();
            for subject in subjects {
                let value = request.marks[subject];
                if !(0.0..=100.0).contains(&value) {
                    errors.push(format!(
                        "Invalid marks for {subject}: {value} (must be 0-100)."
                    ));
                }
            }
        }

        // Unknown exam codes are tolerated; only shape matters here and the
        // transport layer already guaranteed it.

        match (errors.is_empty(), gender) {
            (true, Some(gender)) => Ok(StudentProfile {
                student_id: StudentId("pending".to_string()),
                name: name.to_string(),
                age: request.age as u8,
                gender,
                desired_course: desired_course.to_string(),
                marks: request.marks.into_iter().collect(),
                exam_qualifications: request
                    .qualification_exams
                    .into_iter()
                    .map(|(code, passed)| (code.to_ascii_uppercase(), passed))
                    .collect(),
            }),
            _ => Err(ValidationReport { errors }),
        }
    }
}
