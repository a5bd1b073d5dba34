use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Raw submission as received on the wire. Field shapes are guaranteed by
/// the transport layer; domain-range checks happen in the intake validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub desired_course: String,
    pub marks: HashMap<String, f64>,
    pub qualification_exams: HashMap<String, bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Case-insensitive parse; `None` for anything outside the accepted set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Validated student profile consumed by the evaluator.
///
/// Exam codes are normalized to uppercase so lookups match the catalog's
/// codes regardless of the casing submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: StudentId,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub desired_course: String,
    pub marks: BTreeMap<String, f64>,
    pub exam_qualifications: BTreeMap<String, bool>,
}

impl StudentProfile {
    /// Identity key used for dedupe: repeated submissions by the same
    /// person replace their earlier record.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}|{}|{}",
            self.name.trim().to_lowercase(),
            self.age,
            self.gender.label()
        )
    }

    /// Whether the student holds a passing result for the given exam code.
    /// Missing entries count as not passed.
    pub fn passed_exam(&self, exam: &str) -> bool {
        self.exam_qualifications
            .get(&exam.to_ascii_uppercase())
            .copied()
            .unwrap_or(false)
    }
}

/// The verdict for one evaluation: reasons and recommendations are empty
/// exactly when the student is eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub eligible: bool,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Decision {
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            reasons: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Wire response paired with the generated student identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub student_id: StudentId,
    pub desired_course: String,
    pub eligible: bool,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
}

impl EligibilityReport {
    pub fn new(student_id: StudentId, desired_course: String, decision: Decision) -> Self {
        Self {
            student_id,
            desired_course,
            eligible: decision.eligible,
            reasons: decision.reasons,
            recommendations: decision.recommendations,
        }
    }
}
