use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Broad classification grouping courses; only the recommendation
/// fallback tier distinguishes families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CourseFamily {
    Engineering,
    Medicine,
    Commerce,
    Humanities,
}

impl CourseFamily {
    pub const fn label(self) -> &'static str {
        match self {
            CourseFamily::Engineering => "engineering",
            CourseFamily::Medicine => "medicine",
            CourseFamily::Commerce => "commerce",
            CourseFamily::Humanities => "humanities",
        }
    }
}

/// A single admissible course of study and the requirements gating it.
///
/// `cutoff` is the minimum average percentage across the required subjects;
/// `None` means no cutoff is enforced. `qualifying_exam` carries the
/// uppercase code of an external gating exam, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDefinition {
    pub name: String,
    pub family: CourseFamily,
    pub required_subjects: Vec<String>,
    pub cutoff: Option<u8>,
    pub qualifying_exam: Option<String>,
}

impl CourseDefinition {
    fn new(
        name: &str,
        family: CourseFamily,
        required_subjects: &[&str],
        cutoff: Option<u8>,
        qualifying_exam: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            family,
            required_subjects: required_subjects
                .iter()
                .map(|subject| subject.to_string())
                .collect(),
            cutoff,
            qualifying_exam: qualifying_exam.map(|exam| exam.to_ascii_uppercase()),
        }
    }
}

/// Failures raised while building or querying the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("course '{0}' is defined more than once")]
    DuplicateName(String),
    #[error("course '{0}' declares no required subjects")]
    EmptySubjects(String),
    #[error("course '{0}' declares cutoff {1}, outside 1-100")]
    CutoffOutOfRange(String, u8),
    #[error("course '{0}' not found in catalog")]
    NotFound(String),
}

/// Immutable registry of course definitions, loaded once at startup.
///
/// Declaration order is preserved because reason messages and
/// recommendation ordering both depend on it.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<CourseDefinition>,
    index: HashMap<String, usize>,
}

impl CourseCatalog {
    /// Build a catalog from explicit definitions, rejecting duplicate
    /// names, empty subject lists, and out-of-range cutoffs.
    pub fn from_definitions(definitions: Vec<CourseDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, course) in definitions.iter().enumerate() {
            if course.required_subjects.is_empty() {
                return Err(CatalogError::EmptySubjects(course.name.clone()));
            }
            if let Some(cutoff) = course.cutoff {
                if cutoff == 0 || cutoff > 100 {
                    return Err(CatalogError::CutoffOutOfRange(course.name.clone(), cutoff));
                }
            }
            if index.insert(course.name.clone(), position).is_some() {
                return Err(CatalogError::DuplicateName(course.name.clone()));
            }
        }

        Ok(Self {
            courses: definitions,
            index,
        })
    }

    /// The built-in course catalog covering the four supported families.
    pub fn standard() -> Self {
        Self::from_definitions(standard_definitions())
            .expect("built-in catalog definitions are internally consistent")
    }

    pub fn get(&self, name: &str) -> Result<&CourseDefinition, CatalogError> {
        self.index
            .get(name)
            .map(|&position| &self.courses[position])
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All definitions in declaration order.
    pub fn courses(&self) -> &[CourseDefinition] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses grouped by family, families ordered by first appearance.
    pub fn grouped_by_family(&self) -> Vec<(CourseFamily, Vec<&CourseDefinition>)> {
        let mut groups: Vec<(CourseFamily, Vec<&CourseDefinition>)> = Vec::new();
        for course in &self.courses {
            match groups.iter_mut().find(|(family, _)| *family == course.family) {
                Some((_, members)) => members.push(course),
                None => groups.push((course.family, vec![course])),
            }
        }
        groups
    }
}

fn standard_definitions() -> Vec<CourseDefinition> {
    use CourseFamily::{Commerce, Engineering, Humanities, Medicine};

    const PCM: &[&str] = &["Physics", "Chemistry", "Mathematics"];
    const PCB: &[&str] = &["Physics", "Chemistry", "Biology"];
    const COMMERCE: &[&str] = &["Accountancy", "Business Studies", "Economics"];

    vec![
        CourseDefinition::new(
            "Computer Science Engineering",
            Engineering,
            PCM,
            Some(75),
            Some("JEE"),
        ),
        CourseDefinition::new("Mechanical Engineering", Engineering, PCM, Some(70), Some("JEE")),
        CourseDefinition::new("Electrical Engineering", Engineering, PCM, Some(70), Some("JEE")),
        CourseDefinition::new("Civil Engineering", Engineering, PCM, Some(65), Some("JEE")),
        CourseDefinition::new(
            "Electronics and Communication Engineering",
            Engineering,
            PCM,
            Some(70),
            Some("JEE"),
        ),
        CourseDefinition::new("MBBS", Medicine, PCB, Some(85), Some("NEET")),
        CourseDefinition::new("BDS", Medicine, PCB, Some(80), Some("NEET")),
        CourseDefinition::new("BAMS", Medicine, PCB, Some(75), Some("NEET")),
        CourseDefinition::new("BHMS", Medicine, PCB, Some(75), Some("NEET")),
        CourseDefinition::new("BPT", Medicine, PCB, Some(70), Some("NEET")),
        CourseDefinition::new("B.Com", Commerce, COMMERCE, None, None),
        CourseDefinition::new("BBA", Commerce, COMMERCE, None, None),
        CourseDefinition::new("BBM", Commerce, COMMERCE, None, None),
        CourseDefinition::new("CA", Commerce, COMMERCE, None, None),
        CourseDefinition::new(
            "BA in History",
            Humanities,
            &["History", "Political Science", "Geography"],
            None,
            None,
        ),
        CourseDefinition::new(
            "BA in Psychology",
            Humanities,
            &["Psychology", "Sociology", "English"],
            None,
            None,
        ),
        CourseDefinition::new(
            "BA in Sociology",
            Humanities,
            &["Sociology", "Political Science", "History"],
            None,
            None,
        ),
        CourseDefinition::new(
            "BA in Political Science",
            Humanities,
            &["Political Science", "History", "Geography"],
            None,
            None,
        ),
        CourseDefinition::new(
            "BA in English",
            Humanities,
            &["English", "History", "Political Science"],
            None,
            None,
        ),
    ]
}
