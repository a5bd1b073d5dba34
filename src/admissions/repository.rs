use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Decision, Gender, StudentId};
use super::evaluation::RecommendationTier;

/// Stored student identity, replaced wholesale when the same person
/// submits again (fingerprint dedupe).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: StudentId,
    pub fingerprint: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub desired_course: String,
    pub created_at: DateTime<Utc>,
}

/// Stored evaluation outcome paired with its generated identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision_id: String,
    pub student_id: StudentId,
    pub desired_course: String,
    pub decision: Decision,
    pub tier: Option<RecommendationTier>,
    pub created_at: DateTime<Utc>,
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction so the service facade can be exercised in
/// isolation. Persistence of records is the caller's concern; the core
/// pipeline never reads them back during evaluation.
pub trait StudentRepository: Send + Sync {
    /// Insert the student, first deleting any prior record with the same
    /// fingerprint along with its decisions.
    fn upsert_student(&self, record: StudentRecord) -> Result<(), RepositoryError>;
    fn record_decision(&self, record: DecisionRecord) -> Result<(), RepositoryError>;
    fn fetch_student(&self, id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError>;
    fn latest_decision(&self, id: &StudentId) -> Result<Option<DecisionRecord>, RepositoryError>;
}

/// Mutex-guarded in-memory store backing the binary and the test suites.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    students: HashMap<StudentId, StudentRecord>,
    decisions: Vec<DecisionRecord>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn student_count(&self) -> usize {
        self.lock().students.len()
    }

    pub fn decision_count(&self) -> usize {
        self.lock().decisions.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StudentRepository for InMemoryRepository {
    fn upsert_student(&self, record: StudentRecord) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let replaced: Vec<StudentId> = state
            .students
            .values()
            .filter(|existing| existing.fingerprint == record.fingerprint)
            .map(|existing| existing.student_id.clone())
            .collect();
        for id in replaced {
            state.students.remove(&id);
            state.decisions.retain(|decision| decision.student_id != id);
        }
        state.students.insert(record.student_id.clone(), record);
        Ok(())
    }

    fn record_decision(&self, record: DecisionRecord) -> Result<(), RepositoryError> {
        self.lock().decisions.push(record);
        Ok(())
    }

    fn fetch_student(&self, id: &StudentId) -> Result<Option<StudentRecord>, RepositoryError> {
        Ok(self.lock().students.get(id).cloned())
    }

    fn latest_decision(&self, id: &StudentId) -> Result<Option<DecisionRecord>, RepositoryError> {
        Ok(self
            .lock()
            .decisions
            .iter()
            .rev()
            .find(|decision| &decision.student_id == id)
            .cloned())
    }
}
