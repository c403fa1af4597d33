//! In-memory implementation of the student repository port.
//!
//! Backs the service when no database is configured and doubles as the test
//! stand-in for the PostgreSQL adapter. Semantics match the port contract:
//! sequence-assigned identifiers, unique emails, ordered listing and the two
//! aggregate queries.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{Course, Student, StudentId};

#[derive(Debug, Default)]
struct Store {
    students: BTreeMap<i64, Student>,
    next_id: i64,
}

/// Volatile, process-local student store.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    store: Mutex<Store>,
}

impl InMemoryStudentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut guard = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

fn name_matches(student: &Student, term: &str) -> bool {
    let term = term.to_lowercase();
    student.first_name.to_lowercase().contains(&term)
        || student.last_name.to_lowercase().contains(&term)
}

fn sorted_by_name(mut students: Vec<Student>) -> Vec<Student> {
    students.sort_by(|a, b| {
        (a.last_name.to_lowercase(), a.first_name.to_lowercase())
            .cmp(&(b.last_name.to_lowercase(), b.first_name.to_lowercase()))
    });
    students
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list_all(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let students = self.with_store(|store| store.students.values().cloned().collect());
        Ok(sorted_by_name(students))
    }

    async fn find_by_id(
        &self,
        id: StudentId,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self.with_store(|store| store.students.get(&id.as_i64()).cloned()))
    }

    async fn find_by_name_containing(
        &self,
        term: &str,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        if term.trim().is_empty() {
            return Err(StudentRepositoryError::EmptySearchTerm);
        }
        let matches = self.with_store(|store| {
            store
                .students
                .values()
                .filter(|student| name_matches(student, term))
                .cloned()
                .collect()
        });
        Ok(sorted_by_name(matches))
    }

    async fn find_by_course(
        &self,
        course: Course,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        Ok(self.with_store(|store| {
            store
                .students
                .values()
                .filter(|student| student.enrolled_courses.contains(&course))
                .cloned()
                .collect()
        }))
    }

    async fn save(&self, mut student: Student) -> Result<Student, StudentRepositoryError> {
        self.with_store(|store| {
            let own_id = student.id.map(StudentId::as_i64);
            let collision = store
                .students
                .values()
                .any(|other| other.email == student.email && other.id.map(StudentId::as_i64) != own_id);
            if collision {
                return Err(StudentRepositoryError::duplicate_email(student.email.clone()));
            }

            match own_id {
                Some(id) => {
                    if !store.students.contains_key(&id) {
                        return Err(StudentRepositoryError::missing_record(id));
                    }
                    store.students.insert(id, student.clone());
                }
                None => {
                    store.next_id += 1;
                    let id = store.next_id;
                    student.id = Some(StudentId::new(id));
                    store.students.insert(id, student.clone());
                }
            }
            Ok(student)
        })
    }

    async fn delete_by_id(&self, id: StudentId) -> Result<(), StudentRepositoryError> {
        self.with_store(|store| {
            store
                .students
                .remove(&id.as_i64())
                .map(|_| ())
                .ok_or_else(|| StudentRepositoryError::missing_record(id))
        })
    }

    async fn exists_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        Ok(self.with_store(|store| store.students.contains_key(&id.as_i64())))
    }

    async fn count(&self) -> Result<u64, StudentRepositoryError> {
        Ok(self.with_store(|store| store.students.len() as u64))
    }

    async fn count_enrolled(&self) -> Result<u64, StudentRepositoryError> {
        Ok(self.with_store(|store| {
            store
                .students
                .values()
                .filter(|student| student.is_enrolled())
                .count() as u64
        }))
    }
}
