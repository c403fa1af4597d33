//! PostgreSQL-backed `StudentRepository` implementation using Diesel.
//!
//! Students live in two tables: `students` carries the record fields and
//! `student_courses` one row per enrollment. Email uniqueness is enforced by
//! a database constraint; the adapter translates the violation into the
//! port's `DuplicateEmail` variant.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use diesel::dsl::count_distinct;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, warn};

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{Course, Student, StudentId};

use super::models::{
    NewStudentCourseRow, NewStudentRow, StudentChangeset, StudentCourseRow, StudentRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{student_courses, students};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply any pending migrations against the given database.
///
/// Runs on a blocking thread because the migration harness drives a
/// synchronous connection.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), StudentRepositoryError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = <AsyncConnectionWrapper<AsyncPgConnection> as diesel::Connection>::establish(
            &url,
        )
        .map_err(|err| StudentRepositoryError::connection(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|err| StudentRepositoryError::query(err.to_string()))
    })
    .await
    .map_err(|err| StudentRepositoryError::query(err.to_string()))?
}

/// Diesel-backed implementation of the `StudentRepository` port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StudentRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> StudentRepositoryError {
    use diesel::result::Error as DieselError;

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StudentRepositoryError::connection("database connection error")
        }
        other => StudentRepositoryError::query(other.to_string()),
    }
}

impl From<diesel::result::Error> for StudentRepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        map_diesel_error(error)
    }
}

/// Save-specific mapping: a unique violation on `students.email` becomes the
/// port's conflict variant.
fn map_save_error(error: diesel::result::Error, email: &str) -> StudentRepositoryError {
    match error {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StudentRepositoryError::duplicate_email(email)
        }
        other => map_diesel_error(other),
    }
}

fn to_student(row: StudentRow, courses: BTreeSet<Course>) -> Student {
    Student {
        id: Some(StudentId::new(row.id)),
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        enrollment_date: row.enrollment_date,
        enrolled_courses: courses,
    }
}

/// Group enrollment rows by student, dropping names that fell out of the
/// catalogue.
fn group_courses(rows: Vec<StudentCourseRow>) -> HashMap<i64, BTreeSet<Course>> {
    let mut by_student: HashMap<i64, BTreeSet<Course>> = HashMap::new();
    for row in rows {
        match row.course.parse::<Course>() {
            Ok(course) => {
                by_student.entry(row.student_id).or_default().insert(course);
            }
            Err(err) => {
                warn!(student_id = row.student_id, error = %err, "skipping unknown course name");
            }
        }
    }
    by_student
}

impl DieselStudentRepository {
    /// Load the enrollment sets for the given rows and assemble domain
    /// records, preserving the row order.
    async fn attach_courses(
        &self,
        conn: &mut AsyncPgConnection,
        rows: Vec<StudentRow>,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let course_rows: Vec<StudentCourseRow> = student_courses::table
            .filter(student_courses::student_id.eq_any(&ids))
            .select(StudentCourseRow::as_select())
            .load(conn)
            .await
            .map_err(map_diesel_error)?;

        let mut by_student = group_courses(course_rows);
        Ok(rows
            .into_iter()
            .map(|row| {
                let courses = by_student.remove(&row.id).unwrap_or_default();
                to_student(row, courses)
            })
            .collect())
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list_all(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .order((students::last_name.asc(), students::first_name.asc()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        self.attach_courses(&mut conn, rows).await
    }

    async fn find_by_id(
        &self,
        id: StudentId,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StudentRow> = students::table
            .find(id.as_i64())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => Ok(self.attach_courses(&mut conn, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_name_containing(
        &self,
        term: &str,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        if term.trim().is_empty() {
            return Err(StudentRepositoryError::EmptySearchTerm);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = format!("%{term}%");
        let rows: Vec<StudentRow> = students::table
            .filter(
                students::first_name
                    .ilike(pattern.clone())
                    .or(students::last_name.ilike(pattern)),
            )
            .order((students::last_name.asc(), students::first_name.asc()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        self.attach_courses(&mut conn, rows).await
    }

    async fn find_by_course(
        &self,
        course: Course,
    ) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<i64> = student_courses::table
            .filter(student_courses::course.eq(course.as_str()))
            .select(student_courses::student_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<StudentRow> = students::table
            .filter(students::id.eq_any(&ids))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        self.attach_courses(&mut conn, rows).await
    }

    async fn save(&self, student: Student) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<StudentRow, StudentRepositoryError, _>(|conn| {
                let student = &student;
                async move {
                    let row = match student.id {
                        None => {
                            let new_row = NewStudentRow {
                                first_name: &student.first_name,
                                last_name: &student.last_name,
                                email: &student.email,
                                enrollment_date: student.enrollment_date,
                            };
                            diesel::insert_into(students::table)
                                .values(&new_row)
                                .returning(StudentRow::as_returning())
                                .get_result(conn)
                                .await
                                .map_err(|err| map_save_error(err, &student.email))?
                        }
                        Some(id) => {
                            let changeset = StudentChangeset {
                                first_name: &student.first_name,
                                last_name: &student.last_name,
                                email: &student.email,
                                enrollment_date: student.enrollment_date,
                            };
                            diesel::update(students::table.find(id.as_i64()))
                                .set(&changeset)
                                .returning(StudentRow::as_returning())
                                .get_result(conn)
                                .await
                                .map_err(|err| match err {
                                    diesel::result::Error::NotFound => {
                                        StudentRepositoryError::missing_record(id)
                                    }
                                    other => map_save_error(other, &student.email),
                                })?
                        }
                    };

                    // Rewrite the enrollment set wholesale; the record is
                    // saved as a unit.
                    diesel::delete(
                        student_courses::table.filter(student_courses::student_id.eq(row.id)),
                    )
                    .execute(conn)
                    .await?;
                    let course_rows: Vec<NewStudentCourseRow<'_>> = student
                        .enrolled_courses
                        .iter()
                        .map(|course| NewStudentCourseRow {
                            student_id: row.id,
                            course: course.as_str(),
                        })
                        .collect();
                    if !course_rows.is_empty() {
                        diesel::insert_into(student_courses::table)
                            .values(&course_rows)
                            .execute(conn)
                            .await?;
                    }
                    Ok(row)
                }
                .scope_boxed()
            })
            .await?;
        drop(conn);

        Ok(to_student(row, student.enrolled_courses))
    }

    async fn delete_by_id(&self, id: StudentId) -> Result<(), StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Enrollment rows go with the record via ON DELETE CASCADE.
        let deleted = diesel::delete(students::table.find(id.as_i64()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(StudentRepositoryError::missing_record(id));
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(students::table.find(id.as_i64())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn count(&self) -> Result<u64, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = students::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn count_enrolled(&self) -> Result<u64, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let enrolled: i64 = student_courses::table
            .select(count_distinct(student_courses::student_id))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(enrolled).unwrap_or_default())
    }
}
