//! SQLite student store.
//!
//! A file-based storage backend using SQLite. Good for:
//! - Local development
//! - Single-server deployments
//! - Testing with persistent data

use async_trait::async_trait;
use std::time::Duration;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use super::{StudentRow, STUDENT_COLUMNS};
use crate::domains::students::models::{Student, StudentFields};
use crate::kernel::{BaseStudentStore, StoreError};

/// SQLite-based student store.
pub struct SqliteStudentStore {
    pool: SqlitePool,
}

impl SqliteStudentStore {
    /// Create a new SQLite store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite://students.db?mode=rwc` - File-based, created if missing
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let in_memory = database_url.contains(":memory:");

        // Every connection to `:memory:` opens its own empty database, so an
        // in-memory store is pinned to one connection that is never recycled.
        let options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = options.connect(database_url).await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory SQLite store (for testing).
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::new("sqlite::memory:", 1).await
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female', 'Other')),
                branch TEXT NOT NULL CHECK (branch IN ('CSE', 'ECE', 'EE', 'ME', 'CE', 'BME')),
                year INTEGER NOT NULL,
                image BLOB NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl BaseStudentStore for SqliteStudentStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, fields: &StudentFields) -> Result<Student, StoreError> {
        let sql = format!(
            "INSERT INTO students (name, gender, branch, year, image)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&sql)
            .bind(&fields.name)
            .bind(fields.gender.as_str())
            .bind(fields.branch.as_str())
            .bind(fields.year)
            .bind(&fields.image)
            .fetch_one(&self.pool)
            .await?
            .into_student()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, StoreError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?");
        sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(StudentRow::into_student)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Student>, StoreError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id");
        sqlx::query_as::<_, StudentRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(StudentRow::into_student)
            .collect()
    }

    async fn replace(
        &self,
        id: i64,
        fields: &StudentFields,
    ) -> Result<Option<Student>, StoreError> {
        let sql = format!(
            "UPDATE students
             SET name = ?, gender = ?, branch = ?, year = ?, image = ?
             WHERE id = ?
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&sql)
            .bind(&fields.name)
            .bind(fields.gender.as_str())
            .bind(fields.branch.as_str())
            .bind(fields.year)
            .bind(&fields.image)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(StudentRow::into_student)
            .transpose()
    }

    async fn delete(&self, id: i64) -> Result<Option<Student>, StoreError> {
        let sql = format!("DELETE FROM students WHERE id = ? RETURNING {STUDENT_COLUMNS}");
        sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(StudentRow::into_student)
            .transpose()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}
