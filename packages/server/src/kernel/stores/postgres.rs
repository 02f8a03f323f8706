//! PostgreSQL student store.
//!
//! Schema lives in `packages/server/migrations` and is applied on connect.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{StudentRow, STUDENT_COLUMNS};
use crate::domains::students::models::{Student, StudentFields};
use crate::kernel::{BaseStudentStore, StoreError};

/// PostgreSQL-based student store.
pub struct PostgresStudentStore {
    pool: PgPool,
}

impl PostgresStudentStore {
    /// Connect, run migrations and return the store.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl BaseStudentStore for PostgresStudentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, fields: &StudentFields) -> Result<Student, StoreError> {
        let sql = format!(
            "INSERT INTO students (name, gender, branch, year, image)
             VALUES ($1, $2, $3, $4, $5)
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
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");
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
             SET name = $2, gender = $3, branch = $4, year = $5, image = $6
             WHERE id = $1
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&sql)
            .bind(id)
            .bind(&fields.name)
            .bind(fields.gender.as_str())
            .bind(fields.branch.as_str())
            .bind(fields.year)
            .bind(&fields.image)
            .fetch_optional(&self.pool)
            .await?
            .map(StudentRow::into_student)
            .transpose()
    }

    async fn delete(&self, id: i64) -> Result<Option<Student>, StoreError> {
        let sql = format!("DELETE FROM students WHERE id = $1 RETURNING {STUDENT_COLUMNS}");
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
