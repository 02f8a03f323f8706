//! Student store implementations.
//!
//! Available backends:
//! - `MemoryStudentStore` - In-memory storage (tests, `DATABASE_URL=memory`)
//! - `SqliteStudentStore` - SQLite file-based storage (`sqlite:` URLs)
//! - `PostgresStudentStore` - PostgreSQL storage (`postgres://` URLs)

pub mod memory;
pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use sqlx::FromRow;
use tracing::info;

use crate::domains::students::models::Student;
use crate::kernel::{BaseStudentStore, StoreError};

pub use memory::MemoryStudentStore;
pub use postgres::PostgresStudentStore;
pub use sqlite::SqliteStudentStore;

/// Column list shared by every SQL statement that returns a record.
pub(crate) const STUDENT_COLUMNS: &str = "id, name, gender, branch, year, image";

/// Open the store selected by the database URL scheme.
pub async fn open_store(
    database_url: &str,
    max_connections: u32,
) -> Result<Arc<dyn BaseStudentStore>, StoreError> {
    let store: Arc<dyn BaseStudentStore> =
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Arc::new(PostgresStudentStore::connect(database_url, max_connections).await?)
        } else if database_url.starts_with("sqlite:") {
            Arc::new(SqliteStudentStore::new(database_url, max_connections).await?)
        } else if database_url == "memory" {
            Arc::new(MemoryStudentStore::new())
        } else {
            return Err(StoreError::UnsupportedUrl(redact_url(database_url)));
        };

    info!("Opened {} student store", store.backend());
    Ok(store)
}

/// Drop credentials from a URL before it goes into an error or a log line.
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

// Row type for sqlx queries, shared by the SQL backends
#[derive(Debug, FromRow)]
pub(crate) struct StudentRow {
    id: i64,
    name: String,
    gender: String,
    branch: String,
    year: i32,
    image: Vec<u8>,
}

impl StudentRow {
    pub(crate) fn into_student(self) -> Result<Student, StoreError> {
        let id = self.id;
        let corrupt = move |reason: String| StoreError::CorruptRow { id, reason };

        let gender = self.gender.parse().map_err(|e| corrupt(format!("{}", e)))?;
        let branch = self.branch.parse().map_err(|e| corrupt(format!("{}", e)))?;

        Ok(Student {
            id,
            name: self.name,
            gender,
            branch,
            year: self.year,
            image: self.image,
        })
    }
}
