//! In-memory student store for testing and development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domains::students::models::{Student, StudentFields};
use crate::kernel::{BaseStudentStore, StoreError};

/// In-memory storage for student records.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
pub struct MemoryStudentStore {
    inner: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Student>,
    last_id: i64,
}

impl Default for MemoryStudentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStudentStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table::default()),
        }
    }

    /// Get the number of stored records.
    pub fn len(&self) -> usize {
        self.read().map(|table| table.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl BaseStudentStore for MemoryStudentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }

    async fn insert(&self, fields: &StudentFields) -> Result<Student, StoreError> {
        let mut table = self.write()?;
        // Ids only move forward, so a deleted id is never handed out again.
        table.last_id += 1;
        let student = Student::from_fields(table.last_id, fields.clone());
        table.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, StoreError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn replace(
        &self,
        id: i64,
        fields: &StudentFields,
    ) -> Result<Option<Student>, StoreError> {
        let mut table = self.write()?;
        Ok(table.rows.get_mut(&id).map(|row| {
            *row = Student::from_fields(id, fields.clone());
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Student>, StoreError> {
        Ok(self.write()?.rows.remove(&id))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::students::models::{Branch, Gender};

    fn fields(name: &str) -> StudentFields {
        StudentFields {
            name: name.to_string(),
            gender: Gender::Other,
            branch: Branch::Ce,
            year: 2020,
            image: name.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_student_crud() {
        let store = MemoryStudentStore::new();

        // Insert
        let created = store.insert(&fields("Kiran")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.len(), 1);

        // Get
        let found = store.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));

        // Replace
        let replaced = store
            .replace(created.id, &fields("Kiran Rao"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.name, "Kiran Rao");
        assert_eq!(replaced.id, created.id);

        // Delete
        let deleted = store.delete(created.id).await.unwrap();
        assert_eq!(deleted, Some(replaced));
        assert!(store.is_empty());
        assert_eq!(store.find_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryStudentStore::new();
        let first = store.insert(&fields("A")).await.unwrap();
        let second = store.insert(&fields("B")).await.unwrap();
        store.delete(second.id).await.unwrap();

        let third = store.insert(&fields("C")).await.unwrap();
        assert!(third.id > second.id);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_find_all_in_insertion_order() {
        let store = MemoryStudentStore::new();
        for name in ["A", "B", "C"] {
            store.insert(&fields(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = MemoryStudentStore::new();
        assert_eq!(store.replace(42, &fields("X")).await.unwrap(), None);
        assert_eq!(store.delete(42).await.unwrap(), None);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
