//! Store de autos en memoria
//!
//! Se usa en los tests y cuando no hay `DATABASE_URL` configurada.
//! Replica las garantías del store PostgreSQL: ids secuenciales,
//! orden natural por id y email único.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::auto::{AutoRecord, NewAuto};
use crate::repositories::auto_repository::AutoRepository;
use crate::utils::errors::{duplicate_email_error, not_found_error, AppResult};

#[derive(Debug, Default)]
struct MemoryTable {
    rows: BTreeMap<i64, AutoRecord>,
    last_id: i64,
}

impl MemoryTable {
    fn email_taken(&self, email: &str, except_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|row| row.email == email && Some(row.id) != except_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAutoRepository {
    table: Arc<RwLock<MemoryTable>>,
}

impl InMemoryAutoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AutoRepository for InMemoryAutoRepository {
    async fn find_all(&self) -> AppResult<Vec<AutoRecord>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<AutoRecord>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<AutoRecord>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|row| row.email == email).cloned())
    }

    async fn find_by_department(&self, department: &str) -> AppResult<Vec<AutoRecord>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|row| row.department.as_deref() == Some(department))
            .cloned()
            .collect())
    }

    async fn insert(&self, auto: NewAuto) -> AppResult<AutoRecord> {
        let mut table = self.table.write().await;
        if table.email_taken(&auto.email, None) {
            return Err(duplicate_email_error(&auto.email));
        }

        table.last_id += 1;
        let record = auto.with_id(table.last_id);
        table.rows.insert(record.id, record.clone());
        tracing::debug!(id = record.id, "auto insertado en memoria");
        Ok(record)
    }

    async fn update(&self, auto: AutoRecord) -> AppResult<AutoRecord> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&auto.id) {
            return Err(not_found_error(auto.id));
        }
        if table.email_taken(&auto.email, Some(auto.id)) {
            return Err(duplicate_email_error(&auto.email));
        }

        table.rows.insert(auto.id, auto.clone());
        Ok(auto)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut table = self.table.write().await;
        table.rows.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.contains_key(&id))
    }

    async fn count(&self) -> AppResult<i64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as i64)
    }
}
