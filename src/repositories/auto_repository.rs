use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::auto::{AutoRecord, NewAuto};
use crate::utils::errors::{map_database_error, not_found_error, AppResult};

/// Contrato del store de autos
///
/// `insert` y `update` juntos equivalen a un `save`: un registro sin id
/// se inserta y uno con id se actualiza. El email es único en el store.
#[async_trait]
pub trait AutoRepository: Send + Sync {
    /// Todos los autos ordenados por id
    async fn find_all(&self) -> AppResult<Vec<AutoRecord>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<AutoRecord>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<AutoRecord>>;

    /// Autos cuyo departamento coincide exactamente con `department`
    async fn find_by_department(&self, department: &str) -> AppResult<Vec<AutoRecord>>;

    async fn insert(&self, auto: NewAuto) -> AppResult<AutoRecord>;

    async fn update(&self, auto: AutoRecord) -> AppResult<AutoRecord>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;
}

const SELECT_COLUMNS: &str = "SELECT id, first_name, last_name, brand, model, color, purchase_date, \
     email, assignment_date, cost, department, tenure_years FROM automoviles";

/// Store sobre PostgreSQL
pub struct PgAutoRepository {
    pool: PgPool,
}

impl PgAutoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AutoRepository for PgAutoRepository {
    async fn find_all(&self) -> AppResult<Vec<AutoRecord>> {
        let autos = sqlx::query_as::<_, AutoRecord>(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(autos)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<AutoRecord>> {
        let auto = sqlx::query_as::<_, AutoRecord>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(auto)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<AutoRecord>> {
        let auto = sqlx::query_as::<_, AutoRecord>(&format!("{} WHERE email = $1", SELECT_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(auto)
    }

    async fn find_by_department(&self, department: &str) -> AppResult<Vec<AutoRecord>> {
        let autos = sqlx::query_as::<_, AutoRecord>(&format!(
            "{} WHERE department = $1 ORDER BY id",
            SELECT_COLUMNS
        ))
        .bind(department)
        .fetch_all(&self.pool)
        .await?;

        Ok(autos)
    }

    async fn insert(&self, auto: NewAuto) -> AppResult<AutoRecord> {
        let email = auto.email.clone();

        sqlx::query_as::<_, AutoRecord>(
            r#"
            INSERT INTO automoviles (
                first_name, last_name, brand, model, color, purchase_date,
                email, assignment_date, cost, department, tenure_years
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, first_name, last_name, brand, model, color, purchase_date,
                      email, assignment_date, cost, department, tenure_years
            "#,
        )
        .bind(auto.first_name)
        .bind(auto.last_name)
        .bind(auto.brand)
        .bind(auto.model)
        .bind(auto.color)
        .bind(auto.purchase_date)
        .bind(auto.email)
        .bind(auto.assignment_date)
        .bind(auto.cost)
        .bind(auto.department)
        .bind(auto.tenure_years)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_database_error(e, &email))
    }

    async fn update(&self, auto: AutoRecord) -> AppResult<AutoRecord> {
        let id = auto.id;
        let email = auto.email.clone();

        sqlx::query_as::<_, AutoRecord>(
            r#"
            UPDATE automoviles
            SET first_name = $2, last_name = $3, brand = $4, model = $5, color = $6,
                purchase_date = $7, email = $8, assignment_date = $9, cost = $10,
                department = $11, tenure_years = $12
            WHERE id = $1
            RETURNING id, first_name, last_name, brand, model, color, purchase_date,
                      email, assignment_date, cost, department, tenure_years
            "#,
        )
        .bind(auto.id)
        .bind(auto.first_name)
        .bind(auto.last_name)
        .bind(auto.brand)
        .bind(auto.model)
        .bind(auto.color)
        .bind(auto.purchase_date)
        .bind(auto.email)
        .bind(auto.assignment_date)
        .bind(auto.cost)
        .bind(auto.department)
        .bind(auto.tenure_years)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_database_error(e, &email))?
        .ok_or_else(|| not_found_error(id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM automoviles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM automoviles WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM automoviles")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
