//! Conexión a PostgreSQL
//!
//! Este módulo abre el pool de conexiones y crea la tabla `automoviles`
//! si todavía no existe.

use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

const CREATE_AUTOMOVILES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS automoviles (
    id BIGSERIAL PRIMARY KEY,
    first_name VARCHAR(255) NOT NULL,
    last_name VARCHAR(255) NOT NULL,
    brand VARCHAR(255) NOT NULL,
    model VARCHAR(255) NOT NULL,
    color VARCHAR(255) NOT NULL,
    purchase_date DATE,
    email VARCHAR(255) NOT NULL UNIQUE,
    assignment_date DATE,
    cost NUMERIC(19, 2),
    department VARCHAR(255),
    tenure_years INTEGER
)
"#;

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar usando la configuración dada
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!("🔌 Conectando a PostgreSQL en {}", mask_database_url(&config.url));
        let pool = config.create_pool().await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_AUTOMOVILES_TABLE)
            .execute(&self.pool)
            .await?;
        info!("✅ Tabla automoviles lista");
        Ok(())
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    if scheme_end + 3 > at_pos {
        return url.to_string();
    }

    let protocol = &url[..scheme_end + 3];
    let host = &url[at_pos + 1..];
    format!("{}***:***@{}", protocol, host)
}
