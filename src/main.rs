use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use autos_manager::config::{DatabaseConfig, EnvironmentConfig};
use autos_manager::database::{seed, DatabaseConnection};
use autos_manager::middleware::cors_from_config;
use autos_manager::repositories::{AutoRepository, InMemoryAutoRepository, PgAutoRepository};
use autos_manager::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,autos_manager=debug,tower_http=info")),
        )
        .init();

    info!("🚗 Autos Manager - Gestión de automóviles");
    info!("================================================");

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;
    info!("⚙️ Entorno: {}", config.environment);

    // Inicializar el store
    let repository = build_repository(&config).await?;

    if config.seed_data {
        seed::seed_if_empty(&*repository)
            .await
            .context("Error cargando datos iniciales")?;
    }

    let app = create_app_router(AppState::new(repository)).layer(cors_from_config(&config));

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints REST:");
    info!("   GET    /api/automoviles - Listar automóviles");
    info!("   GET    /api/automoviles/:id - Obtener auto");
    info!("   POST   /api/automoviles - Crear auto");
    info!("   PUT    /api/automoviles/:id - Actualizar auto (parcial)");
    info!("   DELETE /api/automoviles/:id - Eliminar auto");
    info!("   GET    /api/automoviles/departamento/:nombre - Autos por departamento");
    info!("🖥️ Vistas web:");
    info!("   GET  / - Dashboard");
    info!("   GET  /automoviles - Lista");
    info!("   GET  /automoviles/nuevo - Formulario de alta");
    info!("   GET  /automoviles/editar/:id - Formulario de edición");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("No se pudo abrir {}", addr))?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// PostgreSQL si hay DATABASE_URL; si no, store en memoria
async fn build_repository(config: &EnvironmentConfig) -> Result<Arc<dyn AutoRepository>> {
    match DatabaseConfig::from_environment(config) {
        Some(db_config) => {
            let connection = DatabaseConnection::new(&db_config)
                .await
                .context("Error conectando a la base de datos")?;
            connection
                .run_migrations()
                .await
                .context("Error creando el schema")?;
            info!("✅ PostgreSQL conectado exitosamente");
            Ok(Arc::new(PgAutoRepository::new(connection.pool().clone())))
        }
        None => {
            warn!("⚠️ DATABASE_URL no configurada, usando store en memoria (los datos no persisten)");
            Ok(Arc::new(InMemoryAutoRepository::new()))
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
