use crate::adapters::csv_host::CsvHost;
use crate::adapters::http::{create_router, AppState};
use crate::adapters::memory::MemoryHost;
use crate::core::bootstrap::ensure_seeded;
use crate::core::service::OrderService;
use crate::core::store::RowStore;
use crate::core::{ConfigProvider, SheetHost, StoreBackend};
use crate::utils::error::{Result, SheetError};
use crate::utils::validation::validate_socket_addr;
use axum::Router;
use std::future::Future;
use std::sync::Arc;

pub type DynHost = Arc<dyn SheetHost>;

/// 依設定建立工作表主機
pub fn build_host<C: ConfigProvider + ?Sized>(config: &C) -> Result<DynHost> {
    match config.backend() {
        StoreBackend::Memory => {
            tracing::info!("🧠 Using in-memory sheet host");
            Ok(Arc::new(MemoryHost::new()))
        }
        StoreBackend::Csv => {
            let data_dir = config
                .data_dir()
                .ok_or_else(|| SheetError::MissingConfigError {
                    field: "store.data_dir".to_string(),
                })?;
            tracing::info!("🗂️ Using CSV sheet host at {}", data_dir);
            Ok(Arc::new(CsvHost::new(data_dir)))
        }
    }
}

/// Wires host, optional seeding and routes for the given host.
pub async fn build_router_with_host<H, C>(host: H, config: &C) -> Result<Router>
where
    H: SheetHost + 'static,
    C: ConfigProvider + ?Sized,
{
    let store = RowStore::new(host, config.sheet_name());

    if config.seed_on_start() {
        ensure_seeded(&store).await?;
    } else if !store.exists().await? {
        tracing::warn!(
            "⚠️ Sheet '{}' does not exist and seeding is disabled; requests will fail until it is created",
            store.name()
        );
    }

    let service = OrderService::new(store);
    Ok(create_router(AppState::new(service, config.legacy_status())))
}

pub async fn build_router<C: ConfigProvider + ?Sized>(config: &C) -> Result<Router> {
    let host = build_host(config)?;
    build_router_with_host(host, config).await
}

/// Binds and serves until Ctrl-C.
pub async fn serve<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let addr = validate_socket_addr("server.bind", config.bind_addr())?;
    let app = build_router(config).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 order-sheet listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

/// Resolves once the signal fires. A signal that cannot be installed never
/// resolves, so the server keeps running instead of stopping at start.
async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("🛑 Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
