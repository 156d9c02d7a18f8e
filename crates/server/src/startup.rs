use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;
use service::{
    contacts::ContactService,
    storage::{DocumentStore, FileDocumentStore, JsonStorage, MemoryDocumentStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Pick the document backend named in the config.
async fn build_backend(cfg: &AppConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match cfg.storage.backend {
        StorageBackend::File => {
            let store = FileDocumentStore::new(&cfg.storage.data_dir).await?;
            info!(data_dir = %cfg.storage.data_dir, "using file storage");
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; contacts are lost on restart");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}

/// Wire storage, the contacts service and metrics into handler state.
/// Seeds the collection up front when `contacts.seed_on_startup` is set.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let backend = build_backend(cfg).await?;
    let contacts = Arc::new(ContactService::with_collection(
        JsonStorage::new(backend),
        cfg.contacts.collection.trim(),
    ));
    if cfg.contacts.seed_on_startup {
        let seeded = contacts.ensure_seeded().await?;
        info!(collection = %contacts.collection(), seeded, "contacts collection ready");
    }
    Ok(AppState::new(contacts)?)
}

/// Build the app for the given config without binding a socket
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app from `cfg` and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, "starting contact list server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
