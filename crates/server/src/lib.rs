// Library crate: the intent pipeline, dispatcher and routes, exposed for
// integration tests. `main.rs` only wires configuration and the listener.

pub mod ai;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fuzzy;
pub mod layout;
pub mod resolver;
pub mod routes;
pub mod search;
pub mod storage;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::ai::{GeminiGenerator, RemoteGenerator};
use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::error::StoreError;
use crate::resolver::Resolver;
use crate::search::{AssetSearch, HttpAssetSearch};
use crate::storage::ProjectStore;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub store: Arc<ProjectStore>,
}

impl AppState {
    /// Wire adapters and the project store from configuration
    pub async fn from_config(config: &ServerConfig) -> Result<Self, StoreError> {
        let remote = GeminiGenerator::from_config(config)
            .map(|g| Arc::new(g) as Arc<dyn RemoteGenerator>);
        if remote.is_none() {
            tracing::warn!("GEMINI_API_KEY not set, remote tier disabled");
        }
        let search = HttpAssetSearch::from_config(config)
            .map(|s| Arc::new(s) as Arc<dyn AssetSearch>);
        if search.is_none() {
            tracing::warn!("ASSET_SEARCH_URL not set, assets fall back to primitives");
        }

        let store = Arc::new(match &config.projects_path {
            Some(path) => ProjectStore::open(path).await?,
            None => ProjectStore::in_memory(),
        });

        let resolver = Resolver::new(remote, config.remote_timeout);
        let dispatcher = Dispatcher::new(resolver, search, store.clone(), config.remote_timeout);
        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            store,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/resolve", post(routes::resolve))
        .route("/api/projects", get(routes::list_projects).post(routes::save_project))
        .route("/ws", get(routes::ws))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
