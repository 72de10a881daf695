use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;

use crate::config::DashboardConfig;
use crate::error::LoadError;
use crate::plants::{PlantDataset, PlantSettings, PlantSources};
use crate::trends::{TrendsDataset, TrendsSettings, TrendsSources};

pub mod api;
pub mod play;
pub mod routes;
pub mod static_files;

/// Loaded datasets shared read-only by every request.
#[derive(Debug)]
pub struct AppState {
    pub config: DashboardConfig,
    pub trends: Option<TrendsDataset>,
    pub plants: Option<PlantDataset>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Loads every enabled dashboard from `config.data_dir`; the first
    /// failure aborts.
    pub fn load(config: DashboardConfig) -> Result<Self, LoadError> {
        let trends = if config.trends_enabled {
            let sources = TrendsSources::in_dir(&config.data_dir);
            Some(TrendsDataset::load(&sources, TrendsSettings::from(&config))?)
        } else {
            None
        };
        let plants = if config.plants_enabled {
            let sources = PlantSources::in_dir(&config.data_dir);
            Some(PlantDataset::load(&sources, PlantSettings::from(&config))?)
        } else {
            None
        };
        Ok(Self {
            config,
            trends,
            plants,
        })
    }
}

pub fn router(state: SharedState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/api/trends/play", get(play::play_handler))
        .route("/api/*rest", any(api_handler))
        .fallback_service(static_files::static_service(&static_dir))
        .with_state(state)
}

async fn api_handler(State(state): State<SharedState>, method: Method, uri: Uri) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let method = method.as_str().to_string();
    let joined = tokio::task::spawn_blocking(move || {
        routes::route_request(&state, &method, &target)
    })
    .await;
    match joined {
        Ok(response) => {
            if response.status_code >= 500 {
                tracing::warn!(status = response.status_code, path = %uri.path(), "request failed");
            }
            response.into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "request handler panicked");
            routes::error_response(500, "Internal Server Error", "request handler failed").into_response()
        }
    }
}

pub async fn serve(state: SharedState) -> std::io::Result<()> {
    let bind_addr = state.config.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("geodash server listening on http://{bind_addr}");
    axum::serve(listener, router(state)).await
}

/// Blocks on a fresh runtime until the server stops.
pub fn run_server(state: AppState) -> std::io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(Arc::new(state)))
}
