#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use taskdeck_store::TaskRepository;

pub const CRATE_NAME: &str = "taskdeck-server";

mod config;
mod fake_store;
mod http;
mod middleware;

pub use config::{validate_startup_config, ApiConfig};
pub use fake_store::FakeTaskStore;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn TaskRepository>,
    pub api: ApiConfig,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self::with_config(repo, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(repo: Arc<dyn TaskRepository>, api: ApiConfig) -> Self {
        Self {
            repo,
            api,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route(
            "/tasks",
            get(http::handlers::list_tasks_handler).post(http::handlers::create_task_handler),
        )
        .route(
            "/tasks/:id",
            get(http::handlers::get_task_handler)
                .put(http::handlers::update_task_handler)
                .delete(http::handlers::delete_task_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
