#![forbid(unsafe_code)]

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskdeck_server::{build_router, validate_startup_config, ApiConfig, AppState};
use taskdeck_store::SqliteTaskStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("TASKDECK_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("TASKDECK_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let db_path = PathBuf::from(
        env::var("TASKDECK_DB_PATH").unwrap_or_else(|_| "artifacts/tasks.sqlite".to_string()),
    );

    let api_cfg = ApiConfig {
        max_body_bytes: env_usize("TASKDECK_MAX_BODY_BYTES", 16 * 1024),
        expose_internal_errors: env_bool("TASKDECK_EXPOSE_INTERNAL_ERRORS", false),
    };
    validate_startup_config(&api_cfg)?;

    if let Some(parent) = db_path.parent().filter(|p| *p != Path::new("")) {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let store = SqliteTaskStore::open(&db_path).map_err(|e| e.to_string())?;
    let state = AppState::with_config(Arc::new(store), api_cfg);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| e.to_string())?;
    info!(bind = %bind_addr, db = %db_path.display(), "taskdeck server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| e.to_string())
}
