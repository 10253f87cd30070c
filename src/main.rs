use std::sync::Arc;

use abf::acl::access::Access;
use abf::acl::store::Store;
use abf::config::{internal::Config, render_config};
use abf::decision::Decision;
use abf::http::{build_router, AppState};
use abf::limiter::Limiter;
use abf::logging;
use abf::multi_limiter::MultiLimiter;

#[tokio::main]
async fn main() {
    logging::init();

    let config = render_config();

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(1);
    }

    if config.validate_configs {
        tracing::info!("configuration is valid, exiting (--validate-configs)");
        return;
    }

    let store = Arc::new(Store::new());
    let access = Access::new(store);
    let limiter = build_limiter(&config);
    let decision = Arc::new(Decision::new(access.clone(), limiter));
    let state = AppState { decision, access };

    let app = build_router(state);

    let addr = config.bind_addr();
    tracing::info!(%addr, "binding listener");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!(%addr, "starting server");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}

fn build_limiter(config: &Config) -> MultiLimiter {
    MultiLimiter::new(
        Limiter::new(
            config.login_limiter.capacity,
            config.login_limiter.duration(),
        ),
        Limiter::new(
            config.password_limiter.capacity,
            config.password_limiter.duration(),
        ),
        Limiter::new(config.ip_limiter.capacity, config.ip_limiter.duration()),
    )
}

/// Waits for either Ctrl+C or SIGTERM so the server drains in-flight
/// connections before exiting.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
