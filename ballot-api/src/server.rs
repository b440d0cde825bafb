/// Axum HTTP server setup and routing

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokenized_ballot::RelayService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;

/// Allow any origin unless an explicit allow list is configured
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        log::warn!("CORS: Allowing all origins. Set ALLOWED_ORIGINS to restrict.");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        log::info!("CORS configured for origins: {}", allowed_origins.join(","));
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_router(service: Arc<RelayService>, cors: CorsLayer) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Contract addresses
        .route("/my-token-contract-address", get(get_my_token_contract_address))
        .route(
            "/tokenized-ballot-contract-address",
            get(get_tokenized_ballot_contract_address),
        )

        // Token reads
        .route("/total-supply", get(get_total_supply))
        .route("/allowance", get(get_allowance))

        // Transaction lookups
        .route("/transaction-status/:txn_hash", get(get_transaction_status))
        .route("/transaction-receipt/:txn_hash", get(get_transaction_receipt))

        // Signed writes
        .route("/request-tokens", post(request_tokens))
        .route("/delegate", post(delegate))
        .route("/vote", post(vote))

        // Ballot reads
        .route("/winning-proposal", get(get_winning_proposal))

        // Shared state
        .with_state(service)

        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(
    service: Arc<RelayService>,
    addr: &str,
    allowed_origins: &[String],
) -> anyhow::Result<()> {
    let app = create_router(service, cors_layer(allowed_origins));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Ballot relay listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
}
