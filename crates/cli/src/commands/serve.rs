use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use valora_http::{AppState, Pages, create_router};
use valora_llm::LlmClient;
use valora_service::{EstimateService, InquiryService};

use crate::{get_api_key, get_base_url, open_storage};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let storage = open_storage().await?;

    let llm = match get_api_key() {
        Some(api_key) => {
            let client = LlmClient::new(api_key, get_base_url())?;
            tracing::info!(model = client.model(), base_url = client.base_url(), "AI client ready");
            Some(Arc::new(client))
        },
        None => {
            tracing::warn!("OPENAI_API_KEY not set, estimate generation disabled");
            None
        },
    };

    let state = Arc::new(AppState {
        inquiry_service: Arc::new(InquiryService::new(Arc::clone(&storage))),
        estimate_service: Arc::new(EstimateService::new(Arc::clone(&storage), llm)),
        pages: Pages::new()?,
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting HTTP server on {}", addr);
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    storage.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
    }
}
