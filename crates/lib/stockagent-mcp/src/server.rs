//! Transport runners for the StockAgent MCP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use stockagent_core::{KeywordClassifier, PortfolioLookup};
use tracing::info;

use crate::StockAgentMcp;

type ServeResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Settings for the streamable HTTP transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    /// Keep per-client sessions; stateless mode answers each POST on its own.
    pub stateful_mode: bool,
    /// `None` disables SSE keep-alive pings.
    pub sse_keep_alive: Option<Duration>,
}

/// Serves the MCP server over stdin/stdout until the client disconnects.
///
/// # Errors
/// Returns any transport or initialization error.
pub async fn serve_stdio(
    lookup: Arc<PortfolioLookup>,
    classifier: Arc<KeywordClassifier>,
) -> ServeResult {
    info!("stockagent MCP serving on stdio");
    let running = StockAgentMcp::with_shared(lookup, classifier)
        .serve(stdio())
        .await?;
    let reason = running.waiting().await?;
    info!(?reason, "stdio session closed");
    Ok(())
}

/// Serves the MCP server over streamable HTTP at `/mcp`, with `/health` beside it.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http(
    lookup: Arc<PortfolioLookup>,
    classifier: Arc<KeywordClassifier>,
    config: McpHttpServerConfig,
) -> ServeResult {
    let app = http_router(lookup, classifier, config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "stockagent MCP listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn http_router(
    lookup: Arc<PortfolioLookup>,
    classifier: Arc<KeywordClassifier>,
    config: McpHttpServerConfig,
) -> Router {
    let mcp: StreamableHttpService<StockAgentMcp, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(StockAgentMcp::with_shared(lookup.clone(), classifier.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: config.sse_keep_alive,
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", mcp)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use stockagent_core::{LookupDefaults, PortfolioLoader};
    use tower::ServiceExt as _;

    use super::*;

    fn router() -> Router {
        let loader = PortfolioLoader::new(Duration::from_secs(5)).expect("client should build");
        let config = McpHttpServerConfig {
            addr: "127.0.0.1:0".parse().expect("valid addr"),
            stateful_mode: false,
            sse_keep_alive: None,
        };
        http_router(
            Arc::new(PortfolioLookup::new(loader, LookupDefaults::default())),
            Arc::new(KeywordClassifier::default()),
            config,
        )
    }

    #[tokio::test]
    async fn health_route_answers_ok() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("valid request"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/portfolio")
                    .body(Body::empty())
                    .expect("valid request"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
