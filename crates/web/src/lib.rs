pub use crate::common::RouteResult;
pub use crate::config::WebConfig;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod common;
pub mod config;
pub mod hateoas;
pub mod middleware;

/// Shared by all requests. Holds configuration only; every numbering run
/// owns its own counter and projections.
#[derive(Clone, FromRef)]
pub struct WebState {
    pub config: Arc<WebConfig>,
}

impl WebState {
    pub fn new(config: WebConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn router(state: WebState) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(state: WebState) -> std::io::Result<()> {
    let bind_address = state.config.bind_address;
    let routes = router(state);

    let listener = TcpListener::bind(bind_address).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
