use axum::{
    extract::{self},
    http::HeaderMap,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;

/// Public address of the service as seen by the client, honoring the
/// `x-forwarded-*` headers set by a reverse proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseUrl {
    proto: String,
    host: String,
    prefix: String,
}

impl BaseUrl {
    pub fn new(
        proto: impl Into<String>,
        host: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            proto: proto.into(),
            host: host.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        Self::new(
            header("x-forwarded-proto").unwrap_or("http"),
            header("x-forwarded-host")
                .or_else(|| header("host"))
                .unwrap_or("localhost"),
            header("x-forwarded-prefix").unwrap_or(""),
        )
    }

    pub fn full_url<S: Into<String>>(&self, path: S) -> String {
        format!(
            "{}://{}{}{}",
            self.proto,
            self.host,
            self.prefix,
            path.into()
        )
    }
}

pub async fn base_url_middleware(req: extract::Request, next: Next) -> impl IntoResponse {
    let base_url = BaseUrl::from_headers(req.headers());

    let mut req = req;
    req.extensions_mut().insert(Arc::new(base_url));

    next.run(req).await
}
