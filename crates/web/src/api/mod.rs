use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, on},
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::json;

pub mod v1;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        format!("/api{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

const SERVICE_NAME: &str = "numbering";

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ping", get(ping))
        .nest_service("/v1", v1::routes(state))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
}

impl ServiceInfo {
    fn current() -> Self {
        Self {
            service: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

async fn index(
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> Json<hateoas::Response<ServiceInfo>> {
    hateoas::Response::builder(ServiceInfo::current(), base_url)
        .link("self", resource!(""))
        .link("ping", resource!("/ping"))
        .link("numbering", v1::numbering::resource!(""))
        .link("export", v1::numbering::resource!("/export"))
        .link("schema", v1::numbering::resource!("/schema"))
        .build()
        .json()
}

async fn ping() -> impl IntoResponse {
    let info = ServiceInfo::current();
    Json(json!({
        "message": "pong!",
        "service": info.service,
        "version": info.version,
    }))
}
