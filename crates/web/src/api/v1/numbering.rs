use std::{sync::Arc, time::Instant};

use axum::{
    extract::{OriginalUri, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::{get, on, post},
    Extension, Json, Router,
};
use model::{
    geojson::{Feature, FeatureCollection, Geometry},
    line::DrawnLine,
    numbering::{LineRendering, NumberedPoint, NumberingResult, NumberingStatus},
    ExampleData,
};
use numbering::{
    geojson::{self, EXPORT_FILE_NAME, GEOJSON_MEDIA_TYPE},
    number_points, NumberingConfig, SelectionSequence,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, RouteResult,
        METHOD_FILTER_ALL,
    },
    config::WebConfig,
    hateoas,
    middleware::base_url::BaseUrl,
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/numbering{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", post(number))
        .route("/export", post(export))
        .route("/schema", get(schema::<NumberingRequest>))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Points and drawn lines together with the numbering options.
///
/// Lines are numbered in the order given by `selection`. Without it, every
/// line from `startLine` to `stopLine` is used, counting down when
/// `startLine` is the larger one. Missing bounds default to the first and
/// last drawn line.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberingRequest {
    pub points: FeatureCollection,
    pub lines: FeatureCollection,
    pub threshold_meters: Option<f64>,
    pub start_line: Option<usize>,
    pub stop_line: Option<usize>,
    pub selection: Option<SelectionSequence>,
    pub initial_counter: Option<u64>,
    #[serde(default)]
    pub deduplicate: bool,
}

impl NumberingRequest {
    fn numbering_config(
        &self,
        line_count: usize,
        config: &WebConfig,
    ) -> RouteResult<NumberingConfig> {
        let threshold = self
            .threshold_meters
            .unwrap_or(config.default_threshold_meters);
        if threshold > config.max_threshold_meters {
            return Err(RouteErrorResponse::bad_request(format!(
                "The threshold must not exceed {} m.",
                config.max_threshold_meters
            ))
            .with_detailed_information(format!("requested {} m", threshold)));
        }
        let selection = match &self.selection {
            Some(selection) => selection.clone(),
            None => SelectionSequence::between(
                self.start_line,
                self.stop_line,
                line_count,
            )?,
        };
        Ok(NumberingConfig::new(threshold, selection)
            .with_initial_counter(self.initial_counter.unwrap_or(1))
            .with_deduplicate(self.deduplicate))
    }
}

impl ExampleData for NumberingRequest {
    fn example_data() -> Self {
        let line = DrawnLine::example_data();
        Self {
            points: FeatureCollection::example_data(),
            lines: FeatureCollection::new(vec![Feature::new(
                Geometry::line_string(&line.vertices),
                Default::default(),
            )]),
            threshold_meters: Some(1.0),
            start_line: Some(1),
            stop_line: Some(1),
            selection: None,
            initial_counter: None,
            deduplicate: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberingDto {
    pub status: NumberingStatus,
    pub message: String,
    pub threshold_meters: f64,
    pub selection: SelectionSequence,
    pub matched: usize,
    pub points: Vec<NumberedPoint>,
    pub lines: Vec<LineRendering>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NumberingBenchmark {
    read_input_secs: f64,
    numbering_secs: f64,
    num_points: usize,
    num_lines: usize,
}

fn run(
    request: &NumberingRequest,
    config: &WebConfig,
) -> RouteResult<(NumberingConfig, NumberingResult, NumberingBenchmark)> {
    let now = Instant::now();
    let points = geojson::read_points(&request.points)?;
    let lines = geojson::read_lines(&request.lines)?;
    let read_input_elapsed = now.elapsed();

    let numbering_config = request.numbering_config(lines.len(), config)?;

    let now = Instant::now();
    let result = number_points(&points, &lines, &numbering_config)?;
    let numbering_elapsed = now.elapsed();

    let benchmark = NumberingBenchmark {
        read_input_secs: read_input_elapsed.as_secs_f64(),
        numbering_secs: numbering_elapsed.as_secs_f64(),
        num_points: points.len(),
        num_lines: lines.len(),
    };
    Ok((numbering_config, result, benchmark))
}

async fn number(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { config, .. }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(request): Json<NumberingRequest>,
) -> HateoasResult<NumberingDto> {
    let (numbering_config, result, benchmark) =
        run(&request, &config).map_err(|why| {
            why.with_method(&Method::POST).with_uri(original_uri.path())
        })?;

    let dto = NumberingDto {
        status: result.status,
        message: result.status.message().to_owned(),
        threshold_meters: numbering_config.threshold_meters,
        selection: numbering_config.selection,
        matched: result.matched(),
        points: result.points,
        lines: result.lines,
    };
    Ok(numbering_hateoas(dto, base_url, Some(benchmark)).json())
}

async fn export(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { config, .. }): State<WebState>,
    Json(request): Json<NumberingRequest>,
) -> RouteResult<Response> {
    let (_, result, _) = run(&request, &config).map_err(|why| {
        why.with_method(&Method::POST).with_uri(original_uri.path())
    })?;
    if result.is_empty() {
        log::info!("export requested, but {}", result.status.message());
        return Err(RouteErrorResponse::unprocessable(result.status.message())
            .with_method(&Method::POST)
            .with_uri(original_uri.path()));
    }

    let body = geojson::export_string(&result).map_err(|why| {
        RouteErrorResponse::from(why)
            .with_method(&Method::POST)
            .with_uri(original_uri.path())
    })?;
    Ok((
        [
            (header::CONTENT_TYPE, GEOJSON_MEDIA_TYPE.to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response())
}

fn numbering_hateoas(
    dto: NumberingDto,
    base_url: Arc<BaseUrl>,
    benchmark: Option<NumberingBenchmark>,
) -> hateoas::Response<NumberingDto> {
    let builder = hateoas::Response::builder(dto, base_url)
        .link("self", resource!(""))
        .link("export", resource!("/export"))
        .link("schema", resource!("/schema"));
    match benchmark {
        Some(benchmark) => builder.debug_info("benchmark", benchmark),
        None => builder,
    }
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode};
    use serde_json::{json, Value};

    fn points() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Point", "coordinates": [10.00020, 54.0] } },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Point", "coordinates": [10.00000, 54.0] } },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Point", "coordinates": [10.00010, 54.0] } },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Point", "coordinates": [10.00010, 54.1] } }
            ]
        })
    }

    fn lines() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "LineString",
                                "coordinates": [[10.00025, 54.0], [9.99995, 54.0]] } },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "LineString",
                                "coordinates": [[10.0, 54.1], [10.0002, 54.1]] } }
            ]
        })
    }

    fn request(extra: Value) -> NumberingRequest {
        let mut body = json!({ "points": points(), "lines": lines() });
        if let (Some(body), Value::Object(extra)) = (body.as_object_mut(), extra) {
            body.extend(extra);
        }
        serde_json::from_value(body).unwrap()
    }

    fn state() -> WebState {
        WebState::new(WebConfig::default())
    }

    fn uri() -> OriginalUri {
        OriginalUri("/api/v1/numbering".parse().unwrap())
    }

    fn base_url() -> Extension<Arc<BaseUrl>> {
        Extension(Arc::new(BaseUrl::new("http", "localhost:8080", "")))
    }

    async fn post_number(request: NumberingRequest) -> HateoasResult<NumberingDto> {
        number(uri(), State(state()), base_url(), Json(request)).await
    }

    #[tokio::test]
    async fn numbers_across_lines_in_selection_order() {
        let Json(response) = post_number(request(json!({ "thresholdMeters": 1.0 })))
            .await
            .unwrap();
        let dto = &response.content;
        assert_eq!(dto.status, NumberingStatus::Numbered);
        let numbered = dto
            .points
            .iter()
            .map(|p| (p.order, p.point.get(), p.line.get()))
            .collect::<Vec<_>>();
        // Line 1 runs from east to west.
        assert_eq!(numbered, [(1, 0, 1), (2, 2, 1), (3, 1, 1), (4, 3, 2)]);
        assert_eq!(
            response.link("export"),
            Some("http://localhost:8080/api/v1/numbering/export")
        );
        assert!(response.debug_info.contains_key("benchmark"));
    }

    #[tokio::test]
    async fn start_after_stop_reverses_the_lines() {
        let Json(response) =
            post_number(request(json!({ "startLine": 2, "stopLine": 1 })))
                .await
                .unwrap();
        let lines = response
            .content
            .points
            .iter()
            .map(|p| p.line.get())
            .collect::<Vec<_>>();
        assert_eq!(lines, [2, 1, 1, 1]);
        assert_eq!(response.content.selection.to_string(), "[2, 1]");
    }

    #[tokio::test]
    async fn no_match_is_an_empty_result() {
        let Json(response) = post_number(request(json!({ "thresholdMeters": -1.0 })))
            .await
            .unwrap();
        assert_eq!(response.content.status, NumberingStatus::NoPointsMatched);
        assert_eq!(response.content.matched, 0);
        assert_eq!(
            response.content.message,
            "No points within threshold for selected lines."
        );
    }

    #[tokio::test]
    async fn non_point_feature_is_a_bad_request() {
        let mut request = request(json!({}));
        request.points = request.lines.clone();
        let error = post_number(request).await.unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(error.http_method.as_deref(), Some("POST"));
        assert!(error
            .detailed_information
            .unwrap()
            .contains("expected a Point geometry"));
    }

    #[tokio::test]
    async fn unknown_line_is_reported_with_its_id() {
        let error = post_number(request(json!({ "selection": [1, 7] })))
            .await
            .unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(error.line, Some(7));
    }

    #[tokio::test]
    async fn threshold_above_maximum_is_rejected() {
        let error = post_number(request(json!({ "thresholdMeters": 500.0 })))
            .await
            .unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn range_beyond_the_drawn_lines_is_rejected() {
        for (extra, line) in [
            (json!({ "stopLine": usize::MAX }), usize::MAX),
            (json!({ "startLine": 1, "stopLine": 1_000_000_000 }), 1_000_000_000),
            (json!({ "startLine": 0 }), 0),
            (json!({ "startLine": 3, "stopLine": 1 }), 3),
        ] {
            let error = post_number(request(extra.clone())).await.unwrap_err();
            assert_eq!(error.status_code, StatusCode::BAD_REQUEST, "{extra}");
            assert_eq!(error.line, Some(line), "{extra}");
        }
    }

    #[tokio::test]
    async fn initial_counter_must_be_positive() {
        let error = post_number(request(json!({ "initialCounter": 0 })))
            .await
            .unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn counter_overflow_is_a_bad_request() {
        let error = post_number(request(json!({ "initialCounter": u64::MAX })))
            .await
            .unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(error.line, Some(1));
    }

    #[tokio::test]
    async fn nothing_to_export_when_no_point_matched() {
        let body = request(json!({ "thresholdMeters": -1.0 }));
        let error = export(uri(), State(state()), Json(body)).await.unwrap_err();
        assert_eq!(error.status_code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            error.message.as_deref(),
            Some("No points within threshold for selected lines.")
        );
    }

    #[tokio::test]
    async fn export_is_a_geojson_attachment() {
        let response = export(uri(), State(state()), Json(request(json!({}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], GEOJSON_MEDIA_TYPE);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"numbered_points.geojson\""
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let collection: Value = serde_json::from_slice(&body).unwrap();
        let orders = collection["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["properties"]["order"].as_u64().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(orders, [1, 2, 3, 4]);
    }
}
