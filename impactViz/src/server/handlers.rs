use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, info};

use crate::analysis::metrics_calculation::compute;
use crate::charts::export::export_png;
use crate::charts::series::{all_series, ChartKind, ChartSeries};
use crate::charts::svg::{render_combined_figure, render_single_figure};
use crate::models::inputs::SimulationInputs;
use crate::models::metrics::DerivedMetrics;
use crate::server::app::AppState;
use crate::server::page::{render_dashboard, PageContext};
use crate::utils::logging::{self, OperationCategory, RenderType};

/// One full pass: inputs → compute → format → render
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let inputs = SimulationInputs::from_query(&params);
    let branding = state.logos.fetch_all().await;

    let html = {
        let _timing = logging::start_timing("render_dashboard",
            OperationCategory::Rendering { subcategory: RenderType::Page });
        let metrics = compute(inputs);
        let combined = {
            let _timing = logging::start_timing("render_combined_figure",
                OperationCategory::Rendering { subcategory: RenderType::Chart });
            render_combined_figure(&all_series(&metrics))
        };
        render_dashboard(&PageContext {
            inputs: &inputs,
            metrics: &metrics,
            combined: &combined,
            branding: &branding,
        })
    };

    info!(waste = inputs.waste_processed, recovery = inputs.recovery_rate, "rendered dashboard");
    Html(html)
}

pub async fn download_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let kind: ChartKind = match file.parse() {
        Ok(kind) => kind,
        Err(message) => return (StatusCode::NOT_FOUND, message).into_response(),
    };
    let inputs = SimulationInputs::from_query(&params);
    let dpi = state.config.export_dpi;

    // Rasterizing at print resolution is CPU-bound
    let rendered = tokio::task::spawn_blocking(move || {
        let _timing = logging::start_timing("export_chart_png",
            OperationCategory::Rendering { subcategory: RenderType::Export });
        let series = ChartSeries::from_metrics(kind, &compute(inputs));
        export_png(&render_single_figure(&series), dpi)
    })
    .await;

    match rendered {
        Ok(Ok(bytes)) => {
            let disposition = format!("attachment; filename=\"{}\"", kind.file_name());
            let mut response = bytes.into_response();
            let headers = response.headers_mut();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
            if let Ok(value) = HeaderValue::from_str(&disposition) {
                headers.insert(header::CONTENT_DISPOSITION, value);
            }
            response
        }
        Ok(Err(e)) => {
            error!(chart = %kind, error = %e, "chart export failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            error!(chart = %kind, error = %e, "chart export task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "export task failed").into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub inputs: SimulationInputs,
    pub metrics: DerivedMetrics,
    pub total_avoided_emissions: f64,
    pub series: [ChartSeries; 3],
}

pub async fn metrics_handler(Query(params): Query<HashMap<String, String>>) -> Json<MetricsResponse> {
    let inputs = SimulationInputs::from_query(&params);
    let metrics = compute(inputs);
    Json(MetricsResponse {
        inputs,
        metrics,
        total_avoided_emissions: metrics.total_avoided_emissions(),
        series: all_series(&metrics),
    })
}

pub async fn healthz_handler() -> &'static str {
    "ok"
}
