use std::sync::Arc;

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::export::CsvExport;
use super::filter::FilterSlot;
use super::listing::{ListingRequest, SortDirection, SortKey, DEFAULT_PAGE_SIZE};
use super::metrics::views::Grouping;
use super::metrics::DateWindow;
use super::service::{LeadServiceError, LeadTriageService};
use super::store::AssessmentStore;

/// Router builder exposing the lead table, exports, and dashboard metrics.
pub fn leads_router<S, F>(service: Arc<LeadTriageService<S, F>>) -> Router
where
    S: AssessmentStore + 'static,
    F: FilterSlot + 'static,
{
    Router::new()
        .route("/api/v1/leads", get(listing_handler::<S, F>))
        .route("/api/v1/leads/export.csv", get(export_leads_handler::<S, F>))
        .route("/api/v1/leads/reload", post(reload_handler::<S, F>))
        .route("/api/v1/metrics/summary", get(metrics_handler::<S, F>))
        .route(
            "/api/v1/reports/:grouping/export.csv",
            get(export_report_handler::<S, F>),
        )
        .with_state(service)
}

/// Sort and page parameters; filter keys are read from the raw query.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingParams {
    #[serde(default)]
    sort: Option<SortKey>,
    #[serde(default)]
    direction: Option<SortDirection>,
    #[serde(default)]
    page: Option<usize>,
    #[serde(default)]
    page_size: Option<usize>,
}

impl From<ListingParams> for ListingRequest {
    fn from(params: ListingParams) -> Self {
        Self {
            sort: params.sort.unwrap_or_default(),
            direction: params.direction,
            page: params.page.unwrap_or(0),
            page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

pub(crate) async fn listing_handler<S, F>(
    State(service): State<Arc<LeadTriageService<S, F>>>,
    RawQuery(query): RawQuery,
    Query(params): Query<ListingParams>,
) -> Response
where
    S: AssessmentStore + 'static,
    F: FilterSlot + 'static,
{
    match service.listing(query.as_deref(), &params.into()) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_leads_handler<S, F>(
    State(service): State<Arc<LeadTriageService<S, F>>>,
    RawQuery(query): RawQuery,
) -> Response
where
    S: AssessmentStore + 'static,
    F: FilterSlot + 'static,
{
    let today = Local::now().date_naive();
    match service.export_leads(query.as_deref(), today) {
        Ok(export) => csv_response(export),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn metrics_handler<S, F>(
    State(service): State<Arc<LeadTriageService<S, F>>>,
    Query(window): Query<DateWindow>,
) -> Response
where
    S: AssessmentStore + 'static,
    F: FilterSlot + 'static,
{
    match service.metrics(Some(&window)) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_report_handler<S, F>(
    State(service): State<Arc<LeadTriageService<S, F>>>,
    Path(grouping): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
    F: FilterSlot + 'static,
{
    let Some(grouping) = Grouping::from_slug(&grouping) else {
        let payload = json!({
            "error": format!("unknown report grouping `{grouping}`"),
        });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    let today = Local::now().date_naive();
    match service.export_report(grouping, today) {
        Ok(Some(export)) => csv_response(export),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reload_handler<S, F>(
    State(service): State<Arc<LeadTriageService<S, F>>>,
) -> Response
where
    S: AssessmentStore + 'static,
    F: FilterSlot + 'static,
{
    match service.reload() {
        Ok(total) => {
            let payload = json!({
                "status": "reloaded",
                "total": total,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn csv_response(export: CsvExport) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response()
}

fn error_response(error: LeadServiceError) -> Response {
    let status = match error {
        LeadServiceError::Load(_) => StatusCode::BAD_GATEWAY,
        LeadServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
