use std::io::Cursor;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use super::domain::{GuestResponse, ResponseFilter};
use super::duplicates::DuplicateDetector;
use super::import::{GuestListFormat, GuestListImporter};
use super::report::GuestListReport;
use crate::error::AppError;

/// Body of a stateless report request. `csv` wins over `responses` when both are sent.
#[derive(Debug, Default, Deserialize)]
pub struct GuestReportRequest {
    #[serde(default)]
    pub responses: Vec<GuestResponse>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub filter: Option<String>,
}

/// Router exposing the dashboard computation over a caller-supplied response list.
pub fn guest_report_router(detector: Arc<DuplicateDetector>) -> Router {
    Router::new()
        .route("/api/v1/guests/report", post(report_handler))
        .with_state(detector)
}

pub(crate) async fn report_handler(
    State(detector): State<Arc<DuplicateDetector>>,
    Json(request): Json<GuestReportRequest>,
) -> Result<Json<GuestListReport>, AppError> {
    let GuestReportRequest {
        responses,
        csv,
        filter,
    } = request;

    let responses = match csv {
        Some(csv) => GuestListImporter::from_reader(Cursor::new(csv), GuestListFormat::Csv)?,
        None => responses,
    };
    let filter = filter
        .as_deref()
        .map(ResponseFilter::parse)
        .unwrap_or_default();

    Ok(Json(GuestListReport::build(&responses, &filter, &detector)))
}
