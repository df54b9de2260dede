//! Report context assembly handler.

use axum::{response::Response, Json};
use chrono::Utc;
use metrics::counter;
use tracing::instrument;

use report_context::{build_context, ReportFields};

use super::{error_response, json_ok};

/// POST /api/report/context - assemble the template context for one report.
#[instrument(skip(fields))]
pub async fn report_context_handler(Json(fields): Json<ReportFields>) -> Response {
    counter!("report_contexts_built_total").increment(1);

    match build_context(&fields, Utc::now().date_naive()) {
        Ok(context) => json_ok(context),
        Err(err) => error_response(&err),
    }
}
