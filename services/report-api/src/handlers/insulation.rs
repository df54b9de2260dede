//! Insulation correction and compliance handlers.

use axum::{response::Response, Json};
use metrics::counter;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use trafo_common::TrafoError;

use correction::{assess, correction_factor, InsulationKind, MeasuredResistances, PhaseType};

use super::{error_response, json_ok};

// ============================================================================
// Correction Lookup
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CorrectionParams {
    pub temperature: Option<f64>,
    pub insulation: Option<String>,
}

/// GET /api/correction - correction factor for one temperature reading.
#[instrument]
pub async fn correction_handler(
    axum::extract::Query(params): axum::extract::Query<CorrectionParams>,
) -> Response {
    counter!("correction_lookups_total").increment(1);

    let temperature = match params.temperature {
        Some(t) => t,
        None => {
            return error_response(&TrafoError::MissingParameter("temperature".to_string()))
        }
    };
    let kind = match params.insulation.as_deref() {
        Some(label) => match InsulationKind::parse(label) {
            Ok(kind) => kind,
            Err(err) => return error_response(&err),
        },
        None => return error_response(&TrafoError::MissingParameter("insulation".to_string())),
    };

    let factor = correction_factor(temperature, kind);
    json_ok(json!({
        "temperature": temperature,
        "insulation": kind.label(),
        "factor": factor,
    }))
}

// ============================================================================
// Compliance Assessment
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    pub temperature: f64,
    pub insulation: String,
    pub phases: PhaseType,
    pub measured: MeasuredResistances,
}

/// POST /api/assessment - referred resistances and pass/fail labels.
#[instrument(skip(request))]
pub async fn assessment_handler(Json(request): Json<AssessmentRequest>) -> Response {
    counter!("assessments_total").increment(1);

    let kind = match InsulationKind::parse(&request.insulation) {
        Ok(kind) => kind,
        Err(err) => return error_response(&err),
    };

    match assess(request.temperature, kind, request.phases, &request.measured) {
        Ok(assessment) => match serde_json::to_value(&assessment) {
            Ok(body) => json_ok(body),
            Err(err) => error_response(&err.into()),
        },
        Err(err) => error_response(&err),
    }
}
