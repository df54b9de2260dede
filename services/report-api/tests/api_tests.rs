//! Tests for the report-api HTTP request/response types.
//!
//! The handler modules are private to the report-api binary, so these tests
//! exercise the JSON contracts through the public library crates and plain
//! serde_json shapes.

use serde_json::json;

use correction::{assess, InsulationKind, MeasuredResistances, PhaseType};
use report_context::ReportFields;

// ============================================================================
// Request/Response serialization tests
// ============================================================================

#[test]
fn test_assessment_request_deserialization() {
    let body = json!({
        "temperature": 28.0,
        "insulation": "Aceite",
        "phases": "Trifásico",
        "measured": {
            "high_to_ground": 6.1,
            "high_to_low": 5.4,
            "low_to_ground": 1.3
        }
    });

    let kind = InsulationKind::parse(body["insulation"].as_str().unwrap()).unwrap();
    assert_eq!(kind, InsulationKind::Oil);

    let phases: PhaseType = serde_json::from_value(body["phases"].clone()).unwrap();
    assert_eq!(phases, PhaseType::Three);

    let measured: MeasuredResistances = serde_json::from_value(body["measured"].clone()).unwrap();
    assert_eq!(measured.high_to_ground, Some(6.1));
    assert_eq!(measured.high_to_low, 5.4);
}

#[test]
fn test_assessment_response_shape() {
    let measured = MeasuredResistances {
        high_to_ground: Some(6.1),
        high_to_low: 5.4,
        low_to_ground: 1.3,
    };
    let assessment = assess(20.0, InsulationKind::Oil, PhaseType::Three, &measured).unwrap();
    let body = serde_json::to_value(&assessment).unwrap();

    assert_eq!(body["correction_factor"], 1.0);
    assert_eq!(body["insulation"], "Aceite");
    assert_eq!(body["pairs"].as_array().unwrap().len(), 3);
    assert_eq!(body["pairs"][0]["pair"], "high_to_ground");
    assert_eq!(body["pairs"][0]["verdict"], "Cumple");
    assert_eq!(body["pairs"][0]["minimum_gohm"], 5.0);
}

#[test]
fn test_report_fields_deserialization() {
    let body = json!({
        "nombreProyecto": "Electrificación vereda El Morro",
        "nombreCiudadoMunicipio": "Yopal",
        "nombreDepartamento": "Casanare",
        "tipoCoordenada": "Rural",
        "nombreCompleto": "Laura Méndez",
        "nroConteoTarjeta": "CN-22871",
        "nombreCargo": "Ingeniera Electricista",
        "fechaCreacion": "2026-08-06",
        "direccion": "Km 4 vía al Morro",
        "nroTransformador": "TX-0417",
        "capacidadTransformador": "75",
        "tipoTransformador": "Monofásico",
        "tipoAislamiento": "Seco",
        "voltajePrimario": "13200",
        "voltajeSecundario": "214",
        "latitud": 5.533,
        "longitud": -72.392,
        "fechaCalibracion": "2026-02-14",
        "carTrafo_Marca": "Siemens",
        "carTrafo_Serie": "84112-B",
        "carTrafo_Tipo": "Convencional",
        "carTrafo_FechaFabricacion": "2019-06-01",
        "carTrafo_Frecuencia": "60",
        "carTrafo_Conexion": "Dyn5",
        "carTrafo_MedioAislamiento": "Resina",
        "temperaturaPrueba": 31.0,
        "measured": {
            "high_to_low": 27.0,
            "low_to_ground": 6.2
        },
        "comentariosPrueba": "sin novedad"
    });

    let fields: ReportFields = serde_json::from_value(body).unwrap();
    assert_eq!(fields.nameplate.transformer_number, "TX-0417");
    assert_eq!(fields.nameplate.phases, PhaseType::Single);
    assert_eq!(fields.nameplate.insulation, InsulationKind::Dry);
    assert_eq!(fields.measured.high_to_ground, None);
}

#[test]
fn test_error_response_shape() {
    let err = trafo_common::TrafoError::InvalidArgument(
        "unknown insulation kind 'agua', expected 'Aceite' or 'Seco'".to_string(),
    );
    let body = json!({
        "error": err.code(),
        "message": err.to_string(),
    });

    assert_eq!(body["error"], "InvalidArgument");
    assert!(body["message"].as_str().unwrap().contains("agua"));
    assert_eq!(err.http_status_code(), 400);
}

#[test]
fn test_render_error_maps_to_server_error() {
    let err = trafo_common::TrafoError::RenderError(
        "Projection error: latitude 200 outside Web Mercator domain".to_string(),
    );
    assert_eq!(err.http_status_code(), 500);
    assert_eq!(err.code(), "RenderError");
}
