//! Report field model and template context builder.
//!
//! Field names follow the document template variables, so the serialized
//! form of [`ReportFields`] is already keyed the way the template expects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;
use trafo_common::{TrafoError, TrafoResult};

use correction::{assess, InsulationKind, MeasuredResistances, PhaseType};

use crate::dates::date_parts;
use crate::upper::deep_uppercase;

/// How the site coordinate should be pictured in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateMode {
    #[serde(rename = "Urbano", alias = "urbano")]
    Urban,
    #[serde(rename = "Rural", alias = "rural")]
    Rural,
}

/// General project information collected in the first form step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralInfo {
    #[serde(rename = "nombreProyecto")]
    pub project_name: String,
    #[serde(rename = "nombreCiudadoMunicipio")]
    pub municipality: String,
    #[serde(rename = "nombreDepartamento")]
    pub department: String,
    #[serde(rename = "tipoCoordenada")]
    pub coordinate_mode: CoordinateMode,
    #[serde(rename = "nombreCompleto")]
    pub author_name: String,
    #[serde(rename = "nroConteoTarjeta")]
    pub professional_card: String,
    #[serde(rename = "nombreCargo")]
    pub job_title: String,
    #[serde(rename = "fechaCreacion")]
    pub created_on: NaiveDate,
    #[serde(rename = "direccion")]
    pub address: String,
}

/// Technical nameplate data and test conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameplateData {
    #[serde(rename = "nroTransformador")]
    pub transformer_number: String,
    #[serde(rename = "capacidadTransformador")]
    pub capacity_kva: String,
    #[serde(rename = "tipoTransformador")]
    pub phases: PhaseType,
    #[serde(rename = "tipoAislamiento")]
    pub insulation: InsulationKind,
    #[serde(rename = "voltajePrimario")]
    pub primary_voltage: String,
    #[serde(rename = "voltajeSecundario")]
    pub secondary_voltage: String,
    #[serde(rename = "latitud")]
    pub latitude: f64,
    #[serde(rename = "longitud")]
    pub longitude: f64,
    #[serde(rename = "fechaCalibracion")]
    pub calibrated_on: NaiveDate,
    #[serde(rename = "carTrafo_Marca")]
    pub brand: String,
    #[serde(rename = "carTrafo_Serie")]
    pub series: String,
    #[serde(rename = "carTrafo_Tipo")]
    pub model_type: String,
    #[serde(rename = "carTrafo_FechaFabricacion")]
    pub manufactured_on: NaiveDate,
    #[serde(rename = "carTrafo_Frecuencia")]
    pub frequency_hz: String,
    #[serde(rename = "carTrafo_Conexion")]
    pub connection: String,
    #[serde(rename = "carTrafo_MedioAislamiento")]
    pub insulating_medium: String,
    #[serde(rename = "temperaturaPrueba")]
    pub test_temperature_c: f64,
}

/// Everything the context builder needs for one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFields {
    #[serde(flatten)]
    pub general: GeneralInfo,
    #[serde(flatten)]
    pub nameplate: NameplateData,
    #[serde(rename = "measured")]
    pub measured: MeasuredResistances,
    #[serde(rename = "comentariosPrueba", default)]
    pub test_comments: String,
}

/// Placeholder printed for pairs that are not measured.
const UNMEASURED: &str = "-";

/// Assemble the full template context.
///
/// Runs the compliance assessment, flattens everything into one object,
/// uppercases it, then appends the `{dia, mes, anio}` parts for
/// `report_date` (after the uppercase pass, so month names keep their
/// printed capitalization).
pub fn build_context(fields: &ReportFields, report_date: NaiveDate) -> TrafoResult<Value> {
    let assessment = assess(
        fields.nameplate.test_temperature_c,
        fields.nameplate.insulation,
        fields.nameplate.phases,
        &fields.measured,
    )?;

    let mut ctx = serde_json::to_value(fields)?;
    let obj = object_mut(&mut ctx)?;
    obj.remove("measured");

    obj.insert(
        "carTrafo_NroFases".to_string(),
        json!(fields.nameplate.phases.phase_count()),
    );
    // Measurement date mirrors the report creation date.
    obj.insert(
        "carTrafo_FechaMediciones".to_string(),
        json!(fields.general.created_on),
    );

    for pair in &assessment.pairs {
        let suffix = pair.pair.template_suffix();
        obj.insert(
            format!("resMedida_{}", suffix),
            pair.measured_gohm.map_or(json!(UNMEASURED), |v| json!(v)),
        );
        obj.insert(
            format!("resReferida_{}", suffix),
            pair.referred_gohm.map_or(json!(UNMEASURED), |v| json!(v)),
        );
        obj.insert(format!("resEsp_{}", suffix), json!(pair.minimum_gohm));
        obj.insert(format!("resultado_{}", suffix), json!(pair.verdict));
    }

    debug!(
        pairs = assessment.pairs.len(),
        factor = assessment.correction_factor,
        "assembled insulation table"
    );

    let mut ctx = deep_uppercase(ctx);
    let obj = object_mut(&mut ctx)?;
    let parts = date_parts(report_date);
    obj.insert("dia".to_string(), json!(parts.dia));
    obj.insert("mes".to_string(), json!(parts.mes));
    obj.insert("anio".to_string(), json!(parts.anio));

    Ok(ctx)
}

fn object_mut(value: &mut Value) -> TrafoResult<&mut Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| TrafoError::InternalError("context is not a JSON object".to_string()))
}
