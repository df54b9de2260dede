//! Spanish date parts for the report footer.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Month names as printed in the generated reports.
pub const SPANISH_MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Day / month-name / year triple, keyed like the template variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub dia: u32,
    pub mes: String,
    pub anio: i32,
}

/// Split a date into the template's `{dia, mes, anio}` parts.
pub fn date_parts(date: NaiveDate) -> DateParts {
    DateParts {
        dia: date.day(),
        mes: SPANISH_MONTHS[date.month0() as usize].to_string(),
        anio: date.year(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        let parts = date_parts(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(parts.mes, "Enero");
        assert_eq!(parts.dia, 5);
        assert_eq!(parts.anio, 2026);

        let parts = date_parts(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(parts.mes, "Diciembre");
    }

    #[test]
    fn test_serialized_keys() {
        let parts = date_parts(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
        let json = serde_json::to_value(&parts).unwrap();
        assert_eq!(json["dia"], 6);
        assert_eq!(json["mes"], "Agosto");
        assert_eq!(json["anio"], 2026);
    }
}
