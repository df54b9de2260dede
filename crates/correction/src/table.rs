//! Temperature → correction factor reference table.
//!
//! Fixed 25-point table from -10 °C to 110 °C in 5 °C steps, one value
//! column per insulation kind. Lookup is nearest-neighbor: the sample
//! point with the smallest absolute distance to the measured temperature
//! wins, and on an exact tie the lower temperature is kept. Temperatures
//! outside the table clamp to the nearest endpoint.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use trafo_common::{TrafoError, TrafoResult};

/// Temperature sample points in °C. Monotonically increasing.
pub const TEMPERATURE_SAMPLES: [f64; 25] = [
    -10.0, -5.0, 0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0,
    65.0, 70.0, 75.0, 80.0, 85.0, 90.0, 95.0, 100.0, 105.0, 110.0,
];

/// Correction factors for oil-immersed transformers, index-aligned with
/// [`TEMPERATURE_SAMPLES`].
const OIL_FACTORS: [f64; 25] = [
    0.125, 0.180, 0.25, 0.36, 0.50, 0.75, 1.00, 1.40, 1.98, 2.80, 3.95, 5.60, 7.85, 11.20,
    15.85, 22.40, 31.75, 44.70, 63.50, 89.789, 127.00, 180.00, 254.00, 359.15, 509.00,
];

/// Correction factors for dry-type transformers.
const DRY_FACTORS: [f64; 25] = [
    0.25, 0.32, 0.40, 0.50, 0.63, 0.81, 1.00, 1.25, 1.58, 2.00, 2.50, 3.15, 3.98, 5.00, 6.30,
    7.90, 10.00, 12.60, 15.80, 20.00, 25.20, 31.60, 40.00, 50.40, 63.20,
];

/// Classification of a transformer's insulating medium.
///
/// The report forms label these in Spanish ("Aceite" / "Seco"); parsing is
/// case-insensitive on those labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsulationKind {
    Oil,
    Dry,
}

impl InsulationKind {
    /// Parse from the form label, case-insensitively.
    pub fn parse(label: &str) -> TrafoResult<Self> {
        match label.to_lowercase().as_str() {
            "aceite" => Ok(InsulationKind::Oil),
            "seco" => Ok(InsulationKind::Dry),
            _ => Err(TrafoError::InvalidArgument(format!(
                "unknown insulation kind '{}', expected 'Aceite' or 'Seco'",
                label
            ))),
        }
    }

    /// The label used in report templates.
    pub fn label(&self) -> &'static str {
        match self {
            InsulationKind::Oil => "Aceite",
            InsulationKind::Dry => "Seco",
        }
    }

    /// The factor column for this kind.
    pub fn factors(&self) -> &'static [f64; 25] {
        match self {
            InsulationKind::Oil => &OIL_FACTORS,
            InsulationKind::Dry => &DRY_FACTORS,
        }
    }
}

impl FromStr for InsulationKind {
    type Err = TrafoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsulationKind::parse(s)
    }
}

impl fmt::Display for InsulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for InsulationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for InsulationKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KindVisitor;

        impl Visitor<'_> for KindVisitor {
            type Value = InsulationKind;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an insulation kind label ('Aceite' or 'Seco')")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                InsulationKind::parse(v).map_err(|e| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(KindVisitor)
    }
}

/// Look up the correction factor for a measured test temperature.
///
/// Linear scan with strict `<` comparison: the first index at the minimum
/// distance wins, so an exact midpoint between two samples resolves to the
/// lower temperature. Out-of-range input clamps to the nearest endpoint.
pub fn correction_factor(temperature: f64, kind: InsulationKind) -> f64 {
    let mut nearest = 0;
    let mut nearest_dist = f64::INFINITY;
    for (i, sample) in TEMPERATURE_SAMPLES.iter().enumerate() {
        let dist = (sample - temperature).abs();
        if dist < nearest_dist {
            nearest_dist = dist;
            nearest = i;
        }
    }
    kind.factors()[nearest]
}

/// String-keyed form of [`correction_factor`], mirroring the form flow that
/// supplies the insulation kind as a label.
pub fn correction_factor_for(temperature: f64, kind_label: &str) -> TrafoResult<f64> {
    let kind = InsulationKind::parse(kind_label)?;
    Ok(correction_factor(temperature, kind))
}
