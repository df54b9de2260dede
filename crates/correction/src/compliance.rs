//! Referred-resistance compliance evaluation.
//!
//! Each measured winding pair is multiplied by the temperature correction
//! factor and compared against a fixed per-kind minimum (GΩ). The result
//! labels mirror the report template ("Cumple" / "No Cumple").

use serde::{Deserialize, Serialize};
use tracing::debug;
use trafo_common::{TrafoError, TrafoResult};

use crate::table::{correction_factor, InsulationKind};

/// Verdict label for a passing pair.
pub const PASS_LABEL: &str = "Cumple";
/// Verdict label for a failing pair.
pub const FAIL_LABEL: &str = "No Cumple";

/// Winding pairs measured during the insulation-resistance test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindingPair {
    /// High-voltage winding vs. ground.
    HighToGround,
    /// High-voltage winding vs. low-voltage winding.
    HighToLow,
    /// Low-voltage winding vs. ground.
    LowToGround,
}

impl WindingPair {
    /// Minimum referred resistance (GΩ) accepted for this pair.
    pub fn minimum_gohm(&self, kind: InsulationKind) -> f64 {
        match (self, kind) {
            (WindingPair::HighToGround, InsulationKind::Oil) => 5.0,
            (WindingPair::HighToGround, InsulationKind::Dry) => 25.0,
            (WindingPair::HighToLow, InsulationKind::Oil) => 5.0,
            (WindingPair::HighToLow, InsulationKind::Dry) => 25.0,
            (WindingPair::LowToGround, InsulationKind::Oil) => 1.0,
            (WindingPair::LowToGround, InsulationKind::Dry) => 5.0,
        }
    }

    /// Suffix used by the report template variables (AVST / AVSB / BVST).
    pub fn template_suffix(&self) -> &'static str {
        match self {
            WindingPair::HighToGround => "AVST",
            WindingPair::HighToLow => "AVSB",
            WindingPair::LowToGround => "BVST",
        }
    }
}

/// Transformer phase type, which decides how many pairs are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseType {
    #[serde(rename = "Trifásico", alias = "trifasico", alias = "Trifasico")]
    Three,
    #[serde(rename = "Monofásico", alias = "monofasico", alias = "Monofasico")]
    Single,
}

impl PhaseType {
    pub fn phase_count(&self) -> u8 {
        match self {
            PhaseType::Three => 3,
            PhaseType::Single => 1,
        }
    }
}

/// Measured resistance readings in GΩ.
///
/// Single-phase transformers do not measure the high-vs-ground pair, so it
/// is optional; the other two pairs are always measured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeasuredResistances {
    #[serde(default)]
    pub high_to_ground: Option<f64>,
    pub high_to_low: f64,
    pub low_to_ground: f64,
}

/// Assessment of one winding pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairAssessment {
    pub pair: WindingPair,
    /// Measured value in GΩ; absent for the unmeasured single-phase pair.
    pub measured_gohm: Option<f64>,
    /// Measured × correction factor; absent when no measurement exists.
    pub referred_gohm: Option<f64>,
    pub minimum_gohm: f64,
    pub passes: bool,
    pub verdict: String,
}

impl PairAssessment {
    fn from_reading(
        pair: WindingPair,
        measured: f64,
        factor: f64,
        kind: InsulationKind,
    ) -> Self {
        let referred = measured * factor;
        let minimum = pair.minimum_gohm(kind);
        let passes = referred >= minimum;
        Self {
            pair,
            measured_gohm: Some(measured),
            referred_gohm: Some(referred),
            minimum_gohm: minimum,
            passes,
            verdict: if passes { PASS_LABEL } else { FAIL_LABEL }.to_string(),
        }
    }

    /// The unmeasured high-vs-ground pair of a single-phase unit is
    /// reported as passing with no value.
    fn unmeasured(pair: WindingPair, kind: InsulationKind) -> Self {
        Self {
            pair,
            measured_gohm: None,
            referred_gohm: None,
            minimum_gohm: pair.minimum_gohm(kind),
            passes: true,
            verdict: PASS_LABEL.to_string(),
        }
    }
}

/// Full compliance assessment for one transformer test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub temperature_c: f64,
    pub insulation: InsulationKind,
    pub phases: PhaseType,
    pub correction_factor: f64,
    pub pairs: Vec<PairAssessment>,
}

impl Assessment {
    pub fn pair(&self, pair: WindingPair) -> Option<&PairAssessment> {
        self.pairs.iter().find(|p| p.pair == pair)
    }
}

/// Evaluate all winding pairs for one test.
///
/// Three-phase units must supply the high-vs-ground reading; single-phase
/// units never measure it and any supplied value is ignored.
pub fn assess(
    temperature_c: f64,
    insulation: InsulationKind,
    phases: PhaseType,
    measured: &MeasuredResistances,
) -> TrafoResult<Assessment> {
    let factor = correction_factor(temperature_c, insulation);
    debug!(
        temperature_c,
        insulation = %insulation,
        factor,
        "resolved correction factor"
    );

    let high_to_ground = match phases {
        PhaseType::Three => {
            let value = measured.high_to_ground.ok_or_else(|| {
                TrafoError::MissingParameter("measured.high_to_ground".to_string())
            })?;
            PairAssessment::from_reading(WindingPair::HighToGround, value, factor, insulation)
        }
        PhaseType::Single => PairAssessment::unmeasured(WindingPair::HighToGround, insulation),
    };

    let pairs = vec![
        high_to_ground,
        PairAssessment::from_reading(
            WindingPair::HighToLow,
            measured.high_to_low,
            factor,
            insulation,
        ),
        PairAssessment::from_reading(
            WindingPair::LowToGround,
            measured.low_to_ground,
            factor,
            insulation,
        ),
    ];

    Ok(Assessment {
        temperature_c,
        insulation,
        phases,
        correction_factor: factor,
        pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(hg: Option<f64>, hl: f64, lg: f64) -> MeasuredResistances {
        MeasuredResistances {
            high_to_ground: hg,
            high_to_low: hl,
            low_to_ground: lg,
        }
    }

    #[test]
    fn test_three_phase_oil_at_reference_temperature() {
        // Factor is 1.00 at 20 °C, so referred == measured.
        let a = assess(
            20.0,
            InsulationKind::Oil,
            PhaseType::Three,
            &readings(Some(6.0), 4.9, 1.0),
        )
        .unwrap();

        assert_eq!(a.correction_factor, 1.00);

        let hg = a.pair(WindingPair::HighToGround).unwrap();
        assert_eq!(hg.referred_gohm, Some(6.0));
        assert_eq!(hg.verdict, PASS_LABEL);

        // 4.9 < 5.0 minimum
        let hl = a.pair(WindingPair::HighToLow).unwrap();
        assert_eq!(hl.verdict, FAIL_LABEL);

        // 1.0 >= 1.0 minimum: threshold is inclusive
        let lg = a.pair(WindingPair::LowToGround).unwrap();
        assert!(lg.passes);
    }

    #[test]
    fn test_dry_minimums() {
        let a = assess(
            20.0,
            InsulationKind::Dry,
            PhaseType::Three,
            &readings(Some(24.9), 25.0, 5.0),
        )
        .unwrap();

        assert_eq!(
            a.pair(WindingPair::HighToGround).unwrap().verdict,
            FAIL_LABEL
        );
        assert_eq!(a.pair(WindingPair::HighToLow).unwrap().verdict, PASS_LABEL);
        assert_eq!(a.pair(WindingPair::LowToGround).unwrap().verdict, PASS_LABEL);
    }

    #[test]
    fn test_correction_factor_scales_reading() {
        // At 40 °C the oil factor is 3.95: 1.3 GΩ measured refers to 5.135.
        let a = assess(
            40.0,
            InsulationKind::Oil,
            PhaseType::Three,
            &readings(Some(1.3), 1.3, 1.3),
        )
        .unwrap();

        let hg = a.pair(WindingPair::HighToGround).unwrap();
        assert!((hg.referred_gohm.unwrap() - 5.135).abs() < 1e-9);
        assert!(hg.passes);
    }

    #[test]
    fn test_single_phase_skips_high_to_ground() {
        let a = assess(
            20.0,
            InsulationKind::Oil,
            PhaseType::Single,
            &readings(None, 5.0, 0.5),
        )
        .unwrap();

        let hg = a.pair(WindingPair::HighToGround).unwrap();
        assert_eq!(hg.measured_gohm, None);
        assert_eq!(hg.referred_gohm, None);
        assert_eq!(hg.verdict, PASS_LABEL);

        assert_eq!(a.pair(WindingPair::LowToGround).unwrap().verdict, FAIL_LABEL);
    }

    #[test]
    fn test_three_phase_requires_high_to_ground() {
        let err = assess(
            20.0,
            InsulationKind::Oil,
            PhaseType::Three,
            &readings(None, 5.0, 1.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            trafo_common::TrafoError::MissingParameter(_)
        ));
    }

    #[test]
    fn test_phase_type_labels() {
        assert_eq!(PhaseType::Three.phase_count(), 3);
        assert_eq!(PhaseType::Single.phase_count(), 1);
        let t: PhaseType = serde_json::from_str("\"Trifásico\"").unwrap();
        assert_eq!(t, PhaseType::Three);
        let m: PhaseType = serde_json::from_str("\"Monofásico\"").unwrap();
        assert_eq!(m, PhaseType::Single);
    }
}
