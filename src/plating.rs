//! Electroplating process calculations
//!
//! Faraday's law relates deposited thickness to charge passed per unit
//! area. For a given metal it reduces to a single constant `K` (seconds ×
//! A/dm² per µm), giving four closed-form formulas:
//!
//! - time = K × thickness / (density × efficiency)
//! - thickness = time × density × efficiency / K
//! - deposition rate = 60 × density × efficiency / K  (µm/min)
//! - current = area × density
//!
//! Areas are in dm², current densities in A/dm², thicknesses in µm and
//! times in seconds. The formula functions do not validate their inputs:
//! a zero density or efficiency yields infinity or NaN. [`evaluate`] wraps
//! them and reports such cases as "not computable".

use crate::units::{LengthUnit, length_to_canonical};

/// Micrometers per millimeter
const UM_PER_MM: f64 = 1000.0;

/// Plating metal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    /// Copper (acid sulphate bath, Cu²⁺)
    Copper,
    /// Nickel (Watts bath, Ni²⁺)
    Nickel,
}

impl Material {
    /// All supported materials
    pub const ALL: [Material; 2] = [Material::Copper, Material::Nickel];

    /// Faraday's-law constant in s·(A/dm²)/µm
    pub fn k(&self) -> f64 {
        match self {
            Material::Copper => 270.5,
            Material::Nickel => 292.9,
        }
    }

    /// Highest current density (A/dm²) generally recommended for this metal
    pub fn recommended_max_current_density(&self) -> f64 {
        match self {
            Material::Copper => 4.0,
            Material::Nickel => 5.0,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Material::Copper => "Copper",
            Material::Nickel => "Nickel",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Seconds needed to deposit `thickness_um`
pub fn time_from_thickness(
    material: Material,
    thickness_um: f64,
    current_density: f64,
    efficiency: f64,
) -> f64 {
    (material.k() * thickness_um) / (current_density * efficiency)
}

/// Thickness in µm deposited in `time_s` seconds
pub fn thickness_from_time(
    material: Material,
    time_s: f64,
    current_density: f64,
    efficiency: f64,
) -> f64 {
    (time_s * current_density * efficiency) / material.k()
}

/// Deposition rate in µm per minute
pub fn deposition_rate(material: Material, current_density: f64, efficiency: f64) -> f64 {
    (60.0 * current_density * efficiency) / material.k()
}

/// Current in amperes for a plating area in dm²
pub fn required_current(area_dm2: f64, current_density: f64) -> f64 {
    area_dm2 * current_density
}

/// Format seconds as zero-padded `HH:MM:SS`
///
/// Fractional seconds are rounded. Negative or non-finite input formats as
/// `00:00:00`. Hours are not capped at 99.
///
/// # Example
/// ```
/// use platecalc::plating::format_duration;
///
/// assert_eq!(format_duration(3661.0), "01:01:01");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Parse `HH:MM:SS`, `MM:SS` or a bare number of seconds
///
/// Anything else, including negative components, parses as 0.
pub fn parse_duration(text: &str) -> f64 {
    let parts: Option<Vec<f64>> = text
        .trim()
        .split(':')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
        })
        .collect();

    match parts.as_deref() {
        Some([h, m, s]) => h * 3600.0 + m * 60.0 + s,
        Some([m, s]) => m * 60.0 + s,
        Some([s]) => *s,
        _ => 0.0,
    }
}

/// What a plating calculation solves for
#[derive(Debug, Clone, PartialEq)]
pub enum PlatingMode {
    /// Solve for the time needed to reach a thickness
    TargetThickness {
        /// Thickness value
        value: f64,
        /// Unit of `value`
        unit: LengthUnit,
    },
    /// Solve for the thickness reached in a duration (`HH:MM:SS`, `MM:SS` or seconds)
    Duration(String),
}

/// Inputs to a plating calculation
#[derive(Debug, Clone, PartialEq)]
pub struct PlatingRequest {
    /// Total plating area in dm²
    pub area_dm2: f64,
    /// Plating metal
    pub material: Material,
    /// Current efficiency, a ratio in (0, 1]
    pub efficiency: f64,
    /// Current density in A/dm²
    pub current_density: f64,
    /// Quantity to solve for
    pub mode: PlatingMode,
}

/// Results of a plating calculation
///
/// `None` marks a value that cannot be computed from the request, either
/// because density or efficiency is not positive or because no valid
/// thickness or duration was given.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatingReport {
    /// Plating time in seconds
    pub duration_s: Option<f64>,
    /// Deposited thickness in µm
    pub thickness_um: Option<f64>,
    /// Total current in amperes
    pub current_a: Option<f64>,
    /// Deposition rate in µm per minute
    pub deposition_rate_um_per_min: Option<f64>,
    /// Whether the current density is above the material's recommended maximum
    pub exceeds_recommended_density: bool,
}

fn finite(value: f64) -> Option<f64> {
    Some(value).filter(|v| v.is_finite())
}

/// Run a plating calculation
pub fn evaluate(request: &PlatingRequest) -> PlatingReport {
    let PlatingRequest {
        area_dm2,
        material,
        efficiency,
        current_density,
        ref mode,
    } = *request;

    let computable = current_density > 0.0 && efficiency > 0.0;

    let (duration_s, thickness_um) = match mode {
        _ if !computable => (None, None),
        PlatingMode::TargetThickness { value, unit } => {
            let thickness = length_to_canonical(*value, *unit) * UM_PER_MM;
            if thickness.is_finite() && thickness >= 0.0 {
                let time = time_from_thickness(material, thickness, current_density, efficiency);
                (finite(time), Some(thickness))
            } else {
                (None, None)
            }
        }
        PlatingMode::Duration(text) => {
            let time = parse_duration(text);
            if time > 0.0 {
                let thickness = thickness_from_time(material, time, current_density, efficiency);
                (Some(time), finite(thickness))
            } else {
                (None, None)
            }
        }
    };

    PlatingReport {
        duration_s,
        thickness_um,
        current_a: finite(required_current(area_dm2, current_density)),
        deposition_rate_um_per_min: computable
            .then(|| deposition_rate(material, current_density, efficiency))
            .and_then(finite),
        exceeds_recommended_density: current_density > material.recommended_max_current_density(),
    }
}

/// How long a stage runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageTarget {
    /// Run for a fixed number of seconds
    Duration(f64),
    /// Run until the total thickness, including earlier stages, reaches this many µm
    Thickness(f64),
}

/// One stage of a sequential plating process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    /// Current density for this stage in A/dm²
    pub current_density: f64,
    /// When the stage ends
    pub target: StageTarget,
}

/// Result of one stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageOutcome {
    /// Stage run time in seconds
    pub duration_s: f64,
    /// Thickness added by this stage in µm
    pub added_um: f64,
    /// Thickness after this stage in µm
    pub cumulative_um: f64,
}

/// Fold an ordered list of stages into per-stage outcomes
///
/// Thickness carries over from stage to stage. A thickness-targeted stage
/// only plates the remaining difference; if earlier stages already reached
/// the target it runs for zero seconds.
pub fn accumulate_stages(
    material: Material,
    efficiency: f64,
    stages: &[Stage],
) -> Vec<StageOutcome> {
    stages
        .iter()
        .scan(0.0_f64, |accumulated, stage| {
            let density = stage.current_density;
            let (duration_s, added_um) = match stage.target {
                StageTarget::Duration(time) => {
                    (time, thickness_from_time(material, time, density, efficiency))
                }
                StageTarget::Thickness(target) => {
                    let remaining = (target - *accumulated).max(0.0);
                    if remaining == 0.0 {
                        (0.0, 0.0)
                    } else {
                        (
                            time_from_thickness(material, remaining, density, efficiency),
                            remaining,
                        )
                    }
                }
            };

            *accumulated += added_um;
            Some(StageOutcome {
                duration_s,
                added_um,
                cumulative_um: *accumulated,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_copper_time_from_thickness() {
        let time = time_from_thickness(Material::Copper, 10.0, 2.0, 1.0);
        assert!(close(time, 1352.5));
        let back = thickness_from_time(Material::Copper, time, 2.0, 1.0);
        assert!(close(back, 10.0));
    }

    #[test]
    fn test_formulas_are_inverses() {
        for material in Material::ALL {
            for &(thickness, density, efficiency) in
                &[(1.0, 0.5, 0.5), (25.0, 3.2, 0.93), (250.0, 8.0, 0.75)]
            {
                let time = time_from_thickness(material, thickness, density, efficiency);
                let back = thickness_from_time(material, time, density, efficiency);
                assert!(close(back, thickness), "{} {}", material, thickness);
            }
        }
    }

    #[test]
    fn test_deposition_rate_and_current() {
        let rate = deposition_rate(Material::Copper, 2.705, 1.0);
        assert!(close(rate, 0.6));
        assert!(close(required_current(1.5, 2.0), 3.0));
    }

    #[test]
    fn test_zero_density_is_not_finite() {
        assert!(time_from_thickness(Material::Nickel, 5.0, 0.0, 1.0).is_infinite());
        assert!(time_from_thickness(Material::Nickel, 0.0, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3661.0), "01:01:01");
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(59.6), "00:01:00");
        assert_eq!(format_duration(360_000.0), "100:00:00");
        assert_eq!(format_duration(-5.0), "00:00:00");
        assert_eq!(format_duration(f64::NAN), "00:00:00");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("01:01:01"), 3661.0);
        assert_eq!(parse_duration("02:30"), 150.0);
        assert_eq!(parse_duration(" 45 "), 45.0);
        assert_eq!(parse_duration("1:2:3:4"), 0.0);
        assert_eq!(parse_duration("ab:cd"), 0.0);
        assert_eq!(parse_duration(""), 0.0);
        assert_eq!(parse_duration("-10"), 0.0);
    }

    #[test]
    fn test_duration_round_trip() {
        for seconds in [0.0, 1.0, 59.0, 3599.0, 86_399.0] {
            assert_eq!(parse_duration(&format_duration(seconds)), seconds);
        }
    }

    #[test]
    fn test_evaluate_target_thickness() {
        let report = evaluate(&PlatingRequest {
            area_dm2: 0.5,
            material: Material::Copper,
            efficiency: 1.0,
            current_density: 2.0,
            mode: PlatingMode::TargetThickness {
                value: 0.01,
                unit: LengthUnit::Millimeter,
            },
        });
        assert!(close(report.duration_s.unwrap(), 1352.5));
        assert!(close(report.thickness_um.unwrap(), 10.0));
        assert!(close(report.current_a.unwrap(), 1.0));
        assert!(report.deposition_rate_um_per_min.is_some());
        assert!(!report.exceeds_recommended_density);
    }

    #[test]
    fn test_evaluate_duration() {
        let report = evaluate(&PlatingRequest {
            area_dm2: 2.0,
            material: Material::Copper,
            efficiency: 1.0,
            current_density: 2.0,
            mode: PlatingMode::Duration("00:22:32.5".to_string()),
        });
        assert!(close(report.duration_s.unwrap(), 1352.5));
        assert!(close(report.thickness_um.unwrap(), 10.0));
    }

    #[test]
    fn test_evaluate_invalid_inputs() {
        let mut request = PlatingRequest {
            area_dm2: 1.0,
            material: Material::Nickel,
            efficiency: 0.9,
            current_density: 0.0,
            mode: PlatingMode::Duration("10:00".to_string()),
        };
        let report = evaluate(&request);
        assert_eq!(report.duration_s, None);
        assert_eq!(report.thickness_um, None);
        assert_eq!(report.deposition_rate_um_per_min, None);
        assert_eq!(report.current_a, Some(0.0));

        request.current_density = 2.0;
        request.mode = PlatingMode::Duration("soon".to_string());
        let report = evaluate(&request);
        assert_eq!(report.duration_s, None);
        assert_eq!(report.thickness_um, None);
        assert!(report.deposition_rate_um_per_min.is_some());
    }

    #[test]
    fn test_density_warning() {
        let report = evaluate(&PlatingRequest {
            area_dm2: 1.0,
            material: Material::Copper,
            efficiency: 0.95,
            current_density: 6.0,
            mode: PlatingMode::TargetThickness {
                value: 5.0,
                unit: LengthUnit::Micron,
            },
        });
        assert!(report.exceeds_recommended_density);
        assert!(close(report.thickness_um.unwrap(), 5.0));
    }

    #[test]
    fn test_stages_carry_thickness_forward() {
        let stages = [
            Stage {
                current_density: 1.0,
                target: StageTarget::Duration(541.0),
            },
            Stage {
                current_density: 2.0,
                target: StageTarget::Thickness(10.0),
            },
            Stage {
                current_density: 2.0,
                target: StageTarget::Thickness(5.0),
            },
        ];
        let outcomes = accumulate_stages(Material::Copper, 1.0, &stages);
        assert_eq!(outcomes.len(), 3);

        // 541 s at 1 A/dm² deposits 2 µm
        assert!(close(outcomes[0].added_um, 2.0));
        assert!(close(outcomes[0].cumulative_um, 2.0));

        // Remaining 8 µm at 2 A/dm²
        assert!(close(outcomes[1].added_um, 8.0));
        assert!(close(outcomes[1].duration_s, 270.5 * 8.0 / 2.0));
        assert!(close(outcomes[1].cumulative_um, 10.0));

        // Target already exceeded
        assert_eq!(outcomes[2].duration_s, 0.0);
        assert_eq!(outcomes[2].added_um, 0.0);
        assert!(close(outcomes[2].cumulative_um, 10.0));
    }

    #[test]
    fn test_stages_empty() {
        assert!(accumulate_stages(Material::Nickel, 0.9, &[]).is_empty());
    }
}
