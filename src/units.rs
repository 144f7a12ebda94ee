//! Length and area unit conversion
//!
//! All geometry is normalised to millimeters before areas are computed, and
//! every area leaves the crate in square decimeters.

/// Square millimeters per square decimeter
pub const MM2_PER_DM2: f64 = 10_000.0;

/// Length units a mesh's coordinates can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    /// Millimeter (canonical length unit)
    #[default]
    Millimeter,
    /// Centimeter
    Centimeter,
    /// Inch
    Inch,
    /// Micron (micrometer)
    Micron,
    /// Foot
    Foot,
    /// Meter
    Meter,
}

impl LengthUnit {
    /// All supported units
    pub const ALL: [LengthUnit; 6] = [
        LengthUnit::Millimeter,
        LengthUnit::Centimeter,
        LengthUnit::Inch,
        LengthUnit::Micron,
        LengthUnit::Foot,
        LengthUnit::Meter,
    ];

    /// Millimeters per one of this unit
    pub fn mm_per_unit(&self) -> f64 {
        match self {
            LengthUnit::Millimeter => 1.0,
            LengthUnit::Centimeter => 10.0,
            LengthUnit::Inch => 25.4,
            LengthUnit::Micron => 0.001,
            LengthUnit::Foot => 304.8,
            LengthUnit::Meter => 1000.0,
        }
    }

    /// Unit name as written in a 3MF `unit` attribute
    pub fn name(&self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "millimeter",
            LengthUnit::Centimeter => "centimeter",
            LengthUnit::Inch => "inch",
            LengthUnit::Micron => "micron",
            LengthUnit::Foot => "foot",
            LengthUnit::Meter => "meter",
        }
    }

    /// Look up a unit by its 3MF name
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Returns `None` for anything not in the table; callers fall back to
    /// millimeter.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(name))
    }

    /// Like [`LengthUnit::from_name`], defaulting to millimeter
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a length in `unit` to millimeters
#[inline]
pub fn length_to_canonical(value: f64, unit: LengthUnit) -> f64 {
    value * unit.mm_per_unit()
}

/// Convert an area in mm² to dm²
#[inline]
pub fn area_to_canonical(value_mm2: f64) -> f64 {
    value_mm2 / MM2_PER_DM2
}
