//! Measurement configuration

use crate::units::LengthUnit;

/// How an STL buffer that looks like both text and binary is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SniffPolicy {
    /// Read ambiguous buffers as binary
    #[default]
    PreferBinary,
    /// Read ambiguous buffers as text, like most slicers do
    PreferText,
}

/// Configuration for measuring mesh files
///
/// # Example
///
/// ```
/// use platecalc::{LengthUnit, MeasureConfig, SniffPolicy};
///
/// let config = MeasureConfig::new()
///     .with_default_unit(LengthUnit::Inch)
///     .with_sniff_policy(SniffPolicy::PreferText);
///
/// assert_eq!(config.default_unit(), LengthUnit::Inch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureConfig {
    default_unit: LengthUnit,
    sniff_policy: SniffPolicy,
    reject_non_finite: bool,
}

impl MeasureConfig {
    /// Millimeter STL input, binary-preferring sniffing, non-finite areas rejected
    pub fn new() -> Self {
        Self {
            default_unit: LengthUnit::Millimeter,
            sniff_policy: SniffPolicy::PreferBinary,
            reject_non_finite: true,
        }
    }

    /// Set the unit STL coordinates are assumed to be in
    ///
    /// 3MF files carry their own unit and ignore this setting.
    pub fn with_default_unit(mut self, unit: LengthUnit) -> Self {
        self.default_unit = unit;
        self
    }

    /// Set how ambiguous STL buffers are classified
    pub fn with_sniff_policy(mut self, policy: SniffPolicy) -> Self {
        self.sniff_policy = policy;
        self
    }

    /// Choose whether a NaN or infinite area fails the file
    ///
    /// When disabled, `measure_bytes` returns the value as-is. Batch
    /// measurement still drops such files, so a batch total stays finite.
    pub fn with_non_finite_rejection(mut self, reject: bool) -> Self {
        self.reject_non_finite = reject;
        self
    }

    /// Unit assumed for STL coordinates
    pub fn default_unit(&self) -> LengthUnit {
        self.default_unit
    }

    /// Policy for ambiguous STL buffers
    pub fn sniff_policy(&self) -> SniffPolicy {
        self.sniff_policy
    }

    /// Whether non-finite areas fail the file
    pub fn rejects_non_finite(&self) -> bool {
        self.reject_non_finite
    }
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self::new()
    }
}
