//! Risk, density and severity classification.
//!
//! Two ordinal scales share one visual language: green through dark red, with
//! the maximum of each scale (`critical`, `very_high`) drawn in the same dark
//! red. Every lookup is total. A string outside the known categories maps to
//! [`NEUTRAL_COLOR`] and the "Desconocido" label, so a bad record never stops
//! the map from rendering.

use std::fmt;
use std::str::FromStr;

use crate::CategoryError;

/// Gray used for anything that does not classify.
pub const NEUTRAL_COLOR: &str = "#6B7280";

/// Label used for anything that does not classify.
pub const UNKNOWN_LABEL: &str = "Desconocido";

const GREEN: &str = "#10B981";
const AMBER: &str = "#F59E0B";
const RED: &str = "#EF4444";
const DARK_RED: &str = "#7C2D12";
const BLUE: &str = "#3B82F6";

// ============================================================================
// Risk
// ============================================================================

/// Emergency-risk category of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => GREEN,
            Self::Medium => AMBER,
            Self::High => RED,
            Self::Critical => DARK_RED,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Medium => "Medio",
            Self::High => "Alto",
            Self::Critical => "Crítico",
        }
    }

    /// High or critical.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }

    /// Critical zones get a dashed outline.
    pub fn is_dashed(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl FromStr for RiskLevel {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| CategoryError::RiskLevel(s.to_string()))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a raw emergency rate (incidents per 1000 inhabitants).
///
/// Advisory only: a zone's stored `risk_level` is authored independently and
/// is never overwritten with this value.
///
/// | Rate | Level |
/// |------|-------|
/// | ≥ 40 | critical |
/// | ≥ 30 | high |
/// | ≥ 20 | medium |
/// | otherwise | low |
///
/// # Example
///
/// ```rust
/// use civic_geo::{risk_level_from_rate, RiskLevel};
///
/// assert_eq!(risk_level_from_rate(45.2), RiskLevel::Critical);
/// assert_eq!(risk_level_from_rate(28.4), RiskLevel::Medium);
/// ```
pub fn risk_level_from_rate(rate: f64) -> RiskLevel {
    if rate >= 40.0 {
        RiskLevel::Critical
    } else if rate >= 30.0 {
        RiskLevel::High
    } else if rate >= 20.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// ============================================================================
// Density
// ============================================================================

/// Population-density category of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DensityLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl DensityLevel {
    pub const ALL: [DensityLevel; 5] =
        [Self::VeryLow, Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::VeryLow => BLUE,
            Self::Low => GREEN,
            Self::Medium => AMBER,
            Self::High => RED,
            Self::VeryHigh => DARK_RED,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Muy Baja",
            Self::Low => "Baja",
            Self::Medium => "Media",
            Self::High => "Alta",
            Self::VeryHigh => "Muy Alta",
        }
    }

    pub fn is_dashed(&self) -> bool {
        matches!(self, Self::VeryHigh)
    }
}

impl FromStr for DensityLevel {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| CategoryError::DensityLevel(s.to_string()))
    }
}

impl fmt::Display for DensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a population density (people per km²).
///
/// Bands: < 100, 100–500, 500–2000, 2000–10000, > 10000.
pub fn density_level_from_value(density: f64) -> DensityLevel {
    if density > 10_000.0 {
        DensityLevel::VeryHigh
    } else if density >= 2_000.0 {
        DensityLevel::High
    } else if density >= 500.0 {
        DensityLevel::Medium
    } else if density >= 100.0 {
        DensityLevel::Low
    } else {
        DensityLevel::VeryLow
    }
}

// ============================================================================
// Severity
// ============================================================================

/// Severity of a single incident. Uses the risk palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        self.as_risk().as_str()
    }

    pub fn color(&self) -> &'static str {
        self.as_risk().color()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Baja",
            Self::Medium => "Media",
            Self::High => "Alta",
            Self::Critical => "Crítica",
        }
    }

    fn as_risk(&self) -> RiskLevel {
        match self {
            Self::Low => RiskLevel::Low,
            Self::Medium => RiskLevel::Medium,
            Self::High => RiskLevel::High,
            Self::Critical => RiskLevel::Critical,
        }
    }
}

impl FromStr for Severity {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| CategoryError::Severity(s.to_string()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// String-keyed lookups
// ============================================================================

/// Display color for any risk, severity or density category string.
///
/// Shared names (`low`, `medium`, `high`) have the same color on both scales.
/// Anything else returns [`NEUTRAL_COLOR`].
///
/// # Example
///
/// ```rust
/// use civic_geo::{color_for, NEUTRAL_COLOR};
///
/// assert_eq!(color_for("critical"), "#7C2D12");
/// assert_eq!(color_for("very_low"), "#3B82F6");
/// assert_eq!(color_for("apocalyptic"), NEUTRAL_COLOR);
/// ```
pub fn color_for(category: &str) -> &'static str {
    if let Ok(level) = category.parse::<RiskLevel>() {
        return level.color();
    }
    category
        .parse::<DensityLevel>()
        .map(|level| level.color())
        .unwrap_or(NEUTRAL_COLOR)
}

/// Spanish label for a risk level string, "Desconocido" when unrecognized.
pub fn risk_label_for(category: &str) -> &'static str {
    category.parse::<RiskLevel>().map(|level| level.label()).unwrap_or(UNKNOWN_LABEL)
}

/// Spanish label for a density level string, "Desconocido" when unrecognized.
pub fn density_label_for(category: &str) -> &'static str {
    category.parse::<DensityLevel>().map(|level| level.label()).unwrap_or(UNKNOWN_LABEL)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(risk_level_from_rate(0.0), RiskLevel::Low);
        assert_eq!(risk_level_from_rate(19.99), RiskLevel::Low);
        assert_eq!(risk_level_from_rate(20.0), RiskLevel::Medium);
        assert_eq!(risk_level_from_rate(29.9), RiskLevel::Medium);
        assert_eq!(risk_level_from_rate(30.0), RiskLevel::High);
        assert_eq!(risk_level_from_rate(39.9), RiskLevel::High);
        assert_eq!(risk_level_from_rate(40.0), RiskLevel::Critical);
        assert_eq!(risk_level_from_rate(1000.0), RiskLevel::Critical);
    }

    #[test]
    fn test_risk_palette() {
        assert_eq!(RiskLevel::Low.color(), "#10B981");
        assert_eq!(RiskLevel::Medium.color(), "#F59E0B");
        assert_eq!(RiskLevel::High.color(), "#EF4444");
        assert_eq!(RiskLevel::Critical.color(), "#7C2D12");
    }

    #[test]
    fn test_density_thresholds() {
        assert_eq!(density_level_from_value(50.0), DensityLevel::VeryLow);
        assert_eq!(density_level_from_value(100.0), DensityLevel::Low);
        assert_eq!(density_level_from_value(499.0), DensityLevel::Low);
        assert_eq!(density_level_from_value(500.0), DensityLevel::Medium);
        assert_eq!(density_level_from_value(1892.3), DensityLevel::Medium);
        assert_eq!(density_level_from_value(2845.6), DensityLevel::High);
        assert_eq!(density_level_from_value(10_000.0), DensityLevel::High);
        assert_eq!(density_level_from_value(11_175.4), DensityLevel::VeryHigh);
    }

    #[test]
    fn test_maximum_levels_share_dark_red() {
        assert_eq!(DensityLevel::VeryHigh.color(), RiskLevel::Critical.color());
        assert!(DensityLevel::VeryHigh.is_dashed());
        assert!(RiskLevel::Critical.is_dashed());
        assert!(!RiskLevel::High.is_dashed());
    }

    #[test]
    fn test_color_for_every_known_category() {
        for level in RiskLevel::ALL {
            assert_eq!(color_for(level.as_str()), level.color());
        }
        for level in DensityLevel::ALL {
            assert_eq!(color_for(level.as_str()), level.color());
        }
        for severity in Severity::ALL {
            assert_eq!(color_for(severity.as_str()), severity.color());
        }
    }

    #[test]
    fn test_color_for_unknown_falls_back_to_gray() {
        assert_eq!(color_for(""), NEUTRAL_COLOR);
        assert_eq!(color_for("CRITICAL"), NEUTRAL_COLOR);
        assert_eq!(color_for("extreme"), NEUTRAL_COLOR);
    }

    #[test]
    fn test_labels() {
        assert_eq!(risk_label_for("critical"), "Crítico");
        assert_eq!(risk_label_for("nope"), UNKNOWN_LABEL);
        assert_eq!(density_label_for("very_high"), "Muy Alta");
        assert_eq!(density_label_for("nope"), UNKNOWN_LABEL);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("severe".parse::<RiskLevel>(), Err(CategoryError::RiskLevel("severe".to_string())));
        assert!("very_low".parse::<RiskLevel>().is_err());
        assert_eq!("very_low".parse::<DensityLevel>(), Ok(DensityLevel::VeryLow));
    }

    #[test]
    fn test_elevated() {
        assert!(!RiskLevel::Low.is_elevated());
        assert!(!RiskLevel::Medium.is_elevated());
        assert!(RiskLevel::High.is_elevated());
        assert!(RiskLevel::Critical.is_elevated());
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Low < Severity::Critical);
        assert_eq!(Severity::High.to_string(), "high");
    }
}
