//! Record types read from the external data store.
//!
//! The core never owns or mutates these; it receives snapshots by reference and
//! links records to each other only by comparing identifiers.

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::classify::{DensityLevel, RiskLevel, Severity};
use crate::{CategoryError, GeoPoint, Located};

// ============================================================================
// Medical Centers
// ============================================================================

/// Category of a medical facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FacilityKind {
    Hospital,
    Clinic,
    HealthCenter,
}

impl FacilityKind {
    pub const ALL: [FacilityKind; 3] = [Self::Hospital, Self::Clinic, Self::HealthCenter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Clinic => "clinic",
            Self::HealthCenter => "health_center",
        }
    }

    /// Marker color on the map.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Hospital => "#EF4444",
            Self::Clinic => "#3B82F6",
            Self::HealthCenter => "#10B981",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hospital => "Hospital",
            Self::Clinic => "Clínica",
            Self::HealthCenter => "Unidad de Salud",
        }
    }
}

impl FromStr for FacilityKind {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CategoryError::FacilityKind(s.to_string()))
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hospital, clinic or health center.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MedicalCenter {
    pub id: String,
    pub name: String,
    pub kind: FacilityKind,
    pub location: GeoPoint,
    pub address: String,
    pub phone: String,
    pub schedule: String,
    pub services: Vec<String>,
    /// Whether the facility runs a 24-hour emergency service
    pub emergency: bool,
}

impl Located for MedicalCenter {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

// ============================================================================
// Emergency Zones and Incidents
// ============================================================================

/// An area with an authored emergency-risk profile.
///
/// `risk_level` is stored as authored and is not recomputed from
/// `emergency_rate`; see [`crate::classify::risk_level_from_rate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmergencyZone {
    pub id: String,
    pub name: String,
    pub municipality: String,
    pub department: String,
    pub location: GeoPoint,
    /// Radius in meters
    pub radius: f64,
    pub population: u64,
    /// Incidents per 1000 inhabitants per period
    pub emergency_rate: f64,
    pub risk_level: RiskLevel,
    /// IDs of nearby medical centers
    pub nearest_hospitals: Vec<String>,
    /// Average response time in minutes
    pub average_response_time: f64,
    pub monthly_incidents: u32,
    pub yearly_incidents: u32,
    pub active: bool,
}

impl Located for EmergencyZone {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Kind of reported emergency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IncidentType {
    Medical,
    Accident,
    Cardiac,
    Respiratory,
    Trauma,
    Other,
}

impl IncidentType {
    pub const ALL: [IncidentType; 6] = [
        Self::Medical,
        Self::Accident,
        Self::Cardiac,
        Self::Respiratory,
        Self::Trauma,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Accident => "accident",
            Self::Cardiac => "cardiac",
            Self::Respiratory => "respiratory",
            Self::Trauma => "trauma",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Medical => "Emergencia médica",
            Self::Accident => "Accidente",
            Self::Cardiac => "Emergencia cardíaca",
            Self::Respiratory => "Emergencia respiratoria",
            Self::Trauma => "Trauma",
            Self::Other => "Otro",
        }
    }
}

impl FromStr for IncidentType {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CategoryError::IncidentType(s.to_string()))
    }
}

/// Lifecycle of an incident.
///
/// Only a resolved incident can carry a response time or resolution timestamp.
/// Either may still be missing on a resolved incident; that means "no data",
/// not zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum IncidentStatus {
    Active,
    Resolved {
        /// Minutes from report to response
        response_time: Option<f64>,
        /// Unix timestamp (seconds)
        resolved_at: Option<i64>,
    },
}

impl IncidentStatus {
    /// Build a status from the data store's flat columns.
    ///
    /// An unresolved row that still carries a response time or resolution
    /// timestamp is normalized to `Active`.
    pub fn from_parts(resolved: bool, response_time: Option<f64>, resolved_at: Option<i64>) -> Self {
        if resolved {
            return Self::Resolved { response_time, resolved_at };
        }
        if response_time.is_some() || resolved_at.is_some() {
            warn!(
                "[IncidentStatus] Unresolved incident carries resolution data (response_time={:?}, resolved_at={:?}); ignoring it",
                response_time, resolved_at
            );
        }
        Self::Active
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// Response time in minutes, only for resolved incidents that recorded one.
    pub fn response_time(&self) -> Option<f64> {
        match self {
            Self::Resolved { response_time, .. } => *response_time,
            Self::Active => None,
        }
    }

    pub fn resolved_at(&self) -> Option<i64> {
        match self {
            Self::Resolved { resolved_at, .. } => *resolved_at,
            Self::Active => None,
        }
    }
}

/// A single reported emergency, scoped to one zone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmergencyIncident {
    pub id: String,
    pub incident_type: IncidentType,
    pub severity: Severity,
    pub location: GeoPoint,
    /// ID of the owning [`EmergencyZone`]
    pub zone_id: String,
    /// ID of the [`MedicalCenter`] that responded, if any
    pub hospital_id: Option<String>,
    pub status: IncidentStatus,
    pub description: Option<String>,
    /// Unix timestamp (seconds)
    pub reported_at: i64,
}

impl EmergencyIncident {
    pub fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }
}

impl Located for EmergencyIncident {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

// ============================================================================
// Population Zones
// ============================================================================

/// Maturity of a zone's infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InfrastructureLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl InfrastructureLevel {
    pub const ALL: [InfrastructureLevel; 3] = [Self::Basic, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "Básica",
            Self::Intermediate => "Intermedia",
            Self::Advanced => "Avanzada",
        }
    }
}

impl FromStr for InfrastructureLevel {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| CategoryError::InfrastructureLevel(s.to_string()))
    }
}

/// Population split by age group (head counts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgeGroups {
    pub children: u64,
    pub adults: u64,
    pub elderly: u64,
}

impl AgeGroups {
    pub fn total(&self) -> u64 {
        self.children + self.adults + self.elderly
    }
}

/// An area with a population-density profile.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationZone {
    pub id: String,
    pub name: String,
    pub municipality: String,
    pub department: String,
    pub location: GeoPoint,
    /// Radius in meters
    pub radius: f64,
    pub population: u64,
    /// People per km²
    pub population_density: f64,
    pub density_level: DensityLevel,
    pub area_km2: f64,
    /// Urban and rural shares; expected to sum to ~100 but not enforced
    pub urban_percentage: f64,
    pub rural_percentage: f64,
    /// Annual growth in percent
    pub growth_rate: f64,
    pub age_groups: AgeGroups,
    pub economic_activity: Vec<String>,
    pub infrastructure_level: InfrastructureLevel,
    pub active: bool,
}

impl Located for PopulationZone {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

// ============================================================================
// Tests
// ============================================================================
