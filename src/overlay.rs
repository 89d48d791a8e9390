//! Render-ready overlay records.
//!
//! Everything a map layer needs for one zone or facility is computed up front
//! (color, dash style, boundary ring, popup strings), so the renderer only
//! draws. Inactive zones are skipped.
//!
//! Overlays are output-only, so with the `serde` feature they serialize but do
//! not deserialize.

use log::{debug, trace};

use crate::classify::{DensityLevel, RiskLevel};
use crate::format::{format_density, format_rate, format_response_time};
use crate::locator::CoverageConfig;
use crate::metrics::{zone_metrics, ZoneMetrics};
use crate::models::{EmergencyIncident, EmergencyZone, MedicalCenter, PopulationZone};
use crate::polygon::zone_polygon;
use crate::GeoPoint;

/// Emergency zone drawn as an irregular polygon.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiskZoneOverlay {
    pub zone_id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    /// Fill and stroke color
    pub color: &'static str,
    /// Critical zones use a dashed outline
    pub dashed: bool,
    /// Closed boundary ring
    pub ring: Vec<GeoPoint>,
    /// Popup figures from the zone's incidents
    pub metrics: ZoneMetrics,
    /// e.g. "35.0 por 1000 hab."
    pub rate_label: String,
    /// Stored average response time, e.g. "12 min"
    pub response_label: String,
}

/// Population zone drawn as a circle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DensityZoneOverlay {
    pub zone_id: String,
    pub name: String,
    pub center: GeoPoint,
    pub radius_meters: f64,
    pub density_level: DensityLevel,
    pub color: &'static str,
    /// Very-high density zones use a dashed outline
    pub dashed: bool,
    /// e.g. "8523.0 hab/km²"
    pub density_label: String,
    /// e.g. "Muy Alta"
    pub level_label: &'static str,
}

/// Service area around a medical center.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CoverageCircle {
    pub center_id: String,
    pub center: GeoPoint,
    pub radius_meters: f64,
    /// Facility-kind color
    pub color: &'static str,
}

/// Build polygon overlays for all active emergency zones.
///
/// Colors come from each zone's stored risk level.
pub fn risk_zone_overlays(zones: &[EmergencyZone], incidents: &[EmergencyIncident]) -> Vec<RiskZoneOverlay> {
    let overlays: Vec<RiskZoneOverlay> = zones
        .iter()
        .filter(|zone| zone.active)
        .map(|zone| {
            trace!("[Overlay] risk zone {} ({})", zone.id, zone.risk_level);
            RiskZoneOverlay {
                zone_id: zone.id.clone(),
                name: zone.name.clone(),
                risk_level: zone.risk_level,
                color: zone.risk_level.color(),
                dashed: zone.risk_level.is_dashed(),
                ring: zone_polygon(zone),
                metrics: zone_metrics(zone, incidents),
                rate_label: format_rate(zone.emergency_rate),
                response_label: format_response_time(zone.average_response_time),
            }
        })
        .collect();

    debug!("[Overlay] {} risk zone polygons from {} zones", overlays.len(), zones.len());
    overlays
}

/// Build circle overlays for all active population zones.
pub fn density_zone_overlays(zones: &[PopulationZone]) -> Vec<DensityZoneOverlay> {
    zones
        .iter()
        .filter(|zone| zone.active)
        .map(|zone| DensityZoneOverlay {
            zone_id: zone.id.clone(),
            name: zone.name.clone(),
            center: zone.location,
            radius_meters: zone.radius.max(0.0),
            density_level: zone.density_level,
            color: zone.density_level.color(),
            dashed: zone.density_level.is_dashed(),
            density_label: format_density(zone.population_density),
            level_label: zone.density_level.label(),
        })
        .collect()
}

/// Coverage circles at the default 1 km radius.
pub fn coverage_circles(centers: &[MedicalCenter]) -> Vec<CoverageCircle> {
    coverage_circles_with_config(centers, &CoverageConfig::default())
}

/// Coverage circles with a custom radius.
pub fn coverage_circles_with_config(centers: &[MedicalCenter], config: &CoverageConfig) -> Vec<CoverageCircle> {
    centers
        .iter()
        .map(|center| CoverageCircle {
            center_id: center.id.clone(),
            center: center.location,
            radius_meters: config.coverage_radius_meters,
            color: center.kind.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Severity;
    use crate::models::{AgeGroups, FacilityKind, IncidentStatus, IncidentType, InfrastructureLevel};
    use crate::polygon::{is_closed, KnownZone};

    fn emergency_zone(id: &str, name: &str, risk_level: RiskLevel, active: bool) -> EmergencyZone {
        EmergencyZone {
            id: id.to_string(),
            name: name.to_string(),
            municipality: "San Salvador".to_string(),
            department: "San Salvador".to_string(),
            location: GeoPoint::new(13.70, -89.20),
            radius: 2000.0,
            population: 50_000,
            emergency_rate: 42.5,
            risk_level,
            nearest_hospitals: vec![],
            average_response_time: 18.0,
            monthly_incidents: 10,
            yearly_incidents: 120,
            active,
        }
    }

    fn population_zone(id: &str, density: f64, level: DensityLevel) -> PopulationZone {
        PopulationZone {
            id: id.to_string(),
            name: format!("Zona {}", id),
            municipality: "Soyapango".to_string(),
            department: "San Salvador".to_string(),
            location: GeoPoint::new(13.71, -89.14),
            radius: 1800.0,
            population: 120_000,
            population_density: density,
            density_level: level,
            area_km2: 10.2,
            urban_percentage: 95.0,
            rural_percentage: 5.0,
            growth_rate: 1.2,
            age_groups: AgeGroups { children: 30_000, adults: 75_000, elderly: 15_000 },
            economic_activity: vec!["comercio".to_string()],
            infrastructure_level: InfrastructureLevel::Intermediate,
            active: true,
        }
    }

    #[test]
    fn test_risk_zone_overlays() {
        let zones = vec![
            emergency_zone("z1", "Centro Histórico San Salvador", RiskLevel::Critical, true),
            emergency_zone("z2", "Zona Apagada", RiskLevel::Low, false),
            emergency_zone("z3", "Zona Nueva", RiskLevel::Medium, true),
        ];
        let incidents = vec![EmergencyIncident {
            id: "i1".to_string(),
            incident_type: IncidentType::Cardiac,
            severity: Severity::Critical,
            location: GeoPoint::new(13.70, -89.22),
            zone_id: "z1".to_string(),
            hospital_id: Some("h1".to_string()),
            status: IncidentStatus::Resolved { response_time: Some(7.0), resolved_at: None },
            description: None,
            reported_at: 0,
        }];

        let overlays = risk_zone_overlays(&zones, &incidents);
        assert_eq!(overlays.len(), 2);

        let critical = &overlays[0];
        assert_eq!(critical.color, "#7C2D12");
        assert!(critical.dashed);
        assert_eq!(critical.ring, KnownZone::CentroHistoricoSanSalvador.ring());
        assert_eq!(critical.metrics.resolved_incidents, 1);
        assert_eq!(critical.rate_label, "42.5 por 1000 hab.");
        assert_eq!(critical.response_label, "18 min");

        let medium = &overlays[1];
        assert_eq!(medium.zone_id, "z3");
        assert!(!medium.dashed);
        assert!(is_closed(&medium.ring));
        assert_eq!(medium.metrics.total_incidents(), 0);
    }

    #[test]
    fn test_density_zone_overlays() {
        let zones = vec![
            population_zone("p1", 12_500.0, DensityLevel::VeryHigh),
            population_zone("p2", 350.0, DensityLevel::Low),
        ];
        let overlays = density_zone_overlays(&zones);

        assert_eq!(overlays.len(), 2);
        assert!(overlays[0].dashed);
        assert_eq!(overlays[0].color, "#7C2D12");
        assert_eq!(overlays[0].density_label, "12500.0 hab/km²");
        assert_eq!(overlays[0].level_label, "Muy Alta");
        assert!(!overlays[1].dashed);
        assert_eq!(overlays[1].radius_meters, 1800.0);
    }

    #[test]
    fn test_coverage_circles() {
        let centers = vec![MedicalCenter {
            id: "h1".to_string(),
            name: "Hospital Rosales".to_string(),
            kind: FacilityKind::Hospital,
            location: GeoPoint::new(13.6989, -89.2031),
            address: String::new(),
            phone: String::new(),
            schedule: "24/7".to_string(),
            services: vec![],
            emergency: true,
        }];

        let circles = coverage_circles(&centers);
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].radius_meters, 1000.0);
        assert_eq!(circles[0].color, FacilityKind::Hospital.color());

        let wide = coverage_circles_with_config(&centers, &CoverageConfig { coverage_radius_meters: 2500.0 });
        assert_eq!(wide[0].radius_meters, 2500.0);
    }
}
