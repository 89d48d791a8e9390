//! # Zone Metrics
//!
//! Aggregates incident records into popup and dashboard figures.
//!
//! | Function | Scope |
//! |----------|-------|
//! | [`zone_metrics`] | Incidents belonging to one zone |
//! | [`emergency_stats`] | Everything on the dashboard |
//!
//! Response-time averages only count resolved incidents that actually carry a
//! response time. A resolved incident with no recorded time is "no data", not
//! zero. Averages are rounded to one decimal and are 0 when nothing qualifies.

use std::collections::BTreeMap;

use log::debug;

use crate::classify::Severity;
use crate::models::{EmergencyIncident, EmergencyZone, MedicalCenter};

/// Incident figures for a single zone.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneMetrics {
    /// Unresolved incidents in the zone
    pub active_incidents: u32,
    /// Resolved incidents in the zone
    pub resolved_incidents: u32,
    /// Mean response time in minutes, one decimal
    pub average_response_time: f64,
    /// Incident count per severity; severities with no incidents are absent
    pub severity_distribution: BTreeMap<Severity, u32>,
}

impl ZoneMetrics {
    pub fn total_incidents(&self) -> u32 {
        self.active_incidents + self.resolved_incidents
    }
}

/// Dashboard-wide summary.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmergencyStats {
    pub total_incidents: u32,
    pub total_resolved: u32,
    /// Mean response time in minutes over all resolved incidents, one decimal
    pub average_response_time: f64,
    /// Zones whose stored risk level is high or critical
    pub elevated_zones: u32,
    /// Medical centers that run an emergency service
    pub hospitals_with_emergency: u32,
}

/// Running mean that ignores incidents without a usable response time.
#[derive(Default)]
struct ResponseAverage {
    sum: f64,
    count: u32,
}

impl ResponseAverage {
    fn push(&mut self, incident: &EmergencyIncident) {
        if let Some(minutes) = incident.status.response_time() {
            if minutes.is_finite() && minutes >= 0.0 {
                self.sum += minutes;
                self.count += 1;
            }
        }
    }

    fn rounded(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        round_tenth(self.sum / self.count as f64)
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Metrics for the incidents whose `zone_id` matches `zone.id`.
///
/// # Example
///
/// ```rust
/// use civic_geo::{zone_metrics, EmergencyZone};
/// # use civic_geo::{GeoPoint, RiskLevel};
/// # let zone = EmergencyZone {
/// #     id: "z1".into(), name: "Zona".into(), municipality: String::new(),
/// #     department: String::new(), location: GeoPoint::new(13.7, -89.2),
/// #     radius: 1000.0, population: 0, emergency_rate: 0.0,
/// #     risk_level: RiskLevel::Low, nearest_hospitals: vec![],
/// #     average_response_time: 0.0, monthly_incidents: 0,
/// #     yearly_incidents: 0, active: true,
/// # };
///
/// let metrics = zone_metrics(&zone, &[]);
/// assert_eq!(metrics.total_incidents(), 0);
/// assert_eq!(metrics.average_response_time, 0.0);
/// assert!(metrics.severity_distribution.is_empty());
/// ```
pub fn zone_metrics(zone: &EmergencyZone, incidents: &[EmergencyIncident]) -> ZoneMetrics {
    let mut metrics = ZoneMetrics::default();
    let mut average = ResponseAverage::default();

    for incident in incidents.iter().filter(|i| i.zone_id == zone.id) {
        if incident.is_resolved() {
            metrics.resolved_incidents += 1;
            average.push(incident);
        } else {
            metrics.active_incidents += 1;
        }
        *metrics.severity_distribution.entry(incident.severity).or_insert(0) += 1;
    }

    metrics.average_response_time = average.rounded();

    debug!(
        "[ZoneMetrics] {}: {} active, {} resolved, avg {} min",
        zone.id, metrics.active_incidents, metrics.resolved_incidents, metrics.average_response_time
    );

    metrics
}

/// Summary across all zones, incidents and medical centers.
pub fn emergency_stats(
    zones: &[EmergencyZone],
    incidents: &[EmergencyIncident],
    centers: &[MedicalCenter],
) -> EmergencyStats {
    let mut average = ResponseAverage::default();
    let mut total_resolved = 0;

    for incident in incidents.iter().filter(|i| i.is_resolved()) {
        total_resolved += 1;
        average.push(incident);
    }

    let stats = EmergencyStats {
        total_incidents: incidents.len() as u32,
        total_resolved,
        average_response_time: average.rounded(),
        elevated_zones: zones.iter().filter(|z| z.risk_level.is_elevated()).count() as u32,
        hospitals_with_emergency: centers.iter().filter(|c| c.emergency).count() as u32,
    };

    debug!("[ZoneMetrics] Dashboard summary: {:?}", stats);
    stats
}

// ============================================================================
// Tests
// ============================================================================
