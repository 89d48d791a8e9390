//! Wire format of the record types (requires the `serde` feature).
#![cfg(feature = "serde")]

use civic_geo::{
    zone_metrics, DensityLevel, EmergencyIncident, EmergencyZone, FacilityKind, GeoPoint,
    IncidentStatus, IncidentType, MedicalCenter, RiskLevel, Severity,
};
use serde_json::json;

#[test]
fn test_categories_use_snake_case() {
    assert_eq!(serde_json::to_value(RiskLevel::Critical).unwrap(), json!("critical"));
    assert_eq!(serde_json::to_value(DensityLevel::VeryHigh).unwrap(), json!("very_high"));
    assert_eq!(serde_json::to_value(FacilityKind::HealthCenter).unwrap(), json!("health_center"));
}

#[test]
fn test_incident_status_is_tagged() {
    let status = IncidentStatus::Resolved { response_time: Some(12.5), resolved_at: None };
    assert_eq!(
        serde_json::to_value(status).unwrap(),
        json!({ "status": "resolved", "response_time": 12.5, "resolved_at": null })
    );

    let active: IncidentStatus = serde_json::from_value(json!({ "status": "active" })).unwrap();
    assert_eq!(active, IncidentStatus::Active);
}

#[test]
fn test_medical_center_from_json() {
    let center: MedicalCenter = serde_json::from_value(json!({
        "id": "h1",
        "name": "Hospital Rosales",
        "kind": "hospital",
        "location": { "latitude": 13.6989, "longitude": -89.2031 },
        "address": "25 Avenida Norte",
        "phone": "2231-9200",
        "schedule": "24/7",
        "services": ["Emergencias", "Cirugía"],
        "emergency": true
    }))
    .unwrap();

    assert_eq!(center.kind, FacilityKind::Hospital);
    assert_eq!(center.location, GeoPoint::new(13.6989, -89.2031));
    assert!(center.emergency);
}

#[test]
fn test_unknown_category_rejected() {
    let result: Result<RiskLevel, _> = serde_json::from_value(json!("apocalyptic"));
    assert!(result.is_err());
}

#[test]
fn test_severity_distribution_serializes_as_map() {
    let zone = EmergencyZone {
        id: "z1".to_string(),
        name: "Zona".to_string(),
        municipality: String::new(),
        department: String::new(),
        location: GeoPoint::new(13.70, -89.20),
        radius: 1000.0,
        population: 0,
        emergency_rate: 0.0,
        risk_level: RiskLevel::Low,
        nearest_hospitals: vec![],
        average_response_time: 0.0,
        monthly_incidents: 0,
        yearly_incidents: 0,
        active: true,
    };
    let incident = EmergencyIncident {
        id: "i1".to_string(),
        incident_type: IncidentType::Trauma,
        severity: Severity::High,
        location: GeoPoint::new(13.70, -89.20),
        zone_id: "z1".to_string(),
        hospital_id: None,
        status: IncidentStatus::Active,
        description: None,
        reported_at: 0,
    };

    let value = serde_json::to_value(zone_metrics(&zone, &[incident])).unwrap();
    assert_eq!(value["severity_distribution"], json!({ "high": 1 }));
    assert_eq!(value["active_incidents"], json!(1));
}
