//! Walk through the analysis core with a handful of San Salvador records.
//!
//! Run with: cargo run --example zone_overview

use civic_geo::{
    emergency_stats, estimate_route, format_distance, format_duration, risk_zone_overlays,
    select_facility, EmergencyIncident, EmergencyZone, FacilityIndex, FacilityKind, GeoPoint,
    IncidentStatus, IncidentType, MedicalCenter, RiskLevel, Severity, UserLocation,
};

fn center(id: &str, name: &str, kind: FacilityKind, lat: f64, lng: f64, emergency: bool) -> MedicalCenter {
    MedicalCenter {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        location: GeoPoint::new(lat, lng),
        address: "San Salvador".to_string(),
        phone: "2222-0000".to_string(),
        schedule: if emergency { "24/7" } else { "7:00-17:00" }.to_string(),
        services: vec!["Consulta general".to_string()],
        emergency,
    }
}

fn zone(id: &str, name: &str, lat: f64, lng: f64, rate: f64, risk_level: RiskLevel) -> EmergencyZone {
    EmergencyZone {
        id: id.to_string(),
        name: name.to_string(),
        municipality: "San Salvador".to_string(),
        department: "San Salvador".to_string(),
        location: GeoPoint::new(lat, lng),
        radius: 1500.0,
        population: 45_000,
        emergency_rate: rate,
        risk_level,
        nearest_hospitals: vec![],
        average_response_time: 14.0,
        monthly_incidents: 12,
        yearly_incidents: 140,
        active: true,
    }
}

fn main() {
    let centers = vec![
        center("h1", "Hospital Rosales", FacilityKind::Hospital, 13.6989, -89.2031, true),
        center("c1", "Clínica Comunal Zacamil", FacilityKind::Clinic, 13.7350, -89.2070, false),
        center("u1", "Unidad de Salud Soyapango", FacilityKind::HealthCenter, 13.7100, -89.1400, false),
    ];

    let zones = vec![
        zone("z1", "Centro Histórico San Salvador", 13.6966, -89.2180, 45.0, RiskLevel::Critical),
        zone("z2", "Colonia Escalón", 13.7050, -89.2450, 12.0, RiskLevel::Low),
    ];

    let incidents = vec![
        EmergencyIncident {
            id: "i1".to_string(),
            incident_type: IncidentType::Cardiac,
            severity: Severity::Critical,
            location: GeoPoint::new(13.6960, -89.2170),
            zone_id: "z1".to_string(),
            hospital_id: Some("h1".to_string()),
            status: IncidentStatus::Resolved { response_time: Some(9.0), resolved_at: Some(1_700_000_900) },
            description: None,
            reported_at: 1_700_000_000,
        },
        EmergencyIncident {
            id: "i2".to_string(),
            incident_type: IncidentType::Accident,
            severity: Severity::High,
            location: GeoPoint::new(13.6990, -89.2200),
            zone_id: "z1".to_string(),
            hospital_id: None,
            status: IncidentStatus::Active,
            description: Some("Colisión en Alameda Juan Pablo II".to_string()),
            reported_at: 1_700_001_000,
        },
    ];

    let user = UserLocation::new(13.7020, -89.2240, 25.0);

    println!("Civic Geo Overview\n");

    match select_facility(Some(&user), &centers, None) {
        Some(facility) => {
            let route = estimate_route(&user.position, &facility.location);
            println!("Nearest facility: {} ({})", facility.name, facility.kind.label());
            println!(
                "   {} · {}\n",
                format_distance(route.distance_km),
                format_duration(route.duration_min)
            );
        }
        None => println!("No facilities available\n"),
    }

    let index = FacilityIndex::new(&centers);
    let within = index.within_radius(&user.position, 5.0);
    println!("Facilities within 5 km: {}", within.len());
    for found in &within {
        println!("   {} at {}", centers[found.index].name, format_distance(found.distance_km));
    }
    println!();

    for overlay in risk_zone_overlays(&zones, &incidents) {
        println!("{} [{}{}]", overlay.name, overlay.color, if overlay.dashed { ", dashed" } else { "" });
        println!("   Boundary: {} points", overlay.ring.len());
        println!("   Rate: {}", overlay.rate_label);
        println!(
            "   Incidents: {} active, {} resolved (avg {} min)\n",
            overlay.metrics.active_incidents,
            overlay.metrics.resolved_incidents,
            overlay.metrics.average_response_time
        );
    }

    let stats = emergency_stats(&zones, &incidents, &centers);
    println!("Summary: {:?}", stats);
}
