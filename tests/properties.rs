//! Property tests for the geodesy, classification, polygon and metrics layers.

use civic_geo::polygon::is_closed;
use civic_geo::{
    color_for, density_level_from_value, distance_km, generate_irregular_polygon, nearest, FacilityIndex,
    point_in_polygon, risk_level_from_rate, zone_metrics, EmergencyIncident, EmergencyZone,
    GeoPoint, IncidentStatus, IncidentType, PolygonConfig, RiskLevel, Severity,
};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = GeoPoint> {
    (-80.0f64..80.0, -179.0f64..179.0).prop_map(|(lat, lng)| GeoPoint::new(lat, lng))
}

fn severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn status() -> impl Strategy<Value = IncidentStatus> {
    prop_oneof![
        Just(IncidentStatus::Active),
        prop::option::of(0.0f64..120.0)
            .prop_map(|response_time| IncidentStatus::Resolved { response_time, resolved_at: None }),
    ]
}

fn incident() -> impl Strategy<Value = EmergencyIncident> {
    (prop::sample::select(vec!["z1", "z2", "z3"]), severity(), status()).prop_map(
        |(zone_id, severity, status)| EmergencyIncident {
            id: format!("{}-{:?}", zone_id, severity),
            incident_type: IncidentType::Other,
            severity,
            location: GeoPoint::new(13.70, -89.20),
            zone_id: zone_id.to_string(),
            hospital_id: None,
            status,
            description: None,
            reported_at: 0,
        },
    )
}

fn zone(id: &str) -> EmergencyZone {
    EmergencyZone {
        id: id.to_string(),
        name: "Zona".to_string(),
        municipality: String::new(),
        department: String::new(),
        location: GeoPoint::new(13.70, -89.20),
        radius: 1000.0,
        population: 1_000,
        emergency_rate: 10.0,
        risk_level: RiskLevel::Low,
        nearest_hospitals: vec![],
        average_response_time: 0.0,
        monthly_incidents: 0,
        yearly_incidents: 0,
        active: true,
    }
}

proptest! {
    #[test]
    fn prop_distance_symmetric_and_non_negative(a in point(), b in point()) {
        let ab = distance_km(&a, &b);
        prop_assert!(ab >= 0.0);
        prop_assert_eq!(ab, distance_km(&b, &a));
    }

    #[test]
    fn prop_distance_identity(a in point()) {
        prop_assert_eq!(distance_km(&a, &a), 0.0);
    }

    #[test]
    fn prop_triangle_inequality(a in point(), b in point(), c in point()) {
        let direct = distance_km(&a, &c);
        let via = distance_km(&a, &b) + distance_km(&b, &c);
        prop_assert!(direct <= via + 1e-6);
    }

    #[test]
    fn prop_risk_level_monotonic(x in 0.0f64..1000.0, y in 0.0f64..1000.0) {
        let (low, high) = if x <= y { (x, y) } else { (y, x) };
        prop_assert!(risk_level_from_rate(low) <= risk_level_from_rate(high));
    }

    #[test]
    fn prop_density_level_monotonic(x in 0.0f64..50_000.0, y in 0.0f64..50_000.0) {
        let (low, high) = if x <= y { (x, y) } else { (y, x) };
        prop_assert!(density_level_from_value(low) <= density_level_from_value(high));
    }

    #[test]
    fn prop_color_always_hex(category in ".{0,16}") {
        let color = color_for(&category);
        prop_assert_eq!(color.len(), 7);
        prop_assert!(color.starts_with('#'));
    }

    #[test]
    fn prop_polygon_reproducible_and_closed(
        center in point(),
        radius in 10.0f64..5000.0,
        name in "[A-Za-z ]{1,30}",
    ) {
        let config = PolygonConfig::default();
        let a = generate_irregular_polygon(&center, radius, &name, &config);
        let b = generate_irregular_polygon(&center, radius, &name, &config);

        prop_assert_eq!(&a, &b);
        prop_assert!(is_closed(&a));
        prop_assert!((9..=13).contains(&a.len()));
    }

    #[test]
    fn prop_polygon_contains_center(
        lat in -60.0f64..60.0,
        lng in -170.0f64..170.0,
        radius in 10.0f64..5000.0,
        name in "[A-Za-z]{1,20}",
    ) {
        let center = GeoPoint::new(lat, lng);
        let ring = generate_irregular_polygon(&center, radius, &name, &PolygonConfig::default());
        prop_assert!(point_in_polygon(&center, &ring));
    }

    #[test]
    fn prop_nearest_is_minimal(query in point(), candidates in prop::collection::vec(point(), 1..20)) {
        let found = nearest(Some(&query), &candidates).unwrap();
        for candidate in &candidates {
            prop_assert!(found.distance_km <= distance_km(&query, candidate));
        }
    }

    #[test]
    fn prop_index_agrees_with_linear_scan(
        query in (-89.9f64..89.9, -180.0f64..180.0),
        facilities in prop::collection::vec((-89.9f64..89.9, -180.0f64..180.0), 0..30),
        radius_km in 0.0f64..3000.0,
    ) {
        let query = GeoPoint::new(query.0, query.1);
        let facilities: Vec<GeoPoint> = facilities.into_iter().map(|(lat, lng)| GeoPoint::new(lat, lng)).collect();
        let index = FacilityIndex::new(&facilities);

        let mut found: Vec<usize> = index.within_radius(&query, radius_km).iter().map(|m| m.index).collect();
        found.sort_unstable();
        let expected: Vec<usize> = facilities
            .iter()
            .enumerate()
            .filter(|(_, f)| distance_km(&query, *f) <= radius_km)
            .map(|(i, _)| i)
            .collect();

        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_metrics_account_for_every_zone_incident(incidents in prop::collection::vec(incident(), 0..40)) {
        let z = zone("z1");
        let metrics = zone_metrics(&z, &incidents);
        let in_zone = incidents.iter().filter(|i| i.zone_id == "z1").count() as u32;

        prop_assert_eq!(metrics.active_incidents + metrics.resolved_incidents, in_zone);
        prop_assert_eq!(metrics.severity_distribution.values().sum::<u32>(), in_zone);
        prop_assert!(metrics.average_response_time >= 0.0);
        prop_assert!(metrics.severity_distribution.values().all(|&count| count > 0));
    }
}
