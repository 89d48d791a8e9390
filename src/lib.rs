//! # Civic Geo
//!
//! Geospatial analysis core for a map dashboard of medical facilities and
//! emergency-risk zones.
//!
//! This library provides:
//! - Haversine distances and straight-line route estimates
//! - Nearest-facility search and facility coverage queries
//! - Risk and population-density classification with a fixed display palette
//! - Deterministic irregular zone polygons (with hand-authored boundaries for well-known zones)
//! - Per-zone incident metrics and a dashboard-wide summary
//! - Human-readable formatting of distances, durations and rates
//!
//! Every function is synchronous and side-effect free: inputs are snapshots
//! passed by reference, outputs are freshly computed values ready for display.
//!
//! ## Features
//!
//! - **`serde`** - Derive `Serialize`/`Deserialize` for all public data types
//!
//! ## Quick Start
//!
//! ```rust
//! use civic_geo::{GeoPoint, estimate_route, format_distance, format_duration};
//!
//! let user = GeoPoint::new(13.6929, -89.2182);
//! let hospital = GeoPoint::new(13.7100, -89.2000);
//!
//! let route = estimate_route(&user, &hospital);
//! println!(
//!     "{} ({})",
//!     format_distance(route.distance_km),
//!     format_duration(route.duration_min)
//! );
//! ```

pub mod error;
pub use error::CategoryError;

// Great-circle distance and route estimation
pub mod geo_utils;
pub use geo_utils::{distance_km, estimate_route, estimate_route_with_config, RouteConfig, RouteEstimate};

// Record types consumed from the data store
pub mod models;
pub use models::{
    AgeGroups, EmergencyIncident, EmergencyZone, FacilityKind, IncidentStatus, IncidentType,
    InfrastructureLevel, MedicalCenter, PopulationZone,
};

pub mod classify;
pub use classify::{
    color_for, density_level_from_value, risk_level_from_rate, DensityLevel, RiskLevel, Severity,
    NEUTRAL_COLOR,
};

pub mod locator;
pub use locator::{
    nearest, nearest_center, nearest_hospitals_to_zone, nearest_zone, select_facility,
    CoverageConfig, FacilityIndex, NearbyConfig, NearestMatch,
};

// Zone boundary synthesis
pub mod polygon;
pub use polygon::{
    generate_irregular_polygon, point_in_polygon, polygon_area_km2, zone_polygon,
    zone_polygon_with_config, KnownZone, PolygonConfig, ZoneShape,
};

pub mod metrics;
pub use metrics::{emergency_stats, zone_metrics, EmergencyStats, ZoneMetrics};

// Pre-computed render data
pub mod overlay;
pub use overlay::{
    coverage_circles, coverage_circles_with_config, density_zone_overlays, risk_zone_overlays, CoverageCircle,
    DensityZoneOverlay, RiskZoneOverlay,
};

pub mod format;
pub use format::{
    format_density, format_distance, format_duration, format_radius, format_rate, format_response_time,
};

// ============================================================================
// Core Types
// ============================================================================

/// A WGS84 coordinate in decimal degrees.
///
/// No range validation is performed; callers supply valid coordinates.
///
/// # Example
/// ```
/// use civic_geo::GeoPoint;
/// let point = GeoPoint::new(13.6929, -89.2182); // San Salvador
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds enclosing all points. `None` for empty input.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self { min_lat, max_lat, min_lng, max_lng })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Check whether a point lies inside (or on the edge of) the bounds.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lng
            && point.longitude <= self.max_lng
    }
}

/// The user's current position as reported by the location provider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserLocation {
    pub position: GeoPoint,
    /// Accuracy radius in meters
    pub accuracy: f64,
}

impl UserLocation {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self { position: GeoPoint::new(latitude, longitude), accuracy }
    }
}

/// Anything with a fixed position on the map.
///
/// Lets the locator search facilities, zones and plain points with the same code.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl Located for UserLocation {
    fn location(&self) -> GeoPoint {
        self.position
    }
}

// ============================================================================
// Tests
// ============================================================================
