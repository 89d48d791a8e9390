//! # Geographic Utilities
//!
//! Distance primitives used throughout the crate.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`distance_km`] | Great-circle distance between two points |
//! | [`estimate_route`] | Straight-line distance and travel time between two points |
//!
//! ## Algorithm Notes
//!
//! ### Haversine Formula
//!
//! Distances assume a spherical Earth with radius 6,371 km. Every other module
//! that needs a spatial distance goes through [`distance_km`], so the locator,
//! route estimates and coverage queries always agree.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)
//!
//! ### Routes
//!
//! There is no road network. A route is the straight line between origin and
//! destination, travelled at a constant average urban speed.

use crate::{Bounds, GeoPoint};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// =============================================================================
// Distance Functions
// =============================================================================

/// Great-circle distance between two points in kilometers (haversine).
///
/// Always non-negative, symmetric, and exactly 0 for identical points.
///
/// # Example
///
/// ```rust
/// use civic_geo::{GeoPoint, geo_utils};
///
/// let san_salvador = GeoPoint::new(13.6929, -89.2182);
/// let santa_ana = GeoPoint::new(13.9944, -89.5594);
///
/// let distance = geo_utils::distance_km(&san_salvador, &santa_ana);
/// assert!((distance - 49.8).abs() < 0.5);
/// ```
#[inline]
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h a hair past 1 for antipodal points
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

// =============================================================================
// Route Estimation
// =============================================================================

/// Configuration for route estimation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteConfig {
    /// Average travel speed in km/h.
    /// Default: 40.0 (urban driving)
    pub average_speed_kmh: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self { average_speed_kmh: 40.0 }
    }
}

/// Straight-line route between the user and a facility.
///
/// A transient value: recomputed whenever the user or the selection moves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteEstimate {
    /// Great-circle distance in kilometers
    pub distance_km: f64,
    /// Estimated travel time in minutes
    pub duration_min: f64,
    /// Box enclosing origin and destination (for fitting the map view)
    pub bounds: Bounds,
}

/// Estimate a route at the default 40 km/h urban speed.
///
/// This is a straight-line approximation, not a road route.
///
/// # Example
///
/// ```rust
/// use civic_geo::{GeoPoint, estimate_route};
///
/// let origin = GeoPoint::new(13.70, -89.20);
/// let destination = GeoPoint::new(13.80, -89.20);
///
/// let route = estimate_route(&origin, &destination);
/// assert!((route.distance_km - 11.12).abs() < 0.01);
/// assert!((route.duration_min - route.distance_km * 1.5).abs() < 1e-9);
/// ```
pub fn estimate_route(origin: &GeoPoint, destination: &GeoPoint) -> RouteEstimate {
    estimate_route_with_config(origin, destination, &RouteConfig::default())
}

/// Estimate a route with a custom average speed.
///
/// A non-positive speed yields a zero duration rather than infinity.
pub fn estimate_route_with_config(
    origin: &GeoPoint,
    destination: &GeoPoint,
    config: &RouteConfig,
) -> RouteEstimate {
    let distance_km = distance_km(origin, destination);
    let duration_min = if config.average_speed_kmh > 0.0 {
        distance_km / config.average_speed_kmh * 60.0
    } else {
        0.0
    };

    let lats = (origin.latitude.min(destination.latitude), origin.latitude.max(destination.latitude));
    let lngs = (origin.longitude.min(destination.longitude), origin.longitude.max(destination.longitude));

    RouteEstimate {
        distance_km,
        duration_min,
        bounds: Bounds { min_lat: lats.0, max_lat: lats.1, min_lng: lngs.0, max_lng: lngs.1 },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
