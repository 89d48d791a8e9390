//! # Zone Polygons
//!
//! Turns an emergency zone (center + radius + name) into a closed boundary ring
//! for the map.
//!
//! ## Algorithm
//! 1. Look the zone's display name up in a table of hand-authored boundaries
//!    ([`KnownZone`]). Irregular urban districts look wrong as circles.
//! 2. Otherwise synthesize an irregular polygon:
//!    - seed = sum of the name's character codes
//!    - vertex count in `[min_vertices, max_vertices]` chosen from the seed
//!    - a linear-congruential sequence `((seed·(i+1)·9301 + 49297) mod 233280) / 233280`
//!      drives per-vertex radius and angle jitter
//!    - polar offsets are converted with 1° ≈ 111 km
//! 3. Close the ring by repeating the first vertex.
//!
//! Nothing here reads ambient randomness: the same name, center and radius
//! always produce bit-identical rings, so shapes never jitter between renders.
//!
//! Two zones with the same display name get the same shape.

use std::f64::consts::PI;

use geo::{BoundingRect, Coord, LineString};
use log::{debug, trace, warn};

use crate::models::EmergencyZone;
use crate::{Bounds, GeoPoint};

/// Configuration for procedural polygon synthesis.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonConfig {
    /// Fewest distinct vertices in a generated polygon.
    /// Default: 8
    pub min_vertices: usize,

    /// Most distinct vertices in a generated polygon.
    /// Default: 12
    pub max_vertices: usize,

    /// Smallest vertex distance as a fraction of the zone radius.
    /// Default: 0.7
    pub radius_min_factor: f64,

    /// Largest vertex distance as a fraction of the zone radius.
    /// Default: 1.3
    pub radius_max_factor: f64,

    /// Total spread of the per-vertex angle perturbation in radians (±half).
    /// Default: 0.3
    pub angle_jitter: f64,

    /// Meters per degree used to convert radius offsets.
    /// Default: 111000.0
    pub meters_per_degree: f64,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            min_vertices: 8,
            max_vertices: 12,
            radius_min_factor: 0.7,
            radius_max_factor: 1.3,
            angle_jitter: 0.3,
            meters_per_degree: 111_000.0,
        }
    }
}

// ============================================================================
// Known Zones
// ============================================================================

/// Zones with a hand-authored boundary, keyed by exact display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownZone {
    CentroHistoricoSanSalvador,
    SoyapangoNorte,
    MejicanosCentro,
    SantaAnaCentro,
    ChalatenangoRural,
}

impl KnownZone {
    pub const ALL: [KnownZone; 5] = [
        Self::CentroHistoricoSanSalvador,
        Self::SoyapangoNorte,
        Self::MejicanosCentro,
        Self::SantaAnaCentro,
        Self::ChalatenangoRural,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|zone| zone.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CentroHistoricoSanSalvador => "Centro Histórico San Salvador",
            Self::SoyapangoNorte => "Soyapango Norte",
            Self::MejicanosCentro => "Mejicanos Centro",
            Self::SantaAnaCentro => "Santa Ana Centro",
            Self::ChalatenangoRural => "Chalatenango Rural",
        }
    }

    /// Closed boundary as `[lat, lng]` pairs.
    pub fn boundary(&self) -> &'static [[f64; 2]] {
        match self {
            Self::CentroHistoricoSanSalvador => &[
                [13.7050, -89.2250],
                [13.7080, -89.2100],
                [13.6950, -89.2050],
                [13.6900, -89.2150],
                [13.6850, -89.2200],
                [13.6880, -89.2280],
                [13.6950, -89.2300],
                [13.7020, -89.2280],
                [13.7050, -89.2250],
            ],
            Self::SoyapangoNorte => &[
                [13.7550, -89.1500],
                [13.7580, -89.1300],
                [13.7450, -89.1250],
                [13.7350, -89.1300],
                [13.7300, -89.1400],
                [13.7280, -89.1500],
                [13.7320, -89.1580],
                [13.7400, -89.1600],
                [13.7480, -89.1580],
                [13.7550, -89.1500],
            ],
            Self::MejicanosCentro => &[
                [13.7500, -89.2250],
                [13.7520, -89.2100],
                [13.7450, -89.2050],
                [13.7380, -89.2080],
                [13.7320, -89.2150],
                [13.7300, -89.2220],
                [13.7350, -89.2280],
                [13.7420, -89.2300],
                [13.7480, -89.2280],
                [13.7500, -89.2250],
            ],
            Self::SantaAnaCentro => &[
                [14.0050, -89.5700],
                [14.0080, -89.5500],
                [13.9950, -89.5450],
                [13.9850, -89.5500],
                [13.9800, -89.5600],
                [13.9820, -89.5700],
                [13.9880, -89.5750],
                [13.9950, -89.5750],
                [14.0020, -89.5720],
                [14.0050, -89.5700],
            ],
            // Rural, so wider and rougher
            Self::ChalatenangoRural => &[
                [14.0800, -89.0000],
                [14.0900, -88.9000],
                [14.0500, -88.8500],
                [14.0200, -88.8800],
                [13.9800, -88.9200],
                [13.9900, -88.9800],
                [14.0100, -89.0200],
                [14.0400, -89.0100],
                [14.0650, -89.0050],
                [14.0800, -89.0000],
            ],
        }
    }

    pub fn ring(&self) -> Vec<GeoPoint> {
        self.boundary().iter().map(|[lat, lng]| GeoPoint::new(*lat, *lng)).collect()
    }
}

/// How a zone's boundary is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneShape {
    Known(KnownZone),
    Generated { seed: u64 },
}

impl ZoneShape {
    pub fn for_name(name: &str) -> Self {
        match KnownZone::from_name(name) {
            Some(known) => Self::Known(known),
            None => Self::Generated { seed: name_seed(name) },
        }
    }
}

// ============================================================================
// Seeded Generator
// ============================================================================

/// Sum of the name's UTF-16 code units.
///
/// Characters outside the Basic Multilingual Plane count as their two
/// surrogate halves.
pub fn name_seed(name: &str) -> u64 {
    name.encode_utf16().map(u64::from).sum()
}

/// Stateless LCG-style sequence: the i-th value depends only on seed and i.
#[derive(Debug, Clone, Copy)]
struct SeededSequence {
    seed: u64,
}

impl SeededSequence {
    const MULTIPLIER: u64 = 9301;
    const INCREMENT: u64 = 49297;
    const MODULUS: u64 = 233_280;

    /// Value in [0, 1).
    fn value(&self, index: usize) -> f64 {
        let raw = self
            .seed
            .wrapping_mul(index as u64 + 1)
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        (raw % Self::MODULUS) as f64 / Self::MODULUS as f64
    }
}

// ============================================================================
// Polygon Synthesis
// ============================================================================

/// Boundary ring for a zone, using the default [`PolygonConfig`].
///
/// # Example
///
/// ```rust
/// use civic_geo::{zone_polygon, EmergencyZone, GeoPoint, KnownZone, RiskLevel};
///
/// let zone = EmergencyZone {
///     id: "zone-ss-centro".into(),
///     name: "Centro Histórico San Salvador".into(),
///     municipality: "San Salvador".into(),
///     department: "San Salvador".into(),
///     location: GeoPoint::new(13.6966, -89.2180),
///     radius: 2000.0,
///     population: 45_000,
///     emergency_rate: 45.0,
///     risk_level: RiskLevel::Critical,
///     nearest_hospitals: vec![],
///     average_response_time: 14.0,
///     monthly_incidents: 12,
///     yearly_incidents: 140,
///     active: true,
/// };
///
/// let ring = zone_polygon(&zone);
/// assert_eq!(ring.len(), 9);
/// assert_eq!(ring, KnownZone::CentroHistoricoSanSalvador.ring());
/// ```
pub fn zone_polygon(zone: &EmergencyZone) -> Vec<GeoPoint> {
    zone_polygon_with_config(zone, &PolygonConfig::default())
}

/// Boundary ring for a zone with a custom generator configuration.
///
/// Known zones ignore the configuration.
pub fn zone_polygon_with_config(zone: &EmergencyZone, config: &PolygonConfig) -> Vec<GeoPoint> {
    match ZoneShape::for_name(&zone.name) {
        ZoneShape::Known(known) => {
            debug!("[ZonePolygon] {} uses its authored boundary ({} points)", zone.name, known.boundary().len());
            known.ring()
        }
        ZoneShape::Generated { seed } => {
            debug!("[ZonePolygon] {} generated from seed {}", zone.name, seed);
            generate_from_seed(&zone.location, zone.radius, seed, config)
        }
    }
}

/// Synthesize an irregular closed polygon around `center`.
///
/// `radius_meters <= 0` collapses every vertex onto the center.
///
/// # Example
///
/// ```rust
/// use civic_geo::{GeoPoint, PolygonConfig, generate_irregular_polygon};
///
/// let center = GeoPoint::new(13.70, -89.20);
/// let config = PolygonConfig::default();
///
/// let a = generate_irregular_polygon(&center, 2000.0, "Test Zone Alpha", &config);
/// let b = generate_irregular_polygon(&center, 2000.0, "Test Zone Alpha", &config);
/// assert_eq!(a, b);
/// assert_eq!(a.first(), a.last());
/// ```
pub fn generate_irregular_polygon(
    center: &GeoPoint,
    radius_meters: f64,
    name: &str,
    config: &PolygonConfig,
) -> Vec<GeoPoint> {
    generate_from_seed(center, radius_meters, name_seed(name), config)
}

fn generate_from_seed(center: &GeoPoint, radius_meters: f64, seed: u64, config: &PolygonConfig) -> Vec<GeoPoint> {
    let radius = if radius_meters > 0.0 {
        radius_meters
    } else {
        warn!("[ZonePolygon] Non-positive radius {}; polygon collapses to its center", radius_meters);
        0.0
    };

    let sequence = SeededSequence { seed };
    let min_vertices = config.min_vertices.max(3);
    let span = config.max_vertices.saturating_sub(min_vertices) as u64 + 1;
    let n = min_vertices + (seed % span) as usize;

    let factor_range = config.radius_max_factor - config.radius_min_factor;
    let mut points: Vec<GeoPoint> = Vec::with_capacity(n + 1);

    for i in 0..n {
        let angle = (i as f64 / n as f64) * 2.0 * PI;

        let vertex_radius = radius * (config.radius_min_factor + sequence.value(i) * factor_range);
        let vertex_angle = angle + (sequence.value(i + n) - 0.5) * config.angle_jitter;

        let radius_deg = vertex_radius / config.meters_per_degree;
        let point = GeoPoint::new(
            center.latitude + radius_deg * vertex_angle.cos(),
            center.longitude + radius_deg * vertex_angle.sin(),
        );
        trace!("[ZonePolygon] vertex {} r={:.1}m θ={:.3}", i, vertex_radius, vertex_angle);
        points.push(point);
    }

    points.push(points[0]);
    points
}

// ============================================================================
// Ring Utilities
// ============================================================================

/// Even-odd ray-casting test.
///
/// Rings with fewer than 3 vertices contain nothing. Works on closed or open rings.
pub fn point_in_polygon(point: &GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let (lat, lng) = (point.latitude, point.longitude);
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let (lat_i, lng_i) = (ring[i].latitude, ring[i].longitude);
        let (lat_j, lng_j) = (ring[j].latitude, ring[j].longitude);

        if (lng_i > lng) != (lng_j > lng)
            && lat < (lat_j - lat_i) * (lng - lng_i) / (lng_j - lng_i) + lat_i
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Approximate area enclosed by a closed ring, in km².
///
/// Spherical-excess style sum of longitude deltas weighted by latitude sines,
/// scaled by R². Good enough for display, not for surveying.
pub fn polygon_area_km2(ring: &[GeoPoint]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let sum: f64 = ring
        .windows(2)
        .map(|w| {
            let delta_lng = (w[1].longitude - w[0].longitude).to_radians();
            delta_lng * (2.0 + w[0].latitude.to_radians().sin() + w[1].latitude.to_radians().sin())
        })
        .sum();

    (sum * crate::geo_utils::EARTH_RADIUS_KM.powi(2) / 2.0).abs()
}

/// Convert a ring to a `geo` line string (x = longitude, y = latitude).
pub fn to_line_string(ring: &[GeoPoint]) -> LineString<f64> {
    LineString::new(ring.iter().map(|p| Coord { x: p.longitude, y: p.latitude }).collect())
}

/// True for a non-empty ring whose first and last points coincide.
pub fn is_closed(ring: &[GeoPoint]) -> bool {
    !ring.is_empty() && to_line_string(ring).is_closed()
}

/// Bounding box of a ring; `None` when empty.
pub fn ring_bounds(ring: &[GeoPoint]) -> Option<Bounds> {
    let rect = to_line_string(ring).bounding_rect()?;
    Some(Bounds {
        min_lat: rect.min().y,
        max_lat: rect.max().y,
        min_lng: rect.min().x,
        max_lng: rect.max().x,
    })
}

// ============================================================================
// Tests
// ============================================================================
