//! # Facility Locator
//!
//! Nearest-neighbour search over facilities, zones or plain points, plus an
//! R-tree index for "what is within X km" coverage queries.
//!
//! The linear [`nearest`] scan is the reference: it is deterministic and breaks
//! ties by input order, which is what auto-selecting a default facility needs.
//! [`FacilityIndex`] exists for radius queries over many facilities; its
//! candidates are confirmed with [`distance_km`] so both paths agree.

use std::f64::consts::FRAC_PI_2;

use log::{debug, trace};
use rstar::{RTree, RTreeObject, AABB};

use crate::geo_utils::{distance_km, EARTH_RADIUS_KM};
use crate::models::{EmergencyZone, FacilityKind, MedicalCenter};
use crate::{GeoPoint, Located, UserLocation};

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for facility coverage.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageConfig {
    /// Radius served by each facility, in meters.
    /// Default: 1000.0
    pub coverage_radius_meters: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self { coverage_radius_meters: 1000.0 }
    }
}

/// Configuration for listing hospitals near a zone.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbyConfig {
    /// Maximum number of hospitals returned.
    /// Default: 3
    pub max_hospitals: usize,
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self { max_hospitals: 3 }
    }
}

// ============================================================================
// Linear Search
// ============================================================================

/// A candidate found by a search, with its distance from the query.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearestMatch {
    /// Index into the candidate slice
    pub index: usize,
    pub distance_km: f64,
}

/// Find the candidate closest to `query`.
///
/// Returns `None` when there is no query point or no candidates. When several
/// candidates are equally close, the earliest one wins.
///
/// # Example
///
/// ```rust
/// use civic_geo::{GeoPoint, nearest};
///
/// let centers = vec![
///     GeoPoint::new(13.9944, -89.5594),
///     GeoPoint::new(13.6929, -89.2182),
///     GeoPoint::new(13.4833, -88.1833),
/// ];
/// let user = GeoPoint::new(13.70, -89.21);
///
/// let found = nearest(Some(&user), &centers).unwrap();
/// assert_eq!(found.index, 1);
/// assert!(nearest(None, &centers).is_none());
/// ```
pub fn nearest<T: Located>(query: Option<&GeoPoint>, candidates: &[T]) -> Option<NearestMatch> {
    let query = query?;
    let mut best: Option<NearestMatch> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let d = distance_km(query, &candidate.location());
        trace!("[Locator] candidate {} at {:.3} km", index, d);
        let closer = match best {
            Some(ref current) => d < current.distance_km,
            None => !d.is_nan(),
        };
        if closer {
            best = Some(NearestMatch { index, distance_km: d });
        }
    }

    best
}

/// Nearest medical center to the user, if both are known.
pub fn nearest_center<'a>(
    user: Option<&UserLocation>,
    centers: &'a [MedicalCenter],
) -> Option<&'a MedicalCenter> {
    let position = user.map(|u| u.position);
    nearest(position.as_ref(), centers).map(|m| &centers[m.index])
}

/// Nearest emergency zone (by center point) to the user, if both are known.
pub fn nearest_zone<'a>(
    user: Option<&UserLocation>,
    zones: &'a [EmergencyZone],
) -> Option<&'a EmergencyZone> {
    let position = user.map(|u| u.position);
    nearest(position.as_ref(), zones).map(|m| &zones[m.index])
}

/// Pick the facility to route to.
///
/// An explicit selection wins when it names an existing center. Otherwise the
/// center nearest to the user is the default. `None` when neither applies.
pub fn select_facility<'a>(
    user: Option<&UserLocation>,
    centers: &'a [MedicalCenter],
    selected_id: Option<&str>,
) -> Option<&'a MedicalCenter> {
    if let Some(id) = selected_id {
        if let Some(center) = centers.iter().find(|c| c.id == id) {
            return Some(center);
        }
        debug!("[Locator] Selected facility {} not found, falling back to nearest", id);
    }
    nearest_center(user, centers)
}

/// Hospitals closest to a zone's center, nearest first.
///
/// Only [`FacilityKind::Hospital`] counts. Ties keep input order.
pub fn nearest_hospitals_to_zone<'a>(
    zone: &EmergencyZone,
    centers: &'a [MedicalCenter],
) -> Vec<(&'a MedicalCenter, f64)> {
    nearest_hospitals_to_zone_with_config(zone, centers, &NearbyConfig::default())
}

/// [`nearest_hospitals_to_zone`] with a custom result limit.
pub fn nearest_hospitals_to_zone_with_config<'a>(
    zone: &EmergencyZone,
    centers: &'a [MedicalCenter],
    config: &NearbyConfig,
) -> Vec<(&'a MedicalCenter, f64)> {
    let mut hospitals: Vec<(&MedicalCenter, f64)> = centers
        .iter()
        .filter(|c| c.kind == FacilityKind::Hospital)
        .map(|c| (c, distance_km(&zone.location, &c.location)))
        .collect();

    hospitals.sort_by(|a, b| a.1.total_cmp(&b.1));
    hospitals.truncate(config.max_hospitals);

    if zone.risk_level.is_elevated() && hospitals.is_empty() {
        debug!(
            "[Locator] {} zone {} has no hospital in the snapshot",
            zone.risk_level,
            zone.name
        );
    }

    hospitals
}

// =============================================================================
// R-tree Indexed Facilities
// =============================================================================

/// A facility position with its index for R-tree queries
#[derive(Debug, Clone, Copy)]
struct IndexedFacility {
    idx: usize,
    lat: f64,
    lng: f64,
}

impl RTreeObject for IndexedFacility {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lng, self.lat])
    }
}

/// Padding on every envelope edge, in degrees (about 1 cm).
const ENVELOPE_PADDING_DEG: f64 = 1e-7;

/// Lng/lat boxes that together contain every point within `radius_km` of `point`.
///
/// The latitude half-width is the angular radius. The longitude half-width is
/// `asin(sin d / cos φ)`, the widest longitude a spherical cap reaches, which
/// grows faster than `d / cos φ` near the poles. A cap that contains a pole
/// spans every longitude. Boxes crossing ±180° are split in two.
fn search_envelopes(point: &GeoPoint, radius_km: f64) -> Vec<AABB<[f64; 2]>> {
    let angular = radius_km / EARTH_RADIUS_KM;
    let lat_rad = point.latitude.to_radians();

    let min_lat = (point.latitude - angular.to_degrees() - ENVELOPE_PADDING_DEG).max(-90.0);
    let max_lat = (point.latitude + angular.to_degrees() + ENVELOPE_PADDING_DEG).min(90.0);
    let full_range = || vec![AABB::from_corners([-180.0, min_lat], [180.0, max_lat])];

    if angular >= FRAC_PI_2 - lat_rad.abs() {
        return full_range();
    }

    let half_width = (angular.sin() / lat_rad.cos()).min(1.0).asin().to_degrees() + ENVELOPE_PADDING_DEG;
    if half_width >= 180.0 {
        return full_range();
    }

    let west = point.longitude - half_width;
    let east = point.longitude + half_width;

    if west < -180.0 {
        vec![
            AABB::from_corners([west + 360.0, min_lat], [180.0, max_lat]),
            AABB::from_corners([-180.0, min_lat], [east, max_lat]),
        ]
    } else if east > 180.0 {
        vec![
            AABB::from_corners([west, min_lat], [180.0, max_lat]),
            AABB::from_corners([-180.0, min_lat], [east - 360.0, max_lat]),
        ]
    } else {
        vec![AABB::from_corners([west, min_lat], [east, max_lat])]
    }
}

/// Spatial index over a snapshot of facility positions.
///
/// Build once per render pass and query many times.
///
/// # Example
///
/// ```rust
/// use civic_geo::{GeoPoint, FacilityIndex, CoverageConfig};
///
/// let facilities = vec![GeoPoint::new(13.6929, -89.2182), GeoPoint::new(13.7420, -89.1401)];
/// let index = FacilityIndex::new(&facilities);
///
/// let near = index.within_radius(&GeoPoint::new(13.6935, -89.2182), 1.0);
/// assert_eq!(near.len(), 1);
/// assert_eq!(near[0].index, 0);
///
/// assert!(index.is_covered(&GeoPoint::new(13.6935, -89.2182), &CoverageConfig::default()));
/// ```
pub struct FacilityIndex {
    tree: RTree<IndexedFacility>,
    points: Vec<GeoPoint>,
}

impl FacilityIndex {
    /// Index the positions of `facilities`. Indices in query results refer to this slice.
    pub fn new<T: Located>(facilities: &[T]) -> Self {
        let points: Vec<GeoPoint> = facilities.iter().map(|f| f.location()).collect();
        let entries: Vec<IndexedFacility> = points
            .iter()
            .enumerate()
            .map(|(idx, p)| IndexedFacility { idx, lat: p.latitude, lng: p.longitude })
            .collect();

        debug!("[FacilityIndex] Indexed {} facilities", entries.len());

        Self { tree: RTree::bulk_load(entries), points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Facilities within `radius_km` of `point`, nearest first (ties by index).
    pub fn within_radius(&self, point: &GeoPoint, radius_km: f64) -> Vec<NearestMatch> {
        if radius_km < 0.0 || self.is_empty() {
            return vec![];
        }

        let envelopes = search_envelopes(point, radius_km);
        trace!("[FacilityIndex] {} search envelope(s) for {:.3} km", envelopes.len(), radius_km);

        let mut matches: Vec<NearestMatch> = envelopes
            .iter()
            .flat_map(|envelope| self.tree.locate_in_envelope_intersecting(envelope))
            .filter_map(|entry| {
                let d = distance_km(point, &self.points[entry.idx]);
                (d <= radius_km).then_some(NearestMatch { index: entry.idx, distance_km: d })
            })
            .collect();

        matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km).then(a.index.cmp(&b.index)));
        matches.dedup_by_key(|m| m.index);
        matches
    }

    /// True if at least one facility's coverage circle contains `point`.
    pub fn is_covered(&self, point: &GeoPoint, config: &CoverageConfig) -> bool {
        !self.within_radius(point, config.coverage_radius_meters / 1000.0).is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
