//! Display strings for popups and the route panel (Spanish locale).

/// Distance in kilometers as `"N metros"` below 1 km, `"N.NN km"` otherwise.
///
/// # Example
///
/// ```rust
/// use civic_geo::format_distance;
///
/// assert_eq!(format_distance(0.5), "500 metros");
/// assert_eq!(format_distance(2.345), "2.35 km");
/// ```
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} metros", (km * 1000.0).round() as i64)
    } else {
        format!("{:.2} km", km)
    }
}

/// Minutes as `"N min"` below an hour, `"Hh Mmin"` otherwise.
///
/// The hour branch is chosen on the raw value, so 59.6 reads `"60 min"`.
/// Past an hour the total is rounded before splitting, so 119.7 reads
/// `"2h 0min"` and never `"1h 60min"`. Negative input reads as 0.
pub fn format_duration(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    let total = minutes.round() as u64;
    if minutes < 60.0 {
        format!("{} min", total)
    } else {
        format!("{}h {}min", total / 60, total % 60)
    }
}

/// Average response time, same composition as [`format_duration`].
pub fn format_response_time(minutes: f64) -> String {
    format_duration(minutes)
}

/// Emergency rate as `"N.N por 1000 hab."`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.1} por 1000 hab.", rate)
}

/// Population density as `"N.N hab/km²"`.
pub fn format_density(density: f64) -> String {
    format!("{:.1} hab/km²", density)
}

/// Zone radius in meters as `"N.N km"`.
pub fn format_radius(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}
