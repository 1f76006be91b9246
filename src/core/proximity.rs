use crate::core::geo::GeoPoint;

/// Half-width of the box, in degrees, on each axis.
pub const TOLERANCE_DEG: f64 = 5.0;

/// Axis-aligned box test: both the latitude and the longitude difference must
/// be within [`TOLERANCE_DEG`]. No great-circle distance and no wrap at the
/// ±180° seam, so observers next to the date line can miss a nearby pass.
pub fn within_tolerance_box(observer: GeoPoint, spacecraft: GeoPoint) -> bool {
    (observer.lat - spacecraft.lat).abs() <= TOLERANCE_DEG
        && (observer.lon - spacecraft.lon).abs() <= TOLERANCE_DEG
}
