//! azimuths of the first and last segments of an edge geometry, used
//! for the compact angle encoding on street edges.

use geo::{Coord, LineString};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AzimuthError {
    #[error("line string has fewer than two coordinates")]
    TooFewCoordinates,
    #[error("line string has no segment of nonzero length")]
    DegenerateGeometry,
}

/// azimuth in radians, clockwise from North, range (-pi, pi].
fn azimuth(from: &Coord<f64>, to: &Coord<f64>) -> Option<f64> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(dx.atan2(dy))
}

/// azimuth of the first nonzero-length segment.
pub fn first_segment_azimuth(geometry: &LineString<f64>) -> Result<f64, AzimuthError> {
    let coords = &geometry.0;
    if coords.len() < 2 {
        return Err(AzimuthError::TooFewCoordinates);
    }
    coords
        .windows(2)
        .find_map(|pair| azimuth(&pair[0], &pair[1]))
        .ok_or(AzimuthError::DegenerateGeometry)
}

/// azimuth of the last nonzero-length segment.
pub fn last_segment_azimuth(geometry: &LineString<f64>) -> Result<f64, AzimuthError> {
    let coords = &geometry.0;
    if coords.len() < 2 {
        return Err(AzimuthError::TooFewCoordinates);
    }
    coords
        .windows(2)
        .rev()
        .find_map(|pair| azimuth(&pair[0], &pair[1]))
        .ok_or(AzimuthError::DegenerateGeometry)
}
