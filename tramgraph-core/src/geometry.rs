//! Planar projection and ellipsoidal measurement helpers used by the
//! densifier and the inspector.

use geo::{Bearing, Coord, Distance, Geodesic, Point};
use itertools::Itertools;

// WGS84 ellipsoid.
const SEMI_MAJOR_AXIS_M: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Local planar projection centered on the network.
///
/// Scales latitude/longitude offsets by the WGS84 meridional and transverse
/// curvature radii at the center, which keeps planar lengths accurate to a
/// few ppm at city scale. One instance is built per transformer so that every
/// densification call measures paths in the same plane.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocalProjection {
    center_lat: f64,
    center_lon: f64,
    meters_per_deg_lat: f64,
    meters_per_deg_lon: f64,
}

impl LocalProjection {
    /// Projection centered on the mean coordinate of `points` (lat, lon).
    /// Falls back to the null island origin when `points` is empty.
    pub(crate) fn centered_on(points: impl Iterator<Item = (f64, f64)>) -> Self {
        let (mut lat_sum, mut lon_sum, mut count) = (0.0_f64, 0.0_f64, 0_usize);
        for (lat, lon) in points {
            lat_sum += lat;
            lon_sum += lon;
            count += 1;
        }
        let (center_lat, center_lon) = if count == 0 {
            (0.0, 0.0)
        } else {
            (lat_sum / count as f64, lon_sum / count as f64)
        };

        let e2 = FLATTENING * (2.0 - FLATTENING);
        let sin_lat = center_lat.to_radians().sin();
        let denom = 1.0 - e2 * sin_lat * sin_lat;
        // Meridional radius M and prime-vertical radius N at the center.
        let meridional = SEMI_MAJOR_AXIS_M * (1.0 - e2) / denom.powf(1.5);
        let transverse = SEMI_MAJOR_AXIS_M / denom.sqrt();

        Self {
            center_lat,
            center_lon,
            meters_per_deg_lat: meridional.to_radians(),
            meters_per_deg_lon: (transverse * center_lat.to_radians().cos()).to_radians(),
        }
    }

    pub(crate) fn project(&self, lat: f64, lon: f64) -> Coord<f64> {
        Coord {
            x: (lon - self.center_lon) * self.meters_per_deg_lon,
            y: (lat - self.center_lat) * self.meters_per_deg_lat,
        }
    }

    /// Inverse of [`Self::project`]; returns (lat, lon).
    pub(crate) fn unproject(&self, coord: Coord<f64>) -> (f64, f64) {
        (
            coord.y / self.meters_per_deg_lat + self.center_lat,
            coord.x / self.meters_per_deg_lon + self.center_lon,
        )
    }
}

/// Interior sample points for a skeleton path, at equal planar-length
/// intervals so spacing is even regardless of the original node density.
///
/// Returns an empty vector when the path's planar length does not exceed
/// `max_distance` (the edge is emitted unchanged); otherwise `m - 1` points
/// with `m = ceil(length / max_distance)`, as (lat, lon).
pub(crate) fn evenly_spaced_points(
    path: &[Point<f64>],
    max_distance: f64,
    projection: &LocalProjection,
) -> Vec<(f64, f64)> {
    let planar: Vec<Coord<f64>> = path.iter().map(|p| projection.project(p.y(), p.x())).collect();
    let length: f64 = planar
        .iter()
        .tuple_windows()
        .map(|(a, b)| (b.x - a.x).hypot(b.y - a.y))
        .sum();

    if length <= max_distance {
        return Vec::new();
    }

    let segment_count = (length / max_distance).ceil() as usize;
    let segment_size = length / segment_count as f64;

    (1..segment_count)
        .map(|i| projection.unproject(point_along(&planar, i as f64 * segment_size)))
        .collect()
}

/// Point at `target` planar distance along a polyline, by linear
/// interpolation within the containing segment.
fn point_along(polyline: &[Coord<f64>], target: f64) -> Coord<f64> {
    let mut remaining = target;
    for (a, b) in polyline.iter().tuple_windows() {
        let segment = (b.x - a.x).hypot(b.y - a.y);
        if remaining <= segment && segment > 0.0 {
            let t = remaining / segment;
            return Coord {
                x: a.x + t * (b.x - a.x),
                y: a.y + t * (b.y - a.y),
            };
        }
        remaining -= segment;
    }
    // Accumulated float error past the last segment: clamp to the endpoint.
    *polyline.last().expect("polyline has at least two points")
}

/// Forward azimuth (degrees, −180..180) and ellipsoidal distance (meters)
/// from `source` to `destination` on the WGS84 ellipsoid.
pub(crate) fn azimuth_and_length(source: Point<f64>, destination: Point<f64>) -> (f64, f64) {
    let bearing = Geodesic.bearing(source, destination);
    let azimuth = if bearing > 180.0 {
        bearing - 360.0
    } else {
        bearing
    };
    (azimuth, Geodesic.distance(source, destination))
}

/// Ellipsoidal length of a node path, summed hop by hop.
pub(crate) fn path_length(points: impl Iterator<Item = Point<f64>>) -> f64 {
    points
        .tuple_windows()
        .map(|(a, b)| Geodesic.distance(a, b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_roundtrips() {
        let projection = LocalProjection::centered_on([(50.06, 19.94)].into_iter());
        let (lat, lon) = projection.unproject(projection.project(50.0712, 19.9459));
        assert!((lat - 50.0712).abs() < 1e-12);
        assert!((lon - 19.9459).abs() < 1e-12);
    }

    #[test]
    fn planar_length_matches_geodesic_locally() {
        let a = Point::new(19.94, 50.06);
        let b = Point::new(19.96, 50.07);
        let projection = LocalProjection::centered_on([(50.065, 19.95)].into_iter());
        let pa = projection.project(a.y(), a.x());
        let pb = projection.project(b.y(), b.x());
        let planar = (pb.x - pa.x).hypot(pb.y - pa.y);
        let geodesic = Geodesic.distance(a, b);
        assert!((planar - geodesic).abs() / geodesic < 1e-4);
    }

    #[test]
    fn samples_are_evenly_spaced() {
        let projection = LocalProjection::centered_on([(0.0, 0.0)].into_iter());
        // ~1113 m due east along the equator.
        let path = [Point::new(0.0, 0.0), Point::new(0.01, 0.0)];
        let samples = evenly_spaced_points(&path, 200.0, &projection);
        assert_eq!(samples.len(), 5);

        let mut previous = path[0];
        for &(lat, lon) in &samples {
            let next = Point::new(lon, lat);
            let hop = Geodesic.distance(previous, next);
            assert!((hop - 1113.2 / 6.0).abs() < 1.0, "hop was {hop}");
            previous = next;
        }
    }

    #[test]
    fn short_path_yields_no_samples() {
        let projection = LocalProjection::centered_on([(0.0, 0.0)].into_iter());
        let path = [Point::new(0.0, 0.0), Point::new(0.0001, 0.0)];
        assert!(evenly_spaced_points(&path, 50.0, &projection).is_empty());
    }

    #[test]
    fn azimuth_stays_in_signed_half_turn() {
        let origin = Point::new(19.94, 50.06);
        for destination in [
            Point::new(19.94, 50.07),
            Point::new(19.95, 50.06),
            Point::new(19.94, 50.05),
            Point::new(19.93, 50.06),
        ] {
            let (azimuth, length) = azimuth_and_length(origin, destination);
            assert!((-180.0..=180.0).contains(&azimuth), "azimuth {azimuth}");
            assert!(length > 0.0);
        }
    }
}
