//! Great-circle distance and radius filtering.

use super::GeoPoint;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius within which a new event reports its neighbours.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 20.0;

/// Anything that sits at a single point on the map.
pub trait Located {
    /// Returns the item's position.
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

/// A candidate that passed the radius filter, with its distance.
#[derive(Debug, Clone, Copy)]
pub struct Proximity<'a, T> {
    /// The matching candidate.
    pub item: &'a T,
    /// Great-circle distance from the reference point.
    pub distance_km: f64,
}

/// Haversine distance between two points in kilometres.
#[must_use]
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Returns the candidates whose distance to `reference` is at most
/// `radius_km`, in input order.
#[must_use]
pub fn within_radius<'a, T: Located>(
    reference: GeoPoint,
    candidates: &'a [T],
    radius_km: f64,
) -> Vec<Proximity<'a, T>> {
    candidates
        .iter()
        .filter_map(|item| {
            let distance_km = distance_km(reference, item.location());
            (distance_km <= radius_km).then_some(Proximity { item, distance_km })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const KM_PER_DEGREE_LAT: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

    fn offset_north(p: GeoPoint, km: f64) -> GeoPoint {
        GeoPoint::new(p.latitude + km / KM_PER_DEGREE_LAT, p.longitude)
    }

    #[test]
    fn distance_to_self_is_zero() {
        for p in [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(34.1526, 77.5771),
            GeoPoint::new(-45.0, 170.0),
        ] {
            assert!(distance_km(p, p).abs() < 1e-9);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(34.1526, 77.5771);
        let b = GeoPoint::new(30.0869, 79.3199);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn delhi_to_mumbai() {
        let delhi = GeoPoint::new(28.6139, 77.2090);
        let mumbai = GeoPoint::new(19.0760, 72.8777);
        let d = distance_km(delhi, mumbai);
        assert!((1130.0..1170.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = distance_km(GeoPoint::new(10.0, 20.0), GeoPoint::new(11.0, 20.0));
        assert!((d - KM_PER_DEGREE_LAT).abs() < 1e-6);
    }

    #[test]
    fn radius_includes_15km_and_excludes_25km() {
        let origin = GeoPoint::new(30.0869, 79.3199);
        let near = offset_north(origin, 15.0);
        let far = offset_north(origin, 25.0);

        let candidates = [near, far];
        let hits = within_radius(origin, &candidates, DEFAULT_NEARBY_RADIUS_KM);
        assert_eq!(hits.len(), 1);
        assert_eq!(*hits[0].item, near);
        assert!((hits[0].distance_km - 15.0).abs() < 0.01);
    }

    #[test]
    fn radius_is_inclusive() {
        let origin = GeoPoint::new(0.0, 0.0);
        let candidates = [origin];
        let hits = within_radius(origin, &candidates, 0.0);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn antipodal_points_have_finite_distance() {
        let half_circumference = EARTH_RADIUS_KM * std::f64::consts::PI;
        for i in 0..1000 {
            let lat = -89.0 + f64::from(i) * 0.178;
            let a = GeoPoint::new(lat, 79.3199);
            let b = GeoPoint::new(-lat, -100.6801);
            let d = distance_km(a, b);
            assert!(d.is_finite(), "NaN for latitude {lat}");
            assert!((d - half_circumference).abs() < 1.0, "got {d} for latitude {lat}");

            let candidates = [b];
            assert_eq!(within_radius(a, &candidates, half_circumference + 1.0).len(), 1);
        }
    }

    #[test]
    fn empty_candidates() {
        let hits = within_radius::<GeoPoint>(GeoPoint::new(0.0, 0.0), &[], 20.0);
        assert!(hits.is_empty());
    }
}
