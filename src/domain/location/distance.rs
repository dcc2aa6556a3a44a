// SPDX-License-Identifier: MPL-2.0
//! Great-circle distance and radius search.
//!
//! Used to find nearby items (venues, events) around an acquired location.

use super::Coordinates;

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Haversine distance between two points, in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h marginally above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// A circular search area around a center point.
///
/// # Example
///
/// ```
/// use geofix::domain::location::{Coordinates, RadiusQuery};
///
/// let query = RadiusQuery::new(Coordinates::new(48.8566, 2.3522), 5.0);
/// assert!(query.contains(Coordinates::new(48.8606, 2.3376))); // Louvre
/// assert!(!query.contains(Coordinates::new(48.8049, 2.1204))); // Versailles
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusQuery {
    center: Coordinates,
    radius_km: f64,
}

impl RadiusQuery {
    /// Creates a query. A negative or non-finite radius matches nothing.
    #[must_use]
    pub fn new(center: Coordinates, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    #[must_use]
    pub fn center(&self) -> Coordinates {
        self.center
    }

    #[must_use]
    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    fn is_searchable(&self) -> bool {
        self.radius_km.is_finite() && self.radius_km >= 0.0 && self.center.is_valid()
    }

    /// Returns the distance to `point` if it lies inside the radius.
    #[must_use]
    pub fn distance_within(&self, point: Coordinates) -> Option<f64> {
        if !self.is_searchable() || !point.is_valid() {
            return None;
        }
        let distance = haversine_km(self.center, point);
        (distance <= self.radius_km).then_some(distance)
    }

    /// Returns whether `point` lies inside the radius.
    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        self.distance_within(point).is_some()
    }

    /// Keeps the items inside the radius, paired with their distance and
    /// sorted nearest first.
    pub fn filter_sorted<T, I, F>(&self, items: I, position_of: F) -> Vec<(T, f64)>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> Coordinates,
    {
        let mut hits: Vec<(T, f64)> = items
            .into_iter()
            .filter_map(|item| {
                let distance = self.distance_within(position_of(&item))?;
                Some((item, distance))
            })
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    const PARIS: (f64, f64) = (48.8566, 2.3522);
    const LONDON: (f64, f64) = (51.5074, -0.1278);

    fn at((lat, lon): (f64, f64)) -> Coordinates {
        Coordinates::new(lat, lon)
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_abs_diff_eq!(haversine_km(at(PARIS), at(PARIS)), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn paris_to_london_is_about_344_km() {
        let distance = haversine_km(at(PARIS), at(LONDON));
        assert_abs_diff_eq!(distance, 343.5, epsilon = 1.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let forth = haversine_km(at(PARIS), at(LONDON));
        let back = haversine_km(at(LONDON), at(PARIS));
        assert_abs_diff_eq!(forth, back, epsilon = 1e-9);
    }

    #[test]
    fn antipodal_points_are_half_circumference_apart() {
        let distance = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert_abs_diff_eq!(distance, std::f64::consts::PI * EARTH_RADIUS_KM, epsilon = 1e-6);
    }

    #[test]
    fn filter_sorted_orders_nearest_first() {
        let query = RadiusQuery::new(at(PARIS), 500.0);
        let venues = vec![
            ("london", at(LONDON)),
            ("louvre", Coordinates::new(48.8606, 2.3376)),
            ("berlin", Coordinates::new(52.52, 13.405)),
        ];

        let hits = query.filter_sorted(venues, |(_, position)| *position);
        let names: Vec<_> = hits.iter().map(|((name, _), _)| *name).collect();

        assert_eq!(names, vec!["louvre", "london"]);
        assert!(hits[0].1 < hits[1].1);
    }

    #[test]
    fn invalid_radius_matches_nothing() {
        assert!(!RadiusQuery::new(at(PARIS), -1.0).contains(at(PARIS)));
        assert!(!RadiusQuery::new(at(PARIS), f64::NAN).contains(at(PARIS)));
    }

    #[test]
    fn zero_radius_matches_only_the_center() {
        let query = RadiusQuery::new(at(PARIS), 0.0);
        assert!(query.contains(at(PARIS)));
        assert!(!query.contains(at(LONDON)));
    }
}
