pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// A value that may or may not be readable as a coordinate in degrees.
///
/// Raw values coming from external tables are not trusted, so every
/// conversion is fallible and never panics.
pub trait ToCoordinate {
    fn to_coordinate(&self) -> Option<f64>;
}

impl ToCoordinate for f64 {
    fn to_coordinate(&self) -> Option<f64> {
        Some(*self)
    }
}

impl ToCoordinate for f32 {
    fn to_coordinate(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl ToCoordinate for i64 {
    fn to_coordinate(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl ToCoordinate for i32 {
    fn to_coordinate(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl ToCoordinate for str {
    fn to_coordinate(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()
    }
}

impl ToCoordinate for String {
    fn to_coordinate(&self) -> Option<f64> {
        self.as_str().to_coordinate()
    }
}

impl<T: ToCoordinate + ?Sized> ToCoordinate for &T {
    fn to_coordinate(&self) -> Option<f64> {
        (**self).to_coordinate()
    }
}

impl<T: ToCoordinate> ToCoordinate for Option<T> {
    fn to_coordinate(&self) -> Option<f64> {
        self.as_ref().and_then(|value| value.to_coordinate())
    }
}

/// An axis aligned latitude/longitude rectangle. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

/// Approximate rectangle around the Philippines. Not a precise border.
pub const PHILIPPINES: BoundingBox = BoundingBox {
    min_latitude: 4.0,
    max_latitude: 22.0,
    min_longitude: 116.0,
    max_longitude: 127.5,
};

impl BoundingBox {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }

    /// Like `contains`, but accepts unparsed values and answers `false` for
    /// anything that is not a number.
    pub fn contains_raw<A, B>(&self, latitude: A, longitude: B) -> bool
    where
        A: ToCoordinate,
        B: ToCoordinate,
    {
        match (latitude.to_coordinate(), longitude.to_coordinate()) {
            (Some(latitude), Some(longitude)) => self.contains(latitude, longitude),
            _ => false,
        }
    }
}

/// Returns `true` if both values are numbers within the valid latitude and
/// longitude ranges. Unparsable values are invalid, never an error.
pub fn is_valid_coordinate<A, B>(latitude: A, longitude: B) -> bool
where
    A: ToCoordinate,
    B: ToCoordinate,
{
    match (latitude.to_coordinate(), longitude.to_coordinate()) {
        (Some(latitude), Some(longitude)) => {
            (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude)
                && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
        }
        _ => false,
    }
}

pub fn is_in_philippines<A, B>(latitude: A, longitude: B) -> bool
where
    A: ToCoordinate,
    B: ToCoordinate,
{
    PHILIPPINES.contains_raw(latitude, longitude)
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn haversine_distance_meters(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    haversine_distance(latitude_1, longitude_1, latitude_2, longitude_2) * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinate_accepts_range_bounds() {
        assert!(is_valid_coordinate(90.0, 180.0));
        assert!(is_valid_coordinate(-90.0, -180.0));
        assert!(is_valid_coordinate(0, 0));
        assert!(is_valid_coordinate("14.6", " 121.0 "));
    }

    #[test]
    fn valid_coordinate_rejects_out_of_range() {
        assert!(!is_valid_coordinate(90.0001, 0.0));
        assert!(!is_valid_coordinate(-91.0, 0.0));
        assert!(!is_valid_coordinate(0.0, 180.5));
        assert!(!is_valid_coordinate(0.0, -181.0));
        assert!(!is_valid_coordinate(91, 120));
    }

    #[test]
    fn valid_coordinate_fails_closed_on_garbage() {
        assert!(!is_valid_coordinate("north", 120.0));
        assert!(!is_valid_coordinate(10.0, ""));
        assert!(!is_valid_coordinate(None::<f64>, 120.0));
        assert!(!is_valid_coordinate(Some("10.0"), None::<&str>));
        assert!(!is_valid_coordinate(f64::NAN, 0.0));
        assert!(!is_valid_coordinate(0.0, f64::INFINITY));
        assert!(!is_valid_coordinate("inf", "0"));
    }

    #[test]
    fn philippines_box_is_inclusive() {
        assert!(is_in_philippines(4.0, 116.0));
        assert!(is_in_philippines(22.0, 127.5));
        assert!(is_in_philippines(14.6, 121.0));
        assert!(!is_in_philippines(3.99, 120.0));
        assert!(!is_in_philippines(22.01, 120.0));
        assert!(!is_in_philippines(10.0, 115.99));
        assert!(!is_in_philippines(10.0, 127.51));
        assert!(!is_in_philippines(40.7128, -74.0060));
    }

    #[test]
    fn philippines_box_fails_closed_on_garbage() {
        assert!(!is_in_philippines("ten", 120.0));
        assert!(!is_in_philippines(Some(10.0), None::<f64>));
        assert!(!is_in_philippines(f64::NAN, 120.0));
        assert!(is_in_philippines(Some("10"), Some("120")));
    }

    #[test]
    fn haversine_distance_of_one_degree_latitude() {
        let distance = haversine_distance(10.0, 120.0, 11.0, 120.0);
        assert!((distance - 111.19).abs() < 0.1, "got {distance}");
        assert_eq!(haversine_distance(10.0, 120.0, 10.0, 120.0), 0.0);
    }
}
