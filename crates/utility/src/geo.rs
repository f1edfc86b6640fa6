pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Sphere radius used by EPSG:3857 (Web Mercator).
pub const WEB_MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Latitudes beyond this are outside the Web Mercator square.
pub const WEB_MERCATOR_MAX_LATITUDE: f64 = 85.051_128_779_806_59;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
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

/// Web Mercator coordinates (EPSG:3857) in projected meters.
pub fn web_mercator(longitude: f64, latitude: f64) -> (f64, f64) {
    let latitude =
        latitude.clamp(-WEB_MERCATOR_MAX_LATITUDE, WEB_MERCATOR_MAX_LATITUDE);
    let x = WEB_MERCATOR_RADIUS_M * to_radians(longitude);
    let y = WEB_MERCATOR_RADIUS_M
        * (std::f64::consts::FRAC_PI_4 + to_radians(latitude) / 2.0)
            .tan()
            .ln();
    (x, y)
}

/// A Web Mercator plane rescaled to true ground meters at one reference
/// latitude.
///
/// Plain EPSG:3857 meters grow by `1 / cos(latitude)` away from the equator.
/// Multiplying by `cos(reference_latitude)` brings planar distances near the
/// reference latitude back to ground meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorFrame {
    scale: f64,
}

impl MercatorFrame {
    pub fn new(reference_latitude: f64) -> Self {
        let latitude = reference_latitude
            .clamp(-WEB_MERCATOR_MAX_LATITUDE, WEB_MERCATOR_MAX_LATITUDE);
        Self {
            scale: to_radians(latitude).cos(),
        }
    }

    /// Unscaled EPSG:3857.
    pub fn web_mercator() -> Self {
        Self { scale: 1.0 }
    }

    /// Frame with true scale at the mean latitude of the given coordinates.
    pub fn centered_on<I>(latitudes: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (sum, count) = latitudes
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), lat| (sum + lat, count + 1));
        if count == 0 {
            Self::web_mercator()
        } else {
            Self::new(sum / count as f64)
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let (x, y) = web_mercator(longitude, latitude);
        (x * self.scale, y * self.scale)
    }
}

impl Default for MercatorFrame {
    fn default() -> Self {
        Self::web_mercator()
    }
}
