//! Defines a struct to represent a bounding box, which is used to represent
//! a 2d square(ish) on the planet's surface. This is attached to a completed
//! route, as it can be used to set the viewport on a map visualization

use geo::Point;
use serde::Serialize;

/// A bounding box for geographical data. Contains the minimum and maximum
/// latitudes & longitudes, defining a 'rectangle' on the surface of the Earth
#[derive(Debug, Serialize, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BBox {
    /// Create a new bounding box based on the north-east and south-west points
    /// of a 'rectangle'
    pub fn from_points(ne: &Point, sw: &Point) -> Self {
        let max_lat = ne.y();
        let min_lat = sw.y();
        let max_lon = ne.x();
        let min_lon = sw.x();

        BBox {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Determine the latitude and longitude which form the centre point of
    /// the bounding box
    pub fn get_centre(&self) -> (f64, f64) {
        let lat_delta = self.max_lat - self.min_lat;
        let lon_delta = self.max_lon - self.min_lon;
        (
            self.min_lat + (lat_delta / 2.0),
            self.min_lon + (lon_delta / 2.0),
        )
    }
}
