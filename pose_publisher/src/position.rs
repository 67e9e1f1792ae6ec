//! Points in the map's fixed frame.

/// Point in the map's fixed frame, in meters. X grows east, Y grows north.
pub type MapPoint = geo_types::Point;

/// Construct a [`MapPoint`] from fixed-frame coordinates in meters.
pub fn map_point(x: f64, y: f64) -> MapPoint {
    MapPoint::new(x, y)
}
