use serde::{Deserialize, Serialize};

/// GeoJSON geometry of a map location.
///
/// The site only deals in point locations, so the `type` tag is pinned to
/// `"Point"`; any other geometry type fails to deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
	#[serde(rename = "type")]
	pub geometry_type: PointType,

	/// `[longitude, latitude]`, longitude first per GeoJSON.
	pub coordinates: [f64; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointType {
	Point,
}

impl PointGeometry {
	pub fn new(lon: f64, lat: f64) -> Self {
		Self {
			geometry_type: PointType::Point,
			coordinates: [lon, lat],
		}
	}

	pub fn lon(&self) -> f64 {
		self.coordinates[0]
	}

	pub fn lat(&self) -> f64 {
		self.coordinates[1]
	}
}
