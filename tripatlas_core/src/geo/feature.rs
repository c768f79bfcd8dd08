use super::{PointGeometry, normalize_id};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A single point-shaped location record with open-ended metadata.
///
/// Stored features always carry a string id; `properties` is an arbitrary
/// JSON object with no schema beyond that.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
	pub id: String,
	pub geometry: PointGeometry,
	pub properties: Map<String, Value>,
}

impl Feature {
	pub fn new(id: String, geometry: PointGeometry, properties: Map<String, Value>) -> Self {
		Self {
			id,
			geometry,
			properties,
		}
	}
}

impl Serialize for Feature {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("Feature", 4)?;
		state.serialize_field("type", "Feature")?;
		state.serialize_field("id", &self.id)?;
		state.serialize_field("geometry", &self.geometry)?;
		state.serialize_field("properties", &self.properties)?;
		state.end()
	}
}

impl<'de> Deserialize<'de> for Feature {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		struct FeatureHelper {
			#[serde(rename = "type", default)]
			feature_type: Option<String>,
			#[serde(default)]
			id: Option<Value>,
			geometry: PointGeometry,
			#[serde(default)]
			properties: Map<String, Value>,
		}

		let helper = FeatureHelper::deserialize(deserializer)?;

		if let Some(tag) = &helper.feature_type {
			if tag != "Feature" {
				return Err(serde::de::Error::custom(format!("type must be 'Feature', not '{tag}'")));
			}
		}

		let id = normalize_id(helper.id.as_ref()).ok_or_else(|| serde::de::Error::missing_field("id"))?;

		Ok(Feature {
			id,
			geometry: helper.geometry,
			properties: helper.properties,
		})
	}
}
