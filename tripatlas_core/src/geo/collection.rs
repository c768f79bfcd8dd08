use super::Feature;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered aggregate of [`Feature`]s, returned for bulk listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
	pub features: Vec<Feature>,
}

impl FeatureCollection {
	pub fn from(features: Vec<Feature>) -> Self {
		Self { features }
	}
}

impl Serialize for FeatureCollection {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("FeatureCollection", 2)?;
		state.serialize_field("type", "FeatureCollection")?;
		state.serialize_field("features", &self.features)?;
		state.end()
	}
}

impl<'de> Deserialize<'de> for FeatureCollection {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		struct CollectionHelper {
			#[serde(rename = "type")]
			collection_type: String,
			#[serde(default)]
			features: Vec<Feature>,
		}

		let helper = CollectionHelper::deserialize(deserializer)?;

		if helper.collection_type != "FeatureCollection" {
			return Err(serde::de::Error::custom(format!(
				"type must be 'FeatureCollection', not '{}'",
				helper.collection_type
			)));
		}

		Ok(FeatureCollection {
			features: helper.features,
		})
	}
}
