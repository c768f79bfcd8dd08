//! The in-memory store of map locations.
//!
//! The store is a plain owned struct with no interior locking; the HTTP
//! layer wraps it in `Arc<RwLock<...>>`. Features keep their insertion
//! order, lookups compare ids linearly, and nothing is persisted: the store
//! lives exactly as long as the process and every fresh process starts from
//! the same two seed locations.

use crate::{Feature, FeatureCollection, PointGeometry, generate_id};
use serde_json::{Map, Value};

/// Outcome of an upsert: the (possibly generated) id and whether an existing
/// feature was replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpsertOutcome {
	pub id: String,
	pub replaced: bool,
}

/// The authoritative in-memory collection of location features.
#[derive(Clone, Debug, Default)]
pub struct LocationStore {
	features: Vec<Feature>,
}

impl LocationStore {
	pub fn new() -> Self {
		Self { features: Vec::new() }
	}

	/// A store preloaded with the two example locations a fresh process
	/// starts with.
	pub fn seeded() -> Self {
		let mut store = Self::new();
		store.upsert(
			Some("miradouro-da-graca".to_string()),
			PointGeometry::new(-9.1302, 38.7163),
			properties(vec![
				("name", Value::from("Miradouro da Graça")),
				("category", Value::from("viewpoint")),
				("rating", Value::from(4.7)),
			]),
		);
		store.upsert(
			Some("time-out-market".to_string()),
			PointGeometry::new(-9.1460, 38.7067),
			properties(vec![
				("name", Value::from("Time Out Market")),
				("category", Value::from("food")),
				("rating", Value::from(4.4)),
			]),
		);
		store
	}

	/// Every stored feature in insertion order.
	pub fn features(&self) -> &[Feature] {
		&self.features
	}

	pub fn len(&self) -> usize {
		self.features.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	pub fn find(&self, id: &str) -> Option<&Feature> {
		self.features.iter().find(|feature| feature.id == id)
	}

	/// Insert a feature, or replace the stored one with the same id.
	///
	/// A missing id gets a generated one. Replacement keeps the feature's
	/// position in the listing order.
	pub fn upsert(&mut self, id: Option<String>, geometry: PointGeometry, properties: Map<String, Value>) -> UpsertOutcome {
		let id = id.unwrap_or_else(generate_id);
		let feature = Feature::new(id.clone(), geometry, properties);

		if let Some(existing) = self.features.iter_mut().find(|f| f.id == id) {
			*existing = feature;
			UpsertOutcome { id, replaced: true }
		} else {
			self.features.push(feature);
			UpsertOutcome { id, replaced: false }
		}
	}

	/// Shallow-merge `properties` into the feature and/or replace its
	/// geometry wholesale. Returns `None` when the id is unknown.
	pub fn patch(
		&mut self,
		id: &str,
		properties: Option<Map<String, Value>>,
		geometry: Option<PointGeometry>,
	) -> Option<&Feature> {
		let feature = self.features.iter_mut().find(|f| f.id == id)?;

		if let Some(patch) = properties {
			for (key, value) in patch {
				feature.properties.insert(key, value);
			}
		}
		if let Some(geometry) = geometry {
			feature.geometry = geometry;
		}

		Some(&*feature)
	}

	/// Remove and return the feature with the given id.
	pub fn remove(&mut self, id: &str) -> Option<Feature> {
		let index = self.features.iter().position(|f| f.id == id)?;
		Some(self.features.remove(index))
	}

	pub fn to_collection(&self) -> FeatureCollection {
		FeatureCollection::from(self.features.clone())
	}
}

fn properties(entries: Vec<(&str, Value)>) -> Map<String, Value> {
	entries.into_iter().map(|(key, value)| (key.to_string(), value)).collect()
}
