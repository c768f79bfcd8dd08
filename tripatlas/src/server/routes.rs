//! Router composition for the tripatlas server.
//!
//! This module wires handlers into an Axum `Router` without mixing in server
//! lifecycle or CORS logic. It's intentionally tiny and declarative.

use super::{
	handlers::{
		ApiState, StaticHandlerState, create_location, delete_location, get_location, list_locations, patch_location,
		serve_static,
	},
	sources::StaticSource,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::sync::RwLock;
use tripatlas_core::LocationStore;

/// Attach the locations CRUD API.
pub fn add_locations_api_to_app(app: Router, store: Arc<RwLock<LocationStore>>) -> Router {
	let state = ApiState { store };

	let api = Router::new()
		.route("/locations", get(list_locations).post(create_location))
		.route(
			"/locations/{id}",
			get(get_location).patch(patch_location).delete(delete_location),
		)
		.with_state(state);

	app.merge(api)
}

/// Attach static sources as a catch-all fallback.
/// Sources are checked in order; the first one returning data wins.
pub fn add_static_sources_to_app(app: Router, static_sources: &[StaticSource]) -> Router {
	let state = StaticHandlerState {
		sources: static_sources.to_vec(),
	};
	let static_app = Router::new().fallback(get(serve_static)).with_state(state);
	app.merge(static_app)
}

// --- tests -------------------------------------------------------------------
#[cfg(test)]
mod tests {
	use super::*;
	use crate::server::utils::Url;
	use axum::{
		body::Body,
		http::{Method, Request, StatusCode, header},
	};
	use pretty_assertions::assert_eq;
	use serde_json::{Value, json};
	use std::path::Path;
	use tower::ServiceExt as _; // for `oneshot`

	fn seeded_app() -> Router {
		let store = Arc::new(RwLock::new(LocationStore::seeded()));
		add_locations_api_to_app(Router::new(), store)
	}

	async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
		let request = match body {
			Some(value) => Request::builder()
				.method(method)
				.uri(path)
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(value.to_string()))
				.unwrap(),
			None => Request::builder().method(method).uri(path).body(Body::empty()).unwrap(),
		};

		let response = app.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let value = if bytes.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&bytes).unwrap_or(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
		};
		(status, value)
	}

	async fn send_raw(app: &Router, method: Method, path: &str, body: &str) -> StatusCode {
		let request = Request::builder()
			.method(method)
			.uri(path)
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.unwrap();
		app.clone().oneshot(request).await.unwrap().status()
	}

	async fn collection_len(app: &Router) -> usize {
		let (status, body) = send(app, Method::GET, "/locations", None).await;
		assert_eq!(status, StatusCode::OK);
		body["features"].as_array().unwrap().len()
	}

	#[tokio::test]
	async fn listing_returns_seeded_feature_collection() {
		let app = seeded_app();
		let (status, body) = send(&app, Method::GET, "/locations", None).await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["type"], "FeatureCollection");
		assert_eq!(body["features"].as_array().unwrap().len(), 2);
		assert_eq!(body["features"][0]["type"], "Feature");
	}

	#[tokio::test]
	async fn post_then_get_round_trips() {
		let app = seeded_app();
		let feature = json!({
			"id": "x",
			"geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
			"properties": {"name": "A"}
		});

		let (status, body) = send(&app, Method::POST, "/locations", Some(feature)).await;
		assert_eq!(status, StatusCode::CREATED);
		assert_eq!(body, json!({"message": "location created", "id": "x"}));

		let (status, body) = send(&app, Method::GET, "/locations/x", None).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(
			body,
			json!({
				"type": "Feature",
				"id": "x",
				"geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
				"properties": {"name": "A"}
			})
		);
	}

	#[tokio::test]
	async fn numeric_id_is_normalized_to_string() {
		let app = seeded_app();
		let feature = json!({
			"id": 17,
			"geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
			"properties": {}
		});

		let (status, body) = send(&app, Method::POST, "/locations", Some(feature)).await;
		assert_eq!(status, StatusCode::CREATED);
		assert_eq!(body["id"], "17");

		let (status, _) = send(&app, Method::GET, "/locations/17", None).await;
		assert_eq!(status, StatusCode::OK);
	}

	#[tokio::test]
	async fn posting_same_id_twice_upserts_without_duplicating() {
		let app = seeded_app();
		let first = json!({
			"id": "x",
			"geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
			"properties": {"name": "old"}
		});
		let second = json!({
			"id": "x",
			"geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
			"properties": {"name": "new"}
		});

		let (status, _) = send(&app, Method::POST, "/locations", Some(first)).await;
		assert_eq!(status, StatusCode::CREATED);

		let (status, body) = send(&app, Method::POST, "/locations", Some(second)).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["message"], "location replaced");

		assert_eq!(collection_len(&app).await, 3);
		let (_, body) = send(&app, Method::GET, "/locations/x", None).await;
		assert_eq!(body["properties"]["name"], "new");
	}

	#[tokio::test]
	async fn posting_without_id_generates_distinct_ids() {
		let app = seeded_app();
		let feature = json!({
			"geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
			"properties": {}
		});

		let (status, first) = send(&app, Method::POST, "/locations", Some(feature.clone())).await;
		assert_eq!(status, StatusCode::CREATED);
		let (status, second) = send(&app, Method::POST, "/locations", Some(feature)).await;
		assert_eq!(status, StatusCode::CREATED);

		assert_ne!(first["id"], second["id"]);
		assert_eq!(collection_len(&app).await, 4);
	}

	#[tokio::test]
	async fn non_string_non_number_id_is_replaced_by_generated_one() {
		let app = seeded_app();
		let feature = json!({
			"id": {"nested": true},
			"geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
			"properties": {}
		});

		let (status, body) = send(&app, Method::POST, "/locations", Some(feature)).await;
		assert_eq!(status, StatusCode::CREATED);
		assert!(body["id"].as_str().unwrap().len() > 8);
	}

	#[tokio::test]
	async fn post_without_geometry_or_properties_is_bad_request() {
		let app = seeded_app();

		let (status, body) = send(
			&app,
			Method::POST,
			"/locations",
			Some(json!({"properties": {"name": "A"}})),
		)
		.await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body["error"].as_str().unwrap().contains("geometry"));

		let (status, body) = send(
			&app,
			Method::POST,
			"/locations",
			Some(json!({"geometry": {"type": "Point", "coordinates": [0.0, 0.0]}})),
		)
		.await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body["error"].as_str().unwrap().contains("properties"));

		assert_eq!(collection_len(&app).await, 2);
	}

	#[tokio::test]
	async fn malformed_json_is_bad_request_not_internal_error() {
		let app = seeded_app();
		assert_eq!(
			send_raw(&app, Method::POST, "/locations", "{not json").await,
			StatusCode::BAD_REQUEST
		);
		assert_eq!(
			send_raw(&app, Method::PATCH, "/locations/miradouro-da-graca", "{not json").await,
			StatusCode::BAD_REQUEST
		);
	}

	#[tokio::test]
	async fn wrong_geometry_shape_is_bad_request() {
		let app = seeded_app();
		let feature = json!({
			"geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
			"properties": {}
		});
		let (status, _) = send(&app, Method::POST, "/locations", Some(feature)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn patch_merges_properties_shallowly() {
		let app = seeded_app();
		let feature = json!({
			"id": "x",
			"geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
			"properties": {"a": 1, "b": 2}
		});
		send(&app, Method::POST, "/locations", Some(feature)).await;

		let (status, body) = send(
			&app,
			Method::PATCH,
			"/locations/x",
			Some(json!({"properties": {"b": 3, "c": 4}})),
		)
		.await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({"message": "location updated", "id": "x"}));

		let (_, body) = send(&app, Method::GET, "/locations/x", None).await;
		assert_eq!(body["properties"], json!({"a": 1, "b": 3, "c": 4}));
		assert_eq!(body["geometry"]["coordinates"], json!([1.0, 2.0]));
	}

	#[tokio::test]
	async fn geometry_only_patch_leaves_properties_untouched() {
		let app = seeded_app();
		let feature = json!({
			"id": "x",
			"geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
			"properties": {"a": 1}
		});
		send(&app, Method::POST, "/locations", Some(feature)).await;

		let (status, _) = send(
			&app,
			Method::PATCH,
			"/locations/x",
			Some(json!({"geometry": {"type": "Point", "coordinates": [5.0, 6.0]}})),
		)
		.await;
		assert_eq!(status, StatusCode::OK);

		let (_, body) = send(&app, Method::GET, "/locations/x", None).await;
		assert_eq!(body["geometry"]["coordinates"], json!([5.0, 6.0]));
		assert_eq!(body["properties"], json!({"a": 1}));
	}

	#[tokio::test]
	async fn unknown_ids_yield_404_and_leave_the_store_unchanged() {
		let app = seeded_app();

		let (status, body) = send(&app, Method::GET, "/locations/ghost", None).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert!(body["error"].as_str().unwrap().contains("ghost"));

		let (status, _) = send(&app, Method::PATCH, "/locations/ghost", Some(json!({"properties": {}}))).await;
		assert_eq!(status, StatusCode::NOT_FOUND);

		let (status, _) = send(&app, Method::DELETE, "/locations/ghost", None).await;
		assert_eq!(status, StatusCode::NOT_FOUND);

		assert_eq!(collection_len(&app).await, 2);
	}

	#[tokio::test]
	async fn end_to_end_scenario() {
		let app = seeded_app();
		assert_eq!(collection_len(&app).await, 2);

		let feature = json!({
			"id": "x",
			"geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
			"properties": {"name": "A"}
		});
		let (status, _) = send(&app, Method::POST, "/locations", Some(feature)).await;
		assert_eq!(status, StatusCode::CREATED);
		assert_eq!(collection_len(&app).await, 3);

		let (status, body) = send(&app, Method::DELETE, "/locations/x", None).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({"message": "location deleted", "id": "x"}));
		assert_eq!(collection_len(&app).await, 2);

		let (status, _) = send(&app, Method::GET, "/locations/x", None).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn no_static_sources_yields_404() {
		let app = add_static_sources_to_app(Router::new(), &[]);
		let (status, _) = send(&app, Method::GET, "/", None).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn static_source_serves_index_html_at_root() {
		let source = StaticSource::new(Path::new("../testdata/site"), Url::from("/")).unwrap();
		let app = add_static_sources_to_app(Router::new(), &[source]);

		let request = Request::builder().uri("/").body(Body::empty()).unwrap();
		let response = app.clone().oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(
			response.headers().get(header::CONTENT_TYPE).unwrap(),
			"text/html; charset=utf-8"
		);
	}
}
