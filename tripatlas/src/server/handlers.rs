//! HTTP handlers and small response helpers.
//!
//! - the `*_location*` handlers implement the locations CRUD API on top of
//!   the shared [`LocationStore`]
//! - `serve_static` serves site assets from a list of [`StaticSource`]s
//!
//! Bodies are read as raw bytes and parsed explicitly, so JSON-syntax and
//! shape errors map to 400 while everything else stays a 500. CORS headers
//! are handled exclusively by the `CorsLayer`; don't set
//! `Access-Control-Allow-Origin` here.

use super::sources::{SourceResponse, StaticSource};
use super::utils::Url;
use axum::{
	body::{Body, Bytes},
	extract::{Path, State},
	http::{StatusCode, Uri, header},
	response::Response,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tripatlas_core::{LocationStore, PointGeometry, normalize_id};

/// Shared state of the locations API.
#[derive(Clone)]
pub struct ApiState {
	pub store: Arc<RwLock<LocationStore>>,
}

/// State for static file requests across multiple `StaticSource`s.
#[derive(Clone)]
pub struct StaticHandlerState {
	pub sources: Vec<StaticSource>,
}

/// `GET /locations`: the full FeatureCollection.
pub async fn list_locations(State(state): State<ApiState>) -> Response<Body> {
	let store = state.store.read().await;
	log::debug!("list {} locations", store.len());
	ok_json(&store.to_collection())
}

/// `GET /locations/{id}`: a single feature.
pub async fn get_location(Path(id): Path<String>, State(state): State<ApiState>) -> Response<Body> {
	let store = state.store.read().await;
	match store.find(&id) {
		Some(feature) => ok_json(feature),
		None => location_not_found(&id),
	}
}

#[derive(Deserialize)]
struct LocationPayload {
	#[serde(default)]
	id: Option<Value>,
	#[serde(default)]
	geometry: Option<PointGeometry>,
	#[serde(default)]
	properties: Option<Map<String, Value>>,
}

/// `POST /locations`: insert a feature, or replace the one with the same id
/// (upsert-by-id; 201 marks a fresh insert, 200 a replacement).
pub async fn create_location(State(state): State<ApiState>, body: Bytes) -> Response<Body> {
	let payload: LocationPayload = match serde_json::from_slice(&body) {
		Ok(payload) => payload,
		Err(err) => return bad_request(&err),
	};
	let Some(geometry) = payload.geometry else {
		return error_json(StatusCode::BAD_REQUEST, "a location needs a 'geometry'");
	};
	let Some(properties) = payload.properties else {
		return error_json(StatusCode::BAD_REQUEST, "a location needs 'properties'");
	};

	let id = normalize_id(payload.id.as_ref());

	let mut store = state.store.write().await;
	let outcome = store.upsert(id, geometry, properties);

	if outcome.replaced {
		log::debug!("replaced location '{}'", outcome.id);
		ok_message(StatusCode::OK, "location replaced", &outcome.id)
	} else {
		log::debug!("created location '{}'", outcome.id);
		ok_message(StatusCode::CREATED, "location created", &outcome.id)
	}
}

#[derive(Deserialize)]
struct LocationPatch {
	#[serde(default)]
	properties: Option<Map<String, Value>>,
	#[serde(default)]
	geometry: Option<PointGeometry>,
}

/// `PATCH /locations/{id}`: shallow-merge `properties`, replace `geometry`
/// wholesale if supplied.
pub async fn patch_location(Path(id): Path<String>, State(state): State<ApiState>, body: Bytes) -> Response<Body> {
	let patch: LocationPatch = match serde_json::from_slice(&body) {
		Ok(patch) => patch,
		Err(err) => return bad_request(&err),
	};

	let mut store = state.store.write().await;
	match store.patch(&id, patch.properties, patch.geometry) {
		Some(_) => {
			log::debug!("updated location '{id}'");
			ok_message(StatusCode::OK, "location updated", &id)
		}
		None => location_not_found(&id),
	}
}

/// `DELETE /locations/{id}`.
pub async fn delete_location(Path(id): Path<String>, State(state): State<ApiState>) -> Response<Body> {
	let mut store = state.store.write().await;
	match store.remove(&id) {
		Some(feature) => {
			log::debug!("deleted location '{}'", feature.id);
			ok_message(StatusCode::OK, "location deleted", &feature.id)
		}
		None => location_not_found(&id),
	}
}

/// Static handler: tries each source in order until one returns data.
pub async fn serve_static(uri: Uri, State(state): State<StaticHandlerState>) -> Response<Body> {
	let mut url = Url::from(uri.path());
	log::debug!("handle static request: {url}");

	if url.is_dir() {
		url.push("index.html");
	}

	for source in state.sources.iter() {
		if let Some(result) = source.get_data(&url) {
			log::debug!("send response to static request: {url}");
			return ok_data(result);
		}
	}
	log::debug!("send 404 to static request: {url}");
	error_404()
}

// --- small helpers -----------------------------------------------------------

fn location_not_found(id: &str) -> Response<Body> {
	error_json(StatusCode::NOT_FOUND, &format!("no location with id '{id}'"))
}

fn bad_request(err: &serde_json::Error) -> Response<Body> {
	log::debug!("rejecting malformed request body: {err}");
	error_json(StatusCode::BAD_REQUEST, &format!("invalid JSON body: {err}"))
}

pub fn error_404() -> Response<Body> {
	Response::builder()
		.status(404)
		.header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
		// Leave CORS to the middleware.
		.body(Body::from("Not Found"))
		.expect("failed to build error response")
}

fn error_json(status: StatusCode, message: &str) -> Response<Body> {
	json_response(status, &json!({ "error": message }))
}

fn ok_message(status: StatusCode, message: &str, id: &str) -> Response<Body> {
	json_response(status, &json!({ "message": message, "id": id }))
}

pub fn ok_json<T: Serialize>(value: &T) -> Response<Body> {
	json_response(StatusCode::OK, value)
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Body> {
	match serde_json::to_vec(value) {
		Ok(body) => Response::builder()
			.status(status)
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body))
			.expect("failed to build JSON response"),
		Err(err) => {
			log::error!("failed to serialize response body: {err}");
			Response::builder()
				.status(500)
				.header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
				.body(Body::from("Internal Server Error"))
				.expect("failed to build error response")
		}
	}
}

fn ok_data(result: SourceResponse) -> Response<Body> {
	Response::builder()
		.status(200)
		.header(header::CONTENT_TYPE, &result.mime)
		.header(header::CACHE_CONTROL, "public, max-age=2419200, no-transform")
		.body(Body::from(result.bytes))
		.expect("failed to build OK response")
}
