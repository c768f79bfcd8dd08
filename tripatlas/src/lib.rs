//! # tripatlas
//!
//! Backend of the tripatlas travel-planning site: an in-memory GeoJSON
//! location store exposed as a small CRUD API, plus hosting for the site's
//! prebuilt static assets.
//!
//! The crate splits into:
//! - [`config`]: YAML configuration (server, CORS, static sources)
//! - [`server`]: the axum HTTP server (locations API, static files, CORS,
//!   lifecycle with graceful shutdown)
//!
//! The data model and the store itself live in `tripatlas_core`.

pub mod config;
pub mod server;
