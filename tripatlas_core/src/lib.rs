//! Core data model of the tripatlas backend.
//!
//! This crate holds everything the HTTP layer builds on but nothing of the
//! HTTP layer itself:
//! - the GeoJSON model of a map location ([`Feature`], [`PointGeometry`],
//!   [`FeatureCollection`]) including id normalization and generation
//! - the in-memory [`LocationStore`] with insertion-ordered, id-keyed access

mod geo;
mod store;

pub use geo::*;
pub use store::*;
