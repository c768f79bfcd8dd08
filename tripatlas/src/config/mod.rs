//! tripatlas server configuration system.
//!
//! Configuration is typically deserialized from a YAML file and consumed by
//! the HTTP server during startup:
//! - [`Config`]: top-level loader and YAML parser
//! - [`ServerConfig`]: network and API settings
//! - [`CorsConfig`]: CORS policy configuration
//! - [`StaticSourceConfig`]: static file sources

mod cors;
mod main;
mod server;
mod static_source;

pub use cors::CorsConfig;
pub use main::Config;
pub use server::ServerConfig;
pub use static_source::StaticSourceConfig;
