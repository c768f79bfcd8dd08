//! tripatlas HTTP server lifecycle and composition.
//!
//! The *logic* lives in focused modules:
//! - `handlers` implement the concrete HTTP handlers and response helpers.
//! - `routes` composes handlers into an Axum `Router`.
//! - `cors` builds a `CorsLayer` from user-configurable origin patterns.
//!
//! `site_server.rs` owns *lifecycle* concerns only: configuration ingestion,
//! building the router, applying cross-cutting middlewares (CORS, panic
//! catching), listening on a socket, graceful shutdown, and a tiny `/status`
//! probe for liveness checks.

use super::{cors, routes, sources::StaticSource, utils::Url};
use crate::config::Config;
use anyhow::Result;
use axum::{Router, routing::get};
use std::{path::Path, sync::Arc};
use tokio::{
	net::TcpListener,
	sync::{RwLock, oneshot},
};
use tower_http::catch_panic::CatchPanicLayer;
use tripatlas_core::LocationStore;

/// Thin orchestration layer for the tripatlas HTTP server.
///
/// This type is intentionally small: it stores configuration, the shared
/// location store, and the serving task, but delegates request handling and
/// routing to dedicated modules. The important guarantees are:
/// - **Idempotent start/stop:** starting twice stops the previous instance;
///   stopping twice is a no-op.
/// - **Graceful shutdown:** in-flight requests are allowed to finish (up to
///   a timeout).
/// - **Fresh seed per process:** the store starts from the two seed
///   locations and is never persisted.
pub struct SiteServer {
	ip: String,
	port: u16,
	store: Arc<RwLock<LocationStore>>,
	static_sources: Vec<StaticSource>,
	/// One-shot channel to signal graceful shutdown to the serving task.
	exit_signal: Option<oneshot::Sender<()>>,
	/// Join handle for the serving task; awaited in `stop()` to ensure shutdown completes.
	join: Option<tokio::task::JoinHandle<()>>,
	/// Expose the locations API (config can turn it off).
	use_api: bool,
	/// Configured CORS origins (supports `*`, prefix/suffix wildcard, or `/regex/`).
	cors_allowed_origins: Vec<String>,
	cors_max_age_seconds: u64,
}

impl SiteServer {
	#[cfg(test)]
	pub fn new_test(ip: &str, port: u16, use_api: bool) -> SiteServer {
		SiteServer {
			ip: ip.to_owned(),
			port,
			store: Arc::new(RwLock::new(LocationStore::seeded())),
			static_sources: Vec::new(),
			exit_signal: None,
			join: None,
			use_api,
			cors_allowed_origins: vec!["*".to_string()],
			cors_max_age_seconds: 86400,
		}
	}

	/// Construct a server from `Config`, ingesting static sources.
	pub fn from_config(config: Config) -> Result<SiteServer> {
		let mut server = SiteServer {
			ip: config.server.ip.unwrap_or("0.0.0.0".into()),
			port: config.server.port.unwrap_or(8080),
			store: Arc::new(RwLock::new(LocationStore::seeded())),
			static_sources: Vec::new(),
			exit_signal: None,
			join: None,
			use_api: !config.server.disable_api.unwrap_or(false),
			cors_allowed_origins: config.cors.allowed_origins.clone(),
			cors_max_age_seconds: config.cors.max_age_seconds.unwrap_or(86400),
		};

		for static_config in &config.static_sources {
			server.add_static_source(
				&static_config.path,
				static_config.url_prefix.as_deref().unwrap_or("/"),
			)?;
		}

		Ok(server)
	}

	/// Register a static file source mounted at `url_prefix`.
	pub fn add_static_source(&mut self, path: &Path, url_prefix: &str) -> Result<()> {
		log::info!("add static: {path:?} at '{url_prefix}'");
		self
			.static_sources
			.push(StaticSource::new(path, Url::from(url_prefix))?);
		Ok(())
	}

	/// Start listening and serving requests.
	///
	/// - Idempotent: if already running, the previous instance is stopped first.
	/// - Builds the router (`routes`), applies CORS and panic catching, then
	///   spawns `axum::serve(...)` with graceful shutdown support.
	pub async fn start(&mut self) -> Result<()> {
		// If already running, stop first to avoid port conflicts and leaked tasks.
		if self.exit_signal.is_some() || self.join.is_some() {
			self.stop().await;
		}

		log::info!("starting server");

		// Build the router
		let mut router = Router::new().route("/status", get(|| async { "ready!" }));
		if self.use_api {
			router = routes::add_locations_api_to_app(router, Arc::clone(&self.store));
		}
		router = routes::add_static_sources_to_app(router, &self.static_sources);

		let cors_layer = cors::build_cors_layer(&self.cors_allowed_origins, self.cors_max_age_seconds)?;
		router = router.layer(cors_layer);

		// A panicking handler must not kill the process; it becomes a 500.
		router = router.layer(CatchPanicLayer::new());

		let addr = format!("{}:{}", self.ip, self.port);
		log::info!("server binding on {addr}");

		let listener = TcpListener::bind(&addr).await?;
		let (tx, rx) = oneshot::channel::<()>();

		// Spawn the server and keep a handle so we can await it on shutdown.
		let handle = tokio::spawn(async move {
			if let Err(err) = axum::serve(listener, router.into_make_service())
				.with_graceful_shutdown(async {
					rx.await.ok();
				})
				.await
			{
				// The task boundary is a good place to log; we can't bubble this up after spawn.
				log::error!("server task exited with error: {err}");
			}
		});

		self.exit_signal = Some(tx);
		self.join = Some(handle);

		Ok(())
	}

	/// Trigger graceful shutdown and wait for the server task to finish
	/// (with timeout).
	///
	/// Idempotent: if the server is not running, this returns immediately.
	pub async fn stop(&mut self) {
		if self.exit_signal.is_none() && self.join.is_none() {
			return;
		}

		log::info!("stopping server");

		if let Some(tx) = self.exit_signal.take() {
			let _ = tx.send(());
		}

		if let Some(handle) = self.join.take() {
			match tokio::time::timeout(std::time::Duration::from_secs(10), handle).await {
				Ok(join_result) => {
					if let Err(join_err) = join_result {
						log::warn!("server task join error: {join_err}");
					}
				}
				Err(_) => {
					log::warn!("server task did not shutdown within timeout; continuing");
				}
			}
		}
	}
}
