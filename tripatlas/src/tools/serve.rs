use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::time::{Duration, sleep};
use tripatlas::{config::Config, server::SiteServer};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true, verbatim_doc_comment)]
pub struct Subcommand {
	/// Path to a configuration file (YAML format) to configure the server,
	/// CORS and static sources. Command line arguments override
	/// configuration file settings.
	#[arg(short = 'c', long, value_name = "FILE", display_order = 0)]
	pub config: Option<PathBuf>,

	/// Serve via socket ip. Default: 0.0.0.0
	#[arg(short = 'i', long, display_order = 0)]
	pub ip: Option<String>,

	/// Serve via port. Default: 8080
	#[arg(short, long, display_order = 0)]
	pub port: Option<u16>,

	/// Serve static content at "http:/.../" from a local folder.
	/// If multiple static sources are defined, the first hit will be served.
	/// You can also add an optional url prefix like "[/assets]public".
	#[arg(short = 's', long = "static", verbatim_doc_comment, display_order = 1)]
	pub static_content: Vec<String>,

	/// disable the locations API
	#[arg(long, display_order = 2)]
	pub disable_api: Option<bool>,

	/// Shutdown server automatically after x milliseconds.
	#[arg(long, display_order = 4)]
	pub auto_shutdown: Option<u64>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = if let Some(config_path) = &arguments.config {
		Config::from_path(config_path)?
	} else {
		Config::default()
	};

	config.server.override_optional_ip(&arguments.ip);
	config.server.override_optional_port(&arguments.port);
	config.server.override_optional_disable_api(&arguments.disable_api);

	let mut server = SiteServer::from_config(config)?;

	let static_patterns: Vec<Regex> = [
		r"^\[(?P<path>[^\]]+?)\](?P<filename>.*)$",
		r"^(?P<filename>.*)\[(?P<path>[^\]]+?)\]$",
		r"^(?P<filename>.*)$",
	]
	.iter()
	.map(|pat| Regex::new(pat).unwrap())
	.collect();

	for argument in arguments.static_content.iter() {
		let capture = static_patterns
			.iter()
			.find(|p| p.is_match(argument))
			.unwrap()
			.captures(argument)
			.unwrap();

		let filename: &str = capture.name("filename").unwrap().as_str();
		let url_prefix: &str = match capture.name("path") {
			None => "/",
			Some(m) => m.as_str(),
		};

		server.add_static_source(Path::new(filename), url_prefix)?;
	}

	server.start().await?;

	if let Some(milliseconds) = arguments.auto_shutdown {
		sleep(Duration::from_millis(milliseconds)).await;
		server.stop().await;
	} else {
		loop {
			sleep(Duration::from_secs(60)).await;
		}
	}

	Ok(())
}
