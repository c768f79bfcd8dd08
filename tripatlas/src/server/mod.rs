//! server implementation

mod cors;
mod handlers;
mod routes;
mod site_server;
mod sources;
mod utils;

pub use site_server::*;
pub use utils::Url;
