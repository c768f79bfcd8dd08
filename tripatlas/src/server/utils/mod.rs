mod mime;
mod url;

pub use mime::*;
pub use url::*;
