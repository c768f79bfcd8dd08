mod folder;
mod response;
mod static_source;

pub use folder::*;
pub use response::*;
pub use static_source::*;
