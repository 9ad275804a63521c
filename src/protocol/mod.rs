pub mod constants;
pub mod error;
pub mod header;

pub use constants::*;
pub use error::{CodecError, MalformedKind};
pub use header::ArtifactHeader;
