mod bytes;
mod error;

pub use bytes::*;
pub use error::*;
