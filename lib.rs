pub use riffcodec_core::*;

#[cfg(feature = "wave")]
pub use riffcodec_wave as wave;
