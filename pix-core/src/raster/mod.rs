use std::path::Path;

use crate::error::Result;

/// Capability: persist one square RGBA frame through an external image
/// encoder.
pub trait RasterCodec {
    /// File extension for this codec's outputs, without the dot.
    fn extension(&self) -> &'static str;

    /// Encode `rgba` (exactly `side * side * 4` bytes, row-major, first byte
    /// the top-left pixel's red channel) to `out`.
    fn encode(&self, side: u32, rgba: Vec<u8>, out: &Path) -> Result<()>;
}

pub mod png;
