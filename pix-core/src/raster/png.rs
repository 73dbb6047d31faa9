use std::path::Path;

use image::{ImageFormat, RgbaImage};

use super::RasterCodec;
use crate::error::Result;

/// Lossless PNG output; chunk payloads survive encode/decode byte for byte.
pub struct PngCodec;

impl RasterCodec for PngCodec {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn encode(&self, side: u32, rgba: Vec<u8>, out: &Path) -> Result<()> {
        let frame = RgbaImage::from_raw(side, side, rgba).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("buffer does not fill a {side}x{side} RGBA frame"),
            )
        })?;
        frame.save_with_format(out, ImageFormat::Png)?;
        Ok(())
    }
}
