use image::{
    ExtendedColorType, ImageEncoder,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
};

use crate::{
    foundation::error::{WallpaperError, WallpaperResult},
    render::canvas::Canvas,
    sizes::OutputFormat,
};

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeSettings {
    /// 1..=100
    pub jpeg_quality: u8,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EncodeSettings {
    pub fn validate(&self) -> WallpaperResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(WallpaperError::validation(format!(
                "jpeg quality must be within 1..=100 (got {})",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// Encode a composited canvas into an in-memory file.
pub fn encode(
    canvas: &Canvas,
    format: OutputFormat,
    settings: &EncodeSettings,
) -> WallpaperResult<Vec<u8>> {
    match format {
        OutputFormat::Png => encode_png(canvas),
        OutputFormat::Jpeg => encode_jpeg(canvas, settings.jpeg_quality),
    }
}

fn encode_png(canvas: &Canvas) -> WallpaperResult<Vec<u8>> {
    let rgba = canvas.to_straight_rgba();
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            rgba.as_raw(),
            rgba.width(),
            rgba.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|source| WallpaperError::Encode {
            format: OutputFormat::Png,
            source,
        })?;
    Ok(out)
}

fn encode_jpeg(canvas: &Canvas, quality: u8) -> WallpaperResult<Vec<u8>> {
    let rgb = canvas.to_opaque_rgb();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|source| WallpaperError::Encode {
            format: OutputFormat::Jpeg,
            source,
        })?;
    Ok(out)
}
