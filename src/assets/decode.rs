use std::path::Path;

use image::{ImageReader, RgbaImage};

use crate::{
    foundation::core::{Dimensions, ImageRole},
    foundation::error::{WallpaperError, WallpaperResult},
    render::composite::premultiply_rgba8_in_place,
};

/// A decoded input image, held as premultiplied RGBA8 for compositing.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    rgba8_premul: RgbaImage,
}

impl PreparedImage {
    /// Wrap a straight-alpha buffer.
    pub fn from_rgba(rgba: RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        let mut rgba8_premul = rgba;
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_pixels(self.width, self.height)
    }

    pub fn premultiplied(&self) -> &RgbaImage {
        &self.rgba8_premul
    }
}

/// Limits applied to every decode: none, so full-size photos load whatever
/// their pixel count.
fn decoder_limits() -> image::Limits {
    image::Limits::no_limits()
}

/// Load and decode an image file. The format is sniffed from the content.
pub fn load_image(path: &Path, role: ImageRole) -> WallpaperResult<PreparedImage> {
    if !path.exists() {
        return Err(WallpaperError::MissingFile(path.to_path_buf()));
    }

    let mut reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| WallpaperError::io(format!("open {role} image '{}'", path.display()), e))?;

    reader.limits(decoder_limits());

    let decoded = reader.decode().map_err(|source| WallpaperError::ImageDecode {
        role,
        path: path.to_path_buf(),
        source,
    })?;

    let image = PreparedImage::from_rgba(decoded.to_rgba8());
    tracing::debug!(%role, width = image.width, height = image.height, "decoded image");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use image::Rgba;

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = PathBuf::from("target").join("decode_tests").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn from_rgba_premultiplies() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([100, 50, 200, 128]));
        let prepared = PreparedImage::from_rgba(img);
        assert_eq!((prepared.width, prepared.height), (2, 1));
        assert_eq!(
            prepared.premultiplied().get_pixel(1, 0).0,
            [
                ((100u16 * 128 + 127) / 255) as u8,
                ((50u16 * 128 + 127) / 255) as u8,
                ((200u16 * 128 + 127) / 255) as u8,
                128u8
            ]
        );
        assert_eq!(prepared.dimensions(), Dimensions::new(2.0, 1.0));
    }

    #[test]
    fn load_png_ignores_misleading_extension() {
        let dir = scratch("misleading_ext");
        let path = dir.join("logo.jpg");
        RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        let img = load_image(&path, ImageRole::Logo).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.premultiplied().get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn large_photos_are_not_capped() {
        assert!(image::Limits::default().max_alloc.is_some());

        let limits = decoder_limits();
        assert_eq!(limits.max_alloc, None);
        assert_eq!(limits.max_image_width, None);
        assert_eq!(limits.max_image_height, None);
    }

    #[test]
    fn missing_file_is_reported_before_decoding() {
        let path = PathBuf::from("target").join("decode_tests").join("nope.png");
        let err = load_image(&path, ImageRole::Source).unwrap_err();
        assert!(matches!(err, WallpaperError::MissingFile(p) if p == path));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = scratch("garbage");
        let path = dir.join("source.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = load_image(&path, ImageRole::Source).unwrap_err();
        assert!(matches!(
            err,
            WallpaperError::ImageDecode {
                role: ImageRole::Source,
                ..
            }
        ));
        assert!(err.to_string().contains("cannot read source image"));
    }
}
