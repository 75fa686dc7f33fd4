use crate::foundation::error::{WallpaperError, WallpaperResult};

/// Which input an image was loaded as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageRole {
    Source,
    Logo,
}

impl std::fmt::Display for ImageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Logo => f.write_str("logo"),
        }
    }
}

/// Width and height in (possibly fractional) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }

    /// Reject sizes that would make any ratio involving them meaningless.
    pub fn validated(self, what: &str) -> WallpaperResult<Self> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width) || !ok(self.height) {
            return Err(WallpaperError::invalid_dimensions(
                what,
                self.width,
                self.height,
            ));
        }
        Ok(self)
    }

    /// `width / height`. Callers validate first.
    pub fn aspect(self) -> f64 {
        self.width / self.height
    }

    /// Snap to whole pixels, never below 1x1.
    pub fn to_pixels(self) -> (u32, u32) {
        (snap_len(self.width), snap_len(self.height))
    }
}

/// Integer destination rectangle in top-left-origin raster space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn snap(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: x.round() as i64,
            y: y.round() as i64,
            width: snap_len(width),
            height: snap_len(height),
        }
    }
}

fn snap_len(v: f64) -> u32 {
    v.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_rejects_zero_negative_and_nan() {
        assert!(Dimensions::new(0.0, 10.0).validated("x").is_err());
        assert!(Dimensions::new(10.0, 0.0).validated("x").is_err());
        assert!(Dimensions::new(-1.0, 10.0).validated("x").is_err());
        assert!(Dimensions::new(f64::NAN, 10.0).validated("x").is_err());
        assert!(Dimensions::new(10.0, f64::INFINITY).validated("x").is_err());
        assert!(Dimensions::new(1.0, 1.0).validated("x").is_ok());
    }

    #[test]
    fn to_pixels_rounds_and_clamps() {
        assert_eq!(Dimensions::new(840.0, 450.0).to_pixels(), (840, 450));
        assert_eq!(Dimensions::new(16.875, 5.625).to_pixels(), (17, 6));
        assert_eq!(Dimensions::new(0.2, 0.4).to_pixels(), (1, 1));
    }

    #[test]
    fn snap_keeps_negative_offsets() {
        let r = PixelRect::snap(-299.6, 0.0, 3240.0, 2160.0);
        assert_eq!(
            r,
            PixelRect {
                x: -300,
                y: 0,
                width: 3240,
                height: 2160
            }
        );
    }
}
