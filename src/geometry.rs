//! Canvas, source and logo placement for one wallpaper size.
//!
//! Logo size and margins are authored against a 2880 px tall reference
//! canvas and scale linearly with the target height only. The target width
//! never enters the logo math, so ultra-wide sizes get the same logo as a
//! 16:9 size of equal height.

use crate::{
    foundation::core::{Dimensions, PixelRect},
    foundation::error::WallpaperResult,
    sizes::SizeSpec,
};

pub const BASE_IMAGE_HEIGHT: f64 = 2880.0;
pub const BASE_LOGO_HEIGHT: f64 = 300.0;
pub const BASE_LOGO_MARGIN_X: f64 = 100.0;
pub const BASE_LOGO_MARGIN_Y: f64 = 120.0;

/// Where the scaled source lands on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourcePlacement {
    /// Negative when the scaled source overflows and is center-cropped.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourcePlacement {
    pub fn fill_height(canvas: Dimensions, source: Dimensions) -> Self {
        let width = (canvas.height * source.width) / source.height;
        Self {
            x: -((width - canvas.width) / 2.0),
            y: 0.0,
            width,
            height: canvas.height,
        }
    }

    pub fn to_pixels(&self) -> PixelRect {
        PixelRect::snap(self.x, self.y, self.width, self.height)
    }
}

/// Logo size, margins and bottom-right anchored position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogoPlacement {
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub x: f64,
    /// Distance from the bottom edge of the canvas to the bottom of the logo.
    pub y: f64,
}

impl LogoPlacement {
    pub fn scaled(canvas: Dimensions, logo: Dimensions) -> Self {
        let height = BASE_LOGO_HEIGHT * (canvas.height / BASE_IMAGE_HEIGHT);
        let width = height * logo.aspect();
        let margin_x = (height * BASE_LOGO_MARGIN_X) / BASE_LOGO_HEIGHT;
        let margin_y = (height * BASE_LOGO_MARGIN_Y) / BASE_LOGO_HEIGHT;

        Self {
            width,
            height,
            margin_x,
            margin_y,
            x: canvas.width - width - margin_x,
            y: margin_y,
        }
    }

    /// Top edge of the logo in top-left-origin raster space.
    pub fn y_from_top(&self, canvas_height: f64) -> f64 {
        canvas_height - self.height - self.y
    }

    pub fn to_pixels(&self, canvas_height: f64) -> PixelRect {
        PixelRect::snap(
            self.x,
            self.y_from_top(canvas_height),
            self.width,
            self.height,
        )
    }
}

/// Full geometry for one size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub canvas: Dimensions,
    pub source: SourcePlacement,
    /// Computed for every size so it can be reported; drawn only when
    /// `draw_logo` is set.
    pub logo: LogoPlacement,
    pub draw_logo: bool,
}

impl Layout {
    pub fn compute(
        spec: &SizeSpec,
        source: Dimensions,
        logo: Dimensions,
    ) -> WallpaperResult<Self> {
        let canvas = spec.dimensions().validated(spec.name)?;
        let source = source.validated("source image")?;
        let logo = logo.validated("logo image")?;

        Ok(Self {
            canvas,
            source: SourcePlacement::fill_height(canvas, source),
            logo: LogoPlacement::scaled(canvas, logo),
            draw_logo: spec.include_logo,
        })
    }

    pub fn canvas_pixels(&self) -> (u32, u32) {
        self.canvas.to_pixels()
    }

    pub fn source_rect(&self) -> PixelRect {
        self.source.to_pixels()
    }

    pub fn logo_rect(&self) -> Option<PixelRect> {
        self.draw_logo
            .then(|| self.logo.to_pixels(self.canvas.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        WallpaperError,
        sizes::{ImageFormats, STANDARD_SIZES},
    };

    const EPS: f64 = 1e-9;

    fn spec(width: f64, height: f64, logo: bool) -> SizeSpec {
        SizeSpec::new("t", width, height, logo, ImageFormats::Both)
    }

    #[test]
    fn worked_example_4k() {
        let layout = Layout::compute(
            &spec(3840.0, 2160.0, true),
            Dimensions::new(6000.0, 4000.0),
            Dimensions::new(600.0, 200.0),
        )
        .unwrap();

        assert!((layout.source.width - 3240.0).abs() < EPS);
        assert!((layout.source.x - 300.0).abs() < EPS);
        assert_eq!(layout.source.y, 0.0);
        assert_eq!(layout.source.height, 2160.0);

        assert!((layout.logo.height - 225.0).abs() < EPS);
        assert!((layout.logo.width - 675.0).abs() < EPS);
        assert!((layout.logo.margin_x - 75.0).abs() < EPS);
        assert!((layout.logo.margin_y - 90.0).abs() < EPS);
        assert!((layout.logo.x - 3090.0).abs() < EPS);
        assert!((layout.logo.y - 90.0).abs() < EPS);
        assert!((layout.logo.y_from_top(2160.0) - 1845.0).abs() < EPS);

        assert_eq!(
            layout.logo_rect(),
            Some(PixelRect {
                x: 3090,
                y: 1845,
                width: 675,
                height: 225
            })
        );
    }

    #[test]
    fn reference_height_uses_base_values() {
        let logo = LogoPlacement::scaled(
            Dimensions::new(3840.0, BASE_IMAGE_HEIGHT),
            Dimensions::new(400.0, 100.0),
        );
        assert_eq!(logo.height, BASE_LOGO_HEIGHT);
        assert_eq!(logo.width, 1200.0);
        assert_eq!(logo.margin_x, BASE_LOGO_MARGIN_X);
        assert_eq!(logo.margin_y, BASE_LOGO_MARGIN_Y);
        assert_eq!(logo.x, 3840.0 - 1200.0 - 100.0);
    }

    #[test]
    fn wide_source_is_center_cropped() {
        let p = SourcePlacement::fill_height(
            Dimensions::new(2560.0, 1664.0),
            Dimensions::new(8000.0, 2000.0),
        );
        assert!((p.width - 6656.0).abs() < EPS);
        assert!((p.x + 2048.0).abs() < EPS);
        // Overflow splits evenly left and right.
        assert!((p.x + p.width - 2560.0 - 2048.0).abs() < EPS);
    }

    #[test]
    fn logo_scale_ignores_canvas_width() {
        let logo = Dimensions::new(300.0, 100.0);
        let wide = LogoPlacement::scaled(Dimensions::new(6880.0, 2880.0), logo);
        let narrow = LogoPlacement::scaled(Dimensions::new(3840.0, 2880.0), logo);
        assert_eq!(wide.width, narrow.width);
        assert_eq!(wide.height, narrow.height);
        assert_eq!(wide.margin_x, narrow.margin_x);
    }

    #[test]
    fn every_standard_size_has_exact_canvas_and_scaled_logo() {
        let source = Dimensions::new(6000.0, 4000.0);
        let logo = Dimensions::new(600.0, 200.0);
        for s in STANDARD_SIZES {
            let layout = Layout::compute(s, source, logo).unwrap();
            assert_eq!(
                layout.canvas_pixels(),
                (s.width as u32, s.height as u32),
                "{}",
                s.name
            );

            let expected_h = 300.0 * (s.height / 2880.0);
            assert!((layout.logo.height - expected_h).abs() < EPS, "{}", s.name);
            assert!(
                (layout.logo.width / layout.logo.height - 3.0).abs() < EPS,
                "{}",
                s.name
            );
            assert_eq!(layout.logo_rect().is_some(), s.include_logo);
        }
    }

    #[test]
    fn zero_sized_inputs_fail_before_dividing() {
        let s = spec(840.0, 450.0, false);
        let err = Layout::compute(&s, Dimensions::new(100.0, 0.0), Dimensions::new(10.0, 10.0))
            .unwrap_err();
        assert!(matches!(err, WallpaperError::InvalidImageDimensions { .. }));

        let err = Layout::compute(&s, Dimensions::new(100.0, 50.0), Dimensions::new(0.0, 10.0))
            .unwrap_err();
        assert!(err.to_string().contains("logo image"));
    }
}
