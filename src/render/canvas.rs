use image::{RgbImage, RgbaImage, imageops::FilterType};

use crate::{
    assets::decode::PreparedImage,
    foundation::core::PixelRect,
    geometry::Layout,
    render::composite::{draw_over, unpremultiply_rgba8_in_place},
};

/// Output buffer for one size. Pixels are premultiplied RGBA8 and start
/// fully transparent.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw premultiplied pixels.
    pub fn premultiplied(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Resample `image` to `rect`'s size and composite it at `rect`'s origin.
    ///
    /// Only the part of `image` that can reach the canvas is resampled, so the
    /// work stays proportional to the canvas even when `rect` overflows it by
    /// a wide margin.
    pub fn draw_scaled(&mut self, image: &PreparedImage, rect: PixelRect) {
        let src = image.premultiplied();
        let Some(crop) = visible_crop(src.dimensions(), rect, self.pixels.dimensions()) else {
            return;
        };

        let region = image::imageops::crop_imm(
            src,
            crop.src_x,
            crop.src_y,
            crop.src_width,
            crop.src_height,
        )
        .to_image();
        let dest = crop.dest;
        if region.dimensions() == (dest.width, dest.height) {
            draw_over(&mut self.pixels, &region, dest.x, dest.y);
            return;
        }
        let scaled =
            image::imageops::resize(&region, dest.width, dest.height, FilterType::Lanczos3);
        draw_over(&mut self.pixels, &scaled, dest.x, dest.y);
    }

    /// Straight-alpha copy, as PNG stores it.
    pub fn to_straight_rgba(&self) -> RgbaImage {
        let mut out = self.pixels.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Alpha-free copy: premultiplied colour is the canvas composited over
    /// black.
    pub fn to_opaque_rgb(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            let p = self.pixels.get_pixel(x, y).0;
            image::Rgb([p[0], p[1], p[2]])
        })
    }
}

/// Lanczos3 reach in source pixels at 1:1 scale.
const FILTER_SUPPORT: f64 = 3.0;

/// Part of a source image that contributes to the canvas when drawn at
/// `dest`-scale, plus where that part lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleCrop {
    pub src_x: u32,
    pub src_y: u32,
    pub src_width: u32,
    pub src_height: u32,
    pub dest: PixelRect,
}

/// `None` when `rect` misses the canvas entirely. The crop keeps a margin of
/// filter support around the visible area so edge pixels resample as if the
/// whole source had been scaled.
pub fn visible_crop(src: (u32, u32), rect: PixelRect, canvas: (u32, u32)) -> Option<VisibleCrop> {
    let h = visible_span(src.0, rect.x, rect.width, canvas.0)?;
    let v = visible_span(src.1, rect.y, rect.height, canvas.1)?;
    Some(VisibleCrop {
        src_x: h.src_start,
        src_y: v.src_start,
        src_width: h.src_len,
        src_height: v.src_len,
        dest: PixelRect {
            x: h.dest_start,
            y: v.dest_start,
            width: h.dest_len,
            height: v.dest_len,
        },
    })
}

struct Span {
    src_start: u32,
    src_len: u32,
    dest_start: i64,
    dest_len: u32,
}

fn visible_span(src_len: u32, dest_start: i64, dest_len: u32, canvas_len: u32) -> Option<Span> {
    let vis0 = dest_start.max(0);
    let vis1 = (dest_start + i64::from(dest_len)).min(i64::from(canvas_len));
    if vis0 >= vis1 {
        return None;
    }

    // Source pixels per destination pixel.
    let scale = f64::from(src_len) / f64::from(dest_len);
    let pad = FILTER_SUPPORT * scale.max(1.0);
    let s0 = ((vis0 - dest_start) as f64 * scale - pad).floor().max(0.0);
    let s1 = ((vis1 - dest_start) as f64 * scale + pad)
        .ceil()
        .min(f64::from(src_len));

    let d0 = (s0 / scale).round() as i64;
    let d1 = (s1 / scale).round() as i64;

    Some(Span {
        src_start: s0 as u32,
        src_len: ((s1 - s0) as u32).max(1),
        dest_start: dest_start + d0,
        dest_len: (d1 - d0).max(1) as u32,
    })
}

/// Draw order: source first, then the logo on top.
pub fn render_canvas(layout: &Layout, source: &PreparedImage, logo: &PreparedImage) -> Canvas {
    let (width, height) = layout.canvas_pixels();
    let mut canvas = Canvas::new(width, height);

    canvas.draw_scaled(source, layout.source_rect());
    if let Some(rect) = layout.logo_rect() {
        canvas.draw_scaled(logo, rect);
    }

    canvas
}
