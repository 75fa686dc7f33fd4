//! Desktop wallpaper variants from a single photo.
//!
//! Every size in [`STANDARD_SIZES`] gets the source scaled to fill the
//! canvas height (center-cropped horizontally), an optional logo anchored
//! near the bottom-right corner, and PNG and/or JPEG files under
//! `<root>/<size name>/`.
#![forbid(unsafe_code)]

pub mod assets;
pub mod encode;
pub mod foundation;
pub mod generator;
pub mod geometry;
pub mod output;
pub mod render;
pub mod sizes;

pub use assets::{PreparedImage, load_image};
pub use encode::{DEFAULT_JPEG_QUALITY, EncodeSettings};
pub use foundation::core::{Dimensions, ImageRole, PixelRect};
pub use foundation::error::{WallpaperError, WallpaperResult};
pub use generator::{GenerateOptions, GeneratedFile, WallpaperGenerator};
pub use geometry::{Layout, LogoPlacement, SourcePlacement};
pub use output::OutputLayout;
pub use render::Canvas;
pub use sizes::{ImageFormats, OutputFormat, STANDARD_SIZES, SizeSpec, select_sizes};
