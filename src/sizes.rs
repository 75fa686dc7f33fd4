//! The fixed table of wallpaper sizes and their output formats.

use crate::{
    foundation::core::Dimensions,
    foundation::error::{WallpaperError, WallpaperResult},
};

/// A single encoded file type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png => f.write_str("PNG"),
            Self::Jpeg => f.write_str("JPEG"),
        }
    }
}

/// Which files a size produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormats {
    Png,
    Jpeg,
    Both,
}

impl ImageFormats {
    /// Formats in write order.
    pub fn outputs(self) -> &'static [OutputFormat] {
        match self {
            Self::Png => &[OutputFormat::Png],
            Self::Jpeg => &[OutputFormat::Jpeg],
            Self::Both => &[OutputFormat::Png, OutputFormat::Jpeg],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SizeSpec {
    /// Directory name and file name suffix.
    pub name: &'static str,
    pub width: f64,
    pub height: f64,
    pub include_logo: bool,
    pub formats: ImageFormats,
}

impl SizeSpec {
    pub const fn new(
        name: &'static str,
        width: f64,
        height: f64,
        include_logo: bool,
        formats: ImageFormats,
    ) -> Self {
        Self {
            name,
            width,
            height,
            include_logo,
            formats,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

pub const STANDARD_SIZES: &[SizeSpec] = &[
    SizeSpec::new("3.4-3840x2880", 3840.0, 2880.0, true, ImageFormats::Both),
    SizeSpec::new("4K-16.9-3840x2160", 3840.0, 2160.0, true, ImageFormats::Both),
    SizeSpec::new("5K-16.9-5120x2880", 5120.0, 2880.0, true, ImageFormats::Both),
    SizeSpec::new("16.10-2560x1664", 2560.0, 1664.0, true, ImageFormats::Both),
    SizeSpec::new("16.10-2880x1864", 2880.0, 1864.0, true, ImageFormats::Both),
    SizeSpec::new("16.10-3024x1964", 3024.0, 1964.0, true, ImageFormats::Both),
    SizeSpec::new("16.10-3456x2234", 3456.0, 2234.0, true, ImageFormats::Both),
    SizeSpec::new("Ultra-Wide-3440x1440", 3440.0, 1440.0, true, ImageFormats::Both),
    SizeSpec::new("Ultra-Wide-6880x2880", 6880.0, 2880.0, true, ImageFormats::Both),
    SizeSpec::new("Preview", 840.0, 450.0, false, ImageFormats::Jpeg),
];

/// Pick standard sizes by name, keeping table order. An empty selection
/// means every size.
pub fn select_sizes<S: AsRef<str>>(names: &[S]) -> WallpaperResult<Vec<SizeSpec>> {
    if names.is_empty() {
        return Ok(STANDARD_SIZES.to_vec());
    }

    for name in names {
        let name = name.as_ref();
        if !STANDARD_SIZES.iter().any(|s| s.name == name) {
            let known: Vec<&str> = STANDARD_SIZES.iter().map(|s| s.name).collect();
            return Err(WallpaperError::validation(format!(
                "unknown size '{name}' (known sizes: {})",
                known.join(", ")
            )));
        }
    }

    Ok(STANDARD_SIZES
        .iter()
        .filter(|s| names.iter().any(|n| n.as_ref() == s.name))
        .copied()
        .collect())
}
