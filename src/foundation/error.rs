use std::path::PathBuf;

use crate::{foundation::core::ImageRole, sizes::OutputFormat};

pub type WallpaperResult<T> = Result<T, WallpaperError>;

#[derive(thiserror::Error, Debug)]
pub enum WallpaperError {
    #[error("file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("cannot read {role} image '{}'", path.display())]
    ImageDecode {
        role: ImageRole,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid image dimensions for {what}: {width} x {height}")]
    InvalidImageDimensions {
        what: String,
        width: f64,
        height: f64,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot generate a {format} representation")]
    Encode {
        format: OutputFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WallpaperError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn invalid_dimensions(what: impl Into<String>, width: f64, height: f64) -> Self {
        Self::InvalidImageDimensions {
            what: what.into(),
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            WallpaperError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            WallpaperError::MissingFile(PathBuf::from("dir/logo.png"))
                .to_string()
                .contains("file does not exist: dir/logo.png")
        );
        assert!(
            WallpaperError::invalid_dimensions("logo", 0.0, 12.0)
                .to_string()
                .contains("invalid image dimensions for logo: 0 x 12")
        );
    }

    #[test]
    fn io_keeps_source_in_chain() {
        let err = WallpaperError::io("create directory 'out'", std::io::Error::other("boom"));
        assert_eq!(err.to_string(), "create directory 'out'");
        assert!(err.source().unwrap().to_string().contains("boom"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = WallpaperError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
