use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{WallpaperError, WallpaperResult},
    sizes::{OutputFormat, SizeSpec},
};

/// Where generated files go: `<root>/<size>/<stem>-<size>.<ext>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    stem: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            stem: stem.into(),
        }
    }

    /// Size directories next to the source image, files named after its stem.
    pub fn for_source(source: &Path) -> WallpaperResult<Self> {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                WallpaperError::validation(format!(
                    "source path '{}' has no file name",
                    source.display()
                ))
            })?;
        let root = match source.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self { root, stem })
    }

    /// Same file names, different parent directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn dir(&self, spec: &SizeSpec) -> PathBuf {
        self.root.join(spec.name)
    }

    pub fn file_name(&self, spec: &SizeSpec, format: OutputFormat) -> String {
        format!("{}-{}.{}", self.stem, spec.name, format.extension())
    }

    pub fn path(&self, spec: &SizeSpec, format: OutputFormat) -> PathBuf {
        self.dir(spec).join(self.file_name(spec, format))
    }
}

pub fn ensure_dir(dir: &Path) -> WallpaperResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        WallpaperError::io(format!("create output directory '{}'", dir.display()), e)
    })
}

/// Write `bytes` to `path`, replacing any existing file.
pub fn write_output(path: &Path, bytes: &[u8]) -> WallpaperResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(path, bytes)
        .map_err(|e| WallpaperError::io(format!("write '{}'", path.display()), e))
}
