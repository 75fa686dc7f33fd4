use std::path::PathBuf;

use rayon::prelude::*;

use crate::{
    assets::decode::PreparedImage,
    encode::{EncodeSettings, encode},
    foundation::error::{WallpaperError, WallpaperResult},
    geometry::Layout,
    output::{OutputLayout, ensure_dir, write_output},
    render::canvas::{Canvas, render_canvas},
    sizes::{OutputFormat, STANDARD_SIZES, SizeSpec},
};

#[derive(Clone, Debug, Default)]
pub struct GenerateOptions {
    pub encode: EncodeSettings,
    /// Generate sizes concurrently on a dedicated thread pool.
    pub parallel: bool,
    /// Worker count for `parallel`. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl GenerateOptions {
    pub fn validate(&self) -> WallpaperResult<()> {
        self.encode.validate()?;
        if self.threads == Some(0) {
            return Err(WallpaperError::validation(
                "generate option 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// One file written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub size: &'static str,
    pub format: OutputFormat,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Produces every configured wallpaper size from one source and one logo.
#[derive(Debug)]
pub struct WallpaperGenerator {
    source: PreparedImage,
    logo: PreparedImage,
    output: OutputLayout,
    sizes: Vec<SizeSpec>,
    options: GenerateOptions,
}

impl WallpaperGenerator {
    /// Fails if either image has a zero dimension.
    pub fn new(
        source: PreparedImage,
        logo: PreparedImage,
        output: OutputLayout,
    ) -> WallpaperResult<Self> {
        source.dimensions().validated("source image")?;
        logo.dimensions().validated("logo image")?;
        Ok(Self {
            source,
            logo,
            output,
            sizes: STANDARD_SIZES.to_vec(),
            options: GenerateOptions::default(),
        })
    }

    pub fn with_sizes(mut self, sizes: Vec<SizeSpec>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn sizes(&self) -> &[SizeSpec] {
        &self.sizes
    }

    pub fn output(&self) -> &OutputLayout {
        &self.output
    }

    pub fn layout(&self, spec: &SizeSpec) -> WallpaperResult<Layout> {
        Layout::compute(spec, self.source.dimensions(), self.logo.dimensions())
    }

    pub fn render(&self, spec: &SizeSpec) -> WallpaperResult<Canvas> {
        let layout = self.layout(spec)?;
        Ok(render_canvas(&layout, &self.source, &self.logo))
    }

    /// Generate every size. Sequential mode stops at the first failure;
    /// parallel mode lets in-flight sizes finish and reports the earliest
    /// failing size in list order.
    pub fn generate(&self) -> WallpaperResult<Vec<GeneratedFile>> {
        self.options.validate()?;

        if !self.options.parallel {
            let mut out = Vec::new();
            for spec in &self.sizes {
                out.extend(self.generate_size(spec)?);
            }
            return Ok(out);
        }

        let pool = build_thread_pool(self.options.threads)?;
        let results = pool.install(|| {
            self.sizes
                .par_iter()
                .map(|spec| self.generate_size(spec))
                .collect::<Vec<_>>()
        });

        let mut out = Vec::new();
        for files in results {
            out.extend(files?);
        }
        Ok(out)
    }

    #[tracing::instrument(skip_all, fields(size = spec.name))]
    pub fn generate_size(&self, spec: &SizeSpec) -> WallpaperResult<Vec<GeneratedFile>> {
        tracing::info!(
            "source image: {} x {}",
            self.source.width,
            self.source.height
        );

        let dir = self.output.dir(spec);
        ensure_dir(&dir)?;

        let layout = self.layout(spec)?;
        tracing::info!(
            "logo size: {} x {}",
            layout.logo.width,
            layout.logo.height
        );
        tracing::info!(
            "logo margins: {} | {}",
            layout.logo.margin_x,
            layout.logo.margin_y
        );

        tracing::info!("drawing...");
        let canvas = render_canvas(&layout, &self.source, &self.logo);

        let mut written = Vec::with_capacity(spec.formats.outputs().len());
        for &format in spec.formats.outputs() {
            let bytes = encode(&canvas, format, &self.options.encode)?;
            let path = self.output.path(spec, format);
            tracing::info!(
                "writing {format} image: {}",
                self.output.file_name(spec, format)
            );
            write_output(&path, &bytes)?;
            written.push(GeneratedFile {
                size: spec.name,
                format,
                path,
                width: canvas.width(),
                height: canvas.height(),
            });
        }

        Ok(written)
    }
}

fn build_thread_pool(threads: Option<usize>) -> WallpaperResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        WallpaperError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}
