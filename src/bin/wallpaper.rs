use std::{io::IsTerminal as _, path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wallpaper_variants::{
    EncodeSettings, GenerateOptions, ImageRole, OutputLayout, STANDARD_SIZES, WallpaperError,
    WallpaperGenerator, load_image, select_sizes,
};

/// Status reported on any failure (the shell's view of `exit(-1)`).
const FAILURE_STATUS: u8 = 255;

#[derive(Parser, Debug)]
#[command(name = "wallpaper", version, about = "Generate desktop wallpaper sizes from one photo")]
struct Cli {
    /// Logo image.
    #[arg(short = 'l', long, required_unless_present = "list_sizes")]
    logo: Option<PathBuf>,

    /// Source image.
    #[arg(short = 's', long, required_unless_present = "list_sizes")]
    source: Option<PathBuf>,

    /// Directory for the per-size folders (defaults to the source image's directory).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Only generate the named size; repeat for several.
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// JPEG quality (1-100).
    #[arg(
        long,
        default_value_t = wallpaper_variants::DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    jpeg_quality: u8,

    /// Generate sizes in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Print the size table as JSON and exit.
    #[arg(long)]
    list_sizes: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error - {err:#}");
            ExitCode::from(FAILURE_STATUS)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.list_sizes {
        let json = serde_json::to_string_pretty(STANDARD_SIZES).context("serialize size table")?;
        println!("{json}");
        return Ok(());
    }

    let (Some(logo_path), Some(source_path)) = (cli.logo, cli.source) else {
        anyhow::bail!("both --logo and --source are required");
    };

    let sizes = select_sizes(cli.only.as_slice())?;
    let options = GenerateOptions {
        encode: EncodeSettings {
            jpeg_quality: cli.jpeg_quality,
        },
        parallel: cli.parallel,
        threads: cli.threads,
    };
    options.validate()?;

    let mut output = OutputLayout::for_source(&source_path)?;
    if let Some(dir) = cli.out_dir {
        output = output.with_root(dir);
    }

    // A missing input wins over an unreadable one: both are checked for
    // existence, logo first, before either is decoded. Nothing is created
    // on disk until both decode.
    for path in [&logo_path, &source_path] {
        if !path.exists() {
            return Err(WallpaperError::MissingFile(path.clone()).into());
        }
    }
    let logo = load_image(&logo_path, ImageRole::Logo)?;
    let source = load_image(&source_path, ImageRole::Source)?;

    let generator = WallpaperGenerator::new(source, logo, output)?
        .with_sizes(sizes)
        .with_options(options);

    let files = generator.generate()?;
    tracing::info!(
        "wrote {} files for {} sizes under {}",
        files.len(),
        generator.sizes().len(),
        generator.output().root().display()
    );
    Ok(())
}
