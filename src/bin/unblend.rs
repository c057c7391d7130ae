use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{info, LevelFilter};

use overlay_unblend::{
    default_output_path, is_supported_image, BlendParams, ProcessResult, UnblendEngine,
};

#[derive(Parser)]
#[command(
    name = "unblend",
    about = "Recover an image from a known solid-color overlay via reverse alpha blending",
    version,
    after_help = "Mask pixels that are exactly black are left untouched; every other mask \
                  pixel is recovered with\n  original = (final - overlay * (1 - alpha)) / alpha"
)]
struct Cli {
    /// Composited input image
    #[arg(long)]
    image: PathBuf,

    /// Mask image (black = untouched, anything else = overlaid)
    #[arg(long)]
    mask: PathBuf,

    /// Output file (default: {name}_recovered.{ext})
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fraction of the original color kept by the overlay, in (0, 1]
    #[arg(short, long)]
    alpha: f32,

    /// Overlay color red channel
    #[arg(short, long, allow_negative_numbers = true)]
    r: i32,

    /// Overlay color green channel
    #[arg(short, long, allow_negative_numbers = true)]
    g: i32,

    /// Overlay color blue channel
    #[arg(short, long, allow_negative_numbers = true)]
    b: i32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let params = match BlendParams::new(cli.alpha, [cli.r, cli.g, cli.b]) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.image));
    if !is_supported_image(&output) {
        eprintln!(
            "Error: Cannot write output {} (use .png, .webp, .bmp or .jpg)",
            output.display()
        );
        process::exit(1);
    }

    for (label, path) in [("Image", &cli.image), ("Mask", &cli.mask)] {
        if !path.exists() {
            eprintln!("Error: {label} path does not exist: {}", path.display());
            process::exit(1);
        }
    }

    info!(
        "alpha={} overlay_color={:?}",
        params.alpha(),
        params.overlay().channels()
    );
    info!("restoring with c_original = (c_final - c_overlay * (1 - alpha)) / alpha");

    let engine = UnblendEngine::new(params);
    let result = engine.process_files(&cli.image, &cli.mask, &output);
    print_result(&result, cli.quiet);

    if !result.success {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, quiet: bool) {
    let filename = file_label(&result.path);

    if result.success {
        if !quiet {
            eprintln!(
                "[OK] {filename} -> {} ({})",
                file_label(&result.output),
                result.message
            );
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }
}

fn file_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}
