use clap::{Parser, Subcommand};
use docbin::tools::{binary_stats, gray_stats, load_gray, save_gray};
use docbin::{BinarizeConfig, Method, binarize, threshold_surface};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "docbin", version, about = "Adaptive document binarization")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Binarize a single image
    Binarize {
        /// Input image (any decodable format; converted to grayscale)
        image: PathBuf,
        /// Output image path
        output: PathBuf,
        /// Window width in pixels (derived from the image if omitted)
        #[arg(short = 'x', long)]
        win_width: Option<usize>,
        /// Window height in pixels (derived from the image if omitted)
        #[arg(short = 'y', long)]
        win_height: Option<usize>,
        /// Sensitivity parameter
        #[arg(short, long, default_value_t = 0.5)]
        k: f64,
        /// Thresholding method: niblack (n), sauvola (s), wolfjolion (w)
        #[arg(short, long, default_value = "wolfjolion")]
        method: String,
        /// Dynamic range of standard deviation (sauvola only)
        #[arg(long, default_value_t = 128.0)]
        dynamic_range: f64,
    },
    /// Print grayscale and threshold statistics for an image
    Stats {
        /// Input image
        image: PathBuf,
        /// Window width in pixels (derived from the image if omitted)
        #[arg(short = 'x', long)]
        win_width: Option<usize>,
        /// Window height in pixels (derived from the image if omitted)
        #[arg(short = 'y', long)]
        win_height: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Binarize {
            image,
            output,
            win_width,
            win_height,
            k,
            method,
            dynamic_range,
        } => binarize_cmd(
            &image,
            &output,
            win_width,
            win_height,
            k,
            &method,
            dynamic_range,
        ),
        Command::Stats {
            image,
            win_width,
            win_height,
        } => stats_cmd(&image, win_width, win_height),
    }
}

fn binarize_cmd(
    image: &Path,
    output: &Path,
    win_width: Option<usize>,
    win_height: Option<usize>,
    k: f64,
    method: &str,
    dynamic_range: f64,
) -> ExitCode {
    let method = match Method::parse(method) {
        Ok(method) => method,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let config = BinarizeConfig {
        window_width: win_width,
        window_height: win_height,
        k,
        method,
        dynamic_range,
    };

    let (gray, width, height) = match load_gray(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return ExitCode::FAILURE;
        }
    };
    eprintln!("Input: {} ({}x{}), method {}", image.display(), width, height, method);

    let start = Instant::now();
    let binary = match binarize(&gray, width, height, &config) {
        Ok(binary) => binary,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    eprintln!("Binarized in {:.2?}", start.elapsed());

    if let Err(err) = save_gray(output, &binary) {
        eprintln!("Failed to write {}: {}", output.display(), err);
        return ExitCode::FAILURE;
    }
    eprintln!("Wrote {}", output.display());
    ExitCode::SUCCESS
}

fn stats_cmd(image: &Path, win_width: Option<usize>, win_height: Option<usize>) -> ExitCode {
    let (gray, width, height) = match load_gray(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return ExitCode::FAILURE;
        }
    };

    println!("Image: {} ({}x{})", image.display(), width, height);
    let stats = gray_stats(&gray);
    println!(
        "Grayscale range: {}-{}, average: {}",
        stats.min, stats.max, stats.avg
    );

    let config = BinarizeConfig {
        window_width: win_width,
        window_height: win_height,
        ..Default::default()
    };
    let resolved = match config.resolve(width, height) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Window: {}x{}",
        resolved.window_width, resolved.window_height
    );

    // Build the default (Wolf-Jolion) surface once and summarize the output
    let surface = match threshold_surface(&gray, width, height, &config) {
        Ok(surface) => surface,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let (min_th, max_th) = surface.as_slice().iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), &th| (min.min(th), max.max(th)),
    );
    println!("Threshold range: {:.2}-{:.2}", min_th, max_th);

    match binarize(&gray, width, height, &config) {
        Ok(binary) => {
            let stats = binary_stats(&binary);
            println!(
                "Binary: foreground_pixels={} total={} foreground_ratio={:.2}%",
                stats.foreground_pixels,
                stats.total_pixels,
                stats.foreground_ratio * 100.0
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
