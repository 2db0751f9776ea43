use ascii_forge::{
    AsciiGrid, CharRamp, DEFAULT_RAMP, DitherMode, FrameStreamer, ImageFolderSource,
    ProcessingParams, convert_image_file,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ascii-forge", version, about = "Convert images and frame folders to ASCII art")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a single image to an ASCII grid
    Image {
        /// Path to the source image
        path: PathBuf,

        /// Write the grid to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Play a folder of frame images as a looping ASCII stream
    Stream {
        /// Directory of pre-extracted frames (sorted by file name)
        path: PathBuf,

        /// Target playback rate in frames per second
        #[arg(long, default_value_t = 30)]
        fps: u32,

        #[command(flatten)]
        params: ParamArgs,
    },
}

#[derive(Args)]
struct ParamArgs {
    /// Output width in characters
    #[arg(long, default_value_t = 80)]
    width: u32,

    /// Output height in characters, before aspect compensation
    #[arg(long, default_value_t = 80)]
    height: u32,

    /// Contrast multiplier (1.0 = unchanged)
    #[arg(long, default_value_t = 1.0)]
    contrast: f32,

    /// Brightness multiplier (1.0 = unchanged)
    #[arg(long, default_value_t = 1.0)]
    brightness: f32,

    /// Sharpness multiplier (1.0 = unchanged)
    #[arg(long, default_value_t = 1.0)]
    sharpness: f32,

    /// Height compensation for tall terminal glyphs
    #[arg(long, default_value_t = ascii_forge::DEFAULT_ASPECT_RATIO)]
    aspect_ratio: f32,

    /// Replace the image with its edge map before mapping
    #[arg(long)]
    edges: bool,

    /// Binarize the image before mapping
    #[arg(long)]
    dither: bool,

    /// Binarization strategy used with --dither
    #[arg(long, value_enum, default_value = "threshold")]
    dither_mode: DitherArg,

    /// Character ramp, darkest glyph first
    #[arg(long, default_value = DEFAULT_RAMP)]
    ramp: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum DitherArg {
    Threshold,
    FloydSteinberg,
}

impl From<&ParamArgs> for ProcessingParams {
    fn from(args: &ParamArgs) -> Self {
        Self {
            contrast: args.contrast,
            brightness: args.brightness,
            sharpness: args.sharpness,
            target_width: args.width,
            target_height: args.height,
            aspect_ratio: args.aspect_ratio,
            edge_detection: args.edges,
            dithering: args.dither,
            dither_mode: match args.dither_mode {
                DitherArg::Threshold => DitherMode::Threshold,
                DitherArg::FloydSteinberg => DitherMode::FloydSteinberg,
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    match Cli::parse().command {
        Command::Image {
            path,
            output,
            params,
        } => {
            let ramp = CharRamp::new(&params.ramp)?;
            let grid = convert_image_file(&path, &ProcessingParams::from(&params), &ramp)?;
            match output {
                Some(out) => {
                    grid.save(&out)?;
                    info!("wrote {}x{} grid to {}", grid.width(), grid.height(), out.display());
                }
                None => println!("{grid}"),
            }
        }
        Command::Stream { path, fps, params } => {
            let ramp = CharRamp::new(&params.ramp)?;
            let source = ImageFolderSource::open(&path)?;
            info!("streaming {} frames at {fps} fps", source.frame_count());

            // Ctrl-C flips the flag; the drain loop below notices and
            // stops the worker cleanly
            let interrupted = Arc::new(AtomicBool::new(false));
            let handler_flag = Arc::clone(&interrupted);
            ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;

            let (tx, rx) = mpsc::channel();
            let mut streamer = FrameStreamer::new(ProcessingParams::from(&params));
            streamer.start(source, ramp, fps, move |grid: AsciiGrid| {
                let _ = tx.send(grid);
            })?;

            while !interrupted.load(Ordering::SeqCst) && streamer.is_running() {
                if let Ok(grid) = rx.recv_timeout(Duration::from_millis(100)) {
                    // Clear the terminal and redraw in place
                    println!("\x1b[2J\x1b[H{grid}");
                }
            }
            streamer.stop()?;
        }
    }

    Ok(())
}
