/// Streaming example: play a folder of frame images as looping ASCII
///
/// Pass a directory of pre-extracted frames, for example:
///   ffmpeg -i clip.mp4 frames/frame_%04d.png
///   cargo run --example stream_loop -- frames
use ascii_forge::{AsciiGrid, CharRamp, FrameStreamer, ImageFolderSource, ProcessingParams};
use std::sync::mpsc;
use std::time::Duration;

fn main() {
    let dir = std::env::args()
        .nth(1)
        .expect("usage: stream_loop <frame-directory>");

    let source = ImageFolderSource::open(&dir).expect("failed to open frame folder");
    println!("Playing {} frames from {dir} (5 seconds)...", source.frame_count());

    let params = ProcessingParams {
        target_width: 80,
        target_height: 48,
        ..Default::default()
    };

    let (tx, rx) = mpsc::channel();
    let mut streamer = FrameStreamer::new(params);
    streamer
        .start(source, CharRamp::default(), 15, move |grid: AsciiGrid| {
            let _ = tx.send(grid);
        })
        .expect("failed to start stream");

    // Drain grids for a few seconds, then stop cleanly
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while std::time::Instant::now() < deadline {
        if let Ok(grid) = rx.recv_timeout(Duration::from_millis(200)) {
            println!("\x1b[2J\x1b[H{grid}");
        }
    }

    streamer.stop().expect("stream ended with error");
    println!("\nDone.");
}
