//! Looping frame streamer
//!
//! [`FrameStreamer`] pulls decoded frames from a [`FrameSource`], runs each
//! through the preprocess/quantize pipeline on a single background worker,
//! and hands the resulting grids to a [`FrameSink`] at an approximate
//! target rate. Frames are processed strictly in decode order with at most
//! one conversion in flight.

use crate::config::ProcessingParams;
use crate::error::{Error, Result};
use crate::processor::preprocess;
use crate::quantize::{AsciiGrid, quantize};
use crate::ramp::CharRamp;
use image::RgbaImage;
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A decoded video stream
///
/// Implementations own the decode handle; dropping the source closes it.
pub trait FrameSource: Send {
    /// Decodes the next frame, or `None` once the stream is exhausted
    ///
    /// A decode failure is fatal to the playback session and must be
    /// returned as an error rather than mapped to `None`.
    fn read_frame(&mut self) -> Result<Option<RgbaImage>>;

    /// Rewinds the stream so the next read yields the first frame again
    fn seek_to_start(&mut self) -> Result<()>;
}

/// Consumer of converted frames
///
/// Implemented for any `FnMut(AsciiGrid)`, which keeps the worker
/// decoupled from whatever drains the grids (a channel sender, a terminal
/// writer, a test buffer).
pub trait FrameSink: Send {
    fn push(&mut self, grid: AsciiGrid);
}

impl<F: FnMut(AsciiGrid) + Send> FrameSink for F {
    fn push(&mut self, grid: AsciiGrid) {
        self(grid)
    }
}

/// Drives a frame source through the conversion pipeline on a worker thread
///
/// The streamer is `Stopped` on construction. `start` transitions to
/// `Playing` by spawning the worker; `stop` (or a fatal stream error)
/// transitions back. `Stopped` is re-enterable: a new `start` after `stop`
/// opens a fresh playback session.
pub struct FrameStreamer {
    running: Arc<AtomicBool>,
    params: Arc<Mutex<ProcessingParams>>,
    worker: Option<JoinHandle<Result<()>>>,
}

impl FrameStreamer {
    pub fn new(params: ProcessingParams) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            params: Arc::new(Mutex::new(params)),
            worker: None,
        }
    }

    /// Whether a playback session is currently running
    ///
    /// Flips to `false` on its own if the worker hits a fatal error; the
    /// error itself is surfaced by the next `stop` call.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Replaces the processing parameters
    ///
    /// The worker snapshots the parameters at the start of every frame, so
    /// the change takes effect on the next frame of a running stream.
    pub fn set_params(&self, params: ProcessingParams) -> Result<()> {
        params.validate()?;
        *lock_params(&self.params) = params;
        Ok(())
    }

    /// Starts streaming from `source` into `sink` at roughly `fps` frames
    /// per second
    ///
    /// Starting while already playing is a no-op (never a second worker).
    /// Playback loops forever: end-of-stream seeks back to the first frame
    /// rather than terminating.
    ///
    /// # Errors
    /// Fails with `InvalidParameter` if `fps` is 0 or the current
    /// parameters are invalid.
    pub fn start<S, K>(&mut self, source: S, ramp: CharRamp, fps: u32, sink: K) -> Result<()>
    where
        S: FrameSource + 'static,
        K: FrameSink + 'static,
    {
        if self.is_running() {
            debug!("stream already playing, start ignored");
            return Ok(());
        }
        if fps == 0 {
            return Err(Error::InvalidParameter(
                "fps must be a positive integer".into(),
            ));
        }
        lock_params(&self.params).validate()?;

        // Reap a worker that already stopped on its own; its error was
        // logged when the loop broke and stop() was never called.
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let params = Arc::clone(&self.params);
        self.worker = Some(thread::spawn(move || {
            run_worker(source, running, params, ramp, fps, sink)
        }));
        Ok(())
    }

    /// Stops playback and surfaces the session's terminal result
    ///
    /// Blocks until the worker has observed the stop signal (within one
    /// frame interval) and released its source. Stopping an already
    /// stopped streamer returns the last session's error, if any, exactly
    /// once; after that it is an `Ok` no-op.
    pub fn stop(&mut self) -> Result<()> {
        self.running.store(false, Ordering::SeqCst);
        match self.worker.take() {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(Error::Io(std::io::Error::other("stream worker panicked")))),
            None => Ok(()),
        }
    }
}

impl Drop for FrameStreamer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Snapshot helper that survives a poisoned lock
fn lock_params(params: &Mutex<ProcessingParams>) -> std::sync::MutexGuard<'_, ProcessingParams> {
    match params.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn run_worker<S, K>(
    mut source: S,
    running: Arc<AtomicBool>,
    params: Arc<Mutex<ProcessingParams>>,
    ramp: CharRamp,
    fps: u32,
    mut sink: K,
) -> Result<()>
where
    S: FrameSource,
    K: FrameSink,
{
    info!("stream started at {fps} fps");
    let tick = Duration::from_secs_f64(1.0 / fps as f64);
    let outcome = play_loop(&mut source, &running, &params, &ramp, tick, &mut sink);

    // Release the decode handle before reporting stopped
    drop(source);
    running.store(false, Ordering::SeqCst);

    match &outcome {
        Ok(()) => info!("stream stopped"),
        Err(e) => error!("stream stopped on error: {e}"),
    }
    outcome
}

fn play_loop<S, K>(
    source: &mut S,
    running: &AtomicBool,
    params: &Mutex<ProcessingParams>,
    ramp: &CharRamp,
    tick: Duration,
    sink: &mut K,
) -> Result<()>
where
    S: FrameSource,
    K: FrameSink,
{
    while running.load(Ordering::SeqCst) {
        let frame = match source.read_frame()? {
            Some(frame) => frame,
            None => {
                // Loop playback: rewind instead of terminating
                debug!("end of stream, seeking back to first frame");
                source.seek_to_start()?;
                continue;
            }
        };

        // Read-only parameter snapshot for this frame
        let snapshot = lock_params(params).clone();
        let gray = preprocess(&frame, &snapshot)?;
        sink.push(quantize(&gray, ramp)?);

        thread::sleep(tick);
    }
    Ok(())
}
