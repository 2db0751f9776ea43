//! Concrete frame sources
//!
//! Video arrives as a directory of pre-extracted frame images (for
//! example `ffmpeg -i clip.mp4 frames/frame_%04d.png`), decoded one file
//! at a time. This keeps the crate free of system codec libraries while
//! exercising the full open/read/seek/close contract of
//! [`FrameSource`](crate::stream::FrameSource).

use crate::error::{Error, Result};
use crate::stream::FrameSource;
use image::RgbaImage;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions recognized as frames
const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Frame stream backed by a directory of image files
///
/// Frames play in file-name order, so zero-padded frame numbers keep the
/// original sequence. Files are decoded lazily, one per `read_frame`;
/// dropping the source releases the directory.
#[derive(Debug)]
pub struct ImageFolderSource {
    frames: Vec<PathBuf>,
    next: usize,
}

impl ImageFolderSource {
    /// Opens a frame directory
    ///
    /// # Errors
    /// Fails with `StreamOpen` if the directory cannot be read or holds no
    /// recognizable frame images.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| Error::StreamOpen {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut frames: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_frame_file(path))
            .collect();
        frames.sort();

        if frames.is_empty() {
            return Err(Error::StreamOpen {
                path: dir.to_path_buf(),
                reason: "no frame images found".into(),
            });
        }

        debug!("opened frame folder {} ({} frames)", dir.display(), frames.len());
        Ok(Self { frames, next: 0 })
    }

    /// Number of frames in one pass of the stream
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ImageFolderSource {
    fn read_frame(&mut self) -> Result<Option<RgbaImage>> {
        let Some(path) = self.frames.get(self.next) else {
            return Ok(None);
        };
        // A frame that no longer decodes is fatal, not end-of-stream
        let frame = image::open(path)?.to_rgba8();
        self.next += 1;
        Ok(Some(frame))
    }

    fn seek_to_start(&mut self) -> Result<()> {
        self.next = 0;
        Ok(())
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    fn write_frames(count: usize) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..count {
            let v = (i * 60 % 256) as u8;
            let img = RgbaImage::from_pixel(4, 4, Rgba([v, v, v, 255]));
            img.save(dir.path().join(format!("frame_{i:04}.png"))).unwrap();
        }
        dir
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let err = ImageFolderSource::open("no/such/frames").unwrap_err();
        assert!(matches!(err, Error::StreamOpen { .. }));
    }

    #[test]
    fn test_open_empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageFolderSource::open(dir.path()).unwrap_err();
        assert!(matches!(err, Error::StreamOpen { .. }));
    }

    #[test]
    fn test_non_frame_files_are_ignored() {
        let dir = write_frames(2);
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();
        let source = ImageFolderSource::open(dir.path()).unwrap();
        assert_eq!(source.frame_count(), 2);
    }

    #[test]
    fn test_frames_play_in_name_order() {
        let dir = write_frames(3);
        let mut source = ImageFolderSource::open(dir.path()).unwrap();

        // frame 0 is black, frame 1 is 60, frame 2 is 120
        for expected in [0u8, 60, 120] {
            let frame = source.read_frame().unwrap().unwrap();
            assert_eq!(frame.get_pixel(0, 0)[0], expected);
        }
        assert!(source.read_frame().unwrap().is_none());
    }

    #[test]
    fn test_seek_to_start_rewinds() {
        let dir = write_frames(2);
        let mut source = ImageFolderSource::open(dir.path()).unwrap();

        while source.read_frame().unwrap().is_some() {}
        source.seek_to_start().unwrap();

        let frame = source.read_frame().unwrap().unwrap();
        assert_eq!(frame.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn test_corrupt_frame_is_a_decode_error() {
        let dir = write_frames(1);
        std::fs::write(dir.path().join("frame_0000.png"), b"garbage").unwrap();
        let mut source = ImageFolderSource::open(dir.path()).unwrap();
        let err = source.read_frame().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_reopen_after_drop_succeeds() {
        let dir = write_frames(2);
        let mut source = ImageFolderSource::open(dir.path()).unwrap();
        let _ = source.read_frame().unwrap();
        drop(source);

        let source = ImageFolderSource::open(dir.path()).unwrap();
        assert_eq!(source.frame_count(), 2);
    }
}
