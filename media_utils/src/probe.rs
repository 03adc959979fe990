//! Metadata probing seam
//!
//! The calculator only needs two read-only queries: an image's pixel
//! dimensions and a video's dimensions plus framerate. [`MediaProbe`] names
//! them; [`SystemProbe`] answers them with the `image` crate and ffprobe.

use std::fmt;
use std::path::Path;

use crate::errors::{MediaError, Result};
use crate::ffprobe::probe_video;
use crate::formats::{MediaFile, MediaKind};
use crate::image_probe::read_image_resolution;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width and height swapped, for content shown rotated a quarter turn.
    pub const fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VideoInfo {
    pub resolution: Resolution,
    pub frame_rate: f64,
}

impl VideoInfo {
    pub const fn new(width: u32, height: u32, frame_rate: f64) -> Self {
        Self {
            resolution: Resolution::new(width, height),
            frame_rate,
        }
    }
}

/// Extracted metadata for one file. Images carry no framerate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MediaMetadata {
    Image(Resolution),
    Video(VideoInfo),
}

impl MediaMetadata {
    pub fn resolution(&self) -> Resolution {
        match self {
            MediaMetadata::Image(res) => *res,
            MediaMetadata::Video(info) => info.resolution,
        }
    }

    pub fn frame_rate(&self) -> Option<f64> {
        match self {
            MediaMetadata::Image(_) => None,
            MediaMetadata::Video(info) => Some(info.frame_rate),
        }
    }
}

pub trait MediaProbe: Sync {
    fn image_resolution(&self, path: &Path) -> Result<Resolution>;

    fn video_info(&self, path: &Path) -> Result<VideoInfo>;

    /// Dispatch on the file's kind.
    fn metadata(&self, file: &MediaFile) -> Result<MediaMetadata> {
        match file.kind {
            MediaKind::Image => self.image_resolution(&file.path).map(MediaMetadata::Image),
            MediaKind::Video => self.video_info(&file.path).map(MediaMetadata::Video),
        }
    }
}

/// Reads images with the `image` crate and videos with ffprobe.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl MediaProbe for SystemProbe {
    fn image_resolution(&self, path: &Path) -> Result<Resolution> {
        read_image_resolution(path)
    }

    fn video_info(&self, path: &Path) -> Result<VideoInfo> {
        let probed = probe_video(path).map_err(|source| MediaError::VideoProbe {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            path = %path.display(),
            codec = %probed.video_codec,
            format = %probed.format_name,
            duration_secs = probed.duration,
            width = probed.width,
            height = probed.height,
            rotation = probed.rotation,
            fps = probed.frame_rate,
            "Probed video"
        );

        Ok(VideoInfo::new(probed.width, probed.height, probed.frame_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_resolution_display() {
        assert_eq!(Resolution::new(1920, 1080).to_string(), "1920x1080");
    }

    #[test]
    fn test_resolution_transposed() {
        assert_eq!(Resolution::new(1920, 1080).transposed(), Resolution::new(1080, 1920));
    }

    #[test]
    fn test_metadata_accessors() {
        let image = MediaMetadata::Image(Resolution::new(800, 600));
        assert_eq!(image.resolution(), Resolution::new(800, 600));
        assert_eq!(image.frame_rate(), None);

        let video = MediaMetadata::Video(VideoInfo::new(1280, 720, 59.94));
        assert_eq!(video.resolution(), Resolution::new(1280, 720));
        assert_eq!(video.frame_rate(), Some(59.94));
    }

    #[test]
    fn test_system_probe_dispatches_images() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("still.png");
        RgbImage::new(20, 10).save(&path).unwrap();

        let file = MediaFile {
            name: "still.png".to_string(),
            path,
            kind: MediaKind::Image,
        };
        let meta = SystemProbe.metadata(&file).unwrap();
        assert_eq!(meta, MediaMetadata::Image(Resolution::new(20, 10)));
    }

    #[test]
    fn test_system_probe_video_not_a_file() {
        let file = MediaFile {
            name: "gone.mp4".to_string(),
            path: PathBuf::from("/nonexistent/gone.mp4"),
            kind: MediaKind::Video,
        };
        // Either ffprobe is missing or the path is rejected; both are errors.
        let err = SystemProbe.metadata(&file).unwrap_err();
        assert!(matches!(err, MediaError::VideoProbe { .. }));
    }
}
