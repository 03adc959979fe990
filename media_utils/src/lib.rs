//! Shared utilities for the ideal_profile tool
//!
//! - Media classification by file extension
//! - Image header decoding (pixel dimensions)
//! - FFprobe wrapper for video dimensions and framerate
//! - Unified error type
//! - Logging setup and external tool logging

pub mod errors;
pub mod ffprobe;
pub mod formats;
pub mod image_probe;
pub mod logging;
pub mod probe;

pub use errors::{MediaError, Result};
pub use ffprobe::{is_ffprobe_available, parse_frame_rate, probe_video, FFprobeError};
pub use formats::{classify, list_media_files, MediaFile, MediaKind, MediaListing};
pub use image_probe::read_image_resolution;
pub use probe::{MediaMetadata, MediaProbe, Resolution, SystemProbe, VideoInfo};
