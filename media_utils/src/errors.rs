use std::path::PathBuf;
use thiserror::Error;

use crate::ffprobe::FFprobeError;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Failed to list directory {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Broken link {}: {source}", path.display())]
    BrokenLink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to probe video {}: {source}", path.display())]
    VideoProbe {
        path: PathBuf,
        #[source]
        source: FFprobeError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MediaError>;
