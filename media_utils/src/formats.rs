//! Media classification by file extension

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::errors::{MediaError, Result};

/// Image extensions picked up by the scanner
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "jfif", "webp"];

/// Video extensions picked up by the scanner
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Classify a path by the text after the last dot of its file name.
/// Matching is case-insensitive, and a dotfile such as `.png` counts.
/// Returns `None` for anything outside the two allow-lists.
pub fn classify(path: &Path) -> Option<MediaKind> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    let (_, ext) = name.rsplit_once('.')?;
    if IMAGE_EXTENSIONS.contains(&ext) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub path: PathBuf,
    pub kind: MediaKind,
}

/// Direct media entries of one folder, split by kind. Each list is sorted by
/// file name.
#[derive(Debug, Clone, Default)]
pub struct MediaListing {
    pub images: Vec<MediaFile>,
    pub videos: Vec<MediaFile>,
}

impl MediaListing {
    pub fn len(&self) -> usize {
        self.images.len() + self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.videos.is_empty()
    }

    /// Images first, then videos.
    pub fn iter(&self) -> impl Iterator<Item = &MediaFile> {
        self.images.iter().chain(self.videos.iter())
    }
}

/// List the media files directly inside `dir` (no recursion).
///
/// Entries are classified by name before anything is resolved, so
/// subdirectories, unrecognised names and dangling or looping symlinks with
/// such names are dropped silently. A symlink with a media name is followed;
/// if it dangles, that is an error. A missing or unreadable folder is an
/// error.
pub fn list_media_files(dir: &Path) -> Result<MediaListing> {
    if dir.exists() && !dir.is_dir() {
        return Err(MediaError::NotADirectory(dir.to_path_buf()));
    }

    let mut listing = MediaListing::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| MediaError::ListDirectory {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        let Some(kind) = classify(path) else {
            tracing::debug!(path = %path.display(), "Skipping non-media entry");
            continue;
        };

        if !is_regular_file(&entry)? {
            tracing::debug!(path = %path.display(), "Skipping non-file entry with a media name");
            continue;
        }

        let file = MediaFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: path.to_path_buf(),
            kind,
        };
        match kind {
            MediaKind::Image => listing.images.push(file),
            MediaKind::Video => listing.videos.push(file),
        }
    }

    tracing::info!(
        dir = %dir.display(),
        images = listing.images.len(),
        videos = listing.videos.len(),
        "Listed media files"
    );

    Ok(listing)
}

/// Symlinks are resolved here, only for entries that already have a media name.
fn is_regular_file(entry: &DirEntry) -> Result<bool> {
    if !entry.path_is_symlink() {
        return Ok(entry.file_type().is_file());
    }
    let target = std::fs::metadata(entry.path()).map_err(|source| MediaError::BrokenLink {
        path: entry.path().to_path_buf(),
        source,
    })?;
    Ok(target.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_classify_images() {
        for name in ["a.png", "a.jpg", "a.jpeg", "a.bmp", "a.tiff", "a.jfif", "a.webp"] {
            assert_eq!(classify(Path::new(name)), Some(MediaKind::Image), "{}", name);
        }
    }

    #[test]
    fn test_classify_videos() {
        for name in ["a.mp4", "a.avi", "a.mov", "a.mkv"] {
            assert_eq!(classify(Path::new(name)), Some(MediaKind::Video), "{}", name);
        }
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify(Path::new("HOLIDAY.JPG")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new("Clip.MoV")), Some(MediaKind::Video));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(Path::new("notes.txt")), None);
        assert_eq!(classify(Path::new("anim.gif")), None);
        assert_eq!(classify(Path::new("clip.webm")), None);
        assert_eq!(classify(Path::new("README")), None);
        assert_eq!(classify(Path::new("photo.tif")), None);
        assert_eq!(classify(Path::new("png")), None);
    }

    #[test]
    fn test_classify_dotfile_name() {
        assert_eq!(classify(Path::new(".png")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new("/media/.MKV")), Some(MediaKind::Video));
    }

    #[test]
    fn test_list_media_files_partitions_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.png", "a.JPG", "clip.mp4", "notes.txt", "another.mkv"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::write(dir.path().join("nested.png").join("inner.png"), b"").unwrap();

        let listing = list_media_files(dir.path()).unwrap();

        let images: Vec<_> = listing.images.iter().map(|f| f.name.as_str()).collect();
        let videos: Vec<_> = listing.videos.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(images, vec!["a.JPG", "b.png"]);
        assert_eq!(videos, vec!["another.mkv", "clip.mp4"]);
        assert_eq!(listing.len(), 4);

        let all: Vec<_> = listing.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(all, vec!["a.JPG", "b.png", "another.mkv", "clip.mp4"]);
    }

    #[test]
    fn test_list_media_files_empty_folder() {
        let dir = TempDir::new().unwrap();
        let listing = list_media_files(dir.path()).unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_list_media_files_missing_folder() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does_not_exist");
        let err = list_media_files(&missing).unwrap_err();
        assert!(matches!(err, MediaError::ListDirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_media_files_ignores_dangling_non_media_link() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", dir.path().join("notes.txt")).unwrap();

        let listing = list_media_files(dir.path()).unwrap();
        let names: Vec<_> = listing.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_media_files_ignores_link_to_ancestor() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop.mp4")).unwrap();

        let listing = list_media_files(dir.path()).unwrap();
        let names: Vec<_> = listing.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_media_files_follows_media_link() {
        let dir = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        fs::write(target.path().join("real.mov"), b"").unwrap();
        std::os::unix::fs::symlink(target.path().join("real.mov"), dir.path().join("clip.mov"))
            .unwrap();

        let listing = list_media_files(dir.path()).unwrap();
        let videos: Vec<_> = listing.videos.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(videos, vec!["clip.mov"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_media_files_dangling_media_link_fails() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink("/nonexistent/target.png", dir.path().join("a.png")).unwrap();

        let err = list_media_files(dir.path()).unwrap_err();
        assert!(matches!(err, MediaError::BrokenLink { .. }));
    }

    #[test]
    fn test_list_media_files_rejects_plain_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("clip.mp4");
        fs::write(&file, b"").unwrap();
        let err = list_media_files(&file).unwrap_err();
        assert!(matches!(err, MediaError::NotADirectory(_)));
    }
}
