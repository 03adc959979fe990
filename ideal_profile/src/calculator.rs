//! Ideal profile calculation
//!
//! One listing, one metadata extraction per file, one reduction. Extraction
//! runs on the rayon pool; the reduction sees files in listing order (images
//! first, then videos, each sorted by name).

use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use media_utils::{
    list_media_files, MediaFile, MediaListing, MediaMetadata, MediaProbe, Resolution,
};

use crate::standard_profile::StandardProfile;

/// Images carry no framerate, so they can only match an ideal whose
/// framerate is exactly this value.
pub const IMAGE_MATCH_FRAME_RATE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ProbedFile {
    pub file: MediaFile,
    pub metadata: MediaMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealProfile {
    pub max_width: u32,
    pub max_height: u32,
    /// Over videos only; 0 when the folder holds none.
    pub max_frame_rate: f64,
    /// Files sitting exactly at the ideal, in listing order.
    pub matching_files: Vec<String>,
    /// Exactly one distinct resolution across all files (false for none).
    pub all_files_match: bool,
}

impl IdealProfile {
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.max_width, self.max_height)
    }

    pub fn standard_profile(&self) -> Option<StandardProfile> {
        StandardProfile::classify(self.max_width, self.max_height, self.max_frame_rate)
    }

    /// Whether one file's metadata sits exactly at this ideal.
    pub fn is_match(&self, metadata: &MediaMetadata) -> bool {
        let at_ideal_resolution = metadata.resolution() == self.resolution();
        match metadata {
            MediaMetadata::Image(_) => {
                self.max_frame_rate == IMAGE_MATCH_FRAME_RATE && at_ideal_resolution
            }
            MediaMetadata::Video(info) => {
                at_ideal_resolution && info.frame_rate == self.max_frame_rate
            }
        }
    }
}

/// Scan `folder` and compute its ideal profile. Fails on the first folder or
/// decode error; there are no partial results.
pub fn calculate_ideal_profile<P: MediaProbe>(
    folder: &Path,
    probe: &P,
) -> media_utils::Result<IdealProfile> {
    let listing = list_media_files(folder)?;
    let probed = extract_metadata(&listing, probe)?;
    let profile = reduce(&probed);

    tracing::info!(
        folder = %folder.display(),
        files = probed.len(),
        ideal = %profile.resolution(),
        max_frame_rate = profile.max_frame_rate,
        matching = profile.matching_files.len(),
        all_files_match = profile.all_files_match,
        "Calculated ideal profile"
    );

    Ok(profile)
}

/// Extract every file's metadata once, in parallel, keeping listing order.
pub fn extract_metadata<P: MediaProbe>(
    listing: &MediaListing,
    probe: &P,
) -> media_utils::Result<Vec<ProbedFile>> {
    let files: Vec<&MediaFile> = listing.iter().collect();

    files
        .par_iter()
        .map(|file| -> media_utils::Result<ProbedFile> {
            let metadata = probe.metadata(file)?;
            tracing::debug!(file = %file.name, kind = file.kind.as_str(), ?metadata, "Extracted metadata");
            Ok(ProbedFile {
                file: MediaFile::clone(file),
                metadata,
            })
        })
        .collect()
}

/// Fold already-extracted metadata into an [`IdealProfile`].
pub fn reduce(probed: &[ProbedFile]) -> IdealProfile {
    let mut max_width = 0u32;
    let mut max_height = 0u32;
    let mut max_frame_rate = 0.0_f64;
    let mut resolutions = HashSet::new();

    for entry in probed {
        let resolution = entry.metadata.resolution();
        max_width = max_width.max(resolution.width);
        max_height = max_height.max(resolution.height);
        if let Some(frame_rate) = entry.metadata.frame_rate() {
            max_frame_rate = max_frame_rate.max(frame_rate);
        }
        resolutions.insert(resolution);
    }

    let mut profile = IdealProfile {
        max_width,
        max_height,
        max_frame_rate,
        matching_files: Vec::new(),
        all_files_match: resolutions.len() == 1,
    };

    let matching_files = probed
        .iter()
        .filter(|entry| profile.is_match(&entry.metadata))
        .map(|entry| entry.file.name.clone())
        .collect();
    profile.matching_files = matching_files;

    profile
}
