//! Image dimension reading
//!
//! Only the header (and EXIF block, if any) is decoded; pixel data is never
//! loaded. Dimensions are reported as displayed, after EXIF orientation.

use image::metadata::Orientation;
use image::{ImageDecoder, ImageReader};
use std::path::Path;

use crate::errors::{MediaError, Result};
use crate::probe::Resolution;

/// Read the displayed pixel dimensions of an image.
///
/// The format is sniffed from the file content first, so a `.jfif` or a
/// mislabelled extension still decodes. A quarter-turn EXIF orientation swaps
/// width and height.
pub fn read_image_resolution(path: &Path) -> Result<Resolution> {
    let decode_err = |source: image::ImageError| MediaError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let mut decoder = reader.into_decoder().map_err(decode_err)?;
    let (width, height) = decoder.dimensions();

    let orientation = decoder.orientation().unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable EXIF orientation");
        Orientation::NoTransforms
    });
    let resolution = oriented(Resolution::new(width, height), orientation);

    tracing::debug!(
        path = %path.display(),
        stored = %Resolution::new(width, height),
        displayed = %resolution,
        ?orientation,
        "Read image dimensions"
    );
    Ok(resolution)
}

/// Apply an EXIF orientation to stored dimensions.
pub fn oriented(stored: Resolution, orientation: Orientation) -> Resolution {
    match orientation {
        Orientation::Rotate90
        | Orientation::Rotate270
        | Orientation::Rotate90FlipH
        | Orientation::Rotate270FlipH => stored.transposed(),
        _ => stored,
    }
}
