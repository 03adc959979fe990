//! ideal-profile - Folder resolution/framerate analysis
//!
//! Scans the images and videos directly inside a folder, finds the largest
//! resolution and highest framerate present, lists the files that already
//! sit at that ideal, and maps it onto the 720p/1080p standard profiles.
//!
//! ```rust,ignore
//! use ideal_profile::{calculate_ideal_profile, render_report};
//! use media_utils::SystemProbe;
//! use std::path::Path;
//!
//! let profile = calculate_ideal_profile(Path::new("footage/"), &SystemProbe)?;
//! print!("{}", render_report(&profile));
//! ```

pub mod calculator;
pub mod report;
pub mod standard_profile;

pub use calculator::{
    calculate_ideal_profile, extract_metadata, reduce, IdealProfile, ProbedFile,
    IMAGE_MATCH_FRAME_RATE,
};
pub use report::{render_report, NO_STANDARD_PROFILE_MESSAGE};
pub use standard_profile::StandardProfile;
