//! Plain-text report printed to stdout.

use std::fmt::Write;

use crate::calculator::IdealProfile;

pub const NO_STANDARD_PROFILE_MESSAGE: &str =
    "The video can't be accommodated by any standard 720p/1080p profile.";

pub fn render_report(profile: &IdealProfile) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Ideal resolution: {}", profile.resolution());
    let _ = writeln!(out, "Max framerate: {}", profile.max_frame_rate);

    if profile.all_files_match {
        let _ = writeln!(out, "All images/videos have the same resolution.");
    }

    if !profile.matching_files.is_empty() {
        let _ = writeln!(
            out,
            "Files with the same resolution and framerate: {:?}",
            profile.matching_files
        );
    }

    match profile.standard_profile() {
        Some(standard) => {
            let _ = writeln!(out, "Best standard profile: {}", standard);
        }
        None => {
            let _ = writeln!(out, "{}", NO_STANDARD_PROFILE_MESSAGE);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        width: u32,
        height: u32,
        fps: f64,
        matching: &[&str],
        all_files_match: bool,
    ) -> IdealProfile {
        IdealProfile {
            max_width: width,
            max_height: height,
            max_frame_rate: fps,
            matching_files: matching.iter().map(|s| s.to_string()).collect(),
            all_files_match,
        }
    }

    #[test]
    fn test_full_report() {
        let report = render_report(&profile(1920, 1080, 30.0, &["a.png", "b.mp4"], true));
        assert_eq!(
            report,
            "Ideal resolution: 1920x1080\n\
             Max framerate: 30\n\
             All images/videos have the same resolution.\n\
             Files with the same resolution and framerate: [\"a.png\", \"b.mp4\"]\n\
             Best standard profile: 1080p30\n"
        );
    }

    #[test]
    fn test_optional_lines_omitted() {
        let report = render_report(&profile(1920, 1080, 60.0, &[], false));
        assert_eq!(
            report,
            "Ideal resolution: 1920x1080\n\
             Max framerate: 60\n\
             Best standard profile: 1080p60\n"
        );
    }

    #[test]
    fn test_empty_folder_report() {
        let report = render_report(&profile(0, 0, 0.0, &[], false));
        assert_eq!(
            report,
            "Ideal resolution: 0x0\nMax framerate: 0\nBest standard profile: 720p30\n"
        );
    }

    #[test]
    fn test_no_fit_report() {
        let report = render_report(&profile(3840, 2160, 30.0, &["uhd.mkv"], true));
        assert!(report.ends_with(&format!("{}\n", NO_STANDARD_PROFILE_MESSAGE)));
        assert!(!report.contains("Best standard profile"));
    }

    #[test]
    fn test_fractional_framerate() {
        let report = render_report(&profile(1280, 720, 29.97, &[], false));
        assert!(report.contains("Max framerate: 29.97\n"));
    }
}
