//! FFprobe wrapper module
//!
//! Reads the pixel dimensions and playback framerate of a video's first video
//! stream from `ffprobe -print_format json` output.

use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use std::time::Instant;
use thiserror::Error;

use crate::logging::log_external_tool;

#[derive(Error, Debug)]
pub enum FFprobeError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("FFprobe failed: {0}")]
    ExecutionFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FfprobeStream {
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub codec_name: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub r_frame_rate: Option<String>,
    #[serde(default)]
    pub avg_frame_rate: Option<String>,
    #[serde(default)]
    pub tags: Option<FfprobeStreamTags>,
    #[serde(default)]
    pub side_data_list: Vec<FfprobeSideData>,
}

impl FfprobeStream {
    /// Rotation in degrees, from the display matrix side data first, then
    /// the legacy `rotate` tag.
    pub fn rotation(&self) -> Option<f64> {
        self.side_data_list
            .iter()
            .find_map(|side| side.rotation)
            .or_else(|| {
                self.tags
                    .as_ref()
                    .and_then(|tags| tags.rotate.as_deref())
                    .and_then(|r| r.trim().parse::<f64>().ok())
            })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FfprobeStreamTags {
    #[serde(default)]
    pub rotate: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FfprobeSideData {
    #[serde(default)]
    pub rotation: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FfprobeFormat {
    #[serde(default)]
    pub format_name: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FfprobeOutput {
    #[serde(default)]
    pub streams: Vec<FfprobeStream>,
    #[serde(default)]
    pub format: Option<FfprobeFormat>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FFprobeResult {
    pub format_name: String,
    pub duration: f64,
    pub video_codec: String,
    /// Displayed width, after rotation
    pub width: u32,
    /// Displayed height, after rotation
    pub height: u32,
    /// Normalised to 0, 90, 180 or 270
    pub rotation: u32,
    pub frame_rate: f64,
}

pub fn is_ffprobe_available() -> bool {
    which::which("ffprobe").is_ok()
}

pub fn probe_video(path: &Path) -> Result<FFprobeResult, FFprobeError> {
    if !is_ffprobe_available() {
        return Err(FFprobeError::ToolNotFound(
            "ffprobe not found. Install FFmpeg and make sure ffprobe is on PATH".to_string(),
        ));
    }

    if !path.is_file() {
        return Err(FFprobeError::ExecutionFailed(format!(
            "Not a file: {}",
            path.display()
        )));
    }

    let path_str = path.to_str().ok_or_else(|| {
        FFprobeError::ExecutionFailed(format!("Invalid path encoding: {}", path.display()))
    })?;

    let args = [
        "-v",
        "error",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
        "-select_streams",
        "v",
        "--",
        path_str,
    ];

    let start = Instant::now();
    let output = Command::new("ffprobe").args(args).output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    log_external_tool(
        "ffprobe",
        &args,
        stderr.trim(),
        output.status.code(),
        start.elapsed(),
    );

    if !output.status.success() {
        let error_msg = if stderr.trim().is_empty() {
            format!(
                "ffprobe failed to analyze file: {} (exit code: {:?})",
                path.display(),
                output.status.code()
            )
        } else {
            format!("ffprobe error for '{}': {}", path.display(), stderr.trim())
        };
        return Err(FFprobeError::ExecutionFailed(error_msg));
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse ffprobe JSON into the fields the calculator needs.
///
/// The first stream with `codec_type == "video"` wins. Dimensions are swapped
/// for streams rotated a quarter turn. The framerate is `avg_frame_rate`, with
/// `r_frame_rate` as fallback. Missing dimensions or a missing framerate are
/// parse errors rather than defaults.
pub fn parse_probe_output(json: &str) -> Result<FFprobeResult, FFprobeError> {
    let parsed: FfprobeOutput =
        serde_json::from_str(json).map_err(|e| FFprobeError::ParseError(e.to_string()))?;

    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| FFprobeError::ParseError("No video stream found".to_string()))?;

    let width = video.width.filter(|w| *w > 0);
    let height = video.height.filter(|h| *h > 0);
    let (width, height) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(FFprobeError::ParseError(format!(
                "Invalid video dimensions: {:?}x{:?}",
                video.width, video.height
            )))
        }
    };

    let rotation = video.rotation().map(normalize_rotation).unwrap_or(0);
    let (width, height) = if rotation % 180 == 90 {
        (height, width)
    } else {
        (width, height)
    };

    let frame_rate = video
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| video.r_frame_rate.as_deref().and_then(parse_frame_rate))
        .ok_or_else(|| {
            FFprobeError::ParseError(format!(
                "Invalid frame rate: avg_frame_rate={:?}, r_frame_rate={:?}",
                video.avg_frame_rate, video.r_frame_rate
            ))
        })?;

    let format = parsed.format.unwrap_or_default();

    Ok(FFprobeResult {
        format_name: format.format_name.unwrap_or_else(|| "unknown".to_string()),
        duration: format
            .duration
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0),
        video_codec: video
            .codec_name
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
        width,
        height,
        rotation,
        frame_rate,
    })
}

/// Snap a rotation in degrees (possibly negative) to 0, 90, 180 or 270.
pub fn normalize_rotation(degrees: f64) -> u32 {
    let quarter_turns = (degrees / 90.0).round() as i64;
    (quarter_turns.rem_euclid(4) * 90) as u32
}

/// Parse an ffprobe rate such as `30/1`, `30000/1001` or `29.97`.
/// Zero, negative and malformed rates yield `None`.
pub fn parse_frame_rate(s: &str) -> Option<f64> {
    let s = s.trim();
    let rate = match s.split_once('/') {
        Some((num, den)) => {
            let num = num.parse::<f64>().ok()?;
            let den = den.parse::<f64>().ok()?;
            if den <= 0.0 {
                return None;
            }
            num / den
        }
        None => s.parse::<f64>().ok()?,
    };

    (rate.is_finite() && rate > 0.0).then_some(rate)
}
