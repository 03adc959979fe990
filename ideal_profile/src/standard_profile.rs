//! Standard export profiles, checked from most to least restrictive.

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StandardProfile {
    Hd720p30,
    Hd720p60,
    FullHd1080p30,
    FullHd1080p60,
}

impl StandardProfile {
    /// Evaluation order. Ranges overlap, so the first fit wins.
    pub const LADDER: [StandardProfile; 4] = [
        StandardProfile::Hd720p30,
        StandardProfile::Hd720p60,
        StandardProfile::FullHd1080p30,
        StandardProfile::FullHd1080p60,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StandardProfile::Hd720p30 => "720p30",
            StandardProfile::Hd720p60 => "720p60",
            StandardProfile::FullHd1080p30 => "1080p30",
            StandardProfile::FullHd1080p60 => "1080p60",
        }
    }

    /// (max width, max height, max framerate), all inclusive.
    pub fn limits(&self) -> (u32, u32, f64) {
        match self {
            StandardProfile::Hd720p30 => (1280, 720, 30.0),
            StandardProfile::Hd720p60 => (1280, 720, 60.0),
            StandardProfile::FullHd1080p30 => (1920, 1080, 30.0),
            StandardProfile::FullHd1080p60 => (1920, 1080, 60.0),
        }
    }

    pub fn fits(&self, width: u32, height: u32, frame_rate: f64) -> bool {
        let (max_width, max_height, max_frame_rate) = self.limits();
        width <= max_width && height <= max_height && frame_rate <= max_frame_rate
    }

    /// Smallest profile that accommodates the given maxima, if any.
    pub fn classify(width: u32, height: u32, frame_rate: f64) -> Option<StandardProfile> {
        Self::LADDER
            .into_iter()
            .find(|profile| profile.fits(width, height, frame_rate))
    }
}

impl fmt::Display for StandardProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
