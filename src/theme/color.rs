//! Color primitives for status-bar theming
//!
//! Holds the RGB value type plus the two pure decisions made on it:
//! whether a new color differs enough from the current one to matter, and
//! whether foreground content on it should be light or dark.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};

/// Per-channel difference (out of 255) a new color must exceed to count
/// as a change
pub const SIGNIFICANCE_THRESHOLD: u8 = 10;

/// Luminance below which a background is treated as dark
pub const DARK_LUMINANCE_CUTOFF: f64 = 0.5;

/// An 8-bit-per-channel RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xAARRGGBB` pixel, discarding alpha
    pub const fn from_argb(pixel: u32) -> Self {
        Self {
            r: (pixel >> 16) as u8,
            g: (pixel >> 8) as u8,
            b: pixel as u8,
        }
    }

    /// Perceptual luminance in [0, 1]
    ///
    /// Rec. 601 weights applied directly to the gamma-encoded channels. No
    /// linearization is done; the threshold decision is tuned for this form.
    pub fn luminance(&self) -> f64 {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        0.299 * r + 0.587 * g + 0.114 * b
    }

    /// Lowercase `#rrggbb` notation
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ShellError;

    /// Parse `#rrggbb` or `rrggbb`
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ShellError::InvalidColor(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ShellError::InvalidColor(s.to_string()))
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Foreground directive for content drawn over a colored background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Appearance {
    /// Background is dark, draw icons and text in a light tone
    LightForeground,
    /// Background is light, draw icons and text in a dark tone
    DarkForeground,
}

impl Appearance {
    /// Whether the host should switch its status bar to "light bars" mode
    /// (dark icons)
    pub fn wants_light_bars(&self) -> bool {
        matches!(self, Appearance::DarkForeground)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Appearance::LightForeground => "light foreground (dark background)",
            Appearance::DarkForeground => "dark foreground (light background)",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Appearance::LightForeground => write!(f, "light"),
            Appearance::DarkForeground => write!(f, "dark"),
        }
    }
}

/// Decide the foreground tone for a background color
pub fn appearance_directive(color: Rgb) -> Appearance {
    if color.luminance() < DARK_LUMINANCE_CUTOFF {
        Appearance::LightForeground
    } else {
        Appearance::DarkForeground
    }
}

/// True when any channel differs by more than [`SIGNIFICANCE_THRESHOLD`]
pub fn is_significant_change(new: Rgb, old: Rgb) -> bool {
    new.r.abs_diff(old.r) > SIGNIFICANCE_THRESHOLD
        || new.g.abs_diff(old.g) > SIGNIFICANCE_THRESHOLD
        || new.b.abs_diff(old.b) > SIGNIFICANCE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_examples() {
        let base = Rgb::new(100, 100, 100);
        assert!(!is_significant_change(Rgb::new(108, 100, 100), base));
        assert!(!is_significant_change(Rgb::new(110, 100, 100), base));
        assert!(is_significant_change(Rgb::new(111, 100, 100), base));
        assert!(is_significant_change(Rgb::new(100, 100, 89), base));
    }

    #[test]
    fn test_significance_is_symmetric() {
        let samples = [
            Rgb::BLACK,
            Rgb::WHITE,
            Rgb::new(100, 100, 100),
            Rgb::new(111, 100, 100),
            Rgb::new(95, 104, 90),
            Rgb::new(250, 3, 128),
        ];

        for &a in &samples {
            for &b in &samples {
                assert_eq!(is_significant_change(a, b), is_significant_change(b, a));
            }
        }
    }

    #[test]
    fn test_same_color_is_never_significant() {
        for v in [0u8, 10, 127, 245, 255] {
            let c = Rgb::new(v, 255 - v, v / 2);
            assert!(!is_significant_change(c, c));
        }
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(Rgb::BLACK.luminance(), 0.0);
        assert!((Rgb::WHITE.luminance() - 1.0).abs() < 1e-9);
        assert_eq!(appearance_directive(Rgb::BLACK), Appearance::LightForeground);
        assert_eq!(appearance_directive(Rgb::WHITE), Appearance::DarkForeground);
    }

    #[test]
    fn test_luminance_weights_favor_green() {
        // Pure green reads light, pure blue reads dark.
        assert_eq!(appearance_directive(Rgb::new(0, 255, 0)), Appearance::DarkForeground);
        assert_eq!(appearance_directive(Rgb::new(0, 0, 255)), Appearance::LightForeground);
        assert_eq!(appearance_directive(Rgb::new(255, 0, 0)), Appearance::LightForeground);
    }

    #[test]
    fn test_from_argb_drops_alpha() {
        assert_eq!(Rgb::from_argb(0xff1e_2e3e), Rgb::new(0x1e, 0x2e, 0x3e));
        assert_eq!(Rgb::from_argb(0x0000_0000), Rgb::BLACK);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!("#1e1e2e".parse::<Rgb>().unwrap(), Rgb::new(0x1e, 0x1e, 0x2e));
        assert_eq!("FFFFFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("zzzzzz".parse::<Rgb>().is_err());
        assert_eq!(Rgb::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn test_light_bars_follow_directive() {
        assert!(Appearance::DarkForeground.wants_light_bars());
        assert!(!Appearance::LightForeground.wants_light_bars());
    }
}
