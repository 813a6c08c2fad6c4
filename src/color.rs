//! Colors as edited in the panel and uploaded to the `uColor` slots.
//!
//! Components are stored as `f32` in `0.0..=1.0`. Hex strings round-trip
//! exactly through the 8-bit channels, so a color parsed from `#8ecae6`
//! displays as `#8ecae6` again.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    Empty,
    InvalidHex(String),
    InvalidHsl(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty color string"),
            Self::InvalidHex(raw) => write!(f, "invalid hex color: {raw}"),
            Self::InvalidHsl(raw) => write!(f, "invalid hsl color: {raw}"),
        }
    }
}

impl std::error::Error for ColorError {}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parses `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn from_hex(raw: &str) -> Result<Self, ColorError> {
        let digits = raw.trim().trim_start_matches('#');
        let bad = || ColorError::InvalidHex(raw.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16).ok_or_else(bad)? as u8;
                    *slot = v * 17;
                }
                Ok(Self::from_bytes(channels[0], channels[1], channels[2]))
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
                Ok(Self::from_bytes(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => Err(bad()),
        }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_hsl(self) -> Hsl {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) * 0.5;
        if (max - min).abs() <= f32::EPSILON {
            return Hsl { h: 0.0, s: 0.0, l };
        }
        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == self.r {
            (self.g - self.b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / d + 2.0
        } else {
            (self.r - self.g) / d + 4.0
        };
        Hsl { h: (h * 60.0).rem_euclid(360.0), s, l }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Accepts hex (`#8ecae6`) and CSS-style `hsl(h, s%, l%)`.
impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }
        if s.to_ascii_lowercase().starts_with("hsl") {
            return s.parse::<Hsl>().map(Hsl::to_rgb);
        }
        Self::from_hex(s)
    }
}

impl Hsl {
    /// One independent draw: hue over the full wheel, saturation in
    /// `[0.5, 1.0)`, lightness in `[0.4, 0.8)`.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self {
            h: rng.f32() * 360.0,
            s: 0.5 + rng.f32() * 0.5,
            l: 0.4 + rng.f32() * 0.4,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        if s == 0.0 {
            return Rgb::new(l, l, l);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Rgb::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s * 100.0, self.l * 100.0)
    }
}

impl FromStr for Hsl {
    type Err = ColorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let bad = || ColorError::InvalidHsl(raw.to_string());
        let lower = raw.trim().to_ascii_lowercase();
        let body = lower
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(bad)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let [h, s, l] = parts.as_slice() else {
            return Err(bad());
        };
        let h: f32 = h.trim_end_matches("deg").parse().map_err(|_| bad())?;
        let percent = |v: &str| -> Result<f32, ColorError> {
            let n: f32 = v.trim_end_matches('%').trim().parse().map_err(|_| bad())?;
            Ok(n / 100.0)
        };
        Ok(Hsl {
            h: h.rem_euclid(360.0),
            s: percent(*s)?,
            l: percent(*l)?,
        })
    }
}
