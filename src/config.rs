//! Playground configuration.
//!
//! Defaults reproduce the stock five-color gradient. The page can override a
//! few knobs through its query string, e.g. `?colors=3&segments=128`.

use std::fmt;

use crate::backend::PlaneGeometry;
use crate::camera::CameraSettings;
use crate::params::{Params, MAX_COLORS};

#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundConfig {
    pub canvas_id: String,
    /// Colors shown in the panel and touched by randomize, `2..=5`.
    pub color_count: usize,
    pub plane_size: f32,
    pub plane_segments: u32,
    pub max_pixel_ratio: f32,
    pub camera: CameraSettings,
    pub initial: Params,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            canvas_id: "webgl".to_string(),
            color_count: MAX_COLORS,
            plane_size: 1.0,
            plane_segments: 256,
            max_pixel_ratio: 2.0,
            camera: CameraSettings::default(),
            initial: Params::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse { key: String, value: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { key, value, message } => {
                write!(f, "bad value {value:?} for {key}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl PlaygroundConfig {
    pub fn geometry(&self) -> PlaneGeometry {
        PlaneGeometry::new(
            self.plane_size,
            self.plane_size,
            self.plane_segments,
            self.plane_segments,
        )
    }

    /// Keys understood by [`PlaygroundConfig::apply_overrides`].
    pub const QUERY_KEYS: [&'static str; 6] =
        ["colors", "segments", "pixelRatio", "damping", "wireframe", "canvas"];

    /// Splits a raw `key=value&...` query (leading `?` optional) and applies
    /// it. Values are taken literally; the browser entry point decodes them
    /// with `URLSearchParams` and calls [`PlaygroundConfig::apply_overrides`].
    pub fn apply_query(&mut self, query: &str) -> Result<(), ConfigError> {
        let query = query.trim().trim_start_matches('?');
        let pairs = query
            .split('&')
            .filter(|p| !p.trim().is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")));
        self.apply_overrides(pairs)
    }

    /// Applies decoded `(key, value)` overrides.
    ///
    /// Unknown keys are ignored. On the first malformed value the config is
    /// left untouched and the error is returned.
    pub fn apply_overrides<K, V>(
        &mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut next = self.clone();
        for (key, value) in pairs {
            let key = key.as_ref().trim();
            let value = value.as_ref().trim();
            let err = |message: &str| ConfigError::Parse {
                key: key.to_string(),
                value: value.to_string(),
                message: message.to_string(),
            };
            match key {
                "colors" => {
                    let n: usize = value.parse().map_err(|_| err("expected an integer"))?;
                    if !(2..=MAX_COLORS).contains(&n) {
                        return Err(err("must be between 2 and 5"));
                    }
                    next.color_count = n;
                }
                "segments" => {
                    let n: u32 = value.parse().map_err(|_| err("expected an integer"))?;
                    if !(1..=1024).contains(&n) {
                        return Err(err("must be between 1 and 1024"));
                    }
                    next.plane_segments = n;
                }
                "pixelRatio" => {
                    let r: f32 = value.parse().map_err(|_| err("expected a number"))?;
                    if !(r.is_finite() && r > 0.0) {
                        return Err(err("must be positive"));
                    }
                    next.max_pixel_ratio = r;
                }
                "damping" => {
                    let d: f32 = value.parse().map_err(|_| err("expected a number"))?;
                    if !(d > 0.0 && d <= 1.0) {
                        return Err(err("must be in (0, 1]"));
                    }
                    next.camera.damping_factor = d;
                }
                "wireframe" => {
                    next.initial.wireframe =
                        parse_bool(value).ok_or_else(|| err("expected true/false"))?;
                }
                "canvas" if !value.is_empty() => next.canvas_id = value.to_string(),
                _ => {}
            }
        }
        *self = next;
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
