//! Uniform slots of the gradient program.
//!
//! Names match the GLSL interface in `src/wasm/shaders/gradient.frag` and
//! `gradient.vert` exactly. `Wireframe` is a material flag rather than a GLSL
//! uniform; it lives here because it is pushed the same way.

use std::fmt;

use crate::color::Rgb;

pub const COLOR_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    Color(usize),
    Time,
    Amount,
    Speed,
    Frequency,
    EnableGrain,
    Wireframe,
}

impl Uniform {
    pub fn glsl_name(self) -> Option<String> {
        let name = match self {
            Uniform::Color(slot) => return Some(format!("uColor[{slot}]")),
            Uniform::Time => "uTime",
            Uniform::Amount => "uAmount",
            Uniform::Speed => "uSpeed",
            Uniform::Frequency => "uFrequency",
            Uniform::EnableGrain => "uEnableGrain",
            Uniform::Wireframe => return None,
        };
        Some(name.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UniformError {
    NoSuchSlot(Uniform),
    KindMismatch { uniform: Uniform, value: UniformValue },
}

impl fmt::Display for UniformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchSlot(u) => write!(f, "no uniform slot {u:?}"),
            Self::KindMismatch { uniform, value } => {
                write!(f, "uniform {uniform:?} cannot hold {value:?}")
            }
        }
    }
}

impl std::error::Error for UniformError {}

/// Current shader inputs. Every slot equals the last value written to it.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSet {
    pub colors: [[f32; 3]; COLOR_SLOTS],
    pub time: f32,
    pub amount: f32,
    pub speed: f32,
    pub frequency: [f32; 2],
    pub enable_grain: bool,
    pub wireframe: bool,
}

impl Default for UniformSet {
    fn default() -> Self {
        Self {
            colors: [[0.0; 3]; COLOR_SLOTS],
            time: 0.0,
            amount: 0.0,
            speed: 0.0,
            frequency: [0.0, 0.0],
            enable_grain: false,
            wireframe: false,
        }
    }
}

impl UniformSet {
    pub fn set(&mut self, uniform: Uniform, value: UniformValue) -> Result<(), UniformError> {
        match (uniform, value) {
            (Uniform::Color(slot), UniformValue::Vec3(rgb)) => {
                let target = self
                    .colors
                    .get_mut(slot)
                    .ok_or(UniformError::NoSuchSlot(uniform))?;
                *target = rgb;
            }
            (Uniform::Time, UniformValue::Float(v)) => self.time = v,
            (Uniform::Amount, UniformValue::Float(v)) => self.amount = v,
            (Uniform::Speed, UniformValue::Float(v)) => self.speed = v,
            (Uniform::Frequency, UniformValue::Vec2(v)) => self.frequency = v,
            (Uniform::EnableGrain, UniformValue::Bool(b)) => self.enable_grain = b,
            (Uniform::Wireframe, UniformValue::Bool(b)) => self.wireframe = b,
            _ => return Err(UniformError::KindMismatch { uniform, value }),
        }
        Ok(())
    }

    pub fn get(&self, uniform: Uniform) -> Option<UniformValue> {
        let value = match uniform {
            Uniform::Color(slot) => UniformValue::Vec3(*self.colors.get(slot)?),
            Uniform::Time => UniformValue::Float(self.time),
            Uniform::Amount => UniformValue::Float(self.amount),
            Uniform::Speed => UniformValue::Float(self.speed),
            Uniform::Frequency => UniformValue::Vec2(self.frequency),
            Uniform::EnableGrain => UniformValue::Bool(self.enable_grain),
            Uniform::Wireframe => UniformValue::Bool(self.wireframe),
        };
        Some(value)
    }

    pub fn color(&self, slot: usize) -> Option<Rgb> {
        self.colors.get(slot).map(|&[r, g, b]| Rgb::new(r, g, b))
    }
}
