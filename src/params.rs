//! Parameter store: the single source of truth for every user-tunable field.
//!
//! Values live in a [`Params`] record. The store keeps a copy of the record it
//! was created with and `reset` restores it verbatim. Observers subscribed
//! with [`ParamStore::subscribe`] hear about every change, which is how the
//! panel widgets stay in sync with programmatic edits (randomize, reset).

use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;

pub const MAX_COLORS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Color1,
    Color2,
    Color3,
    Color4,
    Color5,
    Wireframe,
    Grain,
    EditCamera,
    NoiseAmount,
    NoiseSpeed,
    NoiseFrequency,
    CameraPosition,
}

impl Param {
    pub const ALL: [Param; 12] = [
        Param::Color1,
        Param::Color2,
        Param::Color3,
        Param::Color4,
        Param::Color5,
        Param::Wireframe,
        Param::Grain,
        Param::EditCamera,
        Param::NoiseAmount,
        Param::NoiseSpeed,
        Param::NoiseFrequency,
        Param::CameraPosition,
    ];

    pub const COLORS: [Param; MAX_COLORS] = [
        Param::Color1,
        Param::Color2,
        Param::Color3,
        Param::Color4,
        Param::Color5,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Param::Color1 => "color1",
            Param::Color2 => "color2",
            Param::Color3 => "color3",
            Param::Color4 => "color4",
            Param::Color5 => "color5",
            Param::Wireframe => "wireframe",
            Param::Grain => "grain",
            Param::EditCamera => "editCamera",
            Param::NoiseAmount => "amount",
            Param::NoiseSpeed => "speed",
            Param::NoiseFrequency => "frequency",
            Param::CameraPosition => "cameraPosition",
        }
    }

    pub fn color_index(self) -> Option<usize> {
        Param::COLORS.iter().position(|p| *p == self)
    }

    pub fn is_color(self) -> bool {
        self.color_index().is_some()
    }

    pub fn kind(self) -> Kind {
        match self {
            Param::Color1 | Param::Color2 | Param::Color3 | Param::Color4 | Param::Color5 => {
                Kind::Color
            }
            Param::Wireframe | Param::Grain | Param::EditCamera => Kind::Bool,
            Param::NoiseAmount | Param::NoiseSpeed => Kind::Scalar,
            Param::NoiseFrequency => Kind::Vec2,
            Param::CameraPosition => Kind::Vec3,
        }
    }

    /// Range the widget layer clamps to before a value reaches the store.
    pub fn domain(self) -> Domain {
        match self {
            Param::NoiseAmount => Domain::Range { min: 0.0, max: 1.0, step: 0.01 },
            Param::NoiseSpeed => Domain::Range { min: 0.0, max: 0.5, step: 0.01 },
            Param::NoiseFrequency => Domain::Range { min: 0.0, max: 10.0, step: 0.01 },
            _ => Domain::Any,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Param {
    type Err = ParamError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Param::ALL
            .iter()
            .copied()
            .find(|p| p.key() == raw.trim())
            .ok_or_else(|| ParamError::UnknownParam(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Color,
    Bool,
    Scalar,
    Vec2,
    Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Color(Rgb),
    Bool(bool),
    Scalar(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Color(_) => Kind::Color,
            Value::Bool(_) => Kind::Bool,
            Value::Scalar(_) => Kind::Scalar,
            Value::Vec2(_) => Kind::Vec2,
            Value::Vec3(_) => Kind::Vec3,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match *self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match *self {
            Value::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<[f32; 2]> {
        match *self {
            Value::Vec2(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match *self {
            Value::Vec3(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    Any,
    Range { min: f32, max: f32, step: f32 },
}

impl Domain {
    /// Clamps scalars and each vector component; other kinds pass through.
    pub fn clamp(&self, value: Value) -> Value {
        let Domain::Range { min, max, .. } = *self else {
            return value;
        };
        let c = |v: f32| if v.is_nan() { min } else { v.clamp(min, max) };
        match value {
            Value::Scalar(v) => Value::Scalar(c(v)),
            Value::Vec2([x, y]) => Value::Vec2([c(x), c(y)]),
            Value::Vec3([x, y, z]) => Value::Vec3([c(x), c(y), c(z)]),
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    UnknownParam(String),
    KindMismatch { param: Param, expected: Kind, found: Kind },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParam(raw) => write!(f, "unknown parameter: {raw}"),
            Self::KindMismatch { param, expected, found } => {
                write!(f, "{param} expects a {expected:?} value, got {found:?}")
            }
        }
    }
}

impl std::error::Error for ParamError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSettings {
    pub amount: f32,
    pub speed: f32,
    pub frequency: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub colors: [Rgb; MAX_COLORS],
    pub wireframe: bool,
    pub grain: bool,
    pub edit_camera: bool,
    pub noise: NoiseSettings,
    pub camera_position: [f32; 3],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            colors: [
                Rgb::from_bytes(0x8e, 0xca, 0xe6),
                Rgb::from_bytes(0x21, 0x9e, 0xbc),
                Rgb::from_bytes(0x02, 0x30, 0x47),
                Rgb::from_bytes(0xff, 0xb7, 0x03),
                Rgb::from_bytes(0xfb, 0x85, 0x00),
            ],
            wireframe: false,
            grain: false,
            edit_camera: false,
            noise: NoiseSettings {
                amount: 0.1,
                speed: 0.1,
                frequency: [3.0, 6.0],
            },
            camera_position: [0.075, 0.175, 0.075],
        }
    }
}

impl Params {
    pub fn get(&self, param: Param) -> Value {
        match param {
            Param::Color1 | Param::Color2 | Param::Color3 | Param::Color4 | Param::Color5 => {
                let idx = param.color_index().unwrap_or_default();
                Value::Color(self.colors[idx])
            }
            Param::Wireframe => Value::Bool(self.wireframe),
            Param::Grain => Value::Bool(self.grain),
            Param::EditCamera => Value::Bool(self.edit_camera),
            Param::NoiseAmount => Value::Scalar(self.noise.amount),
            Param::NoiseSpeed => Value::Scalar(self.noise.speed),
            Param::NoiseFrequency => Value::Vec2(self.noise.frequency),
            Param::CameraPosition => Value::Vec3(self.camera_position),
        }
    }

    pub fn set(&mut self, param: Param, value: Value) -> Result<(), ParamError> {
        let mismatch = || ParamError::KindMismatch {
            param,
            expected: param.kind(),
            found: value.kind(),
        };
        match (param, value) {
            (p, Value::Color(c)) if p.is_color() => {
                let idx = p.color_index().ok_or_else(mismatch)?;
                self.colors[idx] = c;
            }
            (Param::Wireframe, Value::Bool(b)) => self.wireframe = b,
            (Param::Grain, Value::Bool(b)) => self.grain = b,
            (Param::EditCamera, Value::Bool(b)) => self.edit_camera = b,
            (Param::NoiseAmount, Value::Scalar(v)) => self.noise.amount = v,
            (Param::NoiseSpeed, Value::Scalar(v)) => self.noise.speed = v,
            (Param::NoiseFrequency, Value::Vec2(v)) => self.noise.frequency = v,
            (Param::CameraPosition, Value::Vec3(v)) => self.camera_position = v,
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(Param, Value)> {
        Param::ALL.iter().map(|&p| (p, self.get(p))).collect()
    }
}

pub type Observer = Box<dyn FnMut(Param, &Value)>;

/// Handle returned by [`ParamStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct ParamStore {
    current: Params,
    initial: Params,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl fmt::Debug for ParamStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamStore")
            .field("current", &self.current)
            .field("initial", &self.initial)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ParamStore {
    /// `initial` becomes the immutable snapshot used by [`ParamStore::reset`].
    pub fn new(initial: Params) -> Self {
        Self {
            current: initial,
            initial,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self, param: Param) -> Value {
        self.current.get(param)
    }

    /// Writes without range checks; callers clamp first.
    pub fn set(&mut self, param: Param, value: Value) -> Result<(), ParamError> {
        self.current.set(param, value)?;
        log::debug!("param {param} = {value:?}");
        self.notify(param);
        Ok(())
    }

    /// Restores every field from the initial snapshot and returns the full set.
    pub fn reset(&mut self) -> Vec<(Param, Value)> {
        self.current = self.initial;
        self.notify_matching(|_| true);
        self.current.entries()
    }

    pub fn current(&self) -> &Params {
        &self.current
    }

    pub fn initial(&self) -> &Params {
        &self.initial
    }

    pub fn subscribe(&mut self, observer: impl FnMut(Param, &Value) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drops the observer registered under `id`. Returns whether one existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Re-announces the current value of `param` to every observer.
    pub fn notify(&mut self, param: Param) {
        let value = self.current.get(param);
        for (_, observer) in &mut self.observers {
            observer(param, &value);
        }
    }

    pub fn notify_matching(&mut self, filter: impl Fn(Param) -> bool) {
        for param in Param::ALL.into_iter().filter(|p| filter(*p)) {
            self.notify(param);
        }
    }
}
