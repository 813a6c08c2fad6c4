//! Control panel adapter: declarative widget bindings and action buttons.
//!
//! The panel does not hold values. A bound widget subscribes to the
//! [`ParamStore`], so every store write (from the widget itself, from
//! randomize or from reset) is reflected in the display without manual
//! bookkeeping. `refresh_all` and `refresh_matching` re-announce current
//! values to the subscribed widgets on demand.

use std::collections::HashMap;
use std::fmt;

use crate::camera::CameraMode;
use crate::params::{Domain, Param, ParamStore, SubscriptionId, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Folder {
    Mesh,
    Color,
    Noise,
}

impl Folder {
    pub const ALL: [Folder; 3] = [Folder::Mesh, Folder::Color, Folder::Noise];

    pub fn title(self) -> &'static str {
        match self {
            Folder::Mesh => "Mesh",
            Folder::Color => "Color",
            Folder::Noise => "Noise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetKind {
    Color,
    Toggle,
    Slider { min: f32, max: f32, step: f32 },
    /// Two sliders sharing one range, for `vec2` parameters.
    Point2 { min: f32, max: f32, step: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    pub label: String,
    pub folder: Folder,
    pub kind: WidgetKind,
}

impl WidgetSpec {
    pub fn new(label: impl Into<String>, folder: Folder, kind: WidgetKind) -> Self {
        Self {
            label: label.into(),
            folder,
            kind,
        }
    }
}

/// A display element that can be re-synced from a value.
pub trait Widget {
    fn refresh(&mut self, value: &Value);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleCamera,
    RandomizeColors,
    ExportImage,
    Reset,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::ToggleCamera,
        Action::RandomizeColors,
        Action::ExportImage,
        Action::Reset,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::ToggleCamera => camera_button_title(CameraMode::Locked),
            Action::RandomizeColors => "🎨 Randomize Colors",
            Action::ExportImage => "🖼️ Export Image",
            Action::Reset => "🔄 Reset",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn camera_button_title(mode: CameraMode) -> &'static str {
    match mode {
        CameraMode::Locked => "🎥 Edit Camera",
        CameraMode::Editable => "🎥 Reset Camera",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub param: Param,
    pub spec: WidgetSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionButton {
    pub action: Action,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    title: String,
    bindings: Vec<Binding>,
    actions: Vec<ActionButton>,
    widgets: HashMap<Param, SubscriptionId>,
}

impl ControlPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            bindings: Vec::new(),
            actions: Vec::new(),
            widgets: HashMap::new(),
        }
    }

    /// The stock layout: `color_count` color pickers, the mesh toggles, the
    /// noise sliders and the four action buttons.
    pub fn standard(color_count: usize) -> Self {
        let mut panel = Self::new("Gradient Generator");
        for (i, &param) in Param::COLORS.iter().take(color_count).enumerate() {
            let label = format!("color {}", i + 1);
            panel.declare(param, WidgetSpec::new(label, Folder::Color, WidgetKind::Color));
        }
        for (param, label) in [(Param::Wireframe, "wireframe"), (Param::Grain, "grain")] {
            panel.declare(param, WidgetSpec::new(label, Folder::Mesh, WidgetKind::Toggle));
        }
        for (param, label) in [(Param::NoiseAmount, "amount"), (Param::NoiseSpeed, "speed")] {
            panel.declare(param, WidgetSpec::new(label, Folder::Noise, slider_for(param)));
        }
        panel.declare(
            Param::NoiseFrequency,
            WidgetSpec::new("frequency", Folder::Noise, slider_for(Param::NoiseFrequency)),
        );
        for action in Action::ALL {
            panel.bind_action(action, action.label());
        }
        panel
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Registers the layout entry for `param` without attaching a widget.
    pub fn declare(&mut self, param: Param, spec: WidgetSpec) {
        self.bindings.retain(|b| b.param != param);
        self.bindings.push(Binding { param, spec });
    }

    /// Attaches `widget` to `param`: it is refreshed on every store change to
    /// that parameter, starting with the current value. A widget previously
    /// bound to `param` is detached first.
    pub fn bind(
        &mut self,
        store: &mut ParamStore,
        param: Param,
        spec: WidgetSpec,
        mut widget: impl Widget + 'static,
    ) {
        if let Some(old) = self.widgets.remove(&param) {
            store.unsubscribe(old);
        }
        widget.refresh(&store.get(param));
        let id = store.subscribe(move |changed, value| {
            if changed == param {
                widget.refresh(value);
            }
        });
        self.widgets.insert(param, id);
        self.declare(param, spec);
    }

    pub fn has_widget(&self, param: Param) -> bool {
        self.widgets.contains_key(&param)
    }

    pub fn bind_action(&mut self, action: Action, label: impl Into<String>) {
        self.actions.retain(|a| a.action != action);
        self.actions.push(ActionButton {
            action,
            label: label.into(),
        });
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn bindings_in(&self, folder: Folder) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(move |b| b.spec.folder == folder)
    }

    pub fn spec_for(&self, param: Param) -> Option<&WidgetSpec> {
        self.bindings.iter().find(|b| b.param == param).map(|b| &b.spec)
    }

    pub fn actions(&self) -> &[ActionButton] {
        &self.actions
    }

    pub fn refresh_all(&self, store: &mut ParamStore) {
        self.refresh_matching(store, |_| true);
    }

    /// Re-announces bound parameters accepted by `filter`.
    pub fn refresh_matching(&self, store: &mut ParamStore, filter: impl Fn(Param) -> bool) {
        store.notify_matching(|p| filter(p) && self.bindings.iter().any(|b| b.param == p));
    }
}

fn slider_for(param: Param) -> WidgetKind {
    match param.domain() {
        Domain::Range { min, max, step } if param == Param::NoiseFrequency => {
            WidgetKind::Point2 { min, max, step }
        }
        Domain::Range { min, max, step } => WidgetKind::Slider { min, max, step },
        Domain::Any => WidgetKind::Slider { min: 0.0, max: 1.0, step: 0.01 },
    }
}
