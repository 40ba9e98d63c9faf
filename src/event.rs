// Input event construction

use crate::action::{ActionRegistry, DEFAULT_ACTIVATION_THRESHOLD};
use crate::key_code::{DeviceKind, InputKeyCode};
use glam::Vec3;
use std::time::Instant;

/// Mutable pre-construction form of an input event
///
/// Filled in by the sample pipeline (or by a host injecting a synthetic
/// event) and then frozen into an [`InputEvent`].
#[derive(Debug, Clone)]
pub struct EventData {
    /// Key code that generated the event; `None` for pure action events
    pub key_code: Option<InputKeyCode>,
    pub device: DeviceKind,
    /// Explicit single-action override; when set, key-code resolution is skipped
    pub action: Option<String>,
    /// Whether this is a continuous/analog sample rather than a discrete begin/end
    pub changed: bool,
    pub press_strength: f32,
    pub position: Vec3,
    pub delta: Vec3,
}

impl EventData {
    /// Create event data for a key code
    pub fn from_key_code(key_code: InputKeyCode, device: DeviceKind) -> Self {
        Self {
            key_code: Some(key_code),
            device,
            action: None,
            changed: false,
            press_strength: 0.0,
            position: Vec3::ZERO,
            delta: Vec3::ZERO,
        }
    }

    /// Create event data that targets a single action directly
    pub fn from_action(action: impl Into<String>) -> Self {
        Self {
            key_code: None,
            device: DeviceKind::Unknown,
            action: Some(action.into()),
            changed: false,
            press_strength: 0.0,
            position: Vec3::ZERO,
            delta: Vec3::ZERO,
        }
    }
}

/// An immutable snapshot of one input sample
///
/// Constructed once per raw sample with its action list resolved, then never
/// mutated. Subscribers receive a shared reference and read the post-write
/// action state for the event they are handling.
#[derive(Debug, Clone)]
pub struct InputEvent {
    key_code: Option<InputKeyCode>,
    device: DeviceKind,
    position: Vec3,
    delta: Vec3,
    press_strength: f32,
    actions: Vec<String>,
    changed: bool,
    timestamp: Instant,
}

impl InputEvent {
    /// Freeze event data, resolving the action list
    ///
    /// An explicit action override wins; otherwise the key code's reference
    /// list is copied out of the registry.
    pub(crate) fn resolve(data: EventData, registry: &ActionRegistry) -> Self {
        let actions = match data.action {
            Some(action) => vec![action],
            None => data
                .key_code
                .map(|key_code| registry.actions_for_key_code(key_code).to_vec())
                .unwrap_or_default(),
        };

        Self {
            key_code: data.key_code,
            device: data.device,
            position: data.position,
            delta: data.delta,
            press_strength: data.press_strength,
            actions,
            changed: data.changed,
            timestamp: Instant::now(),
        }
    }

    /// The key code that generated this event, if any
    pub fn key_code(&self) -> Option<InputKeyCode> {
        self.key_code
    }

    /// The device kind that generated this event
    pub fn device(&self) -> DeviceKind {
        self.device
    }

    /// Position of the input (mouse/touch/stick)
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Change in position since the last sample
    pub fn delta(&self) -> Vec3 {
        self.delta
    }

    /// Strength of the press (0 to 1)
    pub fn press_strength(&self) -> f32 {
        self.press_strength
    }

    /// Actions this event resolved to
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Whether this is a continuous/analog sample
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// When this event was constructed
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Check if this event is associated with a specific action
    pub fn is_action(&self, name: &str) -> bool {
        self.actions.iter().any(|action| action == name)
    }

    /// Check if this event resolved to any actions
    pub fn contains_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Check if this event counts as a press at the default threshold
    pub fn is_pressed(&self) -> bool {
        self.press_strength >= DEFAULT_ACTIVATION_THRESHOLD
    }

    /// Check if this event counts as a release at the default threshold
    pub fn is_released(&self) -> bool {
        !self.is_pressed()
    }

    /// Check if this event came from a synthetic source: a custom key or a
    /// direct action injection
    pub fn is_synthetic(&self) -> bool {
        self.key_code.map_or(true, InputKeyCode::is_custom)
    }

    /// Textual name of the originating input, for prompts and debugging
    pub fn text(&self) -> String {
        match self.key_code {
            Some(key_code) => key_code.to_string(),
            None => String::from("Action"),
        }
    }
}
