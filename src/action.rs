// Action registry with triple-buffered press state

use crate::key_code::InputKeyCode;
use log::warn;
use std::collections::HashMap;

/// Minimum press strength for an action to count as pressed, unless overridden
pub const DEFAULT_ACTIVATION_THRESHOLD: f32 = 0.5;

/// Three-slot press strength history for one action
///
/// `current` is written immediately on every input event; `previous` and
/// `pre_previous` only advance on the once-per-frame shift. Consumer-facing
/// edge detection compares `previous` against `pre_previous` so a pulse that
/// begins and ends between two shifts is still seen as a full press cycle by
/// code reading state once per frame.
#[derive(Debug, Clone, Copy, Default)]
struct HistoryBuffer {
    current: f32,
    previous: f32,
    pre_previous: f32,
}

impl HistoryBuffer {
    /// Advance the buffer by one frame; `current` is left untouched
    fn shift(&mut self) {
        self.pre_previous = self.previous;
        self.previous = self.current;
    }
}

/// Per-action registration data
#[derive(Debug)]
struct ActionData {
    key_codes: Vec<InputKeyCode>,
    buffer: HistoryBuffer,
    threshold: f32,
}

/// Registry of named actions and their key-code bindings
///
/// Owns the action map and the bidirectional key-code reference table. All
/// lookups against unknown actions warn and return a safe default instead of
/// failing; a missing binding must never take down a running frame.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, ActionData>,

    /// Reverse mapping from key codes to the actions they drive
    key_code_refs: HashMap<InputKeyCode, Vec<String>>,
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn action_data(&self, name: &str) -> Option<&ActionData> {
        let data = self.actions.get(name);
        if data.is_none() {
            warn!("Action '{name}' doesn't exist");
        }
        data
    }

    /// Register an action with the default activation threshold and no bindings
    pub fn register(&mut self, name: &str) {
        self.register_with(name, DEFAULT_ACTIVATION_THRESHOLD, &[]);
    }

    /// Register an action with a threshold and an initial set of key codes
    ///
    /// Duplicate registration warns and is a no-op. Key codes are bound
    /// individually, so a duplicate key code in the list is rejected without
    /// affecting the others.
    pub fn register_with(&mut self, name: &str, threshold: f32, key_codes: &[InputKeyCode]) {
        if self.actions.contains_key(name) {
            warn!("Action '{name}' already exists");
            return;
        }

        self.actions.insert(
            name.to_string(),
            ActionData {
                key_codes: Vec::new(),
                buffer: HistoryBuffer::default(),
                threshold: threshold.clamp(0.0, 1.0),
            },
        );

        for key_code in key_codes {
            self.add_key_code(name, *key_code);
        }
    }

    /// Remove an action and sever all of its key-code bindings
    pub fn unregister(&mut self, name: &str) {
        self.remove_all_key_codes(name);
        self.actions.remove(name);
    }

    /// Check if an action is registered
    pub fn exists(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Get all registered action names
    pub fn actions(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }

    /// Bind a key code to an action; warns and no-ops if already bound
    pub fn add_key_code(&mut self, name: &str, key_code: InputKeyCode) {
        let Some(data) = self.actions.get_mut(name) else {
            warn!("Action '{name}' doesn't exist");
            return;
        };

        if data.key_codes.contains(&key_code) {
            warn!("Action '{name}' already includes key code {key_code}");
            return;
        }

        data.key_codes.push(key_code);
        self.key_code_refs
            .entry(key_code)
            .or_default()
            .push(name.to_string());
    }

    /// Unbind a key code from an action; removing an absent binding is a no-op
    pub fn remove_key_code(&mut self, name: &str, key_code: InputKeyCode) {
        let Some(data) = self.actions.get_mut(name) else {
            warn!("Action '{name}' doesn't exist");
            return;
        };

        let Some(position) = data.key_codes.iter().position(|k| *k == key_code) else {
            return;
        };
        data.key_codes.remove(position);
        self.remove_key_code_reference(key_code, name);
    }

    /// Clear all key-code bindings without deleting the action
    pub fn remove_all_key_codes(&mut self, name: &str) {
        let Some(data) = self.actions.get_mut(name) else {
            warn!("Action '{name}' doesn't exist");
            return;
        };

        let key_codes = std::mem::take(&mut data.key_codes);
        for key_code in key_codes {
            self.remove_key_code_reference(key_code, name);
        }
    }

    fn remove_key_code_reference(&mut self, key_code: InputKeyCode, name: &str) {
        let Some(references) = self.key_code_refs.get_mut(&key_code) else {
            return;
        };
        references.retain(|action| action != name);
        // No dangling empty entries
        if references.is_empty() {
            self.key_code_refs.remove(&key_code);
        }
    }

    /// Get the key codes bound to an action
    pub fn key_codes(&self, name: &str) -> &[InputKeyCode] {
        self.action_data(name)
            .map_or(&[], |data| data.key_codes.as_slice())
    }

    /// Check if a key code is bound to an action
    pub fn has_key_code(&self, name: &str, key_code: InputKeyCode) -> bool {
        self.actions
            .get(name)
            .is_some_and(|data| data.key_codes.contains(&key_code))
    }

    /// Get the actions driven by a key code; empty if none
    pub fn actions_for_key_code(&self, key_code: InputKeyCode) -> &[String] {
        self.key_code_refs
            .get(&key_code)
            .map_or(&[], |actions| actions.as_slice())
    }

    /// Update the activation threshold for an action
    pub fn set_threshold(&mut self, name: &str, threshold: f32) {
        let Some(data) = self.actions.get_mut(name) else {
            warn!("Action '{name}' doesn't exist");
            return;
        };
        data.threshold = threshold.clamp(0.0, 1.0);
    }

    /// Get the activation threshold for an action
    pub fn threshold(&self, name: &str) -> f32 {
        self.action_data(name)
            .map_or(DEFAULT_ACTIVATION_THRESHOLD, |data| data.threshold)
    }

    /// Set an action as pressed with the given strength
    ///
    /// Writes take effect immediately in the current slot; multiple writes
    /// within one frame collapse to the latest value.
    pub fn press(&mut self, name: &str, strength: f32) {
        let Some(data) = self.actions.get_mut(name) else {
            warn!("Action '{name}' doesn't exist");
            return;
        };
        data.buffer.current = strength;
    }

    /// Set an action as released
    pub fn release(&mut self, name: &str) {
        let Some(data) = self.actions.get_mut(name) else {
            warn!("Action '{name}' doesn't exist");
            return;
        };
        data.buffer.current = 0.0;
    }

    /// Get the settled press strength of an action (last completed frame)
    pub fn press_strength(&self, name: &str) -> f32 {
        self.action_data(name).map_or(0.0, |data| data.buffer.previous)
    }

    /// Check if an action is pressed
    pub fn is_pressed(&self, name: &str) -> bool {
        self.action_data(name)
            .is_some_and(|data| data.buffer.previous >= data.threshold)
    }

    /// Check if an action is released
    pub fn is_released(&self, name: &str) -> bool {
        !self.is_pressed(name)
    }

    /// Check if an action crossed into pressed across the last two frames
    ///
    /// Edge detection compares `previous` against `pre_previous`, not
    /// `current` against `previous`.
    pub fn is_just_pressed(&self, name: &str) -> bool {
        self.action_data(name).is_some_and(|data| {
            data.buffer.previous >= data.threshold && data.buffer.pre_previous < data.threshold
        })
    }

    /// Check if an action crossed into released across the last two frames
    pub fn is_just_released(&self, name: &str) -> bool {
        self.action_data(name).is_some_and(|data| {
            data.buffer.previous < data.threshold && data.buffer.pre_previous >= data.threshold
        })
    }

    /// Low-level check against the not-yet-settled current slot.
    /// Intended for internal/event-handler use; the value observed here has
    /// not completed a full frame.
    pub fn is_pressed_this_frame(&self, name: &str) -> bool {
        self.action_data(name)
            .is_some_and(|data| data.buffer.current >= data.threshold)
    }

    /// Low-level check: pressed now but not in the settled frame
    pub fn is_just_pressed_this_frame(&self, name: &str) -> bool {
        self.action_data(name).is_some_and(|data| {
            data.buffer.current >= data.threshold && data.buffer.previous < data.threshold
        })
    }

    /// Low-level check against the not-yet-settled current slot
    pub fn is_released_this_frame(&self, name: &str) -> bool {
        self.action_data(name)
            .is_some_and(|data| data.buffer.current < data.threshold)
    }

    /// Low-level check: released now but pressed in the settled frame
    pub fn is_just_released_this_frame(&self, name: &str) -> bool {
        self.action_data(name).is_some_and(|data| {
            data.buffer.current < data.threshold && data.buffer.previous >= data.threshold
        })
    }

    /// Shift every action's history buffer by one frame
    ///
    /// Must run exactly once per frame, after all samples for the frame have
    /// been applied and before gameplay code reads state.
    pub fn update(&mut self) {
        for data in self.actions.values_mut() {
            data.buffer.shift();
        }
    }
}
