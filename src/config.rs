// Per-key deadzone configuration

use crate::key_code::InputKeyCode;
use std::collections::HashMap;

/// Default deadzone applied to thumbstick-family key codes
pub const DEFAULT_THUMBSTICK_DEADZONE: f32 = 0.2;

/// Per-key-code deadzone overrides with a thumbstick-aware fallback
#[derive(Debug, Default)]
pub struct DeadzoneConfig {
    overrides: HashMap<InputKeyCode, f32>,
}

impl DeadzoneConfig {
    /// Create a config with no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the deadzone for a key code, clamped to [0, 1]
    pub fn set(&mut self, key_code: InputKeyCode, deadzone: f32) {
        self.overrides.insert(key_code, deadzone.clamp(0.0, 1.0));
    }

    /// Remove an override, restoring the fallback
    pub fn clear(&mut self, key_code: InputKeyCode) {
        self.overrides.remove(&key_code);
    }

    /// Get the effective deadzone for a key code
    ///
    /// Falls back to [`DEFAULT_THUMBSTICK_DEADZONE`] for thumbstick-family
    /// keys and 0 otherwise.
    pub fn get(&self, key_code: InputKeyCode) -> f32 {
        if let Some(deadzone) = self.overrides.get(&key_code) {
            return *deadzone;
        }
        if key_code.is_thumbstick() {
            DEFAULT_THUMBSTICK_DEADZONE
        } else {
            0.0
        }
    }
}
