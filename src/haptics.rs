// Controller vibration presets and motor command queueing

use log::warn;
use std::collections::HashMap;

/// Target intensities for the two rumble motors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorLevels {
    /// Low-frequency motor (0 to 1)
    pub large: f32,
    /// High-frequency motor (0 to 1)
    pub small: f32,
}

impl MotorLevels {
    pub const OFF: Self = Self {
        large: 0.0,
        small: 0.0,
    };
}

/// One vibration request, consumed by the host's gamepad backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorCommand {
    pub levels: MotorLevels,
}

#[derive(Debug, Clone, Copy)]
struct Preset {
    large: f32,
    small: f32,
    duration: f32,
}

/// Vibration orchestrator
///
/// The crate never talks to hardware. `vibrate` enqueues a motor command and
/// arms a timer; `update` enqueues the zero-levels reset when the timer
/// expires. The host drains the queue with [`drain_commands`] each frame and
/// forwards it to its gamepad backend.
///
/// [`drain_commands`]: HapticFeedback::drain_commands
#[derive(Debug)]
pub struct HapticFeedback {
    presets: HashMap<String, Preset>,
    commands: Vec<MotorCommand>,
    remaining: Option<f32>,
}

impl Default for HapticFeedback {
    fn default() -> Self {
        let mut presets = HashMap::new();
        presets.insert("light".to_string(), Preset { large: 0.2, small: 0.3, duration: 0.1 });
        presets.insert("medium".to_string(), Preset { large: 0.5, small: 0.5, duration: 0.2 });
        presets.insert("heavy".to_string(), Preset { large: 0.8, small: 0.7, duration: 0.3 });
        presets.insert("failure".to_string(), Preset { large: 1.0, small: 0.3, duration: 0.5 });
        presets.insert("success".to_string(), Preset { large: 0.4, small: 0.8, duration: 0.2 });

        Self {
            presets,
            commands: Vec::new(),
            remaining: None,
        }
    }
}

impl HapticFeedback {
    /// Create the orchestrator with the built-in presets
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a vibration with explicit motor levels and duration (seconds)
    ///
    /// A new request replaces any vibration still running.
    pub fn vibrate(&mut self, large: f32, small: f32, duration: f32) {
        self.commands.push(MotorCommand {
            levels: MotorLevels {
                large: large.clamp(0.0, 1.0),
                small: small.clamp(0.0, 1.0),
            },
        });
        self.remaining = Some(duration.max(0.0));
    }

    /// Start a vibration from a named preset; unknown names warn and no-op
    pub fn vibrate_preset(&mut self, name: &str) {
        let Some(preset) = self.presets.get(name).copied() else {
            warn!("Unknown vibration preset '{name}'");
            return;
        };
        self.vibrate(preset.large, preset.small, preset.duration);
    }

    /// Add or replace a named preset
    pub fn register_preset(&mut self, name: &str, large: f32, small: f32, duration: f32) {
        self.presets.insert(
            name.to_string(),
            Preset {
                large: large.clamp(0.0, 1.0),
                small: small.clamp(0.0, 1.0),
                duration: duration.max(0.0),
            },
        );
    }

    /// Stop any running vibration immediately
    pub fn stop(&mut self) {
        if self.remaining.take().is_some() {
            self.commands.push(MotorCommand {
                levels: MotorLevels::OFF,
            });
        }
    }

    /// Advance the vibration timer, queueing the reset when it expires
    pub fn update(&mut self, delta_time: f32) {
        if let Some(remaining) = &mut self.remaining {
            *remaining -= delta_time;
            if *remaining <= 0.0 {
                self.remaining = None;
                self.commands.push(MotorCommand {
                    levels: MotorLevels::OFF,
                });
            }
        }
    }

    /// Take all queued motor commands, oldest first
    pub fn drain_commands(&mut self) -> Vec<MotorCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Check if a vibration is currently running
    pub fn is_vibrating(&self) -> bool {
        self.remaining.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vibrate_queues_levels_and_timed_reset() {
        let mut haptics = HapticFeedback::new();
        haptics.vibrate(0.6, 0.4, 0.2);
        assert!(haptics.is_vibrating());

        let commands = haptics.drain_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].levels, MotorLevels { large: 0.6, small: 0.4 });

        haptics.update(0.1);
        assert!(haptics.drain_commands().is_empty());

        haptics.update(0.1);
        assert!(!haptics.is_vibrating());
        assert_eq!(
            haptics.drain_commands(),
            vec![MotorCommand { levels: MotorLevels::OFF }]
        );
    }

    #[test]
    fn test_builtin_presets() {
        let mut haptics = HapticFeedback::new();
        haptics.vibrate_preset("heavy");

        let commands = haptics.drain_commands();
        assert_eq!(commands[0].levels, MotorLevels { large: 0.8, small: 0.7 });
    }

    #[test]
    fn test_unknown_preset_is_a_noop() {
        let mut haptics = HapticFeedback::new();
        haptics.vibrate_preset("earthquake");
        assert!(!haptics.is_vibrating());
        assert!(haptics.drain_commands().is_empty());
    }

    #[test]
    fn test_custom_preset_registration() {
        let mut haptics = HapticFeedback::new();
        haptics.register_preset("tick", 0.1, 0.1, 0.05);
        haptics.vibrate_preset("tick");

        let commands = haptics.drain_commands();
        assert_eq!(commands[0].levels, MotorLevels { large: 0.1, small: 0.1 });
    }

    #[test]
    fn test_stop_queues_immediate_reset() {
        let mut haptics = HapticFeedback::new();
        haptics.vibrate(1.0, 1.0, 10.0);
        haptics.drain_commands();

        haptics.stop();
        assert!(!haptics.is_vibrating());
        assert_eq!(
            haptics.drain_commands(),
            vec![MotorCommand { levels: MotorLevels::OFF }]
        );

        // A second stop has nothing to reset
        haptics.stop();
        assert!(haptics.drain_commands().is_empty());
    }

    #[test]
    fn test_levels_are_clamped() {
        let mut haptics = HapticFeedback::new();
        haptics.vibrate(2.0, -1.0, 0.1);
        let commands = haptics.drain_commands();
        assert_eq!(commands[0].levels, MotorLevels { large: 1.0, small: 0.0 });
    }
}
