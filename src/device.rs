// Active device type tracking

use crate::key_code::DeviceKind;

/// The broad device family the player is currently using
///
/// Keyboard and mouse count as one family, so switching between them is not
/// a device change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDeviceType {
    KeyboardAndMouse,
    Gamepad,
    Touch,
}

impl InputDeviceType {
    fn from_kind(kind: DeviceKind) -> Option<Self> {
        match kind {
            DeviceKind::Keyboard | DeviceKind::Mouse => Some(Self::KeyboardAndMouse),
            DeviceKind::Gamepad => Some(Self::Gamepad),
            DeviceKind::Touch => Some(Self::Touch),
            DeviceKind::Unknown => None,
        }
    }
}

/// Compare-and-fire tracker for the active device family
///
/// Fed a device kind per raw sample; reports the new family exactly once per
/// transition so hosts can swap button prompts without polling.
#[derive(Debug, Default)]
pub struct DeviceTypeTracker {
    current: Option<InputDeviceType>,
}

impl DeviceTypeTracker {
    /// Create a tracker with no device observed yet
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently observed device family
    pub fn current(&self) -> Option<InputDeviceType> {
        self.current
    }

    /// Feed one sample's device kind; returns the new family on change
    pub fn observe(&mut self, kind: DeviceKind) -> Option<InputDeviceType> {
        let device_type = InputDeviceType::from_kind(kind)?;
        if self.current == Some(device_type) {
            return None;
        }
        self.current = Some(device_type);
        Some(device_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_fires() {
        let mut tracker = DeviceTypeTracker::new();
        assert_eq!(tracker.current(), None);
        assert_eq!(
            tracker.observe(DeviceKind::Keyboard),
            Some(InputDeviceType::KeyboardAndMouse)
        );
    }

    #[test]
    fn test_fires_once_per_transition() {
        let mut tracker = DeviceTypeTracker::new();
        tracker.observe(DeviceKind::Keyboard);

        assert_eq!(tracker.observe(DeviceKind::Keyboard), None);
        assert_eq!(
            tracker.observe(DeviceKind::Gamepad),
            Some(InputDeviceType::Gamepad)
        );
        assert_eq!(tracker.observe(DeviceKind::Gamepad), None);
        assert_eq!(
            tracker.observe(DeviceKind::Keyboard),
            Some(InputDeviceType::KeyboardAndMouse)
        );
    }

    #[test]
    fn test_keyboard_and_mouse_are_one_family() {
        let mut tracker = DeviceTypeTracker::new();
        tracker.observe(DeviceKind::Keyboard);
        assert_eq!(tracker.observe(DeviceKind::Mouse), None);
    }

    #[test]
    fn test_unknown_kind_is_ignored() {
        let mut tracker = DeviceTypeTracker::new();
        tracker.observe(DeviceKind::Gamepad);
        assert_eq!(tracker.observe(DeviceKind::Unknown), None);
        assert_eq!(tracker.current(), Some(InputDeviceType::Gamepad));
    }
}
