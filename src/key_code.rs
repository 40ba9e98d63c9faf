// Key code, device and input state identity types

use std::fmt;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Gamepad buttons and axes
///
/// winit has no gamepad vocabulary of its own, so the crate carries a small
/// button enum that hosts map their gamepad backend onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    South,
    East,
    West,
    North,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    LeftThumbstick,
    RightThumbstick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Start,
    Select,
}

/// Synthetic key codes produced by decomposing analog inputs
///
/// Each decomposed direction behaves like an independent digital-style key
/// that actions can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomKey {
    Thumbstick1Up,
    Thumbstick1Down,
    Thumbstick1Left,
    Thumbstick1Right,

    Thumbstick2Up,
    Thumbstick2Down,
    Thumbstick2Left,
    Thumbstick2Right,

    MouseWheelUp,
    MouseWheelDown,

    MouseUp,
    MouseDown,
    MouseLeft,
    MouseRight,
}

impl CustomKey {
    /// Check if this key is a decomposed thumbstick direction
    pub fn is_thumbstick_direction(self) -> bool {
        matches!(
            self,
            Self::Thumbstick1Up
                | Self::Thumbstick1Down
                | Self::Thumbstick1Left
                | Self::Thumbstick1Right
                | Self::Thumbstick2Up
                | Self::Thumbstick2Down
                | Self::Thumbstick2Left
                | Self::Thumbstick2Right
        )
    }
}

/// Represents an input source: a physical key/button, an analog axis
/// carrier, or a synthetic custom key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKeyCode {
    Keyboard(KeyCode),
    Mouse(MouseButton),
    /// Mouse wheel motion; the raw sample carries the scroll amount in `position.z`
    MouseWheel,
    /// Mouse movement; the raw sample carries position and delta
    MouseMove,
    Gamepad(GamepadButton),
    Custom(CustomKey),
}

impl InputKeyCode {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }

    /// Create a gamepad input source
    pub fn gamepad(button: GamepadButton) -> Self {
        Self::Gamepad(button)
    }

    /// Create a synthetic custom key input source
    pub fn custom(key: CustomKey) -> Self {
        Self::Custom(key)
    }

    /// Check if this is a synthetic custom key
    pub fn is_custom(self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Check if this key is part of the thumbstick family (the stick axes
    /// themselves or their decomposed directions), used for the default
    /// deadzone fallback
    pub fn is_thumbstick(self) -> bool {
        match self {
            Self::Gamepad(GamepadButton::LeftThumbstick | GamepadButton::RightThumbstick) => true,
            Self::Custom(key) => key.is_thumbstick_direction(),
            _ => false,
        }
    }
}

impl fmt::Display for InputKeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyboard(code) => write!(f, "{code:?}"),
            Self::Mouse(button) => write!(f, "Mouse{button:?}"),
            Self::MouseWheel => write!(f, "MouseWheel"),
            Self::MouseMove => write!(f, "MouseMove"),
            Self::Gamepad(button) => write!(f, "Gamepad{button:?}"),
            Self::Custom(key) => write!(f, "{key:?}"),
        }
    }
}

/// The kind of device a raw sample originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Keyboard,
    Mouse,
    Gamepad,
    Touch,
    Unknown,
}

/// Lifecycle state of a raw input sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputState {
    /// A discrete press started
    Begin,
    /// A continuous/analog value changed
    Change,
    /// A discrete press ended
    End,
    /// The host cancelled the input stream (e.g. focus loss)
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_constructors() {
        assert_eq!(
            InputKeyCode::key(KeyCode::KeyA),
            InputKeyCode::Keyboard(KeyCode::KeyA)
        );
        assert_eq!(
            InputKeyCode::mouse(MouseButton::Left),
            InputKeyCode::Mouse(MouseButton::Left)
        );
        assert_eq!(
            InputKeyCode::gamepad(GamepadButton::South),
            InputKeyCode::Gamepad(GamepadButton::South)
        );
    }

    #[test]
    fn test_is_custom_is_a_tag_test() {
        assert!(InputKeyCode::custom(CustomKey::MouseWheelUp).is_custom());
        assert!(!InputKeyCode::key(KeyCode::KeyA).is_custom());
        assert!(!InputKeyCode::MouseWheel.is_custom());
    }

    #[test]
    fn test_thumbstick_family() {
        assert!(InputKeyCode::gamepad(GamepadButton::LeftThumbstick).is_thumbstick());
        assert!(InputKeyCode::custom(CustomKey::Thumbstick2Left).is_thumbstick());
        assert!(!InputKeyCode::custom(CustomKey::MouseWheelDown).is_thumbstick());
        assert!(!InputKeyCode::key(KeyCode::KeyW).is_thumbstick());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(InputKeyCode::key(KeyCode::KeyA).to_string(), "KeyA");
        assert_eq!(InputKeyCode::mouse(MouseButton::Left).to_string(), "MouseLeft");
        assert_eq!(
            InputKeyCode::custom(CustomKey::Thumbstick1Up).to_string(),
            "Thumbstick1Up"
        );
    }
}
