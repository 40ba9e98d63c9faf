// Action-based input abstraction layer
//
// This crate decouples gameplay code from physical input devices. Hosts feed
// raw keyboard/mouse/gamepad samples in, gameplay binds named actions to key
// codes and queries buffered, frame-synchronized action state.
//
// ## Architecture
//
// - `key_code`: Key code, device and input state identity types
// - `action`: Action registry with triple-buffered press state
// - `normalize`: Analog axis normalization and thumbstick decomposition
// - `config`: Per-key deadzone configuration
// - `event`: Immutable input event snapshots
// - `signal`: Priority-ordered event dispatch with sink/pass propagation
// - `echo`: Key-repeat style pulses for held actions
// - `chord`: Modifier key combinations
// - `system`: The `InputSystem` facade tying the pipeline together
// - `context`: Input maps and switchable binding contexts
// - `mouse_lock`: Mouse lock arbitration between gameplay systems
// - `haptics`: Vibration presets and motor command queueing
// - `device`: Active device family tracking
//
// ## Usage Example
//
// ```rust
// use input_actions::{InputKeyCode, InputSystem};
// use winit::keyboard::KeyCode;
//
// let mut input = InputSystem::new();
// input.register_with("jump", 0.5, &[InputKeyCode::key(KeyCode::Space)]);
//
// // In your event loop, feed raw samples via input.process(...)
//
// // At the end of each frame, advance the buffers
// input.update(delta_time);
//
// // Query action state
// if input.is_just_pressed("jump") {
//     // Jump was pressed this frame!
// }
// ```

pub mod action;
pub mod chord;
pub mod config;
pub mod context;
pub mod device;
pub mod echo;
pub mod event;
pub mod haptics;
pub mod key_code;
pub mod mouse_lock;
pub mod normalize;
pub mod signal;
pub mod system;

// Re-export commonly used types
pub use action::{ActionRegistry, DEFAULT_ACTIVATION_THRESHOLD};
pub use chord::{ChordMatcher, KeyCombination, CHORD_PRIORITY, CHORD_RELEASE_DELAY};
pub use config::{DeadzoneConfig, DEFAULT_THUMBSTICK_DEADZONE};
pub use context::{ContextRegistry, InputContext, InputMap, InputMapBuilder, InputMapError};
pub use device::{DeviceTypeTracker, InputDeviceType};
pub use echo::{InputEcho, DEFAULT_ECHO_INITIAL_DELAY, DEFAULT_ECHO_REPEAT_INTERVAL};
pub use event::{EventData, InputEvent};
pub use haptics::{HapticFeedback, MotorCommand, MotorLevels};
pub use key_code::{CustomKey, DeviceKind, GamepadButton, InputKeyCode, InputState};
pub use mouse_lock::{
    MouseBehavior, MouseLockAction, MouseLockArbiter, MouseLockGuard, MouseLockState,
};
pub use normalize::{
    decompose_thumbstick, directional_strength, normalize_axis, normalize_thumbstick_axis,
    ThumbstickStrengths,
};
pub use signal::{
    DispatchResult, InputSignal, SubscriptionHandle, SubscriptionKind,
    DEFAULT_SUBSCRIPTION_PRIORITY,
};
pub use system::{InputSystem, RawInput};
