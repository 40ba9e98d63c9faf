// Input system - raw sample pipeline and the consumer-facing query surface

use crate::action::ActionRegistry;
use crate::chord::{ChordMatcher, CHORD_PRIORITY, CHORD_RELEASE_DELAY};
use crate::config::DeadzoneConfig;
use crate::echo::{InputEcho, DEFAULT_ECHO_INITIAL_DELAY, DEFAULT_ECHO_REPEAT_INTERVAL};
use crate::event::{EventData, InputEvent};
use crate::key_code::{CustomKey, DeviceKind, GamepadButton, InputKeyCode, InputState};
use crate::normalize::{directional_strength, normalize_axis};
use crate::signal::{
    DispatchResult, InputSignal, SubscriptionHandle, SubscriptionKind,
    DEFAULT_SUBSCRIPTION_PRIORITY,
};
use glam::Vec3;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// One raw hardware sample as delivered by the host
#[derive(Debug, Clone, Copy)]
pub struct RawInput {
    pub key_code: InputKeyCode,
    pub device: DeviceKind,
    pub state: InputState,
    pub position: Vec3,
    pub delta: Vec3,
}

impl RawInput {
    /// Create a sample with zero position and delta
    pub fn new(key_code: InputKeyCode, device: DeviceKind, state: InputState) -> Self {
        Self {
            key_code,
            device,
            state,
            position: Vec3::ZERO,
            delta: Vec3::ZERO,
        }
    }

    /// Attach a position to the sample
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Attach a movement delta to the sample
    pub fn with_delta(mut self, delta: Vec3) -> Self {
        self.delta = delta;
        self
    }
}

#[derive(Debug)]
struct PendingRelease {
    action: String,
    remaining: f32,
}

/// Owning coordinator for the whole input pipeline
///
/// Converts raw hardware samples into buffered, frame-synchronized action
/// state and broadcasts frozen events to priority-ordered subscribers. All
/// mutation happens synchronously on the thread driving [`process`] and
/// [`update`]; there is no internal locking or sleeping.
///
/// [`process`]: InputSystem::process
/// [`update`]: InputSystem::update
#[derive(Debug, Default)]
pub struct InputSystem {
    registry: ActionRegistry,
    signal: InputSignal,
    echo: InputEcho,
    chords: ChordMatcher,
    deadzones: DeadzoneConfig,

    /// Last dispatched strength per custom key, to skip redundant events
    custom_strengths: HashMap<CustomKey, f32>,

    /// Baseline for mouse-movement displacement
    last_mouse_position: Vec3,

    /// Live physical keyboard state, for chord modifier checks
    keys_down: HashSet<KeyCode>,

    /// Chord releases waiting for their delay to elapse
    pending_releases: Vec<PendingRelease>,
}

impl InputSystem {
    /// Create an input system with no registered actions
    pub fn new() -> Self {
        Self::default()
    }

    // --- raw sample pipeline ---

    /// Feed one raw hardware sample through the pipeline
    ///
    /// Samples are processed strictly in arrival order: action buffers are
    /// written before subscribers see the event. Cancelled samples and
    /// samples from an unidentified device are dropped.
    pub fn process(&mut self, raw: RawInput) -> DispatchResult {
        if raw.state == InputState::Cancel || raw.device == DeviceKind::Unknown {
            return DispatchResult::Pass;
        }

        if let InputKeyCode::Keyboard(code) = raw.key_code {
            match raw.state {
                InputState::Begin => {
                    self.keys_down.insert(code);
                }
                InputState::End => {
                    self.keys_down.remove(&code);
                }
                _ => {}
            }
        }

        if raw.state == InputState::Change {
            self.custom_key_stage(&raw);
        }

        let mut data = EventData::from_key_code(raw.key_code, raw.device);
        data.position = raw.position;
        data.delta = raw.delta;
        data.changed = raw.state == InputState::Change;
        data.press_strength = if raw.state == InputState::Begin { 1.0 } else { 0.0 };
        self.dispatch(data)
    }

    /// Construct, apply and broadcast an event
    ///
    /// This is the only path by which input reaches the action buffers:
    /// every resolved action is pressed with the event's strength before any
    /// subscriber runs. The chord stage slots into the priority order at
    /// [`CHORD_PRIORITY`].
    pub fn dispatch(&mut self, data: EventData) -> DispatchResult {
        let event = InputEvent::resolve(data, &self.registry);

        for action in event.actions() {
            self.registry.press(action, event.press_strength());
        }

        if self.signal.fire_above(&event, CHORD_PRIORITY) == DispatchResult::Sink {
            return DispatchResult::Sink;
        }

        let keys_down = &self.keys_down;
        if let Some(action) = self.chords.matches(&event, |key| keys_down.contains(&key)) {
            let action = action.to_string();
            self.registry.press(&action, 1.0);
            self.pending_releases.push(PendingRelease {
                action,
                remaining: CHORD_RELEASE_DELAY,
            });
            return DispatchResult::Sink;
        }

        self.signal.fire_at_or_below(&event, CHORD_PRIORITY)
    }

    /// Decompose analog carriers into synthetic custom-key events
    fn custom_key_stage(&mut self, raw: &RawInput) {
        match raw.key_code {
            InputKeyCode::Gamepad(GamepadButton::LeftThumbstick) => self.decompose_stick(
                raw,
                [
                    CustomKey::Thumbstick1Left,
                    CustomKey::Thumbstick1Right,
                    CustomKey::Thumbstick1Up,
                    CustomKey::Thumbstick1Down,
                ],
            ),
            InputKeyCode::Gamepad(GamepadButton::RightThumbstick) => self.decompose_stick(
                raw,
                [
                    CustomKey::Thumbstick2Left,
                    CustomKey::Thumbstick2Right,
                    CustomKey::Thumbstick2Up,
                    CustomKey::Thumbstick2Down,
                ],
            ),
            InputKeyCode::MouseWheel => {
                let down = normalize_axis(raw.position.z, -1.0, 0.0);
                let up = normalize_axis(raw.position.z, 0.0, 1.0);
                // Wheel ticks are momentary: always re-fire a nonzero tick
                if down != 0.0 {
                    self.set_custom_strength(raw, CustomKey::MouseWheelDown, down, true);
                }
                if up != 0.0 {
                    self.set_custom_strength(raw, CustomKey::MouseWheelUp, up, true);
                }
            }
            InputKeyCode::MouseMove => {
                let position_delta = raw.position - self.last_mouse_position;
                self.last_mouse_position = raw.position;
                let total = position_delta + raw.delta;

                let left = (-total.x).max(0.0);
                let right = total.x.max(0.0);
                let up = (-total.y).max(0.0);
                let down = total.y.max(0.0);

                self.set_custom_strength(raw, CustomKey::MouseLeft, left, false);
                self.set_custom_strength(raw, CustomKey::MouseRight, right, false);
                self.set_custom_strength(raw, CustomKey::MouseUp, up, false);
                self.set_custom_strength(raw, CustomKey::MouseDown, down, false);
            }
            _ => {}
        }
    }

    fn decompose_stick(&mut self, raw: &RawInput, keys: [CustomKey; 4]) {
        let [left_key, right_key, up_key, down_key] = keys;

        let deadzone = |key: CustomKey, deadzones: &DeadzoneConfig| {
            deadzones.get(InputKeyCode::Custom(key))
        };
        let left = directional_strength(
            raw.position.x,
            -1.0,
            0.0,
            deadzone(left_key, &self.deadzones),
        );
        let right = directional_strength(
            raw.position.x,
            0.0,
            1.0,
            deadzone(right_key, &self.deadzones),
        );
        let up = directional_strength(raw.position.y, 0.0, 1.0, deadzone(up_key, &self.deadzones));
        let down = directional_strength(
            raw.position.y,
            -1.0,
            0.0,
            deadzone(down_key, &self.deadzones),
        );

        self.set_custom_strength(raw, left_key, left, false);
        self.set_custom_strength(raw, right_key, right, false);
        self.set_custom_strength(raw, up_key, up, false);
        self.set_custom_strength(raw, down_key, down, false);
    }

    /// Dispatch a synthetic changed event for a custom key, skipping writes
    /// that would not change the saved strength
    fn set_custom_strength(&mut self, raw: &RawInput, key: CustomKey, strength: f32, force: bool) {
        let saved = self.custom_strengths.get(&key).copied().unwrap_or(0.0);
        if !force && saved == strength {
            return;
        }
        self.custom_strengths.insert(key, strength);

        let mut data = EventData::from_key_code(InputKeyCode::Custom(key), raw.device);
        data.position = raw.position;
        data.delta = raw.delta;
        data.press_strength = strength;
        data.changed = true;
        self.dispatch(data);
    }

    /// Advance the system by one frame
    ///
    /// Settles due chord releases, shifts every action buffer exactly once
    /// and ticks the echo timers. Must run once per simulation frame, after
    /// all samples for the frame have been applied and before gameplay code
    /// reads action state.
    pub fn update(&mut self, delta_time: f32) {
        let mut due = Vec::new();
        self.pending_releases.retain_mut(|pending| {
            pending.remaining -= delta_time;
            if pending.remaining <= 0.0 {
                due.push(std::mem::take(&mut pending.action));
                false
            } else {
                true
            }
        });
        for action in due {
            self.registry.release(&action);
        }

        self.registry.update();

        let registry = &self.registry;
        self.echo
            .update(delta_time, |action| registry.is_pressed(action));
    }

    // --- registration ---

    /// Register an action with the default threshold and no bindings
    pub fn register(&mut self, name: &str) {
        self.registry.register(name);
    }

    /// Register an action with a threshold and initial key codes
    pub fn register_with(&mut self, name: &str, threshold: f32, key_codes: &[InputKeyCode]) {
        self.registry.register_with(name, threshold, key_codes);
    }

    /// Remove an action and all of its bindings
    pub fn unregister(&mut self, name: &str) {
        self.registry.unregister(name);
    }

    /// Bind a key code to an action
    pub fn add_key_code(&mut self, name: &str, key_code: InputKeyCode) {
        self.registry.add_key_code(name, key_code);
    }

    /// Unbind a key code from an action
    pub fn remove_key_code(&mut self, name: &str, key_code: InputKeyCode) {
        self.registry.remove_key_code(name, key_code);
    }

    /// Update an action's activation threshold
    pub fn set_threshold(&mut self, name: &str, threshold: f32) {
        self.registry.set_threshold(name, threshold);
    }

    /// Register a key combination; creates the target action if needed
    pub fn register_chord(&mut self, action: &str, main_key: InputKeyCode, modifiers: Vec<KeyCode>) {
        if !self.registry.exists(action) {
            self.registry.register(action);
        }
        self.chords.register(action, main_key, modifiers);
    }

    /// Configure echo pulses for an action with explicit timing
    pub fn configure_echo(&mut self, action: &str, initial_delay: f32, repeat_interval: f32) {
        self.echo.configure(action, initial_delay, repeat_interval);
    }

    /// Configure echo pulses for an action with the default timing
    pub fn configure_echo_default(&mut self, action: &str) {
        self.echo.configure(
            action,
            DEFAULT_ECHO_INITIAL_DELAY,
            DEFAULT_ECHO_REPEAT_INTERVAL,
        );
    }

    /// Disable echo pulses for an action
    pub fn disable_echo(&mut self, action: &str) {
        self.echo.disable(action);
    }

    /// Override the deadzone for a key code
    pub fn set_deadzone(&mut self, key_code: InputKeyCode, deadzone: f32) {
        self.deadzones.set(key_code, deadzone);
    }

    /// Effective deadzone for a key code
    pub fn deadzone(&self, key_code: InputKeyCode) -> f32 {
        self.deadzones.get(key_code)
    }

    // --- subscriptions ---

    /// Subscribe to input events with the default priority and filter
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&InputEvent) -> DispatchResult + 'static,
    ) -> SubscriptionHandle {
        self.signal
            .subscribe(callback, DEFAULT_SUBSCRIPTION_PRIORITY, SubscriptionKind::default())
    }

    /// Subscribe with an explicit priority and event filter
    pub fn subscribe_with(
        &mut self,
        callback: impl FnMut(&InputEvent) -> DispatchResult + 'static,
        priority: i32,
        kind: SubscriptionKind,
    ) -> SubscriptionHandle {
        self.signal.subscribe(callback, priority, kind)
    }

    /// Cancel a subscription; safe to call repeatedly
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        self.signal.unsubscribe(handle);
    }

    // --- queries ---

    /// Press an action programmatically
    pub fn press(&mut self, name: &str, strength: f32) {
        self.registry.press(name, strength);
    }

    /// Release an action programmatically
    pub fn release(&mut self, name: &str) {
        self.registry.release(name);
    }

    /// Check if an action is registered
    pub fn exists(&self, name: &str) -> bool {
        self.registry.exists(name)
    }

    /// Settled press strength of an action
    pub fn press_strength(&self, name: &str) -> f32 {
        self.registry.press_strength(name)
    }

    /// Check if an action is pressed
    pub fn is_pressed(&self, name: &str) -> bool {
        self.registry.is_pressed(name)
    }

    /// Check if an action is released
    pub fn is_released(&self, name: &str) -> bool {
        self.registry.is_released(name)
    }

    /// Check if an action was just pressed
    ///
    /// True on a buffer rising edge, or when an echo pulse fired for the
    /// action this frame: a held-repeat behaves like a sequence of discrete
    /// just-pressed events.
    pub fn is_just_pressed(&self, name: &str) -> bool {
        self.registry.is_just_pressed(name) || self.echo.was_triggered(name)
    }

    /// Check if an action was just released
    pub fn is_just_released(&self, name: &str) -> bool {
        self.registry.is_just_released(name)
    }

    /// Check if a physical key is currently held down
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// The action registry, for lookups and context assignment
    pub fn actions(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Mutable access to the action registry
    pub fn actions_mut(&mut self) -> &mut ActionRegistry {
        &mut self.registry
    }
}
