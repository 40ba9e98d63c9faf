// Echo/repeat timers for held actions

use std::collections::{HashMap, HashSet};

/// Default delay before the first echo pulse (seconds)
pub const DEFAULT_ECHO_INITIAL_DELAY: f32 = 0.5;
/// Default interval between echo pulses (seconds)
pub const DEFAULT_ECHO_REPEAT_INTERVAL: f32 = 0.1;

#[derive(Debug)]
struct EchoConfig {
    initial_delay: f32,
    repeat_interval: f32,
    held_time: f32,
    is_held: bool,
    last_echo_time: f64,
}

/// Per-action held-duration tracking that produces synthetic repeat pulses
///
/// While an action stays pressed past its initial delay, the action is
/// flagged as echo-triggered once per repeat interval. The flag set is
/// cleared at the start of every tick, so consumers read it for exactly one
/// frame. Time comes from the externally supplied tick delta; the echo never
/// sleeps or reads a wall clock.
#[derive(Debug, Default)]
pub struct InputEcho {
    configs: HashMap<String, EchoConfig>,
    triggered: HashSet<String>,
    clock: f64,
}

impl InputEcho {
    /// Create an echo tracker with no configured actions
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure echo behavior for an action
    ///
    /// Reconfiguring replaces the previous config and restarts timing state.
    pub fn configure(&mut self, action: &str, initial_delay: f32, repeat_interval: f32) {
        self.configs.insert(
            action.to_string(),
            EchoConfig {
                initial_delay,
                repeat_interval,
                held_time: 0.0,
                is_held: false,
                last_echo_time: 0.0,
            },
        );
    }

    /// Remove echo configuration for an action and clear any pending flag
    pub fn disable(&mut self, action: &str) {
        self.configs.remove(action);
        self.triggered.remove(action);
    }

    /// Check if an echo pulse fired for the action this frame
    pub fn was_triggered(&self, action: &str) -> bool {
        self.triggered.contains(action)
    }

    /// Advance all echo timers by one tick
    ///
    /// `pressed` reports the current level state of an action, typically
    /// backed by the action registry.
    pub fn update(&mut self, delta_time: f32, mut pressed: impl FnMut(&str) -> bool) {
        self.clock += f64::from(delta_time);
        let now = self.clock;

        self.triggered.clear();

        for (action, config) in &mut self.configs {
            if !pressed(action) {
                config.is_held = false;
                config.held_time = 0.0;
                continue;
            }

            if !config.is_held {
                // First tick at/above threshold, start tracking
                config.is_held = true;
                config.held_time = 0.0;
                config.last_echo_time = now;
                continue;
            }

            config.held_time += delta_time;
            if config.held_time >= config.initial_delay
                && now - config.last_echo_time >= f64::from(config.repeat_interval)
            {
                self.triggered.insert(action.clone());
                config.last_echo_time = now;
            }
        }
    }
}
