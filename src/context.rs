// Input maps and switchable binding contexts

use crate::action::{ActionRegistry, DEFAULT_ACTIVATION_THRESHOLD};
use crate::key_code::InputKeyCode;
use log::warn;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by [`InputMapBuilder::build`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputMapError {
    #[error("input map has no bindings")]
    Empty,
}

/// The per-device bindings of one action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputMap {
    pub keyboard_and_mouse: Option<InputKeyCode>,
    pub gamepad: Option<InputKeyCode>,
}

impl InputMap {
    /// Start building a map
    pub fn builder() -> InputMapBuilder {
        InputMapBuilder::default()
    }

    /// The bound key codes, in a fixed device order
    pub fn key_codes(&self) -> impl Iterator<Item = InputKeyCode> {
        [self.keyboard_and_mouse, self.gamepad].into_iter().flatten()
    }
}

/// Builder for [`InputMap`]
#[derive(Debug, Default)]
pub struct InputMapBuilder {
    keyboard_and_mouse: Option<InputKeyCode>,
    gamepad: Option<InputKeyCode>,
}

impl InputMapBuilder {
    /// Bind the keyboard/mouse key code
    pub fn keyboard_and_mouse(mut self, key_code: InputKeyCode) -> Self {
        self.keyboard_and_mouse = Some(key_code);
        self
    }

    /// Bind the gamepad key code
    pub fn gamepad(mut self, key_code: InputKeyCode) -> Self {
        self.gamepad = Some(key_code);
        self
    }

    /// Finish the map; a map with no bindings at all is rejected
    pub fn build(self) -> Result<InputMap, InputMapError> {
        if self.keyboard_and_mouse.is_none() && self.gamepad.is_none() {
            return Err(InputMapError::Empty);
        }
        Ok(InputMap {
            keyboard_and_mouse: self.keyboard_and_mouse,
            gamepad: self.gamepad,
        })
    }
}

/// A named group of action bindings that can be assigned and unassigned as
/// one unit
///
/// Assigning registers missing actions and binds every mapped key code;
/// unassigning removes the bindings but keeps the actions registered.
/// Mutating an assigned context applies the change to the registry
/// immediately.
#[derive(Debug, Default)]
pub struct InputContext {
    maps: HashMap<String, InputMap>,
    assigned: bool,
}

impl InputContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the context is currently assigned
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// The map bound to an action in this context, if any
    pub fn map(&self, action: &str) -> Option<&InputMap> {
        self.maps.get(action)
    }

    /// Add or replace an action's map
    pub fn add(&mut self, registry: &mut ActionRegistry, action: &str, map: InputMap) {
        if self.assigned {
            if let Some(previous) = self.maps.get(action) {
                unbind_map(registry, action, previous);
            }
            bind_map(registry, action, &map);
        }
        self.maps.insert(action.to_string(), map);
    }

    /// Remove an action's map
    pub fn remove(&mut self, registry: &mut ActionRegistry, action: &str) {
        let Some(map) = self.maps.remove(action) else {
            warn!("Action '{action}' is not part of this context");
            return;
        };
        if self.assigned {
            unbind_map(registry, action, &map);
        }
    }

    /// Bind every map in the context
    pub fn assign(&mut self, registry: &mut ActionRegistry) {
        if self.assigned {
            warn!("Context is already assigned");
            return;
        }
        self.assigned = true;
        for (action, map) in &self.maps {
            bind_map(registry, action, map);
        }
    }

    /// Remove every binding the context contributed
    pub fn unassign(&mut self, registry: &mut ActionRegistry) {
        if !self.assigned {
            warn!("Context is not assigned");
            return;
        }
        self.assigned = false;
        for (action, map) in &self.maps {
            unbind_map(registry, action, map);
        }
    }
}

fn bind_map(registry: &mut ActionRegistry, action: &str, map: &InputMap) {
    if !registry.exists(action) {
        registry.register_with(action, DEFAULT_ACTIVATION_THRESHOLD, &[]);
    }
    for key_code in map.key_codes() {
        registry.add_key_code(action, key_code);
    }
}

fn unbind_map(registry: &mut ActionRegistry, action: &str, map: &InputMap) {
    for key_code in map.key_codes() {
        registry.remove_key_code(action, key_code);
    }
}

/// Owner of named contexts plus an always-available global context
#[derive(Debug, Default)]
pub struct ContextRegistry {
    contexts: HashMap<String, InputContext>,
    global: InputContext,
}

impl ContextRegistry {
    /// Create a context registry with only the global context
    pub fn new() -> Self {
        Self::default()
    }

    /// The global context, for bindings that are never swapped out
    pub fn global(&mut self) -> &mut InputContext {
        &mut self.global
    }

    /// Create a named context; duplicates warn and keep the existing one
    pub fn create(&mut self, name: &str) {
        if self.contexts.contains_key(name) {
            warn!("Context '{name}' already exists");
            return;
        }
        self.contexts.insert(name.to_string(), InputContext::new());
    }

    /// Look up a named context
    pub fn get(&mut self, name: &str) -> Option<&mut InputContext> {
        let context = self.contexts.get_mut(name);
        if context.is_none() {
            warn!("Context '{name}' does not exist");
        }
        context
    }

    /// Remove a named context, unbinding it first if still assigned
    pub fn destroy(&mut self, registry: &mut ActionRegistry, name: &str) {
        let Some(mut context) = self.contexts.remove(name) else {
            warn!("Context '{name}' does not exist");
            return;
        };
        if context.is_assigned() {
            context.unassign(registry);
        }
    }
}
