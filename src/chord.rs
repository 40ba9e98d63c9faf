// Key combination (chord) matching

use crate::event::InputEvent;
use crate::key_code::InputKeyCode;
use winit::keyboard::KeyCode;

/// Priority at which the chord stage runs inside the dispatch pipeline
pub const CHORD_PRIORITY: i32 = 1000;
/// Delay before the synthesized release of a matched chord action (seconds)
pub const CHORD_RELEASE_DELAY: f32 = 0.1;

/// A main key plus required modifier keys targeting a derived action
#[derive(Debug, Clone)]
pub struct KeyCombination {
    pub main_key: InputKeyCode,
    /// Modifiers that must all be held (AND relationship)
    pub modifiers: Vec<KeyCode>,
    pub action: String,
}

/// Registered key combinations, checked against every discrete press event
///
/// Combinations sharing a main key are checked in registration order; the
/// first combination whose modifiers are all held wins.
#[derive(Debug, Default)]
pub struct ChordMatcher {
    combinations: Vec<KeyCombination>,
}

impl ChordMatcher {
    /// Create an empty matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a combination targeting an action
    pub fn register(&mut self, action: &str, main_key: InputKeyCode, modifiers: Vec<KeyCode>) {
        self.combinations.push(KeyCombination {
            main_key,
            modifiers,
            action: action.to_string(),
        });
    }

    /// All registered combinations
    pub fn combinations(&self) -> &[KeyCombination] {
        &self.combinations
    }

    /// Find the first combination satisfied by a discrete press event
    ///
    /// `is_key_down` queries live physical keyboard state, not action state.
    pub fn matches(
        &self,
        event: &InputEvent,
        is_key_down: impl Fn(KeyCode) -> bool,
    ) -> Option<&str> {
        // Only discrete presses can start a chord
        if event.changed() || !event.is_pressed() {
            return None;
        }

        let key_code = event.key_code()?;
        self.combinations
            .iter()
            .find(|combination| {
                combination.main_key == key_code
                    && combination
                        .modifiers
                        .iter()
                        .all(|modifier| is_key_down(*modifier))
            })
            .map(|combination| combination.action.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionRegistry;
    use crate::event::EventData;
    use crate::key_code::DeviceKind;
    use std::collections::HashSet;

    fn press_event(key: KeyCode) -> InputEvent {
        let registry = ActionRegistry::new();
        let mut data = EventData::from_key_code(InputKeyCode::key(key), DeviceKind::Keyboard);
        data.press_strength = 1.0;
        InputEvent::resolve(data, &registry)
    }

    fn release_event(key: KeyCode) -> InputEvent {
        let registry = ActionRegistry::new();
        let data = EventData::from_key_code(InputKeyCode::key(key), DeviceKind::Keyboard);
        InputEvent::resolve(data, &registry)
    }

    #[test]
    fn test_match_requires_all_modifiers() {
        let mut matcher = ChordMatcher::new();
        matcher.register(
            "save",
            InputKeyCode::key(KeyCode::KeyS),
            vec![KeyCode::ControlLeft],
        );

        let held: HashSet<KeyCode> = [KeyCode::ControlLeft].into_iter().collect();
        assert_eq!(
            matcher.matches(&press_event(KeyCode::KeyS), |k| held.contains(&k)),
            Some("save")
        );

        let none: HashSet<KeyCode> = HashSet::new();
        assert_eq!(
            matcher.matches(&press_event(KeyCode::KeyS), |k| none.contains(&k)),
            None
        );
    }

    #[test]
    fn test_multi_modifier_and_relationship() {
        let mut matcher = ChordMatcher::new();
        matcher.register(
            "save_all",
            InputKeyCode::key(KeyCode::KeyS),
            vec![KeyCode::ControlLeft, KeyCode::ShiftLeft],
        );

        let partial: HashSet<KeyCode> = [KeyCode::ControlLeft].into_iter().collect();
        assert_eq!(
            matcher.matches(&press_event(KeyCode::KeyS), |k| partial.contains(&k)),
            None
        );

        let full: HashSet<KeyCode> = [KeyCode::ControlLeft, KeyCode::ShiftLeft]
            .into_iter()
            .collect();
        assert_eq!(
            matcher.matches(&press_event(KeyCode::KeyS), |k| full.contains(&k)),
            Some("save_all")
        );
    }

    #[test]
    fn test_first_satisfied_combination_wins() {
        let mut matcher = ChordMatcher::new();
        matcher.register(
            "save",
            InputKeyCode::key(KeyCode::KeyS),
            vec![KeyCode::ControlLeft],
        );
        matcher.register("stealth", InputKeyCode::key(KeyCode::KeyS), vec![]);

        let held: HashSet<KeyCode> = [KeyCode::ControlLeft].into_iter().collect();
        assert_eq!(
            matcher.matches(&press_event(KeyCode::KeyS), |k| held.contains(&k)),
            Some("save")
        );

        // Without the modifier, the later modifier-free combination matches
        let none: HashSet<KeyCode> = HashSet::new();
        assert_eq!(
            matcher.matches(&press_event(KeyCode::KeyS), |k| none.contains(&k)),
            Some("stealth")
        );
    }

    #[test]
    fn test_ignores_releases_and_changed_events() {
        let mut matcher = ChordMatcher::new();
        matcher.register("save", InputKeyCode::key(KeyCode::KeyS), vec![]);

        assert_eq!(
            matcher.matches(&release_event(KeyCode::KeyS), |_| true),
            None
        );
    }

    #[test]
    fn test_other_keys_do_not_match() {
        let mut matcher = ChordMatcher::new();
        matcher.register("save", InputKeyCode::key(KeyCode::KeyS), vec![]);

        assert_eq!(matcher.matches(&press_event(KeyCode::KeyA), |_| true), None);
    }
}
