// Mouse lock arbitration between competing gameplay requests

use log::warn;

/// What a requester wants done with the mouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseLockAction {
    /// Free cursor; wins ties against lock requests
    Unlock,
    /// Confine and recenter the cursor every frame
    LockCenter,
    /// Freeze the cursor where it currently is
    LockAtPosition,
}

impl MouseLockAction {
    /// Priority used when a requester doesn't pick one
    ///
    /// Unlock requests sit above lock requests so menus and dialogs win
    /// against gameplay camera locks without coordinating priorities.
    fn default_priority(self) -> i32 {
        match self {
            Self::Unlock => 0,
            Self::LockCenter | Self::LockAtPosition => -1,
        }
    }

    fn behavior(self) -> MouseBehavior {
        match self {
            Self::Unlock => MouseBehavior::Default,
            Self::LockCenter => MouseBehavior::LockCenter,
            Self::LockAtPosition => MouseBehavior::LockCurrentPosition,
        }
    }

    fn cursor_visible(self) -> bool {
        !matches!(self, Self::LockCenter)
    }
}

/// Host-facing cursor behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseBehavior {
    Default,
    LockCenter,
    LockCurrentPosition,
}

/// The resolved state the host must apply to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseLockState {
    pub behavior: MouseBehavior,
    pub cursor_visible: bool,
}

impl MouseLockState {
    fn unlocked() -> Self {
        Self {
            behavior: MouseBehavior::Default,
            cursor_visible: true,
        }
    }
}

/// Token identifying one acquired request; releasing twice is a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseLockGuard(u64);

#[derive(Debug)]
struct Request {
    id: u64,
    priority: i32,
}

/// Arbitrates mouse lock requests from independent gameplay systems
///
/// Each action keeps a stack of live requests sorted by descending priority.
/// The winner across the three stacks decides the applied state; among equal
/// priorities Unlock beats both locks and LockCenter beats LockAtPosition.
/// `poll` reports the resolved state only when it differs from what the host
/// last applied, except for actions marked strict, which re-apply every poll.
#[derive(Debug)]
pub struct MouseLockArbiter {
    unlock: Vec<Request>,
    lock_center: Vec<Request>,
    lock_at_position: Vec<Request>,
    next_id: u64,
    applied: MouseLockState,
    strict_center: bool,
    strict_at_position: bool,
    debug_unlock: bool,
    enabled: bool,
}

impl Default for MouseLockArbiter {
    fn default() -> Self {
        Self {
            unlock: Vec::new(),
            lock_center: Vec::new(),
            lock_at_position: Vec::new(),
            next_id: 0,
            applied: MouseLockState::unlocked(),
            strict_center: false,
            strict_at_position: false,
            debug_unlock: false,
            enabled: true,
        }
    }
}

impl MouseLockArbiter {
    /// Create an arbiter with no live requests
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a request at the action's default priority
    pub fn acquire(&mut self, action: MouseLockAction) -> MouseLockGuard {
        self.acquire_with(action, action.default_priority())
    }

    /// Acquire a request at an explicit priority
    pub fn acquire_with(&mut self, action: MouseLockAction, priority: i32) -> MouseLockGuard {
        let id = self.next_id;
        self.next_id += 1;

        let stack = self.stack_mut(action);
        let position = stack
            .iter()
            .position(|request| request.priority < priority)
            .unwrap_or(stack.len());
        stack.insert(position, Request { id, priority });
        MouseLockGuard(id)
    }

    /// Drop a request; unknown or already-released guards are ignored
    pub fn release(&mut self, guard: MouseLockGuard) {
        self.unlock.retain(|request| request.id != guard.0);
        self.lock_center.retain(|request| request.id != guard.0);
        self.lock_at_position.retain(|request| request.id != guard.0);
    }

    /// Force re-application of a lock action on every poll
    ///
    /// Useful when something outside the arbiter (an OS dialog, another
    /// window) can silently undo the lock.
    pub fn set_strict(&mut self, action: MouseLockAction, strict: bool) {
        match action {
            MouseLockAction::LockCenter => self.strict_center = strict,
            MouseLockAction::LockAtPosition => self.strict_at_position = strict,
            MouseLockAction::Unlock => {
                warn!("Unlock requests have no strict mode");
            }
        }
    }

    /// Development override that forces the unlocked state while set
    pub fn set_debug_unlock(&mut self, debug_unlock: bool) {
        self.debug_unlock = debug_unlock;
    }

    /// Disable the arbiter entirely; resolves to unlocked while off
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The winning state given the current requests
    pub fn resolve(&self) -> MouseLockState {
        if !self.enabled || self.debug_unlock {
            return MouseLockState::unlocked();
        }

        let top = |stack: &Vec<Request>| stack.first().map(|request| request.priority);

        // Tie order: unlock, then center, then at-position
        let candidates = [
            (MouseLockAction::Unlock, top(&self.unlock)),
            (MouseLockAction::LockCenter, top(&self.lock_center)),
            (MouseLockAction::LockAtPosition, top(&self.lock_at_position)),
        ];

        let mut winner: Option<(MouseLockAction, i32)> = None;
        for (action, priority) in candidates {
            let Some(priority) = priority else { continue };
            match winner {
                Some((_, best)) if best >= priority => {}
                _ => winner = Some((action, priority)),
            }
        }

        match winner {
            Some((action, _)) => MouseLockState {
                behavior: action.behavior(),
                cursor_visible: action.cursor_visible(),
            },
            None => MouseLockState::unlocked(),
        }
    }

    /// Resolve and report the state the host must apply, if any
    ///
    /// Returns `None` while the already-applied state still holds, unless
    /// the winning lock action is strict.
    pub fn poll(&mut self) -> Option<MouseLockState> {
        let resolved = self.resolve();

        let strict = match resolved.behavior {
            MouseBehavior::LockCenter => self.strict_center,
            MouseBehavior::LockCurrentPosition => self.strict_at_position,
            MouseBehavior::Default => false,
        };

        if resolved == self.applied && !strict {
            return None;
        }

        self.applied = resolved;
        Some(resolved)
    }

    fn stack_mut(&mut self, action: MouseLockAction) -> &mut Vec<Request> {
        match action {
            MouseLockAction::Unlock => &mut self.unlock,
            MouseLockAction::LockCenter => &mut self.lock_center,
            MouseLockAction::LockAtPosition => &mut self.lock_at_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_requests_resolves_to_unlocked() {
        let arbiter = MouseLockArbiter::new();
        assert_eq!(arbiter.resolve(), MouseLockState::unlocked());
    }

    #[test]
    fn test_action_states() {
        let mut arbiter = MouseLockArbiter::new();

        arbiter.acquire(MouseLockAction::LockCenter);
        assert_eq!(
            arbiter.resolve(),
            MouseLockState {
                behavior: MouseBehavior::LockCenter,
                cursor_visible: false,
            }
        );

        let mut arbiter = MouseLockArbiter::new();
        arbiter.acquire(MouseLockAction::LockAtPosition);
        assert_eq!(
            arbiter.resolve(),
            MouseLockState {
                behavior: MouseBehavior::LockCurrentPosition,
                cursor_visible: true,
            }
        );
    }

    #[test]
    fn test_default_priorities_let_unlock_win() {
        let mut arbiter = MouseLockArbiter::new();
        arbiter.acquire(MouseLockAction::LockCenter);
        arbiter.acquire(MouseLockAction::Unlock);

        assert_eq!(arbiter.resolve().behavior, MouseBehavior::Default);
    }

    #[test]
    fn test_explicit_priority_overrides_default_order() {
        let mut arbiter = MouseLockArbiter::new();
        arbiter.acquire(MouseLockAction::Unlock);
        arbiter.acquire_with(MouseLockAction::LockCenter, 10);

        assert_eq!(arbiter.resolve().behavior, MouseBehavior::LockCenter);
    }

    #[test]
    fn test_unlock_wins_ties() {
        let mut arbiter = MouseLockArbiter::new();
        arbiter.acquire_with(MouseLockAction::LockCenter, 5);
        arbiter.acquire_with(MouseLockAction::Unlock, 5);

        assert_eq!(arbiter.resolve().behavior, MouseBehavior::Default);
    }

    #[test]
    fn test_center_wins_ties_against_at_position() {
        let mut arbiter = MouseLockArbiter::new();
        arbiter.acquire_with(MouseLockAction::LockAtPosition, 5);
        arbiter.acquire_with(MouseLockAction::LockCenter, 5);

        assert_eq!(arbiter.resolve().behavior, MouseBehavior::LockCenter);
    }

    #[test]
    fn test_release_restores_previous_winner() {
        let mut arbiter = MouseLockArbiter::new();
        arbiter.acquire(MouseLockAction::LockCenter);
        let unlock = arbiter.acquire(MouseLockAction::Unlock);

        assert_eq!(arbiter.resolve().behavior, MouseBehavior::Default);
        arbiter.release(unlock);
        assert_eq!(arbiter.resolve().behavior, MouseBehavior::LockCenter);

        // Double release is harmless
        arbiter.release(unlock);
        assert_eq!(arbiter.resolve().behavior, MouseBehavior::LockCenter);
    }

    #[test]
    fn test_poll_reports_changes_once() {
        let mut arbiter = MouseLockArbiter::new();
        assert_eq!(arbiter.poll(), None);

        let guard = arbiter.acquire(MouseLockAction::LockCenter);
        assert_eq!(
            arbiter.poll().map(|state| state.behavior),
            Some(MouseBehavior::LockCenter)
        );
        assert_eq!(arbiter.poll(), None);

        arbiter.release(guard);
        assert_eq!(
            arbiter.poll().map(|state| state.behavior),
            Some(MouseBehavior::Default)
        );
    }

    #[test]
    fn test_strict_mode_reapplies_every_poll() {
        let mut arbiter = MouseLockArbiter::new();
        arbiter.set_strict(MouseLockAction::LockCenter, true);
        arbiter.acquire(MouseLockAction::LockCenter);

        assert!(arbiter.poll().is_some());
        assert!(arbiter.poll().is_some());
    }

    #[test]
    fn test_debug_unlock_overrides_everything() {
        let mut arbiter = MouseLockArbiter::new();
        arbiter.acquire_with(MouseLockAction::LockCenter, 100);

        arbiter.set_debug_unlock(true);
        assert_eq!(arbiter.resolve().behavior, MouseBehavior::Default);

        arbiter.set_debug_unlock(false);
        assert_eq!(arbiter.resolve().behavior, MouseBehavior::LockCenter);
    }

    #[test]
    fn test_disabled_arbiter_resolves_to_unlocked() {
        let mut arbiter = MouseLockArbiter::new();
        arbiter.acquire(MouseLockAction::LockCenter);

        arbiter.set_enabled(false);
        assert_eq!(arbiter.resolve(), MouseLockState::unlocked());
    }
}
