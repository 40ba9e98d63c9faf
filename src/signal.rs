// Priority-ordered input event dispatch

use crate::event::InputEvent;
use log::warn;
use std::panic::{self, AssertUnwindSafe};

/// Priority assigned to subscriptions that don't specify one
pub const DEFAULT_SUBSCRIPTION_PRIORITY: i32 = 1;

/// Result of delivering an event to a subscriber, and of a whole dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// Stop propagating to lower-priority subscribers
    Sink,
    /// Continue to the next subscriber
    Pass,
}

/// Which events a subscription wants to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionKind {
    /// Every event
    All,
    /// Every event except synthetic custom keys
    AllExceptCustom,
    /// Discrete begin/end events only
    #[default]
    KeysOnly,
    /// Continuous/analog samples only
    ChangedOnly,
    /// Synthetic custom-key events only
    CustomOnly,
    /// Discrete events plus synthetic custom keys
    KeysOrCustom,
}

impl SubscriptionKind {
    fn accepts(self, event: &InputEvent) -> bool {
        match self {
            Self::All => true,
            Self::AllExceptCustom => !event.is_synthetic(),
            Self::KeysOnly => !event.changed(),
            Self::ChangedOnly => event.changed(),
            Self::CustomOnly => event.is_synthetic(),
            Self::KeysOrCustom => !event.changed() || event.is_synthetic(),
        }
    }
}

/// Callback invoked for each accepted event
pub type InputCallback = Box<dyn FnMut(&InputEvent) -> DispatchResult>;

/// Handle returned by [`InputSignal::subscribe`]; cancelling twice is a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

struct Subscription {
    id: u64,
    priority: i32,
    kind: SubscriptionKind,
    callback: InputCallback,
}

/// Fan-out point for input events
///
/// Subscribers are kept sorted by descending priority; equal priorities
/// preserve insertion order. Firing walks an id snapshot so cancellation
/// never affects an in-progress dispatch, and a panicking subscriber is
/// isolated from the rest of the pipeline.
#[derive(Default)]
pub struct InputSignal {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl InputSignal {
    /// Create an empty signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber at the given priority
    ///
    /// Higher priorities are delivered first; a new subscriber is placed
    /// after existing subscribers of equal priority.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&InputEvent) -> DispatchResult + 'static,
        priority: i32,
        kind: SubscriptionKind,
    ) -> SubscriptionHandle {
        let id = self.next_id;
        self.next_id += 1;

        let position = self
            .subscriptions
            .iter()
            .position(|subscription| subscription.priority < priority)
            .unwrap_or(self.subscriptions.len());

        self.subscriptions.insert(
            position,
            Subscription {
                id,
                priority,
                kind,
                callback: Box::new(callback),
            },
        );
        SubscriptionHandle(id)
    }

    /// Remove a subscriber; safe to call with an already-removed handle
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        self.subscriptions
            .retain(|subscription| subscription.id != handle.0);
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check if the signal has no subscribers
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Deliver an event to all accepting subscribers in priority order
    pub fn fire(&mut self, event: &InputEvent) -> DispatchResult {
        self.fire_where(event, |_| true)
    }

    /// Deliver only to subscribers strictly above the given priority
    pub(crate) fn fire_above(&mut self, event: &InputEvent, priority: i32) -> DispatchResult {
        self.fire_where(event, |p| p > priority)
    }

    /// Deliver only to subscribers at or below the given priority
    pub(crate) fn fire_at_or_below(&mut self, event: &InputEvent, priority: i32) -> DispatchResult {
        self.fire_where(event, |p| p <= priority)
    }

    fn fire_where(
        &mut self,
        event: &InputEvent,
        in_range: impl Fn(i32) -> bool,
    ) -> DispatchResult {
        // Snapshot of the subscriber list at fire time
        let snapshot: Vec<u64> = self
            .subscriptions
            .iter()
            .filter(|subscription| in_range(subscription.priority))
            .map(|subscription| subscription.id)
            .collect();

        for id in snapshot {
            let Some(index) = self
                .subscriptions
                .iter()
                .position(|subscription| subscription.id == id)
            else {
                continue;
            };

            let subscription = &mut self.subscriptions[index];
            if !subscription.kind.accepts(event) {
                continue;
            }

            match panic::catch_unwind(AssertUnwindSafe(|| (subscription.callback)(event))) {
                Ok(DispatchResult::Sink) => return DispatchResult::Sink,
                Ok(DispatchResult::Pass) => {}
                Err(payload) => {
                    // A misbehaving subscriber must never block delivery to others
                    warn!("Input subscriber panicked: {}", describe_panic(&payload));
                }
            }
        }

        DispatchResult::Pass
    }
}

impl std::fmt::Debug for InputSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputSignal")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

fn describe_panic(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
