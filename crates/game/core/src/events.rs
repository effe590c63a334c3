//! Typed battle notifications.
//!
//! Listeners are registered on the [`EventDispatcher`] owned by a battle.
//! Dispatch is best-effort: a failing listener is logged and counted, and
//! resolution carries on.

use crate::error::{ErrorSeverity, GameError};
use crate::status::StatusKind;

/// Outcome of a finished battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    /// Every monster is defeated.
    Victory,
    /// Every hero is defeated.
    Defeat,
}

impl BattleOutcome {
    pub const fn heroes_won(self) -> bool {
        matches!(self, Self::Victory)
    }
}

/// Something that happened during resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        actor: String,
    },
    /// Post-mitigation damage taken through a hit (not status ticks).
    DamageDealt {
        target: String,
        amount: u32,
    },
    /// Direct damage from a poison or burn tick.
    StatusDamage {
        target: String,
        kind: StatusKind,
        amount: u32,
    },
    StatusApplied {
        target: String,
        kind: StatusKind,
        turns: u32,
        potency: u32,
    },
    StatusExpired {
        target: String,
        kind: StatusKind,
    },
    Defeated {
        name: String,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

/// A listener failure. Never aborts combat resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("listener `{listener}` failed: {message}")]
pub struct ListenerError {
    pub listener: &'static str,
    pub message: String,
}

impl ListenerError {
    pub fn new(listener: &'static str, message: impl Into<String>) -> Self {
        Self {
            listener,
            message: message.into(),
        }
    }
}

impl GameError for ListenerError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "LISTENER_FAILED"
    }
}

/// Receives battle events.
pub trait BattleListener {
    fn on_event(&mut self, event: &BattleEvent) -> Result<(), ListenerError>;
}

impl<F> BattleListener for F
where
    F: FnMut(&BattleEvent) -> Result<(), ListenerError>,
{
    fn on_event(&mut self, event: &BattleEvent) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Fan-out of battle events to registered listeners.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<Box<dyn BattleListener>>,
    failures: Vec<ListenerError>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. Listeners are notified in registration order.
    pub fn register(&mut self, listener: impl BattleListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Delivers `event` to every listener.
    ///
    /// Listener errors are swallowed: they are logged at trace level and kept
    /// for inspection through [`EventDispatcher::failures`].
    pub fn emit(&mut self, event: BattleEvent) {
        for listener in &mut self.listeners {
            if let Err(error) = listener.on_event(&event) {
                tracing::trace!(%error, ?event, "battle listener failed");
                self.failures.push(error);
            }
        }
    }

    /// Listener failures recorded so far.
    pub fn failures(&self) -> &[ListenerError] {
        &self.failures
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .field("failures", &self.failures)
            .finish()
    }
}

/// Listener that records every event into a shared buffer.
///
/// Clone the log before registering it; both handles see the same events.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: std::rc::Rc<std::cell::RefCell<Vec<BattleEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<BattleEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl BattleListener for EventLog {
    fn on_event(&mut self, event: &BattleEvent) -> Result<(), ListenerError> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}
