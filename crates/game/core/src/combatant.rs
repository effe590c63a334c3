//! Capabilities shared by heroes and monsters.

use crate::combat;
use crate::status::{StatusEffect, StatusEffects, StatusKind, StatusTick};

/// A clamped resource pool (health or mana).
///
/// `current` never exceeds `max`; all arithmetic saturates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    current: u32,
    max: u32,
}

impl Meter {
    /// A full pool of size `max`.
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// A pool at `current`, clamped to `max`.
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Amount needed to fill the pool.
    pub const fn missing(&self) -> u32 {
        self.max.saturating_sub(self.current)
    }

    /// Adds up to `amount`, returning what was actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    /// Removes up to `amount`, returning what was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// Sets the current value, clamped to the maximum.
    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.max);
    }

    /// Changes the maximum, clamping the current value down if needed.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.current = self.current.min(max);
    }

    pub fn fill(&mut self) {
        self.current = self.max;
    }

    /// Applies end-of-round regeneration.
    pub fn regenerate(&mut self, factor: f64) {
        self.current = combat::regenerate(self.current, self.max, factor);
    }
}

impl std::fmt::Display for Meter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// Participant in a battle.
///
/// Implemented by [`crate::Hero`] and [`crate::Monster`]. The provided methods
/// derive everything else from the handful of required accessors.
pub trait Combatant {
    fn name(&self) -> &str;

    fn level(&self) -> u32;

    fn health(&self) -> Meter;

    /// Defense value subtracted from incoming hits.
    fn defense(&self) -> u32;

    /// Probability in `[0, 1]` that an incoming hit misses.
    fn dodge_chance(&self) -> f64;

    fn status_effects(&self) -> &StatusEffects;

    /// Attaches a status effect. Never merges with existing effects.
    fn add_status(&mut self, effect: StatusEffect);

    /// Applies a raw hit through mitigation.
    ///
    /// Returns the health actually lost.
    fn take_damage(&mut self, raw: u32) -> u32;

    /// Processes the status ledger once, applying damage-over-time directly.
    fn tick_status_effects(&mut self) -> Vec<StatusTick>;

    fn is_alive(&self) -> bool {
        !self.health().is_empty()
    }

    fn has_status(&self, kind: StatusKind) -> bool {
        self.status_effects().has(kind)
    }

    /// Sum of potency of active armor-penetration effects on this combatant.
    fn armor_penetration(&self) -> u32 {
        self.status_effects().armor_penetration()
    }

    /// Damage a raw hit would deal after this combatant's mitigation.
    fn mitigated(&self, raw: u32) -> u32 {
        combat::mitigate(raw, self.defense(), self.armor_penetration())
    }
}

/// Ticks `statuses` and subtracts poison and burn damage from `health`.
///
/// Status damage bypasses mitigation.
pub(crate) fn tick_ledger(statuses: &mut StatusEffects, health: &mut Meter) -> Vec<StatusTick> {
    let report = statuses.tick();
    for tick in &report {
        health.drain(tick.damage);
    }
    report
}
