//! Status effect ledger for combatants.
//!
//! Status effects are timed modifiers attached to a combatant: damage over
//! time, crowd control, and armor-penetration debuffs.
//!
//! # Turn-based Duration
//!
//! Effects store `remaining_turns`. Once per round the owner's ledger is
//! ticked: the effect acts first (poison/burn deal their potency), then the
//! countdown decreases. An effect created with duration N therefore acts
//! exactly N times before it is removed.
//!
//! # Stacking
//!
//! Applying an effect never merges with an existing effect of the same kind.
//! Duplicates coexist and their per-tick contributions add up.

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum StatusKind {
    /// HP loss over time.
    Poison,

    /// Fire damage over time.
    Burn,

    /// Cannot act.
    Stun,

    /// Lowers the bearer's effective defense by its potency.
    ArmorPenetrate,

    /// Announced each round; no direct effect at this layer.
    Slow,
}

impl StatusKind {
    /// Returns true if this kind deals its potency as damage on every tick.
    pub const fn deals_damage(self) -> bool {
        matches!(self, Self::Poison | Self::Burn)
    }
}

/// A single status effect instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    kind: StatusKind,
    remaining_turns: u32,
    potency: u32,
}

impl StatusEffect {
    /// Creates an effect. Durations below one are raised to one.
    pub fn new(kind: StatusKind, turns: u32, potency: u32) -> Self {
        Self {
            kind,
            remaining_turns: turns.max(1),
            potency,
        }
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn remaining_turns(&self) -> u32 {
        self.remaining_turns
    }

    pub fn potency(&self) -> u32 {
        self.potency
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }

    /// Decrements the countdown, saturating at zero.
    fn countdown(&mut self) {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
    }
}

/// What one effect did during a ledger tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusTick {
    pub kind: StatusKind,
    /// Direct damage owed to the bearer (poison/burn only).
    pub damage: u32,
    /// Turns left when the effect acted, before the countdown.
    pub turns_left: u32,
    /// Whether the effect was removed after this tick.
    pub expired: bool,
}

/// Ordered multiset of status effects owned by one combatant.
///
/// The list is encapsulated: callers add effects and read aggregates, but
/// cannot reach in and change a duration or potency.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Appends an effect. Existing effects of the same kind are left untouched.
    pub fn add(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    /// Checks if an unexpired effect of `kind` is present.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.active().any(|e| e.kind == kind)
    }

    /// Number of unexpired instances of `kind`.
    pub fn count(&self, kind: StatusKind) -> usize {
        self.active().filter(|e| e.kind == kind).count()
    }

    /// Sum of potency across all unexpired armor-penetration effects.
    pub fn armor_penetration(&self) -> u32 {
        self.active()
            .filter(|e| e.kind == StatusKind::ArmorPenetrate)
            .map(|e| e.potency)
            .sum()
    }

    /// Removes every effect of `kind` immediately. Returns how many were removed.
    pub fn remove(&mut self, kind: StatusKind) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        before - self.effects.len()
    }

    /// Processes every effect once, in list order.
    ///
    /// Each effect acts, then counts down; effects reaching zero are removed.
    /// Damage is reported, not applied: the owner subtracts it from its health.
    pub fn tick(&mut self) -> Vec<StatusTick> {
        // Anything already expired is purged without acting.
        self.effects.retain(|e| !e.is_expired());

        let mut report = Vec::with_capacity(self.effects.len());
        for effect in &mut self.effects {
            let damage = if effect.kind.deals_damage() {
                effect.potency
            } else {
                0
            };
            let turns_left = effect.remaining_turns;
            effect.countdown();
            report.push(StatusTick {
                kind: effect.kind,
                damage,
                turns_left,
                expired: effect.is_expired(),
            });
        }
        self.effects.retain(|e| !e.is_expired());
        report
    }

    /// Returns an iterator over all unexpired effects.
    pub fn active(&self) -> impl Iterator<Item = &StatusEffect> + '_ {
        self.effects.iter().filter(|e| !e.is_expired())
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_with_duration_n_ticks_exactly_n_times() {
        let mut ledger = StatusEffects::empty();
        ledger.add(StatusEffect::new(StatusKind::Poison, 3, 4));

        let mut total = 0;
        let mut ticks = 0;
        while ledger.has(StatusKind::Poison) {
            for tick in ledger.tick() {
                total += tick.damage;
                ticks += 1;
            }
        }

        assert_eq!(ticks, 3);
        assert_eq!(total, 12);
        assert!(!ledger.has(StatusKind::Poison));
        assert!(ledger.is_empty());
        assert!(ledger.tick().is_empty());
    }

    #[test]
    fn zero_duration_is_raised_to_one() {
        let effect = StatusEffect::new(StatusKind::Stun, 0, 0);
        assert_eq!(effect.remaining_turns(), 1);
        assert!(!effect.is_expired());
    }

    #[test]
    fn duplicates_stack_additively() {
        let mut ledger = StatusEffects::empty();
        ledger.add(StatusEffect::new(StatusKind::Burn, 2, 3));
        ledger.add(StatusEffect::new(StatusKind::Burn, 1, 5));

        assert_eq!(ledger.count(StatusKind::Burn), 2);
        let first: u32 = ledger.tick().iter().map(|t| t.damage).sum();
        assert_eq!(first, 8);

        // The one-turn burn is gone, the two-turn burn acts once more.
        assert_eq!(ledger.count(StatusKind::Burn), 1);
        let second: u32 = ledger.tick().iter().map(|t| t.damage).sum();
        assert_eq!(second, 3);
        assert!(ledger.is_empty());
    }

    #[test]
    fn armor_penetration_sums_active_effects() {
        let mut ledger = StatusEffects::empty();
        ledger.add(StatusEffect::new(StatusKind::ArmorPenetrate, 2, 2));
        ledger.add(StatusEffect::new(StatusKind::ArmorPenetrate, 1, 3));
        ledger.add(StatusEffect::new(StatusKind::Slow, 1, 1));
        assert_eq!(ledger.armor_penetration(), 5);

        ledger.tick();
        assert_eq!(ledger.armor_penetration(), 2);
        ledger.tick();
        assert_eq!(ledger.armor_penetration(), 0);
    }

    #[test]
    fn non_damaging_effects_report_zero_damage() {
        let mut ledger = StatusEffects::empty();
        ledger.add(StatusEffect::new(StatusKind::Stun, 2, 9));
        let report = ledger.tick();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].damage, 0);
        assert_eq!(report[0].turns_left, 2);
        assert!(!report[0].expired);
    }

    #[test]
    fn remove_drops_every_instance_of_kind() {
        let mut ledger = StatusEffects::empty();
        ledger.add(StatusEffect::new(StatusKind::Poison, 2, 1));
        ledger.add(StatusEffect::new(StatusKind::Poison, 4, 1));
        ledger.add(StatusEffect::new(StatusKind::Burn, 1, 1));
        assert_eq!(ledger.remove(StatusKind::Poison), 2);
        assert!(!ledger.has(StatusKind::Poison));
        assert!(ledger.has(StatusKind::Burn));
    }

    #[test]
    fn kinds_parse_from_data_names() {
        assert_eq!(
            "ARMOR_PENETRATE".parse::<StatusKind>(),
            Ok(StatusKind::ArmorPenetrate)
        );
        assert_eq!("burn".parse::<StatusKind>(), Ok(StatusKind::Burn));
        assert_eq!(StatusKind::ArmorPenetrate.to_string(), "ARMOR_PENETRATE");
    }
}
