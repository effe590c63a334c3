//! Damage calculation and mitigation.
//!
//! Every function here is pure. Results are non-negative integers; rounding
//! is half away from zero, which matches round-half-up for the non-negative
//! values that occur.

// ============================================================================
// Attack Damage
// ============================================================================

/// Minimum damage of a hero's basic attack.
pub const MIN_ATTACK_DAMAGE: u32 = 2;

/// Calculate a hero's basic-attack damage.
///
/// # Formula
///
/// ```text
/// total = strength × (0.40 + 0.03 × level) + weapon_damage
/// if unarmed:
///     total += strength × 0.15
/// damage = max(2, round(total))
/// ```
pub fn attack_damage(strength: u32, level: u32, weapon_damage: Option<u32>) -> u32 {
    let strength = f64::from(strength);
    let scaling = 0.40 + f64::from(level) * 0.03;
    let mut total = strength * scaling + f64::from(weapon_damage.unwrap_or(0));
    if weapon_damage.unwrap_or(0) == 0 {
        // Bare-hand compensation.
        total += strength * 0.15;
    }
    (total.round() as u32).max(MIN_ATTACK_DAMAGE)
}

/// Apply the dexterity bonus to a spell or skill's base damage.
///
/// # Formula
///
/// ```text
/// final = round(base + (dexterity / 10000) × base)
/// ```
///
/// A base of zero yields zero.
pub fn spell_damage(base: u32, dexterity: u32) -> u32 {
    if base == 0 {
        return 0;
    }
    let base = f64::from(base);
    let bonus = (f64::from(dexterity) / 10_000.0) * base;
    (base + bonus).round() as u32
}

/// Round a weighted stat combination to a whole base damage.
pub fn weighted_base(
    strength: u32,
    strength_multiplier: f64,
    dexterity: u32,
    dexterity_multiplier: f64,
) -> u32 {
    let raw =
        f64::from(strength) * strength_multiplier + f64::from(dexterity) * dexterity_multiplier;
    raw.round().max(0.0) as u32
}

// ============================================================================
// Mitigation
// ============================================================================

/// Defense left after armor penetration: `max(0, defense − penetration)`.
pub fn effective_mitigation(defense: u32, armor_penetration: u32) -> u32 {
    defense.saturating_sub(armor_penetration)
}

/// Damage that gets through: `max(0, raw − max(0, defense − penetration))`.
pub fn mitigate(raw: u32, defense: u32, armor_penetration: u32) -> u32 {
    raw.saturating_sub(effective_mitigation(defense, armor_penetration))
}

// ============================================================================
// Recovery
// ============================================================================

/// End-of-round regeneration: `min(max, ceil(current × factor))`.
pub fn regenerate(current: u32, maximum: u32, factor: f64) -> u32 {
    let grown = (f64::from(current) * factor).ceil();
    if grown >= f64::from(maximum) {
        maximum
    } else {
        (grown as u32).max(current).min(maximum)
    }
}

/// Scale a stat by `(1 + percent)`, rounding up so small gains still count.
pub fn scale_stat(value: u32, percent: f64) -> u32 {
    (f64::from(value) * (1.0 + percent)).ceil() as u32
}
