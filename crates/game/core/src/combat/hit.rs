//! Dodge checks.

use crate::rng::RandomSource;

/// Hero dodge chance per point of agility.
pub const AGILITY_DODGE_FACTOR: f64 = 0.002;

/// Hero dodge chance: `agility × 0.002`, clamped to `[0, 1]`.
pub fn hero_dodge_chance(agility: u32) -> f64 {
    (f64::from(agility) * AGILITY_DODGE_FACTOR).clamp(0.0, 1.0)
}

/// Monster dodge chance from a type percentage, normalized to `[0, cap]`.
///
/// # Arguments
///
/// * `percent` - Per-type dodge rating (`8.0` means 8%)
/// * `cap` - Upper bound on the resulting probability
pub fn monster_dodge_chance(percent: f64, cap: f64) -> f64 {
    (percent * 0.01).clamp(0.0, cap.clamp(0.0, 1.0))
}

/// Check whether an attack is dodged.
///
/// Consumes exactly one `next_f64` draw; the attack is dodged when the draw
/// is below `chance`.
pub fn roll_dodge(chance: f64, rng: &mut (impl RandomSource + ?Sized)) -> bool {
    let roll = rng.next_f64();
    let dodged = roll < chance;
    tracing::trace!(roll, chance, dodged, "dodge roll");
    dodged
}

/// Check a trigger chance for chance-gated effects.
///
/// A chance of 1.0 or more always triggers without drawing. Otherwise one
/// draw is consumed and the effect fails when the draw exceeds `chance`.
pub fn roll_trigger(chance: f64, rng: &mut (impl RandomSource + ?Sized)) -> bool {
    if chance >= 1.0 {
        return true;
    }
    let roll = rng.next_f64();
    tracing::trace!(roll, chance, "trigger roll");
    roll <= chance
}
