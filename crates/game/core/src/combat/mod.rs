//! Damage and mitigation engine.
//!
//! Pure functions shared by basic attacks, skills and monster actions. The
//! only functions that touch state are the dodge and trigger rolls, which
//! consume the shared random stream.
//!
//! # Core Functions
//!
//! - `attack_damage`: hero basic attack
//! - `spell_damage`: dexterity bonus on skill damage
//! - `mitigate`: defense net of armor penetration
//! - `regenerate`: end-of-round recovery
//! - `roll_dodge`: one draw against a dodge chance

pub mod damage;
pub mod hit;

pub use damage::{
    MIN_ATTACK_DAMAGE, attack_damage, effective_mitigation, mitigate, regenerate, scale_stat,
    spell_damage, weighted_base,
};
pub use hit::{hero_dodge_chance, monster_dodge_chance, roll_dodge, roll_trigger};
