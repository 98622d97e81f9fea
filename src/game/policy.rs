//! # Combat Policies
//!
//! The numbers behind a spell (damage, backlash, healing) and the opposing
//! side's choice of reaction are both pluggable. The resolver only relies on
//! these traits.

use crate::config::LEVEL_POWER_BONUS;
use crate::game::actions::{Spell, SpellKind};
use crate::game::combatant::Combatant;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Spell arithmetic.
pub trait CombatPolicy {
    /// Damage `spell` deals to `target` when cast by `caster`.
    fn damage(&self, spell: &Spell, caster: &Combatant, target: &Combatant) -> u32;

    /// Damage `spell` deals back to its own caster.
    fn backlash(&self, spell: &Spell, caster: &Combatant) -> u32;

    /// Health `spell` restores to its caster.
    fn healing(&self, spell: &Spell, caster: &Combatant) -> u32;
}

/// Default arithmetic: spell power plus a flat bonus per level, halved
/// against a guard; specials recoil for a quarter of their power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardPolicy {
    /// Added to spell power for each level above the first
    pub level_bonus: u32,
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self {
            level_bonus: LEVEL_POWER_BONUS,
        }
    }
}

impl StandardPolicy {
    fn scaled_power(&self, spell: &Spell, caster: &Combatant) -> u32 {
        let bonus = self
            .level_bonus
            .saturating_mul(caster.level.saturating_sub(1));
        spell.power.saturating_add(bonus)
    }
}

impl CombatPolicy for StandardPolicy {
    fn damage(&self, spell: &Spell, caster: &Combatant, target: &Combatant) -> u32 {
        if !spell.kind.targets_opponent() {
            return 0;
        }
        let raw = self.scaled_power(spell, caster);
        if target.is_guarding() {
            raw / 2
        } else {
            raw
        }
    }

    fn backlash(&self, spell: &Spell, _caster: &Combatant) -> u32 {
        match spell.kind {
            SpellKind::Special => spell.power / 4,
            _ => 0,
        }
    }

    fn healing(&self, spell: &Spell, caster: &Combatant) -> u32 {
        match spell.kind {
            SpellKind::Heal => self.scaled_power(spell, caster),
            _ => 0,
        }
    }
}

/// How the opposing side picks its reaction each round.
pub trait Tactics {
    /// Chooses the kind of spell `enemy` casts in reply to the player.
    fn choose(&mut self, enemy: &Combatant, player: &Combatant) -> SpellKind;
}

/// Seeded random tactics: heal when badly hurt, otherwise pick any
/// offensive or guarding kind the deck offers.
#[derive(Debug, Clone)]
pub struct RandomTactics {
    rng: StdRng,
}

impl RandomTactics {
    /// Creates tactics with a reproducible seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Tactics for RandomTactics {
    fn choose(&mut self, enemy: &Combatant, _player: &Combatant) -> SpellKind {
        let badly_hurt = enemy.health.saturating_mul(3) <= enemy.max_health;
        if badly_hurt && enemy.spell_for(SpellKind::Heal).is_some() {
            return SpellKind::Heal;
        }

        let options: Vec<SpellKind> = [SpellKind::Attack, SpellKind::Special, SpellKind::Defend]
            .into_iter()
            .filter(|kind| enemy.spell_for(*kind).is_some())
            .collect();
        options
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(SpellKind::Attack)
    }
}

/// Replays a fixed list of choices, then keeps attacking.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTactics {
    script: VecDeque<SpellKind>,
}

impl ScriptedTactics {
    /// Creates tactics that replay `script` in order.
    pub fn new(script: impl IntoIterator<Item = SpellKind>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl Tactics for ScriptedTactics {
    fn choose(&mut self, _enemy: &Combatant, _player: &Combatant) -> SpellKind {
        self.script.pop_front().unwrap_or(SpellKind::Attack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caster(level: u32) -> Combatant {
        Combatant::new("Ada", "Ember", 50).at_level(level)
    }

    #[test]
    fn test_damage_scales_with_level() {
        let policy = StandardPolicy::default();
        let spark = Spell::new("Spark", SpellKind::Attack, 8, 1);
        let target = caster(1);
        assert_eq!(policy.damage(&spark, &caster(1), &target), 8);
        assert_eq!(
            policy.damage(&spark, &caster(3), &target),
            8 + 2 * LEVEL_POWER_BONUS
        );
    }

    #[test]
    fn test_guard_halves_damage() {
        let policy = StandardPolicy::default();
        let spark = Spell::new("Spark", SpellKind::Attack, 9, 1);
        let mut target = caster(1);
        target.status = crate::game::Status::Guarding;
        assert_eq!(policy.damage(&spark, &caster(1), &target), 4);
    }

    #[test]
    fn test_only_specials_backlash() {
        let policy = StandardPolicy::default();
        let nova = Spell::new("Nova", SpellKind::Special, 20, 3);
        let spark = Spell::new("Spark", SpellKind::Attack, 20, 1);
        assert_eq!(policy.backlash(&nova, &caster(1)), 5);
        assert_eq!(policy.backlash(&spark, &caster(1)), 0);
    }

    #[test]
    fn test_self_spells_deal_no_damage() {
        let policy = StandardPolicy::default();
        let mend = Spell::new("Mend", SpellKind::Heal, 10, 1);
        assert_eq!(policy.damage(&mend, &caster(1), &caster(1)), 0);
        assert_eq!(policy.healing(&mend, &caster(2)), 10 + LEVEL_POWER_BONUS);
    }

    #[test]
    fn test_random_tactics_heals_when_hurt() {
        let enemy = caster(1)
            .with_deck(vec![
                Spell::new("Spark", SpellKind::Attack, 8, 1),
                Spell::new("Mend", SpellKind::Heal, 10, 1),
            ])
            .with_health(10);
        let mut tactics = RandomTactics::new(7);
        assert_eq!(tactics.choose(&enemy, &caster(1)), SpellKind::Heal);
    }

    #[test]
    fn test_random_tactics_only_picks_known_kinds() {
        let enemy = caster(1).with_deck(vec![Spell::new("Spark", SpellKind::Attack, 8, 1)]);
        let mut tactics = RandomTactics::new(99);
        for _ in 0..20 {
            assert_eq!(tactics.choose(&enemy, &caster(1)), SpellKind::Attack);
        }
    }

    #[test]
    fn test_scripted_tactics_falls_back_to_attack() {
        let mut tactics = ScriptedTactics::new([SpellKind::Defend]);
        let enemy = caster(1);
        assert_eq!(tactics.choose(&enemy, &enemy), SpellKind::Defend);
        assert_eq!(tactics.choose(&enemy, &enemy), SpellKind::Attack);
    }
}
