//! # Turn Resolution
//!
//! Applies one command and the opposing side's reaction to a pair of
//! combatant states. Resolution works on copies, so a rejected command never
//! leaves a half-applied round behind.

use crate::game::actions::{Spell, SpellKind};
use crate::game::combatant::{Combatant, Status};
use crate::game::policy::{CombatPolicy, RandomTactics, StandardPolicy, Tactics};
use crate::input::{Command, InvalidCommand};
use log::debug;
use serde::{Deserialize, Serialize};

/// Something that happened during a round, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A spell was cast
    SpellCast {
        caster: String,
        spell: String,
        kind: SpellKind,
    },
    /// A spell hit its target
    Damaged {
        target: String,
        amount: u32,
        remaining: u32,
    },
    /// A special spell recoiled on its caster
    Backlash {
        caster: String,
        amount: u32,
        remaining: u32,
    },
    /// A caster restored health
    Healed {
        target: String,
        amount: u32,
        health: u32,
    },
    /// A caster raised a guard
    Guarded { caster: String },
    /// The command list was requested
    HelpShown,
}

/// Result of resolving one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// The acting side after the round
    pub actor: Combatant,
    /// The opposing side after the round
    pub opponent: Combatant,
    /// Everything that happened, in order
    pub events: Vec<TurnEvent>,
    /// Whether a round was spent; meta commands are free
    pub consumed: bool,
}

/// Resolves rounds using a damage policy and the opposing side's tactics.
pub struct TurnResolver {
    policy: Box<dyn CombatPolicy>,
    tactics: Box<dyn Tactics>,
}

impl std::fmt::Debug for TurnResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnResolver").finish_non_exhaustive()
    }
}

impl TurnResolver {
    /// Creates a resolver from explicit policies.
    pub fn new(policy: Box<dyn CombatPolicy>, tactics: Box<dyn Tactics>) -> Self {
        Self { policy, tactics }
    }

    /// Standard arithmetic with seeded random tactics.
    pub fn standard(seed: u64) -> Self {
        Self::new(
            Box::new(StandardPolicy::default()),
            Box::new(RandomTactics::new(seed)),
        )
    }

    /// Resolves `command` issued by `actor` against `opponent`.
    ///
    /// Combat commands cast the actor's strongest spell of the matching kind
    /// and, if both sides are still standing, the opponent replies within the
    /// same call. Meta commands leave both states untouched and spend no
    /// round.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCommand`] when the actor's deck has no spell for the
    /// command. The inputs are not modified in any case.
    pub fn resolve(
        &mut self,
        command: Command,
        actor: &Combatant,
        opponent: &Combatant,
    ) -> Result<Turn, InvalidCommand> {
        let Some(kind) = command.spell_kind() else {
            let events = match command {
                Command::Help => vec![TurnEvent::HelpShown],
                _ => Vec::new(),
            };
            return Ok(Turn {
                actor: actor.clone(),
                opponent: opponent.clone(),
                events,
                consumed: false,
            });
        };

        let spell = actor
            .spell_for(kind)
            .cloned()
            .ok_or_else(|| InvalidCommand::not_in_deck(command))?;

        let mut actor = actor.clone();
        let mut opponent = opponent.clone();
        let mut events = Vec::new();

        cast(self.policy.as_ref(), &spell, &mut actor, &mut opponent, &mut events);

        if !actor.is_defeated() && !opponent.is_defeated() {
            let choice = self.tactics.choose(&opponent, &actor);
            let reply = opponent
                .spell_for(choice)
                .or_else(|| opponent.deck.first())
                .cloned();
            match reply {
                Some(reply) => {
                    cast(self.policy.as_ref(), &reply, &mut opponent, &mut actor, &mut events)
                }
                None => debug!("{} has no spell to reply with", opponent.name),
            }
        }

        Ok(Turn {
            actor,
            opponent,
            events,
            consumed: true,
        })
    }
}

/// Applies a single spell. The caster's own guard drops as it acts.
fn cast(
    policy: &dyn CombatPolicy,
    spell: &Spell,
    caster: &mut Combatant,
    target: &mut Combatant,
    events: &mut Vec<TurnEvent>,
) {
    caster.status = Status::Ready;
    debug!("{} casts {} ({})", caster.name, spell.name, spell.kind);
    events.push(TurnEvent::SpellCast {
        caster: caster.name.clone(),
        spell: spell.name.clone(),
        kind: spell.kind,
    });

    match spell.kind {
        SpellKind::Attack | SpellKind::Special => {
            let amount = policy.damage(spell, caster, target);
            target.apply_damage(amount);
            events.push(TurnEvent::Damaged {
                target: target.name.clone(),
                amount,
                remaining: target.health,
            });

            let recoil = policy.backlash(spell, caster);
            if recoil > 0 {
                caster.apply_damage(recoil);
                events.push(TurnEvent::Backlash {
                    caster: caster.name.clone(),
                    amount: recoil,
                    remaining: caster.health,
                });
            }
        }
        SpellKind::Defend => {
            caster.status = Status::Guarding;
            events.push(TurnEvent::Guarded {
                caster: caster.name.clone(),
            });
        }
        SpellKind::Heal => {
            let amount = policy.healing(spell, caster);
            let restored = caster.apply_heal(amount);
            events.push(TurnEvent::Healed {
                target: caster.name.clone(),
                amount: restored,
                health: caster.health,
            });
        }
    }
}
