//! # Game Module
//!
//! The battle engine.
//!
//! This module contains the building blocks of a duel:
//! - Spells, decks and the level-deck function
//! - Combatant state and its bounded mutations
//! - Pluggable damage policies and opponent tactics
//! - The turn resolver, the outcome evaluator and the battle loop
//! - Campaign statistics fed from turn events

pub mod actions;
pub mod battle;
pub mod combatant;
pub mod outcome;
pub mod policy;
pub mod resolver;
pub mod state;

pub use actions::*;
pub use battle::*;
pub use combatant::*;
pub use outcome::*;
pub use policy::*;
pub use resolver::*;
pub use state::*;
