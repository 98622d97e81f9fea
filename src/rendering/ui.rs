//! # User Interface Elements
//!
//! Text widgets: health bars and status lines.

use crate::game::{Combatant, Status};

/// Width of the health bar in characters.
pub const HEALTH_BAR_WIDTH: usize = 20;

/// Draws a fixed-width health bar such as `[#####.....]`.
///
/// # Examples
///
/// ```
/// use spellduel::health_bar;
///
/// assert_eq!(health_bar(5, 10, 10), "[#####.....]");
/// assert_eq!(health_bar(0, 10, 4), "[....]");
/// ```
pub fn health_bar(current: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        let ratio = f64::from(current.min(max)) / f64::from(max);
        (ratio * width as f64).round() as usize
    };
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// One line summarising a combatant.
pub fn status_line(combatant: &Combatant) -> String {
    let guard = match combatant.status {
        Status::Guarding => " (guarding)",
        Status::Ready => "",
    };
    format!(
        "{:<14} {:<8} Lv{:<2} {} {:>3}/{:<3}{}",
        combatant.name,
        combatant.house,
        combatant.level,
        health_bar(combatant.health, combatant.max_health, HEALTH_BAR_WIDTH),
        combatant.health,
        combatant.max_health,
        guard
    )
}
