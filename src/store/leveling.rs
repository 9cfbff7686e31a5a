//! XP curve arithmetic.
//!
//! All leveling math lives here so the store actions stay readable: the XP
//! awarded for a progress entry, the per-level threshold curve, and the
//! aggregate player level derived from lifetime XP.

/// XP threshold to clear the given habit level: `floor(100 * 1.5^(level-1))`.
///
pub fn xp_for_level(level: u32) -> f64 {
    (100.0 * 1.5f64.powi(level as i32 - 1)).floor()
}

/// Base XP awarded for a progress entry, before the settings multiplier.
///
/// Proportional to target completion, with a flat bonus per unit past the
/// target.
pub fn progress_xp(value: f64, target: f64) -> f64 {
    let base = ((value / target) * 100.0).floor();
    let bonus = if value > target {
        ((value - target) * 10.0).floor()
    } else {
        0.0
    };
    base + bonus
}

/// Aggregate player level derived from lifetime XP by walking the same
/// threshold curve cumulatively.
///
pub fn player_level_for(total_xp: f64) -> u32 {
    let mut remaining = total_xp;
    let mut level = 1;
    while remaining >= xp_for_level(level) {
        remaining -= xp_for_level(level);
        level += 1;
    }
    level
}
