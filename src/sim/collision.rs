//! Click-vs-heart collision detection and resolution
//!
//! Hits are circular: a click lands when its distance to the heart center is
//! under the heart's size. Resolution scans most-recently-spawned first and
//! stops at the first live candidate, so overlapping hearts never double-pay.

use glam::Vec2;

use super::state::Heart;

/// Circular hit test against a single heart
pub fn click_hits_heart(click: Vec2, heart: &Heart) -> bool {
    click.distance(heart.pos) < heart.size
}

/// Find the heart a click resolves to, if any.
///
/// Scans in reverse insertion order (most recently spawned first), skipping
/// hearts that are already exploding or scored, and returns the index of the
/// first match only.
pub fn resolve_click(hearts: &[Heart], click: Vec2) -> Option<usize> {
    for (idx, heart) in hearts.iter().enumerate().rev() {
        if heart.exploding || heart.scored {
            continue;
        }
        if click_hits_heart(click, heart) {
            return Some(idx);
        }
    }
    None
}
