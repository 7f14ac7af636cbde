//! Per-frame advancement and run timing
//!
//! One tick is strictly sequential: spawn, advance, cleanup. The caller
//! renders afterwards and schedules the next tick. Explosion removals are
//! deadlines compared against the tick timestamp, not separately scheduled
//! callbacks, so a reset can never race a stale timer.

use glam::Vec2;

use super::collision::resolve_click;
use super::state::{ClickMarker, GameState, RunOutcome, RunPhase};
use crate::consts::*;

/// Advance the run by one frame.
///
/// No-op unless Running. The first tick sees a zero delta.
pub fn tick(state: &mut GameState, now_ms: f64) {
    if state.phase != RunPhase::Running {
        return;
    }

    let dt_ms = match state.last_tick_ms {
        Some(prev) => (now_ms - prev) as f32,
        None => 0.0,
    };
    state.last_tick_ms = Some(now_ms);

    state.maybe_spawn_heart(now_ms);

    for heart in &mut state.hearts {
        heart.advance(now_ms);
    }
    for marker in &mut state.markers {
        marker.advance(dt_ms);
    }

    // Explosion removals that have come due this tick. Absent ids are
    // silently skipped: the heart may already be gone from a reset.
    let mut due: Vec<u32> = Vec::new();
    state.removals.retain(|&(id, deadline)| {
        if deadline <= now_ms {
            due.push(id);
            false
        } else {
            true
        }
    });

    let bounds_width = state.bounds.x;
    state.hearts.retain(|h| {
        if due.contains(&h.id) {
            return false;
        }
        // Exploding hearts stay past the edge check so the burst plays out
        !(!h.exploding && h.is_offscreen(bounds_width))
    });
    state.markers.retain(|m| !m.is_expired());
}

/// Resolve a pointer click at surface coordinates (x, y).
///
/// Always spawns a click marker. At most one heart is credited per click:
/// the most recently spawned live heart under the point. Out-of-range
/// clicks simply miss.
pub fn handle_click(state: &mut GameState, x: f32, y: f32, now_ms: f64) {
    if state.phase != RunPhase::Running {
        return;
    }

    state.markers.push(ClickMarker::spawn(x, y));

    let click = Vec2::new(x, y);
    if let Some(idx) = resolve_click(&state.hearts, click) {
        let heart = &mut state.hearts[idx];
        heart.scored = true;
        state.score += heart.kind.points();
        heart.trigger_explosion();
        let id = heart.id;
        state.removals.push((id, now_ms + EXPLOSION_REMOVE_DELAY_MS));
        log::debug!("Hit {:?} heart #{} -> score {}", heart.kind, id, state.score);
    }
}

/// One-second countdown step, driven independently of the render tick.
///
/// Returns the run outcome when the timer reaches zero, exactly once.
pub fn countdown_second(state: &mut GameState) -> Option<RunOutcome> {
    if state.phase != RunPhase::Running {
        return None;
    }
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        state.end()
    } else {
        None
    }
}
