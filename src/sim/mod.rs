//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{click_hits_heart, resolve_click};
pub use state::{ClickMarker, GameState, Heart, HeartKind, RunOutcome, RunPhase};
pub use tick::{countdown_second, handle_click, tick};
