//! Run state and core simulation types
//!
//! Everything a single run owns: the live entity collections, spawn timing,
//! score and countdown state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::LevelConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Constructed but not yet started
    Idle,
    /// Active gameplay
    Running,
    /// Run finished (timer hit zero or torn down)
    Ended,
}

/// Heart color class, mapped to a fixed point delta and tint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartKind {
    /// Subtracts points when hit
    Hazard,
    /// Main scoring heart
    Primary,
    /// Low-value filler heart
    Bonus,
}

impl HeartKind {
    /// Point delta credited when this heart is hit
    pub fn points(&self) -> i32 {
        match self {
            HeartKind::Hazard => -2,
            HeartKind::Primary => 5,
            HeartKind::Bonus => 1,
        }
    }

    /// Body tint
    pub fn color(&self) -> &'static str {
        match self {
            HeartKind::Hazard => "#DC143C",
            HeartKind::Primary => "#FF69B4",
            HeartKind::Bonus => "#8A2BE2",
        }
    }

    /// Halo tint (body tint at half alpha)
    pub fn glow_color(&self) -> &'static str {
        match self {
            HeartKind::Hazard => "#DC143C80",
            HeartKind::Primary => "#FF69B480",
            HeartKind::Bonus => "#8A2BE280",
        }
    }

    /// Weighted three-way draw over the unit interval.
    ///
    /// `[0, hazard_chance)` is Hazard, the next 0.4 is Primary, the rest is
    /// Bonus. Thresholds are clamped so the partition stays valid when
    /// `hazard_chance` pushes the cumulative mass past 1.
    pub fn pick(rng: &mut Pcg32, hazard_chance: f32) -> Self {
        let hazard_t = hazard_chance.clamp(0.0, 1.0);
        let primary_t = (hazard_t + PRIMARY_BAND).min(1.0);
        let roll: f32 = rng.random_range(0.0..1.0);
        if roll < hazard_t {
            HeartKind::Hazard
        } else if roll < primary_t {
            HeartKind::Primary
        } else {
            HeartKind::Bonus
        }
    }
}

/// A drifting heart entity
#[derive(Debug, Clone)]
pub struct Heart {
    pub id: u32,
    pub pos: Vec2,
    /// Horizontal travel direction, +1 or -1
    pub direction: f32,
    pub size: f32,
    /// Horizontal step per frame
    pub speed: f32,
    pub kind: HeartKind,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Current pulsation scale factor
    pub pulse: f32,
    pub exploding: bool,
    /// Monotone 0..1 once exploding
    pub explosion_progress: f32,
    /// True once points have been credited for this heart
    pub scored: bool,
}

impl Heart {
    /// Construct a heart with randomized parameters just outside the bounds,
    /// on the side opposite its travel direction.
    pub fn spawn(id: u32, rng: &mut Pcg32, bounds: Vec2, base_speed: f32, hazard_chance: f32) -> Self {
        let size = HEART_SIZE_MIN + rng.random_range(0.0..HEART_SIZE_RANGE);
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let x = if direction > 0.0 { -size } else { bounds.x + size };
        let band = bounds.y * SPAWN_BAND_HEIGHT;
        let y = bounds.y * SPAWN_BAND_TOP + rng.random_range(0.0..band);
        Self {
            id,
            pos: Vec2::new(x, y),
            direction,
            size,
            speed: base_speed + rng.random_range(0.0..HEART_SPEED_JITTER),
            kind: HeartKind::pick(rng, hazard_chance),
            rotation: 0.0,
            rotation_speed: rng.random_range(-0.02..0.02),
            pulse: 1.0,
            exploding: false,
            explosion_progress: 0.0,
            scored: false,
        }
    }

    /// Advance one frame. Motion and rotation step per call; pulsation and
    /// vertical drift take their phase from wall-clock milliseconds. While
    /// exploding, position freezes and only the burst progresses.
    pub fn advance(&mut self, now_ms: f64) {
        if !self.exploding {
            self.pos.x += self.speed * self.direction;
            self.pos.y += ((now_ms * DRIFT_RATE).sin() as f32) * DRIFT_AMPLITUDE;
            self.rotation += self.rotation_speed;
            self.pulse = ((now_ms * PULSE_RATE).sin() as f32) * PULSE_AMPLITUDE + 1.0;
        } else {
            self.explosion_progress = (self.explosion_progress + EXPLOSION_STEP).min(1.0);
            self.pulse = 1.0 + self.explosion_progress * 3.0;
        }
    }

    /// Start the explosion animation. Idempotent: progress resets only on
    /// the first call.
    pub fn trigger_explosion(&mut self) {
        if !self.exploding {
            self.exploding = true;
            self.explosion_progress = 0.0;
        }
    }

    /// Past the far edge plus margin, in the direction of travel
    pub fn is_offscreen(&self, bounds_width: f32) -> bool {
        (self.direction > 0.0 && self.pos.x > bounds_width + OFFSCREEN_MARGIN)
            || (self.direction < 0.0 && self.pos.x < -OFFSCREEN_MARGIN)
    }
}

/// Visual feedback mark spawned at every click, hit or miss
#[derive(Debug, Clone)]
pub struct ClickMarker {
    pub pos: Vec2,
    /// Remaining lifetime in milliseconds
    pub lifetime_ms: f32,
}

impl ClickMarker {
    pub fn spawn(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            lifetime_ms: MARKER_LIFETIME_MS,
        }
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.lifetime_ms -= dt_ms;
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime_ms <= 0.0
    }

    /// Remaining life as 0..1 for the fade-out
    pub fn fade(&self) -> f32 {
        (self.lifetime_ms / MARKER_LIFETIME_MS).clamp(0.0, 1.0)
    }
}

/// Result reported exactly once when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub score: i32,
    pub success: bool,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Level being played (1-based)
    pub level: u32,
    /// Level balance, immutable for the run
    pub config: LevelConfig,
    /// May go negative from hazard hits
    pub score: i32,
    /// Countdown in whole seconds
    pub time_left: u32,
    pub phase: RunPhase,
    /// Live hearts in insertion (spawn) order
    pub hearts: Vec<Heart>,
    /// Live click markers
    pub markers: Vec<ClickMarker>,
    /// Current spawn interval; decays over the run
    pub spawn_interval_ms: f32,
    last_spawn_ms: f64,
    pub(crate) last_tick_ms: Option<f64>,
    /// Post-explosion removal deadlines: (heart id, due timestamp)
    pub(crate) removals: Vec<(u32, f64)>,
    /// Render bounds in surface coordinates
    pub bounds: Vec2,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle state for `level`, with spawn timing primed so the
    /// first heart appears on the first tick after `start`.
    pub fn new(level: u32, config: &LevelConfig, seed: u64, bounds: Vec2, start_ms: f64) -> Self {
        Self {
            level,
            config: *config,
            score: 0,
            time_left: RUN_DURATION_SECS,
            phase: RunPhase::Idle,
            hearts: Vec::new(),
            markers: Vec::new(),
            spawn_interval_ms: config.spawn_interval_ms,
            last_spawn_ms: start_ms - config.spawn_interval_ms as f64,
            last_tick_ms: None,
            removals: Vec::new(),
            bounds,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a heart if the interval has elapsed, then decay the interval
    /// toward its floor.
    pub fn maybe_spawn_heart(&mut self, now_ms: f64) {
        if now_ms - self.last_spawn_ms > self.spawn_interval_ms as f64 {
            let id = self.next_entity_id();
            let base = self.config.base_speed * self.config.speed_multiplier;
            let heart = Heart::spawn(id, &mut self.rng, self.bounds, base, self.config.hazard_chance);
            self.hearts.push(heart);
            self.last_spawn_ms = now_ms;
            self.spawn_interval_ms =
                (self.spawn_interval_ms * SPAWN_DECAY).max(SPAWN_INTERVAL_FLOOR_MS);
        }
    }

    /// Begin play. Only an idle run can start; any other phase is a no-op.
    pub fn start(&mut self) {
        if self.phase == RunPhase::Idle {
            self.phase = RunPhase::Running;
            log::info!(
                "Run started: level {} goal {}",
                self.level,
                self.config.required_score
            );
        }
    }

    /// Surface was resized by the host
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }

    /// End the run. Idempotent: yields the outcome only on the first call.
    pub fn end(&mut self) -> Option<RunOutcome> {
        if self.phase == RunPhase::Ended {
            return None;
        }
        self.phase = RunPhase::Ended;
        let outcome = RunOutcome {
            score: self.score,
            success: self.score >= self.config.required_score,
        };
        log::info!(
            "Run ended: level {} score {} ({})",
            self.level,
            outcome.score,
            if outcome.success { "cleared" } else { "failed" }
        );
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning;

    fn test_state(seed: u64) -> GameState {
        let config = tuning::level_config(1).unwrap();
        let mut state = GameState::new(1, &config, seed, Vec2::new(800.0, 600.0), 0.0);
        state.start();
        state
    }

    #[test]
    fn test_start_transitions_idle_only() {
        let config = tuning::level_config(1).unwrap();
        let mut state = GameState::new(1, &config, 1, Vec2::new(800.0, 600.0), 0.0);
        assert_eq!(state.phase, RunPhase::Idle);
        state.start();
        assert_eq!(state.phase, RunPhase::Running);
        let _ = state.end();
        state.start(); // ended runs stay ended
        assert_eq!(state.phase, RunPhase::Ended);
    }

    #[test]
    fn test_spawn_ranges() {
        let mut state = test_state(42);
        for _ in 0..200 {
            let id = state.next_entity_id();
            let heart = Heart::spawn(id, &mut state.rng, state.bounds, 2.0, 0.1);
            assert!(heart.size >= 35.0 && heart.size < 60.0);
            assert!(heart.speed >= 2.0 && heart.speed < 4.0);
            // Middle 70% of a 600px surface
            assert!(heart.pos.y >= 90.0 && heart.pos.y < 510.0);
            // Starts just outside the edge opposite travel
            if heart.direction > 0.0 {
                assert_eq!(heart.pos.x, -heart.size);
            } else {
                assert_eq!(heart.pos.x, 800.0 + heart.size);
            }
        }
    }

    #[test]
    fn test_color_distribution_seeded() {
        let mut rng = Pcg32::seed_from_u64(7);
        let n = 10_000;
        let mut counts = [0u32; 3];
        for _ in 0..n {
            match HeartKind::pick(&mut rng, 0.3) {
                HeartKind::Hazard => counts[0] += 1,
                HeartKind::Primary => counts[1] += 1,
                HeartKind::Bonus => counts[2] += 1,
            }
        }
        let frac = |c: u32| c as f32 / n as f32;
        assert!((frac(counts[0]) - 0.3).abs() < 0.02, "hazard {}", frac(counts[0]));
        assert!((frac(counts[1]) - 0.4).abs() < 0.02, "primary {}", frac(counts[1]));
        assert!((frac(counts[2]) - 0.3).abs() < 0.02, "bonus {}", frac(counts[2]));
    }

    #[test]
    fn test_partition_clamps_at_high_hazard_chance() {
        // With hazard_chance >= 0.6 the bands would overflow the unit
        // interval without clamping; every draw must still land somewhere.
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..1000 {
            let _ = HeartKind::pick(&mut rng, 0.85);
        }
        // Primary threshold saturates at 1.0, leaving Bonus empty but valid
        let mut rng = Pcg32::seed_from_u64(12);
        let bonus = (0..2000)
            .filter(|_| HeartKind::pick(&mut rng, 1.0) == HeartKind::Bonus)
            .count();
        assert_eq!(bonus, 0);
    }

    #[test]
    fn test_trigger_explosion_idempotent() {
        let mut state = test_state(1);
        let id = state.next_entity_id();
        let mut heart = Heart::spawn(id, &mut state.rng, state.bounds, 2.0, 0.0);
        heart.trigger_explosion();
        heart.advance(0.0);
        heart.advance(0.0);
        let progress = heart.explosion_progress;
        assert!(progress > 0.0);
        // Second trigger must not reset progress
        heart.trigger_explosion();
        assert_eq!(heart.explosion_progress, progress);
    }

    #[test]
    fn test_exploding_freezes_motion() {
        let mut state = test_state(3);
        let id = state.next_entity_id();
        let mut heart = Heart::spawn(id, &mut state.rng, state.bounds, 2.0, 0.0);
        heart.trigger_explosion();
        let pos = heart.pos;
        for _ in 0..30 {
            heart.advance(1234.0);
        }
        assert_eq!(heart.pos, pos);
        assert_eq!(heart.explosion_progress, 1.0); // clamped, never past 1
    }

    #[test]
    fn test_offscreen_direction_dependent() {
        let mut state = test_state(5);
        let id = state.next_entity_id();
        let mut heart = Heart::spawn(id, &mut state.rng, state.bounds, 2.0, 0.0);
        heart.direction = 1.0;
        heart.pos.x = 849.0;
        assert!(!heart.is_offscreen(800.0));
        heart.pos.x = 851.0;
        assert!(heart.is_offscreen(800.0));
        // Rightward heart far left is NOT offscreen (it is inbound)
        heart.pos.x = -200.0;
        assert!(!heart.is_offscreen(800.0));
        heart.direction = -1.0;
        assert!(heart.is_offscreen(800.0));
    }

    #[test]
    fn test_marker_lifecycle() {
        let mut marker = ClickMarker::spawn(10.0, 20.0);
        assert!(!marker.is_expired());
        marker.advance(499.0);
        assert!(!marker.is_expired());
        marker.advance(2.0);
        assert!(marker.is_expired());
        assert_eq!(marker.fade(), 0.0);
    }

    #[test]
    fn test_end_reports_once() {
        let mut state = test_state(9);
        state.score = 150;
        let first = state.end();
        assert_eq!(
            first,
            Some(RunOutcome {
                score: 150,
                success: true
            })
        );
        assert_eq!(state.end(), None);
    }
}
