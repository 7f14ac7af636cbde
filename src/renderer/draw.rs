//! Frame composition
//!
//! Draw order per frame: backdrop, hearts (glow + silhouette, or burst while
//! exploding), then click markers on top.

use glam::Vec2;

use super::shapes::{burst_particles, heart_path, silhouette_visible};
use super::surface::Surface;
use crate::sim::GameState;

const OUTLINE_COLOR: &str = "#FFFFFF";
const OUTLINE_WIDTH: f32 = 3.0;
const MARKER_COLOR: &str = "#FFF0F5";

/// Draw one frame of the run onto the surface
pub fn draw_frame(surface: &mut impl Surface, state: &GameState) {
    let (w, h) = (state.bounds.x, state.bounds.y);
    surface.clear(w, h);
    surface.draw_backdrop(w, h);

    for heart in &state.hearts {
        let path = heart_path(heart.size);
        surface.push();
        surface.translate(heart.pos.x, heart.pos.y);
        surface.rotate(heart.rotation);
        surface.scale(heart.pulse);

        if heart.exploding {
            let alpha = (1.0 - heart.explosion_progress).max(0.0);
            for particle in burst_particles(heart.explosion_progress, heart.size) {
                surface.set_alpha(particle.alpha);
                surface.fill_circle(particle.offset, particle.radius, heart.kind.color());
            }
            if silhouette_visible(heart.explosion_progress) {
                surface.set_alpha(alpha);
                surface.fill_path(&path, heart.kind.color());
                surface.stroke_path(&path, OUTLINE_COLOR, OUTLINE_WIDTH);
            }
        } else {
            surface.fill_radial_glow(
                Vec2::ZERO,
                heart.size * 0.5,
                heart.size * 1.5,
                heart.kind.glow_color(),
            );
            surface.fill_path(&path, heart.kind.color());
            surface.stroke_path(&path, OUTLINE_COLOR, OUTLINE_WIDTH);
        }
        surface.pop();
    }

    for marker in &state.markers {
        let fade = marker.fade();
        surface.push();
        surface.set_alpha(fade);
        // Ring widens as the mark fades
        let ring = 8.0 + (1.0 - fade) * 12.0;
        surface.stroke_circle(marker.pos, ring, MARKER_COLOR, 2.0);
        surface.fill_circle(marker.pos, 2.5, MARKER_COLOR);
        surface.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::handle_click;
    use crate::sim::{GameState, Heart, HeartKind};
    use crate::tuning;

    /// Records primitive calls so draw order can be asserted headlessly
    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _w: f32, _h: f32) {
            self.ops.push("clear".into());
        }
        fn draw_backdrop(&mut self, _w: f32, _h: f32) {
            self.ops.push("backdrop".into());
        }
        fn push(&mut self) {
            self.ops.push("push".into());
        }
        fn pop(&mut self) {
            self.ops.push("pop".into());
        }
        fn translate(&mut self, _x: f32, _y: f32) {
            self.ops.push("translate".into());
        }
        fn rotate(&mut self, _r: f32) {
            self.ops.push("rotate".into());
        }
        fn scale(&mut self, _f: f32) {
            self.ops.push("scale".into());
        }
        fn set_alpha(&mut self, _a: f32) {
            self.ops.push("alpha".into());
        }
        fn fill_path(&mut self, _p: &crate::renderer::shapes::Path, color: &str) {
            self.ops.push(format!("fill_path {}", color));
        }
        fn stroke_path(&mut self, _p: &crate::renderer::shapes::Path, _c: &str, _w: f32) {
            self.ops.push("stroke_path".into());
        }
        fn fill_circle(&mut self, _c: Vec2, _r: f32, _color: &str) {
            self.ops.push("fill_circle".into());
        }
        fn stroke_circle(&mut self, _c: Vec2, _r: f32, _color: &str, _w: f32) {
            self.ops.push("stroke_circle".into());
        }
        fn fill_radial_glow(&mut self, _c: Vec2, _i: f32, _o: f32, _color: &str) {
            self.ops.push("glow".into());
        }
    }

    fn state_with_heart() -> GameState {
        let config = tuning::level_config(1).unwrap();
        let mut state = GameState::new(1, &config, 1, glam::Vec2::new(800.0, 600.0), 0.0);
        state.start();
        let id = state.next_entity_id();
        state.hearts.push(Heart {
            id,
            pos: glam::Vec2::new(400.0, 300.0),
            direction: 1.0,
            size: 40.0,
            speed: 2.0,
            kind: HeartKind::Primary,
            rotation: 0.0,
            rotation_speed: 0.0,
            pulse: 1.0,
            exploding: false,
            explosion_progress: 0.0,
            scored: false,
        });
        state
    }

    #[test]
    fn test_frame_starts_with_clear_and_backdrop() {
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state_with_heart());
        assert_eq!(&surface.ops[..2], &["clear".to_string(), "backdrop".to_string()]);
    }

    #[test]
    fn test_live_heart_draws_glow_and_outline() {
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state_with_heart());
        assert!(surface.ops.contains(&"glow".to_string()));
        assert!(surface.ops.contains(&"fill_path #FF69B4".to_string()));
        assert!(surface.ops.contains(&"stroke_path".to_string()));
    }

    #[test]
    fn test_exploding_heart_skips_glow_draws_burst() {
        let mut state = state_with_heart();
        handle_click(&mut state, 400.0, 300.0, 0.0);
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state);
        assert!(!surface.ops.contains(&"glow".to_string()));
        let circles = surface.ops.iter().filter(|o| *o == "fill_circle").count();
        // 12 burst particles + the click marker's center dot
        assert_eq!(circles, 13);
    }

    #[test]
    fn test_silhouette_hidden_late_in_explosion() {
        let mut state = state_with_heart();
        handle_click(&mut state, 400.0, 300.0, 0.0);
        for _ in 0..11 {
            state.hearts[0].advance(0.0); // progress past the 0.8 cutoff
        }
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state);
        assert!(!surface.ops.iter().any(|o| o.starts_with("fill_path")));
    }
}
