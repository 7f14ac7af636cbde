//! Pure drawing geometry
//!
//! Path and particle layouts with no backend types, so they stay testable
//! off the browser.

use glam::Vec2;

use crate::consts::{BURST_PARTICLE_COUNT, EXPLOSION_FADE_CUTOFF};

/// A path command in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Vec2),
    /// Cubic bezier segment
    BezierTo { c1: Vec2, c2: Vec2, to: Vec2 },
    Close,
}

pub type Path = Vec<PathCmd>;

/// Heart silhouette of the given size, centered on the origin: four cubic
/// bezier lobes meeting at the top notch and the bottom tip.
pub fn heart_path(size: f32) -> Path {
    let s = size;
    vec![
        PathCmd::MoveTo(Vec2::new(0.0, s * 0.25)),
        // Upper left lobe
        PathCmd::BezierTo {
            c1: Vec2::new(0.0, 0.0),
            c2: Vec2::new(-s * 0.5, 0.0),
            to: Vec2::new(-s * 0.5, s * 0.25),
        },
        // Lower left curve down to the tip
        PathCmd::BezierTo {
            c1: Vec2::new(-s * 0.5, s * 0.5),
            c2: Vec2::new(0.0, s * 0.7),
            to: Vec2::new(0.0, s),
        },
        // Lower right curve back up
        PathCmd::BezierTo {
            c1: Vec2::new(0.0, s * 0.7),
            c2: Vec2::new(s * 0.5, s * 0.5),
            to: Vec2::new(s * 0.5, s * 0.25),
        },
        // Upper right lobe
        PathCmd::BezierTo {
            c1: Vec2::new(s * 0.5, 0.0),
            c2: Vec2::new(0.0, 0.0),
            to: Vec2::new(0.0, s * 0.25),
        },
        PathCmd::Close,
    ]
}

/// One particle of the explosion burst
#[derive(Debug, Clone, Copy)]
pub struct BurstParticle {
    /// Offset from the heart center
    pub offset: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Radial burst layout for an exploding heart. Particles fly outward with
/// progress and fade to nothing as it reaches 1.
pub fn burst_particles(progress: f32, size: f32) -> Vec<BurstParticle> {
    let distance = progress * size * 3.0;
    let radius = size * 0.15;
    let alpha = (1.0 - progress).max(0.0);
    (0..BURST_PARTICLE_COUNT)
        .map(|i| {
            let angle = (i as f32 / BURST_PARTICLE_COUNT as f32) * std::f32::consts::TAU;
            BurstParticle {
                offset: Vec2::new(angle.cos(), angle.sin()) * distance,
                radius,
                alpha,
            }
        })
        .collect()
}

/// Whether the heart silhouette is still drawn at this explosion progress
pub fn silhouette_visible(progress: f32) -> bool {
    progress < EXPLOSION_FADE_CUTOFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_path_shape() {
        let path = heart_path(40.0);
        assert_eq!(path.len(), 6);
        assert!(matches!(path[0], PathCmd::MoveTo(_)));
        assert!(matches!(path[5], PathCmd::Close));
        let beziers = path
            .iter()
            .filter(|c| matches!(c, PathCmd::BezierTo { .. }))
            .count();
        assert_eq!(beziers, 4);
        // Last segment returns to the start point (top notch)
        let PathCmd::MoveTo(start) = path[0] else { panic!() };
        let PathCmd::BezierTo { to, .. } = path[4] else { panic!() };
        assert_eq!(start, to);
    }

    #[test]
    fn test_heart_path_symmetric() {
        let path = heart_path(50.0);
        let (PathCmd::BezierTo { to: left, .. }, PathCmd::BezierTo { to: right, .. }) =
            (path[1], path[3])
        else {
            panic!()
        };
        assert_eq!(left.x, -right.x);
        assert_eq!(left.y, right.y);
    }

    #[test]
    fn test_burst_layout() {
        let burst = burst_particles(0.5, 40.0);
        assert_eq!(burst.len(), 12);
        for p in &burst {
            assert!((p.offset.length() - 60.0).abs() < 0.001); // 0.5 * 40 * 3
            assert_eq!(p.radius, 6.0);
            assert_eq!(p.alpha, 0.5);
        }
    }

    #[test]
    fn test_burst_fades_out_fully() {
        let burst = burst_particles(1.0, 40.0);
        assert!(burst.iter().all(|p| p.alpha == 0.0));
    }

    #[test]
    fn test_silhouette_cutoff() {
        assert!(silhouette_visible(0.0));
        assert!(silhouette_visible(0.79));
        assert!(!silhouette_visible(0.8));
    }
}
