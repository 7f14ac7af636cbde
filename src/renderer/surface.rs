//! Render target abstraction
//!
//! The primitive operations the game draws with. Backends only need these;
//! colors are CSS color strings since every target this game cares about
//! speaks them.

use glam::Vec2;

use super::shapes::Path;

pub trait Surface {
    /// Clear the full target region
    fn clear(&mut self, width: f32, height: f32);
    /// Fill the background layer (image, veil, or gradient fallback)
    fn draw_backdrop(&mut self, width: f32, height: f32);

    /// Save the current transform + opacity state
    fn push(&mut self);
    /// Restore the last pushed state
    fn pop(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    /// Uniform scale
    fn scale(&mut self, factor: f32);
    fn set_alpha(&mut self, alpha: f32);

    fn fill_path(&mut self, path: &Path, color: &str);
    fn stroke_path(&mut self, path: &Path, color: &str, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, width: f32);
    /// Radial gradient from `color` at `inner_radius` to transparent at
    /// `outer_radius`
    fn fill_radial_glow(&mut self, center: Vec2, inner_radius: f32, outer_radius: f32, color: &str);
}
