//! Canvas 2D backend
//!
//! Implements the surface primitives on a browser `CanvasRenderingContext2d`.
//! The backdrop is the loaded background image under a dark veil, or a
//! vertical gradient until the image arrives.

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::shapes::{Path, PathCmd};
use super::surface::Surface;

const VEIL_COLOR: &str = "rgba(0, 0, 0, 0.3)";
const SKY_TOP: &str = "#1a2980";
const SKY_BOTTOM: &str = "#26d0ce";

pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    backdrop: Option<HtmlImageElement>,
}

impl Canvas2dSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            backdrop: None,
        }
    }

    /// Background image; drawn once `complete` reports it decoded
    pub fn set_backdrop(&mut self, image: HtmlImageElement) {
        self.backdrop = Some(image);
    }

    fn trace(&self, path: &Path) {
        self.ctx.begin_path();
        for cmd in path {
            match *cmd {
                PathCmd::MoveTo(p) => self.ctx.move_to(p.x as f64, p.y as f64),
                PathCmd::BezierTo { c1, c2, to } => self.ctx.bezier_curve_to(
                    c1.x as f64,
                    c1.y as f64,
                    c2.x as f64,
                    c2.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
                PathCmd::Close => self.ctx.close_path(),
            }
        }
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_backdrop(&mut self, width: f32, height: f32) {
        let (w, h) = (width as f64, height as f64);
        let loaded = self.backdrop.as_ref().filter(|img| img.complete());
        if let Some(img) = loaded {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w, h)
                .ok();
            // Dark veil keeps the hearts readable over the image
            self.ctx.set_fill_style_str(VEIL_COLOR);
            self.ctx.fill_rect(0.0, 0.0, w, h);
        } else {
            let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
            gradient.add_color_stop(0.0, SKY_TOP).ok();
            gradient.add_color_stop(1.0, SKY_BOTTOM).ok();
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.fill_rect(0.0, 0.0, w, h);
        }
    }

    fn push(&mut self) {
        self.ctx.save();
    }

    fn pop(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.ctx.translate(x as f64, y as f64).ok();
    }

    fn rotate(&mut self, radians: f32) {
        self.ctx.rotate(radians as f64).ok();
    }

    fn scale(&mut self, factor: f32) {
        self.ctx.scale(factor as f64, factor as f64).ok();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn fill_path(&mut self, path: &Path, color: &str) {
        self.trace(path);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_path(&mut self, path: &Path, color: &str, width: f32) {
        self.trace(path);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, width: f32) {
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_radial_glow(&mut self, center: Vec2, inner_radius: f32, outer_radius: f32, color: &str) {
        let (cx, cy) = (center.x as f64, center.y as f64);
        let Ok(gradient) = self.ctx.create_radial_gradient(
            cx,
            cy,
            inner_radius as f64,
            cx,
            cy,
            outer_radius as f64,
        ) else {
            return;
        };
        gradient.add_color_stop(0.0, color).ok();
        gradient.add_color_stop(1.0, "transparent").ok();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        self.ctx
            .arc(cx, cy, outer_radius as f64, 0.0, std::f64::consts::TAU)
            .ok();
        self.ctx.fill();
    }
}
