//! Vector rendering module
//!
//! Everything on screen is line art. The game draws through the [`Renderer`]
//! trait; [`draw_scene`] walks a session and issues the draw calls.

pub mod ascii;
pub mod scene;

use glam::Vec2;

pub use ascii::AsciiCanvas;
pub use scene::draw_scene;

/// Host drawing surface in screen pixels (origin top-left, y down)
pub trait Renderer {
    fn clear(&mut self);
    /// Connected line segments; `closed` joins the last point back to the first
    fn draw_polyline(&mut self, points: &[Vec2], closed: bool);
    fn draw_circle(&mut self, center: Vec2, radius: f32);
    fn draw_text(&mut self, pos: Vec2, text: &str, scale: f32);
    /// Text centered horizontally at height `y`
    fn draw_centered_text(&mut self, y: f32, text: &str, scale: f32);
}
