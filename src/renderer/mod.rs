//! Rendering split in two: pure geometry + draw ordering here, and a
//! backend implementing the `Surface` primitives. The simulation never sees
//! a concrete backend.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod draw;
pub mod shapes;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dSurface;
pub use draw::draw_frame;
pub use surface::Surface;
