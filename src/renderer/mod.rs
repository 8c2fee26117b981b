//! Rendering abstraction layer.
//!
//! *The ray-casting engine never touches a pixel buffer directly.*
//! It hands projected [`ColumnStrip`]s (plus a few 2-D primitives for the
//! minimap overlay) to a type that implements [`Renderer`].
//!
//! * Back-ends can be swapped without changing the caster.
//! * The finished frame is **loaned** to a presentation closure once per
//!   frame; nothing else ever sees the scratch buffer.

use crate::{
    engine::{Background, ColumnStrip},
    world::{Rgb, TextureAtlas},
};

/// A renderer that owns an internal scratch buffer for the whole frame.
pub trait Renderer {
    /// (Re)allocate scratch for the requested resolution and paint the
    /// ceiling/floor background over every pixel.
    fn begin_frame(&mut self, width: usize, height: usize, background: &Background);

    /// Paint `strip` into every pixel column of `x_start .. x_end`.
    fn draw_strip(&mut self, x_start: usize, x_end: usize, strip: &ColumnStrip, atlas: &TextureAtlas);

    /// Solid axis-aligned rectangle, clipped to the frame.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Rgb);

    /// One-pixel line, clipped to the frame.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colour: Rgb);

    /// Finish the frame and loan the buffer to `submit(&pixels, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgb], usize, usize);
}

pub mod minimap;
pub mod software;

pub use minimap::{MinimapLayout, draw_minimap};
pub use software::{FrameBuffer, Software};
