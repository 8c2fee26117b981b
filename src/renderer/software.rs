//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills an owned `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Every frame starts with a full ceiling/floor fill, so no pixel of the
//!   previous frame survives.
//! ---------------------------------------------------------------------------

use crate::{
    engine::{Background, ColumnStrip},
    renderer::Renderer,
    world::{Rgb, TextureAtlas, shade},
};

/*───────────────────────────────────────────────────────────────────────*/
/*                             Frame buffer                              */
/*───────────────────────────────────────────────────────────────────────*/

/// `width × height` packed RGB pixels, row-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, `None` outside the frame.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Write one pixel; out-of-frame coordinates are ignored.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, colour: Rgb) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.pixels[y as usize * self.width + x as usize] = colour;
        }
    }

    fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height, 0);
        }
    }

    /// Ceiling over the upper half, floor over the lower half.
    fn fill_background(&mut self, bg: &Background) {
        let split = (self.height / 2) * self.width;
        let (ceil, floor) = self.pixels.split_at_mut(split);
        ceil.fill(bg.ceiling);
        floor.fill(bg.floor);
    }
}

/*───────────────────────────────────────────────────────────────────────*/
/*                               Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// CPU ray-cast column renderer.
#[derive(Default)]
pub struct Software {
    frame: FrameBuffer,
}

impl Software {
    /// The buffer as it stands (complete after `end_frame`).
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn into_frame(self) -> FrameBuffer {
        self.frame
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize, background: &Background) {
        // (re)allocate if resolution changed
        self.frame.resize(w, h);
        self.frame.fill_background(background);
    }

    fn draw_strip(&mut self, x_start: usize, x_end: usize, strip: &ColumnStrip, atlas: &TextureAtlas) {
        let (w, h) = (self.frame.width, self.frame.height);
        let x_end = x_end.min(w);
        if x_start >= x_end || strip.height <= 0.0 {
            return;
        }

        /* clip to integer pixel rows */
        let y0 = strip.top.round().max(0.0) as usize;
        let y1 = ((strip.top + strip.height).round().max(0.0) as usize).min(h);

        for y in y0..y1 {
            // sample at the pixel centre
            let v = strip.tex_y_start + (y as f32 + 0.5 - strip.top) * strip.tex_y_step;
            let texel = atlas.sample(strip.tile, strip.tex_x, v.floor() as i32);
            let colour = shade(texel, strip.shade);
            let row = y * w;
            self.frame.pixels[row + x_start..row + x_end].fill(colour);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, colour: Rgb) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.frame.width as i32);
        let y1 = y.saturating_add(h).min(self.frame.height as i32);
        if x0 >= x1 {
            return;
        }
        for yy in y0..y1 {
            let row = yy as usize * self.frame.width;
            self.frame.pixels[row + x0 as usize..row + x1 as usize].fill(colour);
        }
    }

    /// Integer Bresenham line-drawing algorithm.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: Rgb) {
        let mut x0 = x0;
        let mut y0 = y0;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.frame.put(x0, y0, col);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgb], usize, usize),
    {
        submit(&self.frame.pixels, self.frame.width, self.frame.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::rgb;

    const BLUE: Rgb = 0x00_0000FF;

    /* tiny helpers ---------------------------------------------------*/
    fn blue_atlas() -> TextureAtlas {
        let mut atlas = TextureAtlas::new(4, 4).unwrap();
        atlas.push(&[BLUE; 16]).unwrap();
        atlas
    }

    fn blue_strip() -> ColumnStrip {
        ColumnStrip {
            height: 4.0,
            full_height: 4.0,
            top: 2.0,
            tile: 1,
            tex_x: 0,
            tex_y_start: 0.0,
            tex_y_step: 1.0,
            shade: 1.0,
        }
    }

    fn bg() -> Background {
        Background {
            ceiling: rgb(10, 10, 10),
            floor: rgb(90, 90, 90),
        }
    }

    #[test]
    fn background_covers_every_pixel() {
        let mut sw = Software::default();
        sw.begin_frame(4, 6, &bg());
        let fb = sw.frame();
        for y in 0..6 {
            let want = if y < 3 { bg().ceiling } else { bg().floor };
            assert!((0..4).all(|x| fb.pixel(x, y) == Some(want)));
        }
    }

    #[test]
    fn strip_paints_only_its_rows_and_columns() {
        let mut sw = Software::default();
        sw.begin_frame(8, 8, &bg());
        sw.draw_strip(1, 3, &blue_strip(), &blue_atlas());
        let fb = sw.frame();

        for y in 0..8 {
            for x in 0..8 {
                let inside = (1..3).contains(&x) && (2..6).contains(&y);
                assert_eq!(fb.pixel(x, y) == Some(BLUE), inside, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn strip_is_shaded_and_clipped() {
        let mut sw = Software::default();
        sw.begin_frame(4, 4, &bg());
        let strip = ColumnStrip {
            top: -10.0,
            height: 100.0,
            shade: 0.5,
            ..blue_strip()
        };
        sw.draw_strip(2, 99, &strip, &blue_atlas());
        assert_eq!(sw.frame().pixel(3, 3), Some(0x00_00007F));
        assert_eq!(sw.frame().pixel(3, 0), Some(0x00_00007F));
        assert_eq!(sw.frame().pixel(1, 0), Some(bg().ceiling));
    }

    #[test]
    fn new_frame_forgets_old_pixels() {
        let mut sw = Software::default();
        sw.begin_frame(8, 8, &bg());
        sw.draw_strip(0, 8, &blue_strip(), &blue_atlas());
        sw.begin_frame(8, 8, &bg());
        assert!(!sw.frame().pixels().contains(&BLUE));
    }

    #[test]
    fn end_frame_loans_whole_buffer() {
        let mut sw = Software::default();
        sw.begin_frame(5, 3, &bg());
        let mut seen = None;
        sw.end_frame(|px, w, h| seen = Some((px.len(), w, h)));
        assert_eq!(seen, Some((15, 5, 3)));
    }

    #[test]
    fn primitives_clip_to_frame() {
        let mut sw = Software::default();
        sw.begin_frame(6, 6, &bg());
        sw.fill_rect(-2, -2, 4, 4, BLUE);
        assert_eq!(sw.frame().pixel(1, 1), Some(BLUE));
        assert_eq!(sw.frame().pixel(2, 2), Some(bg().ceiling));

        sw.draw_line(-5, 5, 20, 5, 0x00_FF0000);
        assert!((0..6).all(|x| sw.frame().pixel(x, 5) == Some(0x00_FF0000)));
        sw.draw_line(0, 0, 5, 5, 0x00_00FF00);
        assert_eq!(sw.frame().pixel(3, 3), Some(0x00_00FF00));
    }
}
