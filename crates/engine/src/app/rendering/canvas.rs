use super::font::{glyph_rows, TextStyle, GLYPH_WIDTH};

pub type Rgba = [u8; 4];

/// Drawing primitives a simulation renders its state with.
pub trait Canvas {
    fn size(&self) -> (u32, u32);
    fn fill_rect(&mut self, color: Rgba, x: i32, y: i32, width: i32, height: i32);
    fn fill_ellipse(&mut self, color: Rgba, x: i32, y: i32, width: i32, height: i32);
    fn draw_text(&mut self, text: &str, style: TextStyle, color: Rgba, x: i32, y: i32);
}

/// CPU-side RGBA8 surface. Every primitive is clipped to the buffer bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let offset = self.byte_offset(x as i32, y as i32)?;
        let mut color = [0; 4];
        color.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(color)
    }

    pub fn clear(&mut self, color: Rgba) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    /// Copies into a frame of identical size; mismatched targets are left untouched.
    pub fn copy_into(&self, target: &mut [u8]) -> bool {
        if target.len() != self.pixels.len() {
            return false;
        }
        target.copy_from_slice(&self.pixels);
        true
    }

    fn byte_offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let pixel_offset = (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?;
        let byte_offset = pixel_offset.checked_mul(4)?;
        (byte_offset + 4 <= self.pixels.len()).then_some(byte_offset)
    }

    fn write_pixel_clipped(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(offset) = self.byte_offset(x, y) {
            self.pixels[offset..offset + 4].copy_from_slice(&color);
        }
    }

    fn clipped_span(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Option<(i32, i32, i32, i32)> {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = x.saturating_add(width).min(self.width as i32);
        let end_y = y.saturating_add(height).min(self.height as i32);
        if end_x <= start_x || end_y <= start_y {
            return None;
        }
        Some((start_x, start_y, end_x, end_y))
    }
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, color: Rgba, x: i32, y: i32, width: i32, height: i32) {
        let Some((start_x, start_y, end_x, end_y)) = self.clipped_span(x, y, width, height) else {
            return;
        };
        for py in start_y..end_y {
            for px in start_x..end_x {
                self.write_pixel_clipped(px, py, color);
            }
        }
    }

    fn fill_ellipse(&mut self, color: Rgba, x: i32, y: i32, width: i32, height: i32) {
        let Some((start_x, start_y, end_x, end_y)) = self.clipped_span(x, y, width, height) else {
            return;
        };
        // Doubled coordinates keep the pixel-centre test in integers.
        let w = i64::from(width);
        let h = i64::from(height);
        let center_x2 = 2 * i64::from(x) + w;
        let center_y2 = 2 * i64::from(y) + h;
        let limit = w * w * h * h;
        for py in start_y..end_y {
            let dy = 2 * i64::from(py) + 1 - center_y2;
            for px in start_x..end_x {
                let dx = 2 * i64::from(px) + 1 - center_x2;
                if dx * dx * h * h + dy * dy * w * w <= limit {
                    self.write_pixel_clipped(px, py, color);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, style: TextStyle, color: Rgba, x: i32, y: i32) {
        let scale = style.effective_scale();
        let mut pen_x = x;
        for ch in text.chars() {
            for (row_index, row_bits) in glyph_rows(ch).iter().enumerate() {
                let glyph_y = y + row_index as i32 * scale;
                for col in 0..GLYPH_WIDTH {
                    if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                        continue;
                    }
                    self.fill_rect(color, pen_x + col * scale, glyph_y, scale, scale);
                }
            }
            pen_x += style.glyph_advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const CLEAR: Rgba = [0, 0, 0, 0];

    fn painted_count(frame: &FrameBuffer, color: Rgba) -> usize {
        frame
            .as_bytes()
            .chunks_exact(4)
            .filter(|chunk| *chunk == color)
            .count()
    }

    #[test]
    fn fill_rect_covers_exact_area() {
        let mut frame = FrameBuffer::new(10, 10);
        frame.fill_rect(RED, 2, 3, 4, 2);

        assert_eq!(painted_count(&frame, RED), 8);
        assert_eq!(frame.pixel(2, 3), Some(RED));
        assert_eq!(frame.pixel(5, 4), Some(RED));
        assert_eq!(frame.pixel(6, 4), Some(CLEAR));
        assert_eq!(frame.pixel(2, 5), Some(CLEAR));
    }

    #[test]
    fn fill_rect_is_clipped_at_every_edge() {
        let mut frame = FrameBuffer::new(8, 6);
        frame.fill_rect(RED, -5, -5, 100, 100);

        assert_eq!(painted_count(&frame, RED), 48);
    }

    #[test]
    fn fully_offscreen_primitives_draw_nothing() {
        let mut frame = FrameBuffer::new(8, 6);
        frame.fill_rect(RED, 20, 0, 5, 5);
        frame.fill_ellipse(RED, -30, -30, 20, 20);
        frame.draw_text("AI", TextStyle::default(), RED, 100, 100);

        assert_eq!(painted_count(&frame, RED), 0);
    }

    #[test]
    fn ellipse_stays_inside_bounding_box_and_fills_centre() {
        let mut frame = FrameBuffer::new(40, 40);
        frame.fill_ellipse(RED, 10, 10, 20, 20);

        assert_eq!(frame.pixel(20, 20), Some(RED));
        assert_eq!(frame.pixel(10, 10), Some(CLEAR));
        assert_eq!(frame.pixel(29, 29), Some(CLEAR));
        assert_eq!(frame.pixel(9, 20), Some(CLEAR));
        assert_eq!(frame.pixel(30, 20), Some(CLEAR));
        let painted = painted_count(&frame, RED);
        assert!(painted > 280 && painted < 400, "painted {painted}");
    }

    #[test]
    fn text_draws_glyph_pixels_at_scale() {
        let mut frame = FrameBuffer::new(20, 20);
        frame.draw_text("-", TextStyle::scaled(2), RED, 0, 0);

        // '-' is a single full middle row.
        assert_eq!(painted_count(&frame, RED), 3 * 2 * 2);
        assert_eq!(frame.pixel(0, 4), Some(RED));
        assert_eq!(frame.pixel(5, 5), Some(RED));
        assert_eq!(frame.pixel(0, 0), Some(CLEAR));
    }

    #[test]
    fn text_with_negative_origin_is_safe() {
        let mut frame = FrameBuffer::new(4, 4);
        frame.draw_text("Player: 10", TextStyle::default(), RED, -7, -9);
        frame.draw_text("~~~", TextStyle::scaled(9), RED, 3, 3);
    }

    #[test]
    fn zero_sized_buffer_never_panics() {
        let mut frame = FrameBuffer::new(0, 0);
        frame.clear(RED);
        frame.fill_rect(RED, 0, 0, 5, 5);
        frame.fill_ellipse(RED, 0, 0, 5, 5);
        frame.draw_text("x", TextStyle::default(), RED, 0, 0);

        assert!(frame.as_bytes().is_empty());
        assert_eq!(frame.pixel(0, 0), None);
    }

    #[test]
    fn copy_into_requires_matching_size() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.clear(RED);

        let mut exact = vec![0; 16];
        assert!(frame.copy_into(&mut exact));
        assert_eq!(&exact[..4], &RED);

        let mut short = vec![0; 8];
        assert!(!frame.copy_into(&mut short));
        assert!(short.iter().all(|byte| *byte == 0));
    }
}
