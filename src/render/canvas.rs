use crate::config::TRANSPARENT;
use crate::render::palette::Rgba;

/// 2D drawing surface the presenter draws cells onto.
///
/// Mirrors a minimal immediate-mode path API: `begin_path` starts a new path,
/// `round_rect` adds a shape to it and `fill` paints the path with the
/// current fill color.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn set_fill_color(&mut self, color: Rgba);
    fn begin_path(&mut self);
    fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32);
    fn fill(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RoundRect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radius: f32,
}

impl RoundRect {
    /// Whether the point lies inside the rounded shape
    fn contains(&self, px: f32, py: f32) -> bool {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.width, self.y + self.height);
        if px < x0 || px > x1 || py < y0 || py > y1 {
            return false;
        }

        let r = self.radius.clamp(0.0, self.width.min(self.height) / 2.0);
        let dx = (x0 + r - px).max(px - (x1 - r)).max(0.0);
        let dy = (y0 + r - py).max(py - (y1 - r)).max(0.0);
        dx * dx + dy * dy <= r * r
    }
}

/// CPU RGBA8 canvas, uploaded to the GPU once per frame
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    fill_color: Rgba,
    path: Vec<RoundRect>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; width as usize * height as usize],
            fill_color: TRANSPARENT,
            path: Vec::new(),
        }
    }

    /// Reallocate for new dimensions; contents are cleared
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![TRANSPARENT; width as usize * height as usize];
        self.path.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major pixel data, tightly packed
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[allow(dead_code)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Pixel span covering `[start, start + len)`, clipped to `0..limit`
    fn span(start: f32, len: f32, limit: u32) -> std::ops::Range<u32> {
        let lo = (start.floor().max(0.0) as u32).min(limit);
        let hi = ((start + len).ceil().max(0.0) as u32).clamp(lo, limit);
        lo..hi
    }
}

impl Canvas for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let columns = Self::span(x, width, self.width);
        for row in Self::span(y, height, self.height) {
            let start = row as usize * self.width as usize;
            self.pixels[start + columns.start as usize..start + columns.end as usize]
                .fill(TRANSPARENT);
        }
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill_color = color;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32) {
        self.path.push(RoundRect {
            x,
            y,
            width,
            height,
            radius,
        });
    }

    fn fill(&mut self) {
        let stride = self.width as usize;
        for shape in &self.path {
            let columns = Self::span(shape.x, shape.width, self.width);
            for row in Self::span(shape.y, shape.height, self.height) {
                let cy = row as f32 + 0.5;
                for column in columns.clone() {
                    if shape.contains(column as f32 + 0.5, cy) {
                        self.pixels[row as usize * stride + column as usize] = self.fill_color;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [0xff, 0, 0, 0xff];
    const BLUE: Rgba = [0, 0, 0xff, 0xff];

    #[test]
    fn test_round_rect_leaves_corners_open() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.set_fill_color(RED);
        canvas.begin_path();
        canvas.round_rect(0.0, 0.0, 9.0, 9.0, 2.0);
        canvas.fill();

        assert_eq!(canvas.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(8, 8), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(0, 4), Some(RED));
        assert_eq!(canvas.pixel(4, 4), Some(RED));
        assert_eq!(canvas.pixel(8, 4), Some(RED));
        // One pixel gap between neighboring cells
        assert_eq!(canvas.pixel(9, 4), Some(TRANSPARENT));
    }

    #[test]
    fn test_fill_clips_to_bounds() {
        let mut canvas = PixelCanvas::new(5, 5);
        canvas.set_fill_color(RED);
        canvas.begin_path();
        canvas.round_rect(3.0, 3.0, 9.0, 9.0, 0.0);
        canvas.round_rect(-4.0, -4.0, 5.0, 5.0, 0.0);
        canvas.fill();

        assert_eq!(canvas.pixel(4, 4), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(5, 5), None);
    }

    #[test]
    fn test_begin_path_discards_previous_shapes() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.set_fill_color(RED);
        canvas.begin_path();
        canvas.round_rect(0.0, 0.0, 2.0, 2.0, 0.0);
        canvas.fill();

        canvas.set_fill_color(BLUE);
        canvas.begin_path();
        canvas.round_rect(5.0, 5.0, 2.0, 2.0, 0.0);
        canvas.fill();

        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(5, 5), Some(BLUE));
    }

    #[test]
    fn test_clear_rect_resets_pixels() {
        let mut canvas = PixelCanvas::new(6, 6);
        canvas.set_fill_color(RED);
        canvas.begin_path();
        canvas.round_rect(0.0, 0.0, 6.0, 6.0, 0.0);
        canvas.fill();

        canvas.clear_rect(0.0, 0.0, 3.0, 6.0);
        assert_eq!(canvas.pixel(2, 5), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(3, 5), Some(RED));
    }

    #[test]
    fn test_bytes_are_row_major_rgba() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.set_fill_color(RED);
        canvas.begin_path();
        canvas.round_rect(1.0, 0.0, 1.0, 1.0, 0.0);
        canvas.fill();

        let bytes = canvas.as_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &RED);
        assert_eq!(&bytes[0..4], &TRANSPARENT);
    }

    #[test]
    fn test_zero_sized_canvas() {
        let mut canvas = PixelCanvas::new(0, 0);
        assert!(canvas.is_empty());
        canvas.clear_rect(0.0, 0.0, 10.0, 10.0);
        canvas.begin_path();
        canvas.round_rect(0.0, 0.0, 9.0, 9.0, 2.0);
        canvas.fill();
        assert_eq!(canvas.pixel(0, 0), None);
    }
}
