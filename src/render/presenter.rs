use crate::config::CORNER_RADIUS;
use crate::render::canvas::Canvas;
use crate::render::palette::color_for;
use crate::simulation::Grid;

/// Clear the canvas and paint every live cell as a rounded square colored by
/// its neighbor count. Dead cells are left as background.
pub fn draw<C: Canvas + ?Sized>(grid: &Grid, canvas: &mut C, cell_size: u32) {
    canvas.clear_rect(0.0, 0.0, canvas.width() as f32, canvas.height() as f32);

    let cell = cell_size as f32;
    let side = (cell - 1.0).max(0.0);
    for (x, y) in grid.live_cells() {
        let neighbors = grid.count_neighbors(x, y);
        canvas.set_fill_color(color_for(neighbors));
        canvas.begin_path();
        canvas.round_rect(x as f32 * cell, y as f32 * cell, side, side, CORNER_RADIUS);
        canvas.fill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LIGHTEST_COLOR, LIGHT_COLOR, TRANSPARENT};
    use crate::render::canvas::PixelCanvas;
    use crate::render::palette::Rgba;

    /// Records every call so tests can check the draw sequence
    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn width(&self) -> u32 {
            40
        }

        fn height(&self) -> u32 {
            30
        }

        fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
            self.calls.push(format!("clear {} {} {} {}", x, y, width, height));
        }

        fn set_fill_color(&mut self, color: Rgba) {
            self.calls.push(format!("fill_color {:?}", color));
        }

        fn begin_path(&mut self) {
            self.calls.push("begin".to_string());
        }

        fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32) {
            self.calls
                .push(format!("round_rect {} {} {} {} {}", x, y, width, height, radius));
        }

        fn fill(&mut self) {
            self.calls.push("fill".to_string());
        }
    }

    #[test]
    fn test_draw_call_sequence() {
        let grid = Grid::from_live_cells(4, 3, [(2, 1)]);
        let mut canvas = RecordingCanvas::default();
        draw(&grid, &mut canvas, 10);

        assert_eq!(
            canvas.calls,
            vec![
                "clear 0 0 40 30".to_string(),
                format!("fill_color {:?}", LIGHTEST_COLOR),
                "begin".to_string(),
                "round_rect 20 10 9 9 2".to_string(),
                "fill".to_string(),
            ]
        );
    }

    #[test]
    fn test_dead_cells_not_drawn() {
        let grid = Grid::new(4, 3);
        let mut canvas = RecordingCanvas::default();
        draw(&grid, &mut canvas, 10);
        assert_eq!(canvas.calls.len(), 1);
    }

    #[test]
    fn test_color_uses_neighbor_count() {
        // Every cell of a block sees 3 neighbors
        let block = Grid::from_live_cells(6, 6, [(1, 1), (2, 1), (1, 2), (2, 2)]);
        let mut canvas = PixelCanvas::new(60, 60);
        draw(&block, &mut canvas, 10);

        assert_eq!(canvas.pixel(15, 15), Some(LIGHT_COLOR));
        assert_eq!(canvas.pixel(25, 25), Some(LIGHT_COLOR));
        assert_eq!(canvas.pixel(5, 5), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(45, 45), Some(TRANSPARENT));
    }

    #[test]
    fn test_draw_clears_previous_frame() {
        let mut canvas = PixelCanvas::new(30, 30);
        draw(&Grid::from_live_cells(3, 3, [(0, 0)]), &mut canvas, 10);
        assert_eq!(canvas.pixel(4, 4), Some(LIGHTEST_COLOR));

        draw(&Grid::new(3, 3), &mut canvas, 10);
        assert_eq!(canvas.pixel(4, 4), Some(TRANSPARENT));
    }
}
