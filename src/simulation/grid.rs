use rand::Rng;

use crate::config::ALIVE_PROBABILITY;

/// Toroidal grid of live/dead cells.
///
/// Cells are stored column-major: `grid[x][y]` lives at `x * height + y`, so
/// every column holds exactly `height` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create a grid where each cell is independently alive with probability
    /// `ALIVE_PROBABILITY`
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let dead_threshold = 1.0 - ALIVE_PROBABILITY;
        let cells = (0..width * height)
            .map(|_| rng.gen::<f64>() > dead_threshold)
            .collect();

        Self {
            width,
            height,
            cells,
        }
    }

    /// Create a grid with the given cells alive. Coordinates wrap.
    #[allow(dead_code)]
    pub fn from_live_cells(
        width: usize,
        height: usize,
        live: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut grid = Self::new(width, height);
        for (x, y) in live {
            grid.set(x, y, true);
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// State of the cell at `(x, y)`, coordinates taken modulo the dimensions
    pub fn is_alive(&self, x: isize, y: isize) -> bool {
        match self.index(x, y) {
            Some(index) => self.cells[index],
            None => false,
        }
    }

    /// Set the cell at `(x, y)`, coordinates taken modulo the dimensions.
    /// No-op on an empty grid.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if let Some(index) = self.index(x as isize, y as isize) {
            self.cells[index] = alive;
        }
    }

    /// Iterate over the coordinates of every live cell, column by column
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(move |(index, _)| (index / height, index % height))
    }

    /// Count live cells among the 8 wrapped neighbors of `(x, y)`.
    ///
    /// On grids narrower than 3 cells the wrapped offsets land on the same
    /// cells more than once and every landing is counted; on a 1x1 grid the
    /// cell is its own neighbor 8 times.
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        if self.is_empty() {
            return 0;
        }

        let mut count = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.is_alive(x as isize + dx, y as isize + dy) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Compute the next generation under B3/S23.
    ///
    /// Every count is taken against `self`; the result is written into a new
    /// grid of the same dimensions.
    pub fn next_generation(&self) -> Grid {
        let mut next = Grid::new(self.width, self.height);

        for x in 0..self.width {
            for y in 0..self.height {
                let neighbors = self.count_neighbors(x, y);
                let alive = self.cells[x * self.height + y];
                next.cells[x * self.height + y] = if alive {
                    neighbors == 2 || neighbors == 3
                } else {
                    neighbors == 3
                };
            }
        }

        next
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let x = x.rem_euclid(self.width as isize) as usize;
        let y = y.rem_euclid(self.height as isize) as usize;
        Some(x * self.height + y)
    }
}
