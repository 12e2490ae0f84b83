use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Settings;
use crate::render::{self, Canvas};
use crate::simulation::Grid;

/// What a viewport resize does to an existing grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Rebuild the grid with fresh random cells whenever the dimensions change
    #[default]
    Reseed,
    /// Build the grid on the first resize only; later resizes update the
    /// recorded dimensions and leave the grid at its original size
    KeepFirst,
}

impl FromStr for ResizePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reseed" => Ok(ResizePolicy::Reseed),
            "keep-first" => Ok(ResizePolicy::KeepFirst),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown resize policy `{0}`")]
pub struct ParsePolicyError(String);

impl fmt::Display for ResizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizePolicy::Reseed => f.write_str("reseed"),
            ResizePolicy::KeepFirst => f.write_str("keep-first"),
        }
    }
}

/// Everything the simulation needs between frames: recorded dimensions, the
/// current generation and the visibility flag.
pub struct SimulationContext {
    cell_size: u32,
    width: usize,
    height: usize,
    grid: Option<Grid>,
    generation: u64,
    visible: bool,
    policy: ResizePolicy,
    rng: StdRng,
}

impl SimulationContext {
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    pub fn with_rng(settings: Settings, rng: StdRng) -> Self {
        Self {
            cell_size: settings.cell_size.max(1),
            width: 0,
            height: 0,
            grid: None,
            generation: 0,
            visible: true,
            policy: settings.resize_policy,
            rng,
        }
    }

    /// Recorded grid dimensions in cells
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Drawing surface size in pixels for the recorded dimensions
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.width as u32 * self.cell_size,
            self.height as u32 * self.cell_size,
        )
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Record new viewport dimensions and apply the resize policy.
    ///
    /// Returns true if the grid was (re)built.
    pub fn resize(&mut self, viewport_width: u32, viewport_height: u32) -> bool {
        let width = (viewport_width / self.cell_size) as usize;
        let height = (viewport_height / self.cell_size) as usize;
        let changed = (width, height) != (self.width, self.height);
        self.width = width;
        self.height = height;

        let rebuild = match (&self.grid, self.policy) {
            (None, _) => true,
            (Some(_), ResizePolicy::Reseed) => changed,
            (Some(_), ResizePolicy::KeepFirst) => false,
        };

        if rebuild {
            log::info!(
                "Building {}x{} grid for {}x{} viewport",
                width,
                height,
                viewport_width,
                viewport_height
            );
            self.reset();
        } else if changed {
            log::debug!("Recorded grid dimensions now {}x{}", width, height);
        }
        rebuild
    }

    /// Replace the grid with a fresh random one at the recorded dimensions
    pub fn reset(&mut self) {
        let grid = Grid::random(self.width, self.height, &mut self.rng);
        log::debug!("Seeded grid with {} live cells", grid.population());
        self.grid = Some(grid);
        self.generation = 0;
    }

    /// Advance one generation. No-op before the first resize.
    pub fn tick(&mut self) {
        if let Some(grid) = &mut self.grid {
            *grid = grid.next_generation();
            self.generation += 1;
            log::trace!("Generation {}: {} alive", self.generation, grid.population());
        }
    }

    /// Draw the current generation. No-op before the first resize.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        if let Some(grid) = &self.grid {
            render::draw(grid, canvas, self.cell_size);
        }
    }

    /// Returns true if the visibility changed
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PixelCanvas;

    fn context(policy: ResizePolicy) -> SimulationContext {
        let settings = Settings {
            cell_size: 10,
            resize_policy: policy,
        };
        SimulationContext::with_rng(settings, StdRng::seed_from_u64(11))
    }

    fn grid_shape(ctx: &SimulationContext) -> Option<(usize, usize)> {
        ctx.grid().map(|grid| (grid.width(), grid.height()))
    }

    #[test]
    fn test_first_resize_builds_grid() {
        let mut ctx = context(ResizePolicy::Reseed);
        assert!(ctx.grid().is_none());

        assert!(ctx.resize(805, 599));
        assert_eq!(ctx.dimensions(), (80, 59));
        assert_eq!(grid_shape(&ctx), Some((80, 59)));
        assert_eq!(ctx.canvas_size(), (800, 590));
    }

    #[test]
    fn test_reseed_policy_follows_resizes() {
        let mut ctx = context(ResizePolicy::Reseed);
        ctx.resize(400, 300);
        assert!(ctx.resize(640, 480));
        assert_eq!(ctx.dimensions(), (64, 48));
        assert_eq!(grid_shape(&ctx), Some((64, 48)));

        // Same cell dimensions keep the current grid
        let before = ctx.grid().cloned();
        assert!(!ctx.resize(645, 489));
        assert_eq!(ctx.grid().cloned(), before);
    }

    #[test]
    fn test_keep_first_policy_keeps_original_grid() {
        let mut ctx = context(ResizePolicy::KeepFirst);
        assert!(ctx.resize(400, 300));
        assert!(!ctx.resize(640, 480));

        assert_eq!(ctx.dimensions(), (64, 48));
        assert_eq!(grid_shape(&ctx), Some((40, 30)));
    }

    #[test]
    fn test_keep_first_draws_stale_grid_safely() {
        let mut ctx = context(ResizePolicy::KeepFirst);
        ctx.resize(400, 300);
        ctx.resize(100, 100);

        let (w, h) = ctx.canvas_size();
        let mut canvas = PixelCanvas::new(w, h);
        ctx.tick();
        ctx.draw(&mut canvas);
        assert_eq!(canvas.width(), 100);
    }

    #[test]
    fn test_tick_advances_generation() {
        let mut ctx = context(ResizePolicy::Reseed);
        ctx.tick();
        assert_eq!(ctx.generation(), 0);

        ctx.resize(100, 100);
        let expected = ctx.grid().map(Grid::next_generation);
        ctx.tick();
        assert_eq!(ctx.generation(), 1);
        assert_eq!(ctx.grid().cloned(), expected);
    }

    #[test]
    fn test_zero_viewport_is_noop() {
        let mut ctx = context(ResizePolicy::Reseed);
        ctx.resize(5, 300);
        assert_eq!(grid_shape(&ctx), Some((0, 30)));

        ctx.tick();
        let mut canvas = PixelCanvas::new(0, 300);
        ctx.draw(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_reset_restarts_generation() {
        let mut ctx = context(ResizePolicy::Reseed);
        ctx.resize(200, 200);
        ctx.tick();
        ctx.tick();
        ctx.reset();
        assert_eq!(ctx.generation(), 0);
        assert_eq!(grid_shape(&ctx), Some((20, 20)));
    }

    #[test]
    fn test_visibility_changes() {
        let mut ctx = context(ResizePolicy::Reseed);
        assert!(ctx.is_visible());
        assert!(!ctx.set_visible(true));
        assert!(ctx.set_visible(false));
        assert!(!ctx.is_visible());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("reseed".parse::<ResizePolicy>().ok(), Some(ResizePolicy::Reseed));
        assert_eq!(
            "keep-first".parse::<ResizePolicy>().ok(),
            Some(ResizePolicy::KeepFirst)
        );
        assert!("grow".parse::<ResizePolicy>().is_err());
        assert_eq!(ResizePolicy::KeepFirst.to_string(), "keep-first");
    }
}
