use std::env;
use std::str::FromStr;

use crate::simulation::ResizePolicy;

/// Edge length of one cell in physical pixels
pub const CELL_SIZE: u32 = 10;

/// Corner radius of a drawn cell
pub const CORNER_RADIUS: f32 = 2.0;

/// Chance that a cell starts alive
pub const ALIVE_PROBABILITY: f64 = 0.3;

// ============================================
// Palette (RGBA8)
// ============================================

/// 0-2 neighbors
pub const LIGHTEST_COLOR: [u8; 4] = [0x9b, 0xe9, 0xa8, 0xff];
/// 3-4 neighbors
pub const LIGHT_COLOR: [u8; 4] = [0x40, 0xc4, 0x63, 0xff];
/// 5-6 neighbors
pub const MEDIUM_COLOR: [u8; 4] = [0x30, 0xa1, 0x4e, 0xff];
/// 7-8 neighbors
pub const DARKEST_COLOR: [u8; 4] = [0x21, 0x6e, 0x39, 0xff];

/// Value written by a clear; the window background shows through
pub const TRANSPARENT: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

/// Window background behind the canvas
pub const BACKGROUND_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

// ============================================
// Window
// ============================================

pub const ACTIVE_TITLE: &str = "Conway's Game of Life";
pub const INACTIVE_TITLE: &str = "NOT ACTIVE";

/// Initial inner size of the window in logical pixels
pub const INITIAL_WINDOW_WIDTH: u32 = 1024;
pub const INITIAL_WINDOW_HEIGHT: u32 = 768;

// ============================================
// Runtime settings
// ============================================

pub const CELL_SIZE_VAR: &str = "LIFE_CELL_SIZE";
pub const RESIZE_POLICY_VAR: &str = "LIFE_RESIZE_POLICY";

/// Settings read once at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub cell_size: u32,
    pub resize_policy: ResizePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            resize_policy: ResizePolicy::default(),
        }
    }
}

impl Settings {
    /// Read settings from the environment, falling back to defaults for
    /// missing or invalid values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cell_size = parse_or(&lookup, CELL_SIZE_VAR, defaults.cell_size)
            .filter(|&size: &u32| size > 0)
            .unwrap_or_else(|| {
                log::warn!("{} must be a positive integer, using {}", CELL_SIZE_VAR, CELL_SIZE);
                defaults.cell_size
            });

        let resize_policy = parse_or(&lookup, RESIZE_POLICY_VAR, defaults.resize_policy)
            .unwrap_or_else(|| {
                log::warn!(
                    "{} must be `reseed` or `keep-first`, using default",
                    RESIZE_POLICY_VAR
                );
                defaults.resize_policy
            });

        Self {
            cell_size,
            resize_policy,
        }
    }
}

/// `Some(default)` when the variable is unset, `None` when it does not parse
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().ok(),
        None => Some(default),
    }
}
