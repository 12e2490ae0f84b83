use crate::config::{DARKEST_COLOR, LIGHTEST_COLOR, LIGHT_COLOR, MEDIUM_COLOR};

/// RGBA8 color, as stored in the canvas pixel buffer
pub type Rgba = [u8; 4];

/// Density band of a live cell, ordered from lightest to darkest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Band {
    /// 0-2 neighbors
    Lightest,
    /// 3-4 neighbors
    Light,
    /// 5-6 neighbors
    Medium,
    /// 7-8 neighbors
    Darkest,
}

impl Band {
    pub fn for_neighbors(neighbors: u8) -> Self {
        match neighbors {
            0..=2 => Band::Lightest,
            3..=4 => Band::Light,
            5..=6 => Band::Medium,
            _ => Band::Darkest,
        }
    }

    pub fn color(self) -> Rgba {
        match self {
            Band::Lightest => LIGHTEST_COLOR,
            Band::Light => LIGHT_COLOR,
            Band::Medium => MEDIUM_COLOR,
            Band::Darkest => DARKEST_COLOR,
        }
    }
}

/// Fill color for a live cell with the given neighbor count
pub fn color_for(neighbors: u8) -> Rgba {
    Band::for_neighbors(neighbors).color()
}

/// Perceived brightness, used to check the bands darken as density grows
#[cfg(test)]
fn luma(color: Rgba) -> u32 {
    299 * color[0] as u32 + 587 * color[1] as u32 + 114 * color[2] as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_equalities() {
        assert_eq!(color_for(0), color_for(2));
        assert_eq!(color_for(1), color_for(2));
        assert_eq!(color_for(3), color_for(4));
        assert_eq!(color_for(5), color_for(6));
        assert_eq!(color_for(7), color_for(8));
        assert_ne!(color_for(2), color_for(3));
        assert_ne!(color_for(4), color_for(5));
        assert_ne!(color_for(6), color_for(7));
    }

    #[test]
    fn test_bands_monotonic() {
        let bands: Vec<Band> = (0..=8).map(Band::for_neighbors).collect();
        assert!(bands.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(bands[0], Band::Lightest);
        assert_eq!(bands[8], Band::Darkest);

        let lumas: Vec<u32> = (0..=8).map(|n| luma(color_for(n))).collect();
        assert!(
            lumas.windows(2).all(|pair| pair[0] >= pair[1]),
            "colors should darken with neighbor count: {:?}",
            lumas
        );
    }

    #[test]
    fn test_colors_are_opaque() {
        for n in 0..=8 {
            assert_eq!(color_for(n)[3], 0xff);
        }
    }
}
