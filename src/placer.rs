use rand::Rng;

use crate::trial::{IconBox, Point, Side};

/// Side length of the square grid, in grid units.
pub const GRID_EXTENT: f64 = 8.0;
/// Edge length of the square icon.
pub const ICON_SIZE: f64 = 1.0;
/// Depth of the band that hosts the icon outside each grid edge.
pub const BAND_DEPTH: f64 = 1.0;

// The bottom edge keeps its icon out of the middle unit.
const BOTTOM_LOWER: std::ops::Range<f64> = 0.0..3.5;
const BOTTOM_UPPER: std::ops::Range<f64> = 4.5..GRID_EXTENT;

/// Draws stimulus positions from an injected random source.
#[derive(Debug)]
pub struct RandomPlacer<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn red_dot_position(&mut self) -> Point {
        let x = self.rng.gen_range(0.0..GRID_EXTENT);
        let y = self.rng.gen_range(0.0..GRID_EXTENT);
        Point::new(x, y)
    }

    /// Centre of the icon along the free axis of `side`.
    pub fn icon_center(&mut self, side: Side) -> f64 {
        match side {
            Side::Bottom => {
                if self.rng.gen::<f64>() < 0.5 {
                    self.rng.gen_range(BOTTOM_LOWER)
                } else {
                    self.rng.gen_range(BOTTOM_UPPER)
                }
            }
            Side::Left | Side::Right | Side::Top => self.rng.gen_range(0.0..GRID_EXTENT),
        }
    }

    /// Box for the icon on `side`. Boxes near a corner overhang the grid; that is kept.
    pub fn icon_box(&mut self, side: Side) -> IconBox {
        let center = self.icon_center(side);
        icon_box_at(side, center)
    }
}

/// Icon box for a given centre: `ICON_SIZE` wide along the free axis, flush with the band.
pub fn icon_box_at(side: Side, center: f64) -> IconBox {
    let half = ICON_SIZE / 2.0;
    match side {
        Side::Left => IconBox {
            left: -BAND_DEPTH,
            right: 0.0,
            bottom: center - half,
            top: center + half,
        },
        Side::Right => IconBox {
            left: GRID_EXTENT,
            right: GRID_EXTENT + BAND_DEPTH,
            bottom: center - half,
            top: center + half,
        },
        Side::Top => IconBox {
            left: center - half,
            right: center + half,
            bottom: GRID_EXTENT,
            top: GRID_EXTENT + BAND_DEPTH,
        },
        Side::Bottom => IconBox {
            left: center - half,
            right: center + half,
            bottom: -BAND_DEPTH,
            top: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn placer(seed: u64) -> RandomPlacer<StdRng> {
        RandomPlacer::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn red_dot_stays_inside_grid() {
        let mut p = placer(7);
        for _ in 0..10_000 {
            let dot = p.red_dot_position();
            assert!((0.0..GRID_EXTENT).contains(&dot.x), "x out of range: {}", dot.x);
            assert!((0.0..GRID_EXTENT).contains(&dot.y), "y out of range: {}", dot.y);
        }
    }

    #[test]
    fn bottom_center_skips_middle_unit() {
        let mut p = placer(11);
        let mut lower = 0;
        let mut upper = 0;
        for _ in 0..10_000 {
            let c = p.icon_center(Side::Bottom);
            if BOTTOM_LOWER.contains(&c) {
                lower += 1;
            } else if BOTTOM_UPPER.contains(&c) {
                upper += 1;
            } else {
                panic!("bottom centre {} fell in the excluded gap", c);
            }
        }
        // both halves are chosen with equal probability
        assert!(lower > 4_000 && upper > 4_000, "lower={lower} upper={upper}");
    }

    #[test]
    fn other_centers_cover_whole_edge() {
        let mut p = placer(13);
        for side in [Side::Left, Side::Right, Side::Top] {
            let mut saw_middle = false;
            for _ in 0..5_000 {
                let c = p.icon_center(side);
                assert!((0.0..GRID_EXTENT).contains(&c));
                saw_middle |= (3.5..4.5).contains(&c);
            }
            assert!(saw_middle, "{side} never placed an icon in the middle unit");
        }
    }

    #[test]
    fn boxes_are_flush_with_their_band() {
        let left = icon_box_at(Side::Left, 2.0);
        assert_eq!((left.left, left.right), (-1.0, 0.0));
        assert_eq!((left.bottom, left.top), (1.5, 2.5));

        let right = icon_box_at(Side::Right, 2.0);
        assert_eq!((right.left, right.right), (8.0, 9.0));
        assert_eq!((right.bottom, right.top), (1.5, 2.5));

        let top = icon_box_at(Side::Top, 6.0);
        assert_eq!((top.left, top.right), (5.5, 6.5));
        assert_eq!((top.bottom, top.top), (8.0, 9.0));

        let bottom = icon_box_at(Side::Bottom, 6.0);
        assert_eq!((bottom.left, bottom.right), (5.5, 6.5));
        assert_eq!((bottom.bottom, bottom.top), (-1.0, 0.0));
    }

    #[test]
    fn corner_boxes_overhang_without_clamping() {
        let b = icon_box_at(Side::Left, 0.1);
        assert!(b.bottom < 0.0);
        assert!((b.height() - ICON_SIZE).abs() < 1e-12);

        let t = icon_box_at(Side::Top, 7.9);
        assert!(t.right > GRID_EXTENT);
    }

    #[test]
    fn same_seed_same_placements() {
        let mut a = placer(42);
        let mut b = placer(42);
        for side in Side::ALL {
            assert_eq!(a.red_dot_position(), b.red_dot_position());
            assert_eq!(a.icon_box(side), b.icon_box(side));
        }
    }
}
