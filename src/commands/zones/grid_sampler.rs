use crate::world::World;

use super::models::{Coord, SolidsMask};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Downsample {
    pub dx: i32,
    pub dy: i32,
}

impl Default for Downsample {
    fn default() -> Self {
        Self { dx: 2, dy: 2 }
    }
}

impl Downsample {
    pub fn mask_dims(&self, width: i32, height: i32) -> (i32, i32) {
        ((width + self.dx - 1) / self.dx, (height + self.dy - 1) / self.dy)
    }

    pub fn to_cell(&self, x: i32, y: i32) -> Coord {
        Coord::new(x.div_euclid(self.dx), y.div_euclid(self.dy))
    }

    pub fn to_tile(&self, c: Coord) -> (i32, i32) {
        (c.x * self.dx, c.y * self.dy)
    }
}

/// OR-reduces `dx * dy` tile blocks into one cell. Partial blocks at the right and
/// bottom edges only consider the tiles that exist.
pub fn sample_with<F>(width: i32, height: i32, ds: Downsample, mut is_solid: F) -> SolidsMask
where
    F: FnMut(i32, i32) -> bool,
{
    let (mw, mh) = ds.mask_dims(width, height);
    let mut mask = SolidsMask::filled(mw, mh, false);
    for y in 0..height {
        for x in 0..width {
            if !is_solid(x, y) { continue; }
            mask.set(x / ds.dx, y / ds.dy, true);
        }
    }
    mask
}

pub fn sample_world(world: &World, ds: Downsample) -> SolidsMask {
    sample_with(world.width(), world.height(), ds, |x, y| world.is_solid(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Tile, PLATFORM, STONE};

    #[test]
    fn any_solid_tile_marks_cell() {
        let mut w = World::new(4, 4);
        w.set(3, 3, Tile::block(STONE));
        let mask = sample_world(&w, Downsample::default());
        assert_eq!((mask.width(), mask.height()), (2, 2));
        assert_eq!(mask.get(1, 1), Some(&true));
        assert_eq!(mask.get(0, 0), Some(&false));
        assert_eq!(mask.traversable_count(), 3);
    }

    #[test]
    fn uneven_dims_round_up() {
        let mut w = World::new(5, 3);
        w.set(4, 2, Tile::block(STONE));
        w.set(0, 0, Tile::block(PLATFORM));
        let mask = sample_world(&w, Downsample::default());
        assert_eq!((mask.width(), mask.height()), (3, 2));
        assert_eq!(mask.get(2, 1), Some(&true));
        assert_eq!(mask.get(0, 0), Some(&false));
    }

    #[test]
    fn cell_tile_mapping() {
        let ds = Downsample { dx: 2, dy: 3 };
        assert_eq!(ds.to_cell(5, 7), Coord::new(2, 2));
        assert_eq!(ds.to_tile(Coord::new(2, 2)), (4, 6));
    }
}
