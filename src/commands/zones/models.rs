use serde::Serialize;

/// Cell coordinate on the downsampled grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn dist_sq(self, other: Coord) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct ZoneLabel(pub u32);

impl ZoneLabel {
    pub const NONE: ZoneLabel = ZoneLabel(0);

    pub fn is_zone(self) -> bool {
        self.0 != 0
    }
}

/// Dense row-major 2D array with bounds-checked access.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid2<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T: Clone> Grid2<T> {
    pub fn filled(width: i32, height: i32, value: T) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self { width: width.max(0), height: height.max(0), cells: vec![value; len] }
    }
}

impl<T> Grid2<T> {
    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, value: T) -> bool {
        match self.get_mut(x, y) {
            Some(slot) => { *slot = value; true }
            None => false,
        }
    }

    /// Row-major iteration: `(x, y, &value)`.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &T)> + '_ {
        let w = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i as i32) % w, (i as i32) / w, v))
    }
}

/// true = at least one full-resolution tile in the cell blocks movement.
pub type SolidsMask = Grid2<bool>;

impl SolidsMask {
    pub fn is_traversable(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(false))
    }

    pub fn traversable_count(&self) -> usize {
        self.iter().filter(|(_, _, s)| !**s).count()
    }
}

#[derive(Clone, Debug)]
pub struct ZoneGrid {
    pub labels: Grid2<ZoneLabel>,
    /// Number of labels handed out; labels run 1..=label_count.
    pub label_count: u32,
}

impl ZoneGrid {
    pub fn label_at(&self, x: i32, y: i32) -> Option<ZoneLabel> {
        self.labels.get(x, y).copied()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankedZone {
    pub label: ZoneLabel,
    pub cells: usize,
}

/// Closest edge cells between two distinct zones.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NearPointPair {
    pub zone_a: ZoneLabel,
    pub zone_b: ZoneLabel,
    pub a: Coord,
    pub b: Coord,
    pub dist_sq: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_bounds_checked() {
        let mut g = Grid2::filled(3, 2, 0u8);
        assert!(g.set(2, 1, 7));
        assert!(!g.set(3, 0, 1));
        assert_eq!(g.get(2, 1), Some(&7));
        assert_eq!(g.get(-1, 0), None);
        let coords: Vec<(i32, i32)> = g.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords[3], (0, 1));
        assert_eq!(coords.len(), 6);
    }

    #[test]
    fn dist_sq_is_symmetric() {
        let a = Coord::new(1, 2);
        let b = Coord::new(4, 6);
        assert_eq!(a.dist_sq(b), 25);
        assert_eq!(b.dist_sq(a), 25);
    }
}
