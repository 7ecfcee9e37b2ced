use super::models::Coord;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Offset(pub i32, pub i32);

/// Axis-aligned steps used by flood fill and edge tests.
pub static CARDINAL: [Offset; 4] = [Offset(-1, 0), Offset(1, 0), Offset(0, -1), Offset(0, 1)];

pub fn cardinal_neighbors(c: Coord) -> impl Iterator<Item = Coord> {
    CARDINAL.iter().map(move |&Offset(dx, dy)| Coord::new(c.x + dx, c.y + dy))
}

/// Border band that flood fill never enters, in downsampled cells.
#[derive(Copy, Clone, Debug, Default)]
pub struct EdgeMargin(pub i32);

impl EdgeMargin {
    pub fn allows(&self, c: Coord, width: i32, height: i32) -> bool {
        let m = self.0;
        c.x >= m && c.y >= m && c.x < width - m && c.y < height - m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_neighbors_are_four_axis_steps() {
        let n: Vec<Coord> = cardinal_neighbors(Coord::new(5, 5)).collect();
        assert_eq!(n.len(), 4);
        assert!(n.contains(&Coord::new(4, 5)));
        assert!(n.contains(&Coord::new(6, 5)));
        assert!(n.contains(&Coord::new(5, 4)));
        assert!(n.contains(&Coord::new(5, 6)));
    }

    #[test]
    fn margin_excludes_border_band() {
        let m = EdgeMargin(2);
        assert!(!m.allows(Coord::new(1, 5), 10, 10));
        assert!(m.allows(Coord::new(2, 2), 10, 10));
        assert!(!m.allows(Coord::new(8, 5), 10, 10));
        assert!(EdgeMargin(0).allows(Coord::new(0, 9), 10, 10));
    }
}
