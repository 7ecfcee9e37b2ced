use std::collections::{BTreeMap, BTreeSet};

use super::models::{Coord, ZoneGrid, ZoneLabel};
use super::neighbor_policy::cardinal_neighbors;

/// Zone label -> boundary cells in row-major order.
pub type EdgeSet = BTreeMap<ZoneLabel, Vec<Coord>>;

/// Collects cells of the given zones that touch the grid border or a cell with
/// another label (including unlabeled space).
pub fn extract_edges(zones: &ZoneGrid, of_interest: &BTreeSet<ZoneLabel>) -> EdgeSet {
    let mut out: EdgeSet = of_interest
        .iter()
        .filter(|l| l.is_zone())
        .map(|&l| (l, Vec::new()))
        .collect();

    for (x, y, &label) in zones.labels.iter() {
        let Some(cells) = out.get_mut(&label) else { continue };
        let c = Coord::new(x, y);
        let on_edge = cardinal_neighbors(c).any(|n| match zones.label_at(n.x, n.y) {
            Some(other) => other != label,
            None => true,
        });
        if on_edge {
            cells.push(c);
        }
    }

    for (label, cells) in out.iter() {
        log::debug!("[edge_extractor] zone={} edge_cells={}", label.0, cells.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::zones::models::Grid2;

    #[test]
    fn interior_cells_are_not_edges() {
        let mut g = Grid2::filled(5, 5, ZoneLabel(1));
        g.set(4, 4, ZoneLabel(2));
        let z = ZoneGrid { labels: g, label_count: 2 };
        let interest: BTreeSet<ZoneLabel> = [ZoneLabel(1)].into_iter().collect();
        let edges = extract_edges(&z, &interest);
        let e1 = &edges[&ZoneLabel(1)];
        assert!(!e1.contains(&Coord::new(2, 2)));
        assert!(e1.contains(&Coord::new(0, 2)));
        assert!(e1.contains(&Coord::new(3, 4)));
        assert!(e1.contains(&Coord::new(4, 3)));
        // 16 perimeter cells minus the corner owned by zone 2
        assert_eq!(e1.len(), 15);
        assert!(!edges.contains_key(&ZoneLabel(2)));
    }

    #[test]
    fn unlabeled_label_is_never_a_zone_of_interest() {
        let g = Grid2::filled(2, 2, ZoneLabel::NONE);
        let z = ZoneGrid { labels: g, label_count: 0 };
        let interest: BTreeSet<ZoneLabel> = [ZoneLabel::NONE].into_iter().collect();
        assert!(extract_edges(&z, &interest).is_empty());
    }
}
