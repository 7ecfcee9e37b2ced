use std::collections::HashMap;

use crate::world::World;

use super::grid_sampler::Downsample;
use super::models::{RankedZone, ZoneGrid, ZoneLabel};

/// Debug wall ids, largest zone first.
pub const ZONE_WALL_PALETTE: [u16; 7] = [101, 102, 103, 104, 105, 106, 107];

/// Paints the wall of every tile in the largest zones with its rank colour.
/// Returns the number of tiles painted.
pub fn paint_ranked_zones(world: &mut World, zones: &ZoneGrid, ranking: &[RankedZone], ds: Downsample) -> usize {
    let colours: HashMap<ZoneLabel, u16> = ranking
        .iter()
        .zip(ZONE_WALL_PALETTE.iter())
        .map(|(z, &wall)| (z.label, wall))
        .collect();
    if colours.is_empty() {
        return 0;
    }

    let mut painted = 0;
    for y in 0..world.height() {
        for x in 0..world.width() {
            let cell = ds.to_cell(x, y);
            let Some(label) = zones.label_at(cell.x, cell.y) else { continue };
            let Some(&wall) = colours.get(&label) else { continue };
            if let Some(t) = world.get_mut(x, y) {
                t.wall = wall;
                painted += 1;
            }
        }
    }
    painted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::zones::models::Grid2;

    #[test]
    fn paints_by_rank() {
        let mut labels = Grid2::filled(2, 1, ZoneLabel::NONE);
        labels.set(0, 0, ZoneLabel(1));
        labels.set(1, 0, ZoneLabel(2));
        let zones = ZoneGrid { labels, label_count: 2 };
        let ranking = [
            RankedZone { label: ZoneLabel(2), cells: 1 },
            RankedZone { label: ZoneLabel(1), cells: 1 },
        ];
        let mut world = World::new(4, 2);
        let painted = paint_ranked_zones(&mut world, &zones, &ranking, Downsample::default());
        assert_eq!(painted, 8);
        assert_eq!(world.get(0, 1).unwrap().wall, ZONE_WALL_PALETTE[1]);
        assert_eq!(world.get(3, 0).unwrap().wall, ZONE_WALL_PALETTE[0]);
    }
}
