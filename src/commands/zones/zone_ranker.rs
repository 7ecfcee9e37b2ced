use super::models::{RankedZone, ZoneGrid, ZoneLabel};

/// Zones by descending cell count. Equal counts keep the lower label first.
pub fn rank_zones(zones: &ZoneGrid) -> Vec<RankedZone> {
    let mut counts = vec![0usize; zones.label_count as usize + 1];
    for (_, _, label) in zones.labels.iter() {
        if let Some(c) = counts.get_mut(label.0 as usize) {
            *c += 1;
        }
    }
    // unlabeled space is not a zone
    counts[0] = 0;

    let mut ranked: Vec<RankedZone> = counts
        .iter()
        .enumerate()
        .skip(1)
        .map(|(idx, &cells)| RankedZone { label: ZoneLabel(idx as u32), cells })
        .collect();
    // stable sort keeps ascending label order among ties
    ranked.sort_by(|a, b| b.cells.cmp(&a.cells));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::zones::models::Grid2;

    fn zone_grid(rows: &[&[u32]]) -> ZoneGrid {
        let mut g = Grid2::filled(rows[0].len() as i32, rows.len() as i32, ZoneLabel::NONE);
        let mut max = 0;
        for (y, r) in rows.iter().enumerate() {
            for (x, &v) in r.iter().enumerate() {
                g.set(x as i32, y as i32, ZoneLabel(v));
                max = max.max(v);
            }
        }
        ZoneGrid { labels: g, label_count: max }
    }

    #[test]
    fn ranks_descending_with_label_tiebreak() {
        let z = zone_grid(&[&[1, 0, 2, 2], &[3, 0, 2, 4], &[3, 0, 0, 4]]);
        let r = rank_zones(&z);
        let labels: Vec<u32> = r.iter().map(|z| z.label.0).collect();
        assert_eq!(labels, vec![2, 3, 4, 1]);
        assert!(r.windows(2).all(|w| w[0].cells >= w[1].cells));
        assert_eq!(r.iter().map(|z| z.cells).sum::<usize>(), 8);
    }

    #[test]
    fn empty_grid_has_empty_ranking() {
        let z = zone_grid(&[&[0, 0], &[0, 0]]);
        assert!(rank_zones(&z).is_empty());
    }
}
