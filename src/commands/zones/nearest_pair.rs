use super::edge_extractor::EdgeSet;
use super::models::{Coord, NearPointPair, ZoneLabel};

/// Closest pair across the two lists; the first minimum found wins ties.
pub fn closest_between(a: &[Coord], b: &[Coord]) -> Option<(Coord, Coord, i64)> {
    let mut best: Option<(Coord, Coord, i64)> = None;
    for &pa in a {
        for &pb in b {
            let d = pa.dist_sq(pb);
            if best.map(|(_, _, bd)| d < bd).unwrap_or(true) {
                best = Some((pa, pb, d));
            }
        }
    }
    best
}

/// One candidate per unordered zone pair whose closest edge cells lie within
/// `max_distance` cells. Pairs come out in `order` order, `(i, j)` with `i < j`.
pub fn find_near_pairs(edges: &EdgeSet, order: &[ZoneLabel], max_distance: i64) -> Vec<NearPointPair> {
    let cutoff = max_distance.saturating_mul(max_distance);
    let zones: Vec<(ZoneLabel, &Vec<Coord>)> = order
        .iter()
        .filter_map(|l| edges.get(l).map(|cells| (*l, cells)))
        .collect();

    let mut out = Vec::new();
    for i in 0..zones.len() {
        for j in (i + 1)..zones.len() {
            let (la, ea) = zones[i];
            let (lb, eb) = zones[j];
            let Some((a, b, dist_sq)) = closest_between(ea, eb) else { continue };
            if dist_sq > cutoff {
                log::debug!(
                    "[nearest_pair] zones {} and {} too far apart (dist_sq={})",
                    la.0, lb.0, dist_sq
                );
                continue;
            }
            out.push(NearPointPair { zone_a: la, zone_b: lb, a, b, dist_sq });
        }
    }
    out
}
