use crate::world::World;

use super::grid_sampler::Downsample;
use super::models::NearPointPair;

/// Widest half-width a tunnel may have, in tiles.
pub const MAX_BAND_WIDTH: i32 = 16;

#[derive(Clone, Debug, Default)]
pub struct CarveStats {
    pub tunnels: usize,
    pub tiles_cleared: usize,
    pub frame_important_skipped: usize,
}

/// Clears a straight band between each pair's endpoints, mapped back to full
/// resolution. The band spans offsets `-base_width..=base_width` across the
/// line, so it is `2 * base_width + 1` tiles wide including the centre row.
/// `base_width` is clamped to `0..=MAX_BAND_WIDTH`. Frame-important tiles are left alone.
pub fn carve_connectors(world: &mut World, pairs: &[NearPointPair], ds: Downsample, base_width: i32) -> CarveStats {
    let mut stats = CarveStats::default();
    for pair in pairs {
        let (ax, ay) = ds.to_tile(pair.a);
        let (bx, by) = ds.to_tile(pair.b);
        carve_band(world, (ax, ay), (bx, by), base_width, &mut stats);
        stats.tunnels += 1;
        log::debug!(
            "[connector_carver] zones {}<->{} tunnel ({},{})->({},{})",
            pair.zone_a.0, pair.zone_b.0, ax, ay, bx, by
        );
    }
    stats
}

fn carve_band(world: &mut World, from: (i32, i32), to: (i32, i32), base_width: i32, stats: &mut CarveStats) {
    let dx = (to.0 - from.0) as f32;
    let dy = (to.1 - from.1) as f32;
    let len = (dx * dx + dy * dy).sqrt();
    // a zero-length tunnel still clears a square around the point
    let (ux, uy) = if len > 0.0 { (dx / len, dy / len) } else { (1.0, 0.0) };
    let (px, py) = (-uy, ux);
    let half = i64::from(base_width.clamp(0, MAX_BAND_WIDTH));

    let steps = (len * 2.0).ceil() as i32;
    for s in 0..=steps {
        let t = (s as f32 * 0.5).min(len);
        let cx = from.0 as f32 + ux * t;
        let cy = from.1 as f32 + uy * t;
        for w in -(2 * half)..=(2 * half) {
            let off = w as f32 * 0.5;
            let x = (cx + px * off).round() as i32;
            let y = (cy + py * off).round() as i32;
            if !world.in_bounds(x, y) { continue; }
            if world.is_frame_important(x, y) {
                stats.frame_important_skipped += 1;
                continue;
            }
            if world.clear_tile(x, y) {
                stats.tiles_cleared += 1;
            }
        }
    }
}
