use anyhow::{bail, Result};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::world::World;

use super::config::Config;
use super::connector_carver;
use super::edge_extractor::{self, EdgeSet};
use super::grid_sampler;
use super::models::{Coord, NearPointPair, RankedZone, SolidsMask, ZoneGrid, ZoneLabel};
use super::nearest_pair;
use super::neighbor_policy::EdgeMargin;
use super::scheduler::{GenPass, GenerationProgress};
use super::zone_labeler::{self, SeedStrategy};
use super::zone_painter;
use super::zone_ranker;

/// Read-only results of one analysis over a world snapshot.
#[derive(Clone, Debug)]
pub struct ZoneAnalysis {
    pub mask: SolidsMask,
    pub zones: ZoneGrid,
    pub ranking: Vec<RankedZone>,
    pub edges: EdgeSet,
    pub near_pairs: Vec<NearPointPair>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct PipelineReport {
    pub mask_width: i32,
    pub mask_height: i32,
    pub traversable_cells: usize,
    pub seeds: usize,
    pub zone_count: u32,
    pub ranking: Vec<RankedZone>,
    pub edge_cells: BTreeMap<u32, usize>,
    pub near_pairs: Vec<NearPointPair>,
    pub tunnels: usize,
    pub tiles_cleared: usize,
    pub frame_important_skipped: usize,
    pub walls_painted: usize,
    pub dry_run: bool,
}

/// Samples, labels, ranks, and pairs zones without touching the world.
pub fn analyze(world: &World, points_of_interest: &[(i32, i32)], cfg: &Config) -> Result<ZoneAnalysis> {
    cfg.validate()?;
    let ds = cfg.downsample();
    if world.width() < ds.dx || world.height() < ds.dy {
        bail!(
            "world {}x{} is smaller than one {}x{} zone cell",
            world.width(), world.height(), ds.dx, ds.dy
        );
    }

    let mask = grid_sampler::sample_world(world, ds);
    let seeds: Vec<Coord> = match cfg.seed_strategy {
        SeedStrategy::PointsOfInterest => points_of_interest
            .iter()
            .map(|&(x, y)| ds.to_cell(x, y))
            .collect(),
        SeedStrategy::Scan => zone_labeler::scan_seeds(&mask),
    };
    log::info!(
        "[executor] mask {}x{} traversable={} seeds={}",
        mask.width(), mask.height(), mask.traversable_count(), seeds.len()
    );

    let zones = zone_labeler::label_zones(&mask, &seeds, EdgeMargin(cfg.edge_margin));
    let ranking = zone_ranker::rank_zones(&zones);
    let order: Vec<ZoneLabel> = ranking.iter().take(cfg.top_zones).map(|z| z.label).collect();
    let of_interest: BTreeSet<ZoneLabel> = order.iter().copied().collect();
    let edges = edge_extractor::extract_edges(&zones, &of_interest);
    let near_pairs = nearest_pair::find_near_pairs(&edges, &order, cfg.max_distance);
    log::info!(
        "[executor] zones={} of_interest={} near_pairs={}",
        zones.label_count, order.len(), near_pairs.len()
    );

    Ok(ZoneAnalysis { mask, zones, ranking, edges, near_pairs })
}

/// Full Connect Zones run: analysis, tunnel carving, optional debug walls.
pub fn run_pipeline(world: &mut World, points_of_interest: &[(i32, i32)], cfg: &Config) -> Result<PipelineReport> {
    let analysis = analyze(world, points_of_interest, cfg)?;
    let ds = cfg.downsample();

    let mut report = PipelineReport {
        mask_width: analysis.mask.width(),
        mask_height: analysis.mask.height(),
        traversable_cells: analysis.mask.traversable_count(),
        seeds: match cfg.seed_strategy {
            SeedStrategy::PointsOfInterest => points_of_interest.len(),
            SeedStrategy::Scan => analysis.mask.traversable_count(),
        },
        zone_count: analysis.zones.label_count,
        ranking: analysis.ranking.clone(),
        edge_cells: analysis.edges.iter().map(|(l, c)| (l.0, c.len())).collect(),
        near_pairs: analysis.near_pairs.clone(),
        dry_run: cfg.dry_run,
        ..Default::default()
    };

    if cfg.dry_run {
        log::info!("[executor] Dry run; skipping carving for {} pairs", report.near_pairs.len());
        return Ok(report);
    }

    if cfg.paint_zones {
        report.walls_painted =
            zone_painter::paint_ranked_zones(world, &analysis.zones, &analysis.ranking, ds);
    }
    let carve = connector_carver::carve_connectors(world, &analysis.near_pairs, ds, cfg.band_width);
    report.tunnels = carve.tunnels;
    report.tiles_cleared = carve.tiles_cleared;
    report.frame_important_skipped = carve.frame_important_skipped;
    log::info!(
        "[executor] tunnels={} tiles_cleared={} frame_important_skipped={}",
        carve.tunnels, carve.tiles_cleared, carve.frame_important_skipped
    );
    Ok(report)
}

/// The pipeline as a schedulable generation step.
pub struct ConnectZonesPass {
    cfg: Config,
    points_of_interest: Vec<(i32, i32)>,
    report: Rc<RefCell<Option<PipelineReport>>>,
}

impl ConnectZonesPass {
    pub fn new(cfg: Config, points_of_interest: Vec<(i32, i32)>) -> Self {
        Self { cfg, points_of_interest, report: Rc::default() }
    }

    /// Shared slot holding the report of the last successful attempt; stays
    /// readable after the pass is boxed into a scheduler.
    pub fn report_handle(&self) -> Rc<RefCell<Option<PipelineReport>>> {
        Rc::clone(&self.report)
    }
}

impl GenPass for ConnectZonesPass {
    fn name(&self) -> &str { "Connect Zones" }
    fn weight(&self) -> f32 { 1.0 }

    fn apply(&mut self, world: &mut World, progress: &mut GenerationProgress) -> Result<()> {
        progress.message = "Connecting zones".to_string();
        *self.report.borrow_mut() = None;
        let report = run_pipeline(world, &self.points_of_interest, &self.cfg)?;
        *self.report.borrow_mut() = Some(report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Tile, STONE};

    /// 20x20 tiles, solid frame, a 2-tile thick divider at x = 8..10.
    fn two_rooms() -> World {
        let mut w = World::new(20, 20);
        for y in 0..20 {
            for x in 0..20 {
                let frame = x < 2 || y < 2 || x >= 18 || y >= 18;
                let divider = x == 8 || x == 9;
                if frame || divider {
                    w.set(x, y, Tile::block(STONE));
                }
            }
        }
        w
    }

    #[test]
    fn tiny_world_is_a_pass_failure() {
        let mut w = World::new(1, 1);
        assert!(run_pipeline(&mut w, &[], &Config::default()).is_err());
    }

    #[test]
    fn no_seeds_means_no_zones_and_no_carving() -> Result<()> {
        let mut w = two_rooms();
        let before = w.tiles().to_vec();
        let report = run_pipeline(&mut w, &[], &Config::default())?;
        assert_eq!(report.zone_count, 0);
        assert!(report.ranking.is_empty());
        assert!(report.edge_cells.is_empty());
        assert!(report.near_pairs.is_empty());
        assert_eq!(report.tunnels, 0);
        assert_eq!(w.tiles(), &before[..]);
        Ok(())
    }

    #[test]
    fn dry_run_leaves_world_untouched() -> Result<()> {
        let mut w = two_rooms();
        let before = w.tiles().to_vec();
        let cfg = Config { dry_run: true, ..Config::default() };
        let report = run_pipeline(&mut w, &[(4, 4), (14, 4)], &cfg)?;
        assert_eq!(report.zone_count, 2);
        assert_eq!(report.near_pairs.len(), 1);
        assert_eq!(report.tunnels, 0);
        assert_eq!(w.tiles(), &before[..]);
        Ok(())
    }

    #[test]
    fn pass_connects_rooms() -> Result<()> {
        let mut w = two_rooms();
        let mut pass = ConnectZonesPass::new(Config::default(), vec![(4, 4), (14, 4)]);
        pass.apply(&mut w, &mut GenerationProgress::default())?;
        let handle = pass.report_handle();
        let report = handle.borrow();
        let report = report.as_ref().unwrap();
        assert_eq!(report.tunnels, 1);
        assert!(report.tiles_cleared > 0);

        let after = analyze(&w, &[(4, 4), (14, 4)], &Config::default())?;
        assert_eq!(after.zones.label_count, 1);
        Ok(())
    }

    #[test]
    fn scan_strategy_finds_unseeded_zones() -> Result<()> {
        let w = two_rooms();
        let cfg = Config { seed_strategy: SeedStrategy::Scan, ..Config::default() };
        let a = analyze(&w, &[], &cfg)?;
        assert_eq!(a.zones.label_count, 2);
        assert_eq!(a.ranking.iter().map(|z| z.cells).sum::<usize>(), a.mask.traversable_count());
        Ok(())
    }
}
