use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub mod config;
pub mod logging;
pub mod models;
pub mod neighbor_policy;
pub mod grid_sampler;
pub mod zone_labeler;
pub mod zone_ranker;
pub mod edge_extractor;
pub mod nearest_pair;
pub mod connector_carver;
pub mod zone_painter;
pub mod scheduler;
pub mod executor;

use zone_labeler::SeedStrategy;

#[derive(Args, Debug, Clone)]
pub struct CommonOpts {
    /// World snapshot JSON (rows of tile characters plus points of interest)
    #[arg(long)]
    pub world: PathBuf,
    /// Downsample factor, `N` or `XxY` (default: 2x2 or ZONES_DOWNSAMPLE)
    #[arg(long)]
    pub downsample: Option<String>,
    /// Number of largest zones considered for connection
    #[arg(long = "top-zones")]
    pub top_zones: Option<usize>,
    /// Longest tunnel in downsampled cells
    #[arg(long = "max-distance")]
    pub max_distance: Option<i64>,
    /// Tunnel half-width in tiles
    #[arg(long = "band-width")]
    pub band_width: Option<i32>,
    /// Border band (downsampled cells) never labeled
    #[arg(long = "edge-margin")]
    pub edge_margin: Option<i32>,
    /// Seed strategy: poi | scan
    #[arg(long)]
    pub seeds: Option<SeedStrategy>,
    /// Attempts before a failing pass aborts generation
    #[arg(long = "max-attempts")]
    pub max_attempts: Option<u32>,
    /// Paint the largest zones' walls for debugging
    #[arg(long = "paint-zones")]
    pub paint_zones: bool,
    /// Log level (trace|debug|info|warn|error)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ZonesCommand {
    /// Label zones and carve tunnels between the largest ones
    #[command(name = "connect")]
    Connect {
        /// Where to write the carved world (default: <world>.connected.json)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Where to write the JSON report
        #[arg(long)]
        report: Option<PathBuf>,
        /// Compute only, no carving
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Print the zone analysis report without modifying anything
    #[command(name = "inspect")]
    Inspect,
}

pub fn build_config(common: &CommonOpts, dry_run: bool) -> Result<config::Config> {
    // CLI first, env overlays
    let mut cfg = config::Config::default();
    if let Some(ds) = common.downsample.as_deref() {
        let (dx, dy) = config::parse_downsample(ds)
            .with_context(|| format!("invalid --downsample '{}'", ds))?;
        cfg.downsample_x = dx;
        cfg.downsample_y = dy;
    }
    if let Some(v) = common.top_zones { cfg.top_zones = v; }
    if let Some(v) = common.max_distance { cfg.max_distance = v; }
    if let Some(v) = common.band_width { cfg.band_width = v; }
    if let Some(v) = common.edge_margin { cfg.edge_margin = v; }
    if let Some(v) = common.seeds { cfg.seed_strategy = v; }
    if let Some(v) = common.max_attempts { cfg.max_attempts = v; }
    cfg.paint_zones = common.paint_zones;
    cfg.dry_run = dry_run;
    cfg.log_level = common.log_level.clone();
    cfg.overlay(config::Config::from_env_defaults());
    cfg.validate()?;
    Ok(cfg)
}

pub fn cmd_zones(common: CommonOpts, sub: ZonesCommand) -> Result<()> {
    let dry_run = match &sub {
        ZonesCommand::Connect { dry_run, .. } => *dry_run,
        ZonesCommand::Inspect => true,
    };
    let cfg = build_config(&common, dry_run)?;
    logging::init(cfg.log_level.as_deref());

    let (mut world, poi) = crate::world::load_world(&common.world)?;
    log::info!(
        "[zones] loaded {} ({}x{}, {} points of interest)",
        common.world.display(), world.width(), world.height(), poi.len()
    );

    match sub {
        ZonesCommand::Inspect => {
            let report = executor::run_pipeline(&mut world, &poi, &cfg)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        ZonesCommand::Connect { out, report, .. } => {
            let pass = executor::ConnectZonesPass::new(cfg.clone(), poi.clone());
            let last_report = pass.report_handle();
            let mut sched = scheduler::PassScheduler::new();
            sched.push(scheduler::RetryingPass::new(pass, cfg.max_attempts));
            let stats = sched.run(&mut world)?;
            log::info!("[zones] completed passes: {}", stats.completed.join(", "));

            let out_path = out.unwrap_or_else(|| crate::util::default_out_path(&common.world));
            if cfg.dry_run {
                log::info!("[zones] Dry run; not writing {}", out_path.display());
            } else {
                crate::world::save_world(&out_path, &world, &poi)?;
                log::info!("[zones] wrote {}", out_path.display());
            }
            if let Some(path) = report {
                let last = last_report.borrow();
                let last = last.as_ref().context("Connect Zones pass produced no report")?;
                std::fs::write(&path, serde_json::to_string_pretty(last)?)
                    .with_context(|| format!("writing report {}", path.display()))?;
            }
            Ok(())
        }
    }
}
