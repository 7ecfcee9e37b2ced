use anyhow::{bail, Result};
use std::env;

use super::connector_carver::MAX_BAND_WIDTH;
use super::grid_sampler::Downsample;
use super::zone_labeler::SeedStrategy;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Config {
    pub downsample_x: i32,
    pub downsample_y: i32,
    /// How many of the largest zones take part in edge and near-pair search.
    pub top_zones: usize,
    /// Longest tunnel considered, in downsampled cells.
    pub max_distance: i64,
    pub band_width: i32,
    pub edge_margin: i32,
    pub seed_strategy: SeedStrategy,
    pub max_attempts: u32,
    pub dry_run: bool,
    pub paint_zones: bool,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            downsample_x: 2,
            downsample_y: 2,
            top_zones: 7,
            max_distance: 40,
            band_width: 1,
            edge_margin: 0,
            seed_strategy: SeedStrategy::PointsOfInterest,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            dry_run: false,
            paint_zones: false,
            log_level: None,
        }
    }
}

/// Values found in `ZONES_*` environment variables; unset ones stay `None`.
#[derive(Clone, Debug, Default)]
pub struct EnvOverrides {
    pub downsample: Option<(i32, i32)>,
    pub top_zones: Option<usize>,
    pub max_distance: Option<i64>,
    pub band_width: Option<i32>,
    pub edge_margin: Option<i32>,
    pub seed_strategy: Option<SeedStrategy>,
    pub max_attempts: Option<u32>,
    pub dry_run: bool,
    pub paint_zones: bool,
    pub log_level: Option<String>,
}

impl Config {
    pub fn downsample(&self) -> Downsample {
        Downsample { dx: self.downsample_x, dy: self.downsample_y }
    }

    pub fn from_env_defaults() -> EnvOverrides {
        let flag = |k: &str| env::var(k).ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false);
        EnvOverrides {
            downsample: env::var("ZONES_DOWNSAMPLE").ok().and_then(|s| parse_downsample(&s)),
            top_zones: env::var("ZONES_TOP").ok().and_then(|s| s.trim().parse().ok()),
            max_distance: env::var("ZONES_MAX_DISTANCE").ok().and_then(|s| s.trim().parse().ok()),
            band_width: env::var("ZONES_BAND_WIDTH").ok().and_then(|s| s.trim().parse().ok()),
            edge_margin: env::var("ZONES_EDGE_MARGIN").ok().and_then(|s| s.trim().parse().ok()),
            seed_strategy: env::var("ZONES_SEEDS").ok().and_then(|s| s.parse().ok()),
            max_attempts: env::var("ZONES_MAX_ATTEMPTS").ok().and_then(|s| s.trim().parse().ok()),
            dry_run: flag("ZONES_DRY_RUN"),
            paint_zones: flag("ZONES_PAINT"),
            log_level: env::var("ZONES_LOG_LEVEL").ok(),
        }
    }

    /// Env values win over whatever is already set.
    pub fn overlay(&mut self, env_cfg: EnvOverrides) {
        if let Some((dx, dy)) = env_cfg.downsample { self.downsample_x = dx; self.downsample_y = dy; }
        if let Some(v) = env_cfg.top_zones { self.top_zones = v; }
        if let Some(v) = env_cfg.max_distance { self.max_distance = v; }
        if let Some(v) = env_cfg.band_width { self.band_width = v; }
        if let Some(v) = env_cfg.edge_margin { self.edge_margin = v; }
        if let Some(v) = env_cfg.seed_strategy { self.seed_strategy = v; }
        if let Some(v) = env_cfg.max_attempts { self.max_attempts = v; }
        if env_cfg.dry_run { self.dry_run = true; }
        if env_cfg.paint_zones { self.paint_zones = true; }
        if env_cfg.log_level.is_some() { self.log_level = env_cfg.log_level; }
    }

    pub fn validate(&self) -> Result<()> {
        if self.downsample_x <= 0 || self.downsample_y <= 0 {
            bail!("downsample factors must be positive, got {}x{}", self.downsample_x, self.downsample_y);
        }
        if self.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }
        if self.max_distance < 0 || self.band_width < 0 || self.edge_margin < 0 {
            bail!("max_distance, band_width and edge_margin must not be negative");
        }
        if self.band_width > MAX_BAND_WIDTH {
            bail!("band_width {} exceeds the maximum of {}", self.band_width, MAX_BAND_WIDTH);
        }
        Ok(())
    }
}

/// Accepts `2` or `2x3`.
pub fn parse_downsample(input: &str) -> Option<(i32, i32)> {
    let t = input.trim().to_ascii_lowercase();
    let parts: Vec<&str> = t.split('x').collect();
    match parts.as_slice() {
        [n] => {
            let v = n.trim().parse::<i32>().ok()?;
            Some((v, v))
        }
        [a, b] => Some((a.trim().parse().ok()?, b.trim().parse().ok()?)),
        _ => None,
    }
}
