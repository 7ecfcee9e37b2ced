use super::models::{Coord, Grid2, SolidsMask, ZoneGrid, ZoneLabel};
use super::neighbor_policy::{cardinal_neighbors, EdgeMargin};

/// How seed cells are chosen before flood fill.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// Only the supplied points of interest start a zone.
    #[default]
    PointsOfInterest,
    /// Every traversable cell is tried in column order, so every zone gets a label.
    Scan,
}

impl std::str::FromStr for SeedStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poi" | "points" | "points_of_interest" => Ok(SeedStrategy::PointsOfInterest),
            "scan" | "all" => Ok(SeedStrategy::Scan),
            other => Err(anyhow::anyhow!("unknown seed strategy '{}'", other)),
        }
    }
}

pub fn scan_seeds(mask: &SolidsMask) -> Vec<Coord> {
    let mut out = Vec::new();
    for x in 0..mask.width() {
        for y in 0..mask.height() {
            if mask.is_traversable(x, y) {
                out.push(Coord::new(x, y));
            }
        }
    }
    out
}

fn fillable(mask: &SolidsMask, labels: &Grid2<ZoneLabel>, margin: EdgeMargin, c: Coord) -> bool {
    margin.allows(c, mask.width(), mask.height())
        && mask.is_traversable(c.x, c.y)
        && labels.get(c.x, c.y).map(|l| !l.is_zone()).unwrap_or(false)
}

/// Labels each seed's 4-connected component. Seeds on solid or already labeled
/// cells are skipped and do not consume a label.
pub fn label_zones(mask: &SolidsMask, seeds: &[Coord], margin: EdgeMargin) -> ZoneGrid {
    let mut labels = Grid2::filled(mask.width(), mask.height(), ZoneLabel::NONE);
    let mut next = 1u32;
    let mut stack: Vec<Coord> = Vec::new();

    for &seed in seeds {
        if !fillable(mask, &labels, margin, seed) {
            continue;
        }
        let label = ZoneLabel(next);
        next += 1;
        labels.set(seed.x, seed.y, label);
        stack.push(seed);
        while let Some(cur) = stack.pop() {
            for n in cardinal_neighbors(cur) {
                if fillable(mask, &labels, margin, n) {
                    labels.set(n.x, n.y, label);
                    stack.push(n);
                }
            }
        }
    }

    log::debug!("[zone_labeler] seeds={} labels={}", seeds.len(), next - 1);
    ZoneGrid { labels, label_count: next - 1 }
}
