use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const AIR: u16 = 0;
pub const DIRT: u16 = 1;
pub const STONE: u16 = 2;
pub const PLATFORM: u16 = 3;
pub const CLOSED_DOOR: u16 = 4;
pub const CHEST: u16 = 5;
pub const TORCH: u16 = 6;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TileKind {
    #[serde(default)]
    pub solid: bool,
    #[serde(default)]
    pub solid_top: bool,
    #[serde(default)]
    pub frame_important: bool,
}

/// Per tile-type flags; unknown types are treated as non-solid and freely removable.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TileCatalog {
    pub kinds: BTreeMap<u16, TileKind>,
    pub closed_door: u16,
}

impl Default for TileCatalog {
    fn default() -> Self {
        let mut kinds = BTreeMap::new();
        kinds.insert(DIRT, TileKind { solid: true, ..Default::default() });
        kinds.insert(STONE, TileKind { solid: true, ..Default::default() });
        kinds.insert(PLATFORM, TileKind { solid: true, solid_top: true, frame_important: true });
        kinds.insert(CLOSED_DOOR, TileKind { solid: true, frame_important: true, ..Default::default() });
        kinds.insert(CHEST, TileKind { frame_important: true, ..Default::default() });
        kinds.insert(TORCH, TileKind { frame_important: true, ..Default::default() });
        Self { kinds, closed_door: CLOSED_DOOR }
    }
}

impl TileCatalog {
    pub fn kind(&self, id: u16) -> TileKind {
        self.kinds.get(&id).copied().unwrap_or_default()
    }

    /// Blocks player movement: solid, not a platform, not the door.
    pub fn blocks_movement(&self, tile: &Tile) -> bool {
        if !tile.active || tile.kind == self.closed_door {
            return false;
        }
        let k = self.kind(tile.kind);
        k.solid && !k.solid_top
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub active: bool,
    pub kind: u16,
    pub wall: u16,
    pub liquid: u8,
}

impl Tile {
    pub fn block(kind: u16) -> Self {
        Self { active: true, kind, ..Default::default() }
    }
}

/// Full-resolution tile grid owned by the generation run.
#[derive(Clone, Debug)]
pub struct World {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    pub catalog: TileCatalog,
}

impl World {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width as usize * height as usize],
            catalog: TileCatalog::default(),
        }
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        if !self.in_bounds(x, y) { return None; }
        self.tiles.get(y as usize * self.width as usize + x as usize)
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if !self.in_bounds(x, y) { return None; }
        let w = self.width as usize;
        self.tiles.get_mut(y as usize * w + x as usize)
    }

    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = tile;
        }
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map(|t| self.catalog.blocks_movement(t)).unwrap_or(false)
    }

    pub fn is_frame_important(&self, x: i32, y: i32) -> bool {
        self.get(x, y)
            .map(|t| t.active && self.catalog.kind(t.kind).frame_important)
            .unwrap_or(false)
    }

    /// Removes tile content; wall and liquid stay. Returns true when something was removed.
    pub fn clear_tile(&mut self, x: i32, y: i32) -> bool {
        match self.get_mut(x, y) {
            Some(t) if t.active => {
                t.active = false;
                t.kind = AIR;
                true
            }
            _ => false,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

/// On-disk world snapshot: one string per row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldFile {
    pub rows: Vec<String>,
    #[serde(default)]
    pub points_of_interest: Vec<(i32, i32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<TileCatalog>,
    /// Wall ids by row, only written when any wall is set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<Vec<u16>>,
}

fn tile_from_char(c: char) -> Option<Tile> {
    Some(match c {
        '.' | ' ' => Tile::default(),
        '#' => Tile::block(STONE),
        'd' => Tile::block(DIRT),
        '=' => Tile::block(PLATFORM),
        'D' => Tile::block(CLOSED_DOOR),
        'C' => Tile::block(CHEST),
        'T' => Tile::block(TORCH),
        _ => return None,
    })
}

fn char_from_tile(t: &Tile) -> char {
    if !t.active { return '.'; }
    match t.kind {
        DIRT => 'd',
        PLATFORM => '=',
        CLOSED_DOOR => 'D',
        CHEST => 'C',
        TORCH => 'T',
        _ => '#',
    }
}

impl WorldFile {
    pub fn into_world(self) -> Result<(World, Vec<(i32, i32)>)> {
        let height = self.rows.len() as i32;
        let width = self.rows.first().map(|r| r.chars().count()).unwrap_or(0) as i32;
        let mut world = World::new(width, height);
        if let Some(catalog) = self.catalog {
            world.catalog = catalog;
        }
        for (y, row) in self.rows.iter().enumerate() {
            if row.chars().count() as i32 != width {
                bail!("row {} has {} tiles, expected {}", y, row.chars().count(), width);
            }
            for (x, c) in row.chars().enumerate() {
                let tile = tile_from_char(c)
                    .ok_or_else(|| anyhow!("unknown tile '{}' at ({}, {})", c, x, y))?;
                world.set(x as i32, y as i32, tile);
            }
        }
        for (y, row) in self.walls.iter().enumerate() {
            for (x, &wall) in row.iter().enumerate() {
                if let Some(t) = world.get_mut(x as i32, y as i32) {
                    t.wall = wall;
                }
            }
        }
        Ok((world, self.points_of_interest))
    }

    pub fn from_world(world: &World, points_of_interest: &[(i32, i32)]) -> Self {
        let mut rows = Vec::with_capacity(world.height() as usize);
        let mut walls = Vec::with_capacity(world.height() as usize);
        let mut any_wall = false;
        for y in 0..world.height() {
            let mut row = String::with_capacity(world.width() as usize);
            let mut wrow = Vec::with_capacity(world.width() as usize);
            for x in 0..world.width() {
                let t = world.get(x, y).copied().unwrap_or_default();
                row.push(char_from_tile(&t));
                any_wall |= t.wall != 0;
                wrow.push(t.wall);
            }
            rows.push(row);
            walls.push(wrow);
        }
        let catalog = if world.catalog == TileCatalog::default() { None } else { Some(world.catalog.clone()) };
        Self {
            rows,
            points_of_interest: points_of_interest.to_vec(),
            catalog,
            walls: if any_wall { walls } else { Vec::new() },
        }
    }
}

pub fn load_world<P: AsRef<Path>>(path: P) -> Result<(World, Vec<(i32, i32)>)> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading world file {}", path.display()))?;
    let file: WorldFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing world file {}", path.display()))?;
    file.into_world()
}

pub fn save_world<P: AsRef<Path>>(path: P, world: &World, points_of_interest: &[(i32, i32)]) -> Result<()> {
    let path = path.as_ref();
    let file = WorldFile::from_world(world, points_of_interest);
    let text = serde_json::to_string_pretty(&file)?;
    fs::write(path, text).with_context(|| format!("writing world file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn solidity_excludes_doors_and_platforms() {
        let mut w = World::new(4, 1);
        w.set(0, 0, Tile::block(STONE));
        w.set(1, 0, Tile::block(PLATFORM));
        w.set(2, 0, Tile::block(CLOSED_DOOR));
        w.set(3, 0, Tile::block(CHEST));
        assert!(w.is_solid(0, 0));
        assert!(!w.is_solid(1, 0));
        assert!(!w.is_solid(2, 0));
        assert!(!w.is_solid(3, 0));
        assert!(!w.is_solid(9, 0));
        assert!(w.is_frame_important(3, 0));
        assert!(!w.is_frame_important(0, 0));
    }

    #[test]
    fn clear_tile_keeps_wall() {
        let mut w = World::new(1, 1);
        w.set(0, 0, Tile { active: true, kind: STONE, wall: 9, liquid: 0 });
        assert!(w.clear_tile(0, 0));
        assert!(!w.clear_tile(0, 0));
        let t = w.get(0, 0).unwrap();
        assert!(!t.active);
        assert_eq!(t.wall, 9);
    }

    #[test]
    fn world_file_rejects_ragged_rows() {
        let f = WorldFile { rows: vec!["##".into(), "#".into()], points_of_interest: vec![], catalog: None, walls: vec![] };
        assert!(f.into_world().is_err());
    }

    #[test]
    fn world_file_save_and_load() -> Result<()> {
        let tmp = NamedTempFile::new()?;
        let mut w = World::new(3, 2);
        w.set(0, 0, Tile::block(STONE));
        w.set(2, 1, Tile { active: true, kind: CHEST, wall: 4, liquid: 0 });
        save_world(tmp.path(), &w, &[(1, 1)])?;
        let (loaded, poi) = load_world(tmp.path())?;
        assert_eq!(poi, vec![(1, 1)]);
        assert_eq!(loaded.tiles(), w.tiles());
        Ok(())
    }
}
