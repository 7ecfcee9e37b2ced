use std::path::{Path, PathBuf};

pub const CONNECTED_SUFFIX: &str = "connected";

/// `caves.json` -> `caves.connected.json`, next to the input.
pub fn default_out_path(world: &Path) -> PathBuf {
    let stem = world
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "world".to_string());
    world.with_file_name(format!("{}.{}.json", stem, CONNECTED_SUFFIX))
}
