pub mod check;
pub mod map;
pub mod play;

use std::fs;
use std::path::Path;

use cog_core::{World, WorldDef};

/// The built-in city, embedded so `cog play` works with no arguments.
const BUILTIN_WORLD: &str = include_str!("../../content/alpha_city.json");

/// Load and build a world from a content file, or the built-in city.
fn load_world(path: Option<&Path>) -> Result<World, String> {
    let text = match path {
        Some(p) => {
            fs::read_to_string(p).map_err(|e| format!("cannot read {}: {e}", p.display()))?
        }
        None => BUILTIN_WORLD.to_string(),
    };

    WorldDef::from_json(&text)
        .and_then(WorldDef::build)
        .map_err(|e| format!("invalid world content: {e}"))
}
