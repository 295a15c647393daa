//! Validate a world content file.

use std::path::Path;

pub fn run(file: &Path) -> Result<(), String> {
    let world = super::load_world(Some(file))?;

    println!("  All checks passed for '{}'.", file.display());
    println!(
        "  {} locations, {} robots",
        world.location_count(),
        world.character_count()
    );

    Ok(())
}
