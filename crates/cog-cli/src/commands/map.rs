//! Tabular listing of every location in the world.

use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(world_file: Option<&Path>) -> Result<(), String> {
    let world = super::load_world(world_file)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Location", "District", "City", "Exits", "Robots", "Station",
    ]);

    for (_, city) in world.cities() {
        for (_, district) in city.districts() {
            for location in district.locations() {
                let exits = location
                    .connections
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                let robots = location
                    .occupants
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let station = if !location.is_station {
                    "—".to_string()
                } else if location.is_unlocked() {
                    "operational".to_string()
                } else {
                    "locked".to_string()
                };

                table.add_row(vec![
                    location.name.clone(),
                    district.name().to_string(),
                    city.name().to_string(),
                    if exits.is_empty() { "—".to_string() } else { exits },
                    if robots.is_empty() { "—".to_string() } else { robots },
                    station,
                ]);
            }
        }
    }

    println!("{table}");
    println!();
    println!("  {} locations", world.location_count());

    Ok(())
}
