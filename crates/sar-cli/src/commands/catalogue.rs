//! Catalogue commands

use anyhow::Result;
use std::path::Path;

pub fn handle(path: Option<&Path>, list: bool) -> Result<()> {
    let catalogue = super::load_catalogue(path)?;
    println!(
        "{} {}: {} sections, {} controls",
        catalogue.name(),
        catalogue.version(),
        catalogue.sections().len(),
        catalogue.control_count()
    );

    for section in catalogue.sections() {
        println!("  {:<4} {:<40} {:>3}", section.code, section.name, section.control_count());
        if list {
            for control in section.controls() {
                println!("       {:<16} {:<9} {}", control.id, control.priority, control.title);
            }
        }
    }
    Ok(())
}
