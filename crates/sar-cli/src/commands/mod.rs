//! CLI Commands

pub mod catalogue;
pub mod config;
pub mod generate;
pub mod summary;

use anyhow::{Context, Result};
use sar_compliance::{frameworks, AssessmentRecord, Catalogue};
use std::path::Path;

/// Catalogue from a JSON file, or the built-in CMMC Level 1 practices
pub fn load_catalogue(path: Option<&Path>) -> Result<Catalogue> {
    let catalogue = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalogue {}", path.display()))?;
            Catalogue::from_json(&json)
                .with_context(|| format!("invalid catalogue {}", path.display()))?
        }
        None => frameworks::cmmc_level1()?,
    };
    tracing::debug!(
        "Using catalogue {} {} ({} controls)",
        catalogue.name(),
        catalogue.version(),
        catalogue.control_count()
    );
    Ok(catalogue)
}

pub fn load_assessment(path: &Path) -> Result<AssessmentRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading assessment {}", path.display()))?;
    let record = AssessmentRecord::from_json(&json)
        .with_context(|| format!("invalid assessment {}", path.display()))?;
    Ok(record)
}
