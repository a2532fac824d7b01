//! Output formatting

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use sar_compliance::{ComplianceLevel, DomainAnalysis, Report};
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Text,
    Json,
}

impl OutputFormat {
    pub fn render(&self, report: &Report) -> Result<String> {
        let rendered = match self {
            OutputFormat::Html => sar_compliance::render_html(report)?,
            OutputFormat::Text => sar_compliance::render_plain_text(report)?,
            OutputFormat::Json => report.to_json()?,
        };
        Ok(rendered)
    }
}

/// Write to a file, or stdout when no path is given
pub fn emit(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Maturity")]
    maturity: u8,
    #[tabled(rename = "Yes")]
    compliant: usize,
    #[tabled(rename = "Partial")]
    partial: usize,
    #[tabled(rename = "No")]
    non_compliant: usize,
    #[tabled(rename = "N/A")]
    not_applicable: usize,
}

pub fn domain_table(domains: &[DomainAnalysis]) -> String {
    let rows = domains.iter().map(|d| DomainRow {
        code: d.code.clone(),
        domain: d.domain.clone(),
        score: format!("{:.1}%", d.overall_score),
        maturity: d.maturity_level,
        compliant: d.compliant,
        partial: d.partial,
        non_compliant: d.non_compliant,
        not_applicable: d.not_applicable,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn level_badge(level: ComplianceLevel) -> String {
    let text = level.to_string();
    match level {
        ComplianceLevel::Level2 => text.green().bold().to_string(),
        ComplianceLevel::Level1 => text.yellow().bold().to_string(),
        ComplianceLevel::NonCompliant => text.red().bold().to_string(),
    }
}
