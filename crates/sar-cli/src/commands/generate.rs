//! Report generation command

use crate::config::Config;
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use sar_compliance::{AssessorInfo, ReportEngine, ReportRequest};
use std::path::PathBuf;

pub struct Args {
    pub assessment: PathBuf,
    pub catalogue: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub assessor_name: Option<String>,
    pub organization: Option<String>,
    pub title: Option<String>,
    pub scope: Option<String>,
}

pub fn handle(args: Args, config: &Config) -> Result<()> {
    let catalogue_path = args.catalogue.clone().or_else(|| config.report.catalogue.clone());
    let catalogue = super::load_catalogue(catalogue_path.as_deref())?;
    let assessment = super::load_assessment(&args.assessment)?;

    let request = build_request(&args, config);
    let format = resolve_format(args.format, config)?;

    let engine = ReportEngine::new(catalogue);
    let report = engine
        .generate(&assessment, &request)
        .context("report generation failed")?;
    tracing::info!(
        "Report {} for {}: {:.1}% ({}), {} findings",
        report.id,
        report.organization,
        report.executive_summary.overall_score,
        report.executive_summary.compliance_level,
        report.findings.len()
    );

    let rendered = format.render(&report)?;
    output::emit(&rendered, args.output.as_deref())
}

/// Command-line values win over the config file
fn build_request(args: &Args, config: &Config) -> ReportRequest {
    let assessor = AssessorInfo {
        name: args
            .assessor_name
            .clone()
            .or_else(|| config.assessor.name.clone())
            .unwrap_or_default(),
        organization: args
            .organization
            .clone()
            .or_else(|| config.assessor.organization.clone())
            .unwrap_or_default(),
        credentials: config.assessor.credentials.clone(),
        contact_info: config.assessor.contact_info.clone().unwrap_or_default(),
    };

    ReportRequest {
        assessor,
        title: args.title.clone().or_else(|| config.report.title.clone()),
        scope: args.scope.clone().or_else(|| config.report.scope.clone()),
    }
}

fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> Result<OutputFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match config.report.format.as_deref() {
        None => Ok(OutputFormat::Html),
        Some(name) => <OutputFormat as clap::ValueEnum>::from_str(name, true)
            .map_err(|_| anyhow::anyhow!("unknown report format '{}' in config", name)),
    }
}
