//! Terminal summary

use crate::config::Config;
use crate::output;
use anyhow::{Context, Result};
use sar_compliance::{AssessorInfo, ReportEngine, ReportRequest};
use std::path::Path;

/// Stands in for assessor fields the config leaves blank
const UNATTRIBUTED: &str = "Self-assessment";

pub fn handle(assessment: &Path, catalogue: Option<&Path>, config: &Config) -> Result<()> {
    let catalogue_path = catalogue
        .map(Path::to_path_buf)
        .or_else(|| config.report.catalogue.clone());
    let catalogue = super::load_catalogue(catalogue_path.as_deref())?;
    let assessment = super::load_assessment(assessment)?;

    let engine = ReportEngine::new(catalogue);
    let report = engine
        .generate(&assessment, &summary_request(config))
        .context("summary failed")?;
    let summary = &report.executive_summary;

    println!("{}", report.framework);
    println!("{}", output::domain_table(&report.domain_analyses));
    println!();
    println!(
        "Overall: {:.1}%  Level: {}  Risk: {}",
        summary.overall_score,
        output::level_badge(summary.compliance_level),
        report.risk_assessment.overall_risk_level
    );
    println!(
        "Findings: {} (critical {}, high {}, medium {}, low {})",
        summary.total_findings,
        summary.critical_findings,
        summary.high_findings,
        summary.medium_findings,
        summary.low_findings
    );
    println!("Readiness: {}", summary.readiness_assessment);
    println!("Estimated remediation: {}", summary.estimated_remediation_time);
    Ok(())
}

fn summary_request(config: &Config) -> ReportRequest {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNATTRIBUTED)
            .to_string()
    };
    ReportRequest::new(AssessorInfo {
        name: field(&config.assessor.name),
        organization: field(&config.assessor.organization),
        credentials: config.assessor.credentials.clone(),
        contact_info: config.assessor.contact_info.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_request_without_assessor_config() {
        let request = summary_request(&Config::default());
        assert!(request.assessor.validate().is_ok());
        assert_eq!(request.assessor.name, UNATTRIBUTED);
    }

    #[test]
    fn test_summary_request_uses_configured_assessor() {
        let mut config = Config::template();
        config.assessor.organization = Some("  ".into());
        let request = summary_request(&config);
        assert_eq!(request.assessor.name, "Assessor Name");
        assert_eq!(request.assessor.organization, UNATTRIBUTED);
    }
}
