//! Executive summary

use crate::domains::DomainAnalysis;
use crate::findings::{Finding, Severity};
use serde::{Deserialize, Serialize};

const MAX_KEY_ITEMS: usize = 5;
const STRENGTH_THRESHOLD: f64 = 90.0;
const WEAKNESS_THRESHOLD: f64 = 70.0;

/// Organization-wide compliance classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceLevel {
    Level2,
    Level1,
    NonCompliant,
}

impl ComplianceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            ComplianceLevel::Level2
        } else if score >= 80.0 {
            ComplianceLevel::Level1
        } else {
            ComplianceLevel::NonCompliant
        }
    }
}

impl std::fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            ComplianceLevel::Level2 => "Level 2",
            ComplianceLevel::Level1 => "Level 1",
            ComplianceLevel::NonCompliant => "Non-Compliant",
        })
    }
}

/// Headline numbers for the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub overall_score: f64,
    pub compliance_level: ComplianceLevel,
    pub total_controls: usize,
    pub compliant_controls: usize,
    pub partial_controls: usize,
    pub non_compliant_controls: usize,
    pub not_applicable_controls: usize,
    pub total_findings: usize,
    pub critical_findings: usize,
    pub high_findings: usize,
    pub medium_findings: usize,
    pub low_findings: usize,
    pub key_strengths: Vec<String>,
    pub key_weaknesses: Vec<String>,
    pub readiness_assessment: String,
    pub estimated_remediation_time: String,
}

/// Mean of domain scores; every domain weighs the same
pub fn mean_domain_score(domains: &[DomainAnalysis]) -> f64 {
    if domains.is_empty() {
        return 0.0;
    }
    domains.iter().map(|d| d.overall_score).sum::<f64>() / domains.len() as f64
}

pub(crate) fn count_severity(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity == severity).count()
}

/// Narrative readiness statement
pub fn readiness_statement(score: f64, critical: usize, high: usize) -> &'static str {
    if score >= 95.0 && critical == 0 {
        "Ready for a formal certification assessment."
    } else if score >= 85.0 && critical == 0 && high <= 3 {
        "Near ready; close the remaining high-severity gaps before scheduling an assessment."
    } else if score >= 70.0 {
        "Substantial remediation is required before a certification assessment."
    } else {
        "Not ready; foundational controls are missing."
    }
}

/// Rough time needed to close the open gaps
pub fn remediation_time(score: f64, critical: usize, high: usize) -> &'static str {
    if critical == 0 && high == 0 {
        if score >= 95.0 {
            "Under 1 month"
        } else {
            "1-3 months"
        }
    } else if critical <= 2 && high <= 5 {
        "3-6 months"
    } else if critical <= 5 {
        "6-12 months"
    } else {
        "12+ months"
    }
}

pub fn summarize(findings: &[Finding], domains: &[DomainAnalysis]) -> ExecutiveSummary {
    let overall_score = mean_domain_score(domains);
    let critical = count_severity(findings, Severity::Critical);
    let high = count_severity(findings, Severity::High);

    let mut strong: Vec<_> = domains
        .iter()
        .filter(|d| !d.no_applicable_controls && d.overall_score >= STRENGTH_THRESHOLD)
        .collect();
    strong.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
    let mut weak: Vec<_> = domains
        .iter()
        .filter(|d| d.overall_score < WEAKNESS_THRESHOLD)
        .collect();
    weak.sort_by(|a, b| a.overall_score.total_cmp(&b.overall_score));

    ExecutiveSummary {
        overall_score,
        compliance_level: ComplianceLevel::from_score(overall_score),
        total_controls: domains.iter().map(|d| d.total_controls).sum(),
        compliant_controls: domains.iter().map(|d| d.compliant).sum(),
        partial_controls: domains.iter().map(|d| d.partial).sum(),
        non_compliant_controls: domains.iter().map(|d| d.non_compliant).sum(),
        not_applicable_controls: domains.iter().map(|d| d.not_applicable).sum(),
        total_findings: findings.len(),
        critical_findings: critical,
        high_findings: high,
        medium_findings: count_severity(findings, Severity::Medium),
        low_findings: count_severity(findings, Severity::Low),
        key_strengths: strong
            .iter()
            .take(MAX_KEY_ITEMS)
            .map(|d| format!("{}: {:.1}% compliant", d.domain, d.overall_score))
            .collect(),
        key_weaknesses: weak
            .iter()
            .take(MAX_KEY_ITEMS)
            .map(|d| format!("{}: {:.1}% compliant", d.domain, d.overall_score))
            .collect(),
        readiness_assessment: readiness_statement(overall_score, critical, high).to_string(),
        estimated_remediation_time: remediation_time(overall_score, critical, high).to_string(),
    }
}
