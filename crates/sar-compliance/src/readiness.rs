//! Certification readiness

use crate::domains::DomainAnalysis;
use crate::findings::{Finding, Severity};
use crate::remediation::group_thousands;
use crate::summary::{count_severity, mean_domain_score};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CertificationReadiness {
    Ready,
    NearReady,
    SignificantWorkNeeded,
    NotReady,
}

impl CertificationReadiness {
    pub fn classify(score: f64, critical: usize, high: usize) -> Self {
        if score >= 95.0 && critical == 0 {
            CertificationReadiness::Ready
        } else if score >= 85.0 && critical == 0 && high <= 3 {
            CertificationReadiness::NearReady
        } else if score >= 70.0 {
            CertificationReadiness::SignificantWorkNeeded
        } else {
            CertificationReadiness::NotReady
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CertificationReadiness::Ready => "Ready",
            CertificationReadiness::NearReady => "Near Ready",
            CertificationReadiness::SignificantWorkNeeded => "Significant Work Needed",
            CertificationReadiness::NotReady => "Not Ready",
        }
    }
}

/// Readiness for external certification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatus {
    pub current_readiness: f64,
    pub certification_readiness: CertificationReadiness,
    pub critical_gaps: usize,
    pub high_gaps: usize,
    pub medium_gaps: usize,
    pub low_gaps: usize,
    pub time_to_readiness: String,
    pub estimated_investment: u64,
    pub required_investment: String,
}

/// USD budgeted per open finding
pub fn severity_investment(severity: Severity) -> u64 {
    match severity {
        Severity::Critical => 30_000,
        Severity::High => 15_000,
        Severity::Medium => 7_500,
        Severity::Low => 0,
    }
}

/// Effort weeks per open finding
fn severity_weeks(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 4,
        Severity::High => 2,
        Severity::Medium => 1,
        Severity::Low => 0,
    }
}

pub fn investment_range(total: u64) -> String {
    match total {
        0 => "$0".to_string(),
        t if t < 25_000 => "Under $25,000".to_string(),
        t if t < 100_000 => "$25,000 - $100,000".to_string(),
        t if t < 250_000 => "$100,000 - $250,000".to_string(),
        t => format!("Over $250,000 (est. ${})", group_thousands(t)),
    }
}

pub fn time_to_readiness(weeks: u32) -> &'static str {
    match weeks {
        0 => "Ready now",
        1..=4 => "Under 1 month",
        5..=12 => "1-3 months",
        13..=26 => "3-6 months",
        27..=52 => "6-12 months",
        _ => "12+ months",
    }
}

pub fn evaluate_readiness(findings: &[Finding], domains: &[DomainAnalysis]) -> ComplianceStatus {
    let current_readiness = mean_domain_score(domains);
    let critical_gaps = count_severity(findings, Severity::Critical);
    let high_gaps = count_severity(findings, Severity::High);
    let estimated_investment = findings.iter().map(|f| severity_investment(f.severity)).sum();
    let weeks = findings.iter().map(|f| severity_weeks(f.severity)).sum();

    ComplianceStatus {
        current_readiness,
        certification_readiness: CertificationReadiness::classify(
            current_readiness,
            critical_gaps,
            high_gaps,
        ),
        critical_gaps,
        high_gaps,
        medium_gaps: count_severity(findings, Severity::Medium),
        low_gaps: count_severity(findings, Severity::Low),
        time_to_readiness: time_to_readiness(weeks).to_string(),
        estimated_investment,
        required_investment: investment_range(estimated_investment),
    }
}
