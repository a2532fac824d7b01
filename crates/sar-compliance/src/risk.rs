//! Risk Assessment
//!
//! Likelihood and impact are both taken from finding severity, so a risk
//! score is the square of the severity weight. The bucket boundaries below
//! are what downstream consumers rely on.

use crate::findings::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// Number of critical entries the matrix tolerates before the overall level
/// becomes critical
const CRITICAL_ENTRY_LIMIT: usize = 5;
/// Number of high entries tolerated before the overall level becomes high
const HIGH_ENTRY_LIMIT: usize = 10;

/// Bucketed risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            20.. => RiskLevel::Critical,
            12..=19 => RiskLevel::High,
            6..=11 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "Critical",
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Severity weight on the 1..=5 likelihood/impact scale
pub fn severity_weight(severity: Severity) -> u8 {
    match severity {
        Severity::Critical => 5,
        Severity::High => 4,
        Severity::Medium => 3,
        Severity::Low => 2,
    }
}

/// One entry per finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMatrixEntry {
    pub finding_id: String,
    pub control_id: String,
    pub likelihood: u8,
    pub impact: u8,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
}

impl RiskMatrixEntry {
    pub fn from_finding(finding: &Finding) -> Self {
        let likelihood = severity_weight(finding.severity);
        let impact = severity_weight(finding.severity);
        let risk_score = likelihood * impact;

        Self {
            finding_id: finding.id.clone(),
            control_id: finding.control_id.clone(),
            likelihood,
            impact,
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
        }
    }
}

/// Templated risk category rolled up from findings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCategory {
    pub name: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub finding_count: usize,
    pub affected_controls: Vec<String>,
    pub mitigation_strategies: Vec<String>,
}

/// Risk summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_risk_level: RiskLevel,
    pub risk_matrix: Vec<RiskMatrixEntry>,
    pub risk_categories: Vec<RiskCategory>,
    pub summary: RiskSummary,
}

/// Which findings a category covers
enum Scope {
    Domains(&'static [&'static str]),
    All,
}

struct CategoryTemplate {
    name: &'static str,
    description: &'static str,
    scope: Scope,
    mitigations: &'static [&'static str],
}

const CATEGORY_TEMPLATES: &[CategoryTemplate] = &[
    CategoryTemplate {
        name: "Data Breach Risk",
        description: "Unauthorized access to controlled information through weak access control or authentication.",
        scope: Scope::Domains(&["AC", "IA"]),
        mitigations: &[
            "Enforce least privilege and review access rights quarterly",
            "Require multi-factor authentication for all remote and privileged access",
        ],
    },
    CategoryTemplate {
        name: "System Integrity Risk",
        description: "Compromise of systems through unprotected boundaries, unpatched flaws or malicious code.",
        scope: Scope::Domains(&["SC", "SI"]),
        mitigations: &[
            "Segment public-facing components from internal networks",
            "Automate patching and malware signature updates",
        ],
    },
    CategoryTemplate {
        name: "Compliance Risk",
        description: "Failure to obtain or retain certification and the contracts that depend on it.",
        scope: Scope::All,
        mitigations: &[
            "Track every open finding to closure against its due date",
            "Maintain an evidence repository for each implemented control",
        ],
    },
];

/// Overall level from the bucketed matrix entries
pub fn overall_risk_level(matrix: &[RiskMatrixEntry]) -> RiskLevel {
    let critical = matrix.iter().filter(|e| e.risk_level == RiskLevel::Critical).count();
    let high = matrix.iter().filter(|e| e.risk_level == RiskLevel::High).count();

    if critical > CRITICAL_ENTRY_LIMIT {
        RiskLevel::Critical
    } else if critical > 0 || high > HIGH_ENTRY_LIMIT {
        RiskLevel::High
    } else if high > 0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn assess_risk(findings: &[Finding]) -> RiskAssessment {
    let risk_matrix: Vec<_> = findings.iter().map(RiskMatrixEntry::from_finding).collect();

    // categories with no findings are omitted
    let risk_categories = CATEGORY_TEMPLATES
        .iter()
        .filter_map(|template| {
            let scoped: Vec<_> = findings
                .iter()
                .zip(&risk_matrix)
                .filter(|(f, _)| match template.scope {
                    Scope::Domains(codes) => codes.contains(&f.domain_code.as_str()),
                    Scope::All => true,
                })
                .collect();
            let risk_level = scoped.iter().map(|(_, e)| e.risk_level).min()?;

            Some(RiskCategory {
                name: template.name.to_string(),
                description: template.description.to_string(),
                risk_level,
                finding_count: scoped.len(),
                affected_controls: scoped.iter().map(|(f, _)| f.control_id.clone()).collect(),
                mitigation_strategies: template.mitigations.iter().map(|m| m.to_string()).collect(),
            })
        })
        .collect();

    let count = |level: RiskLevel| risk_matrix.iter().filter(|e| e.risk_level == level).count();
    let summary = RiskSummary {
        total: risk_matrix.len(),
        critical: count(RiskLevel::Critical),
        high: count(RiskLevel::High),
        medium: count(RiskLevel::Medium),
        low: count(RiskLevel::Low),
    };

    RiskAssessment {
        overall_risk_level: overall_risk_level(&risk_matrix),
        risk_matrix,
        risk_categories,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Priority;
    use crate::findings::{FindingStatus, RemediationEffort};
    use chrono::NaiveDate;

    fn finding(id: usize, code: &str, severity: Severity) -> Finding {
        Finding {
            id: format!("F-{:03}", id),
            control_id: format!("{}.{}", code, id),
            control_title: "c".into(),
            domain: code.into(),
            domain_code: code.into(),
            priority: Priority::High,
            severity,
            compliance_status: FindingStatus::NonCompliant,
            gap_description: String::new(),
            impact_analysis: String::new(),
            remediation_effort: RemediationEffort::High,
            estimated_cost_range: String::new(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            evidence: vec![],
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(RiskLevel::from_score(25), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(20), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(19), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(12), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(11), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(6), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(5), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(1), RiskLevel::Low);
    }

    #[test]
    fn test_matrix_entry_per_severity() {
        let e = RiskMatrixEntry::from_finding(&finding(1, "AC", Severity::Critical));
        assert_eq!((e.likelihood, e.impact, e.risk_score), (5, 5, 25));
        assert_eq!(e.risk_level, RiskLevel::Critical);

        let levels: Vec<_> = [Severity::High, Severity::Medium, Severity::Low]
            .iter()
            .map(|s| RiskMatrixEntry::from_finding(&finding(1, "AC", *s)).risk_level)
            .collect();
        assert_eq!(levels, vec![RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]);
    }

    #[test]
    fn test_overall_level_critical_threshold() {
        let five: Vec<_> = (0..5).map(|i| finding(i, "AC", Severity::Critical)).collect();
        assert_eq!(assess_risk(&five).overall_risk_level, RiskLevel::High);

        let six: Vec<_> = (0..6).map(|i| finding(i, "AC", Severity::Critical)).collect();
        assert_eq!(assess_risk(&six).overall_risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_overall_level_high_counts() {
        let ten: Vec<_> = (0..10).map(|i| finding(i, "SC", Severity::High)).collect();
        assert_eq!(assess_risk(&ten).overall_risk_level, RiskLevel::Medium);

        let eleven: Vec<_> = (0..11).map(|i| finding(i, "SC", Severity::High)).collect();
        assert_eq!(assess_risk(&eleven).overall_risk_level, RiskLevel::High);

        let medium = vec![finding(1, "PE", Severity::Medium)];
        assert_eq!(assess_risk(&medium).overall_risk_level, RiskLevel::Low);
        assert_eq!(assess_risk(&[]).overall_risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_categories_scoped_by_domain() {
        let findings = vec![
            finding(1, "AC", Severity::High),
            finding(2, "PE", Severity::Medium),
        ];
        let risk = assess_risk(&findings);
        let names: Vec<_> = risk.risk_categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Data Breach Risk", "Compliance Risk"]);

        let breach = &risk.risk_categories[0];
        assert_eq!(breach.affected_controls, vec!["AC.1".to_string()]);
        assert_eq!(breach.risk_level, RiskLevel::High);
        assert_eq!(risk.risk_categories[1].finding_count, 2);
        assert_eq!(risk.summary.total, 2);
        assert_eq!(risk.summary.medium, 1);
    }
}
