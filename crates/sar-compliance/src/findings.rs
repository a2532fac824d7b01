//! Finding extraction
//!
//! Walks the catalogue against an assessment and emits one [`Finding`] per
//! control that is not fully compliant.

use crate::assessment::{Answer, AssessmentRecord};
use crate::catalogue::{Catalogue, Priority};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Finding severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Severity from the (priority, status) rule table
    pub fn classify(priority: Priority, status: FindingStatus) -> Self {
        match (status, priority) {
            (FindingStatus::NonCompliant, Priority::Critical) => Severity::Critical,
            (FindingStatus::NonCompliant, Priority::High) => Severity::High,
            (FindingStatus::NonCompliant, _) => Severity::Medium,
            (FindingStatus::PartiallyCompliant, Priority::Critical) => Severity::High,
            (FindingStatus::PartiallyCompliant, _) => Severity::Medium,
        }
    }

    /// Days allowed to close a finding of this severity
    pub fn remediation_window(&self) -> Duration {
        match self {
            Severity::Critical => Duration::days(30),
            Severity::High => Duration::days(60),
            Severity::Medium => Duration::days(90),
            Severity::Low => Duration::days(180),
        }
    }

    pub fn effort(&self) -> RemediationEffort {
        match self {
            Severity::Critical | Severity::High => RemediationEffort::High,
            Severity::Medium => RemediationEffort::Medium,
            Severity::Low => RemediationEffort::Low,
        }
    }

    pub fn cost_range(&self) -> &'static str {
        match self {
            Severity::Critical => "$25,000 - $50,000",
            Severity::High => "$10,000 - $25,000",
            Severity::Medium => "$5,000 - $10,000",
            Severity::Low => "$1,000 - $5,000",
        }
    }

    fn impact(&self) -> &'static str {
        match self {
            Severity::Critical => {
                "Directly exposes controlled information; blocks certification until resolved."
            }
            Severity::High => {
                "Materially weakens the security posture and will be cited by an assessor."
            }
            Severity::Medium => "Reduces defense in depth; expected to be noted as a deficiency.",
            Severity::Low => "Minor documentation or process gap with limited exposure.",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Compliance status of a gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingStatus {
    NonCompliant,
    PartiallyCompliant,
}

impl FindingStatus {
    /// Status for an answer, `None` when the answer produces no finding
    pub fn from_answer(answer: Answer) -> Option<Self> {
        match answer {
            Answer::No => Some(FindingStatus::NonCompliant),
            Answer::Partial => Some(FindingStatus::PartiallyCompliant),
            Answer::Yes | Answer::NotApplicable => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FindingStatus::NonCompliant => "Non-Compliant",
            FindingStatus::PartiallyCompliant => "Partially Compliant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationEffort {
    Low,
    Medium,
    High,
}

/// Gap record for one control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub control_id: String,
    pub control_title: String,
    pub domain: String,
    pub domain_code: String,
    pub priority: Priority,
    pub severity: Severity,
    pub compliance_status: FindingStatus,
    pub gap_description: String,
    pub impact_analysis: String,
    pub remediation_effort: RemediationEffort,
    pub estimated_cost_range: String,
    pub due_date: NaiveDate,
    pub evidence: Vec<String>,
}

/// Extract findings, ordered by severity then catalogue order
pub fn extract_findings(
    catalogue: &Catalogue,
    assessment: &AssessmentRecord,
    now: DateTime<Utc>,
) -> Vec<Finding> {
    let mut findings: Vec<Finding> = catalogue
        .controls()
        .filter_map(|(section, control)| {
            let status = FindingStatus::from_answer(assessment.answer(&control.id))?;
            let severity = Severity::classify(control.priority, status);
            let gap_description = match status {
                FindingStatus::NonCompliant => {
                    format!("{} ({}) is not implemented.", control.id, control.title)
                }
                FindingStatus::PartiallyCompliant => {
                    format!("{} ({}) is only partially implemented.", control.id, control.title)
                }
            };

            Some(Finding {
                id: String::new(),
                control_id: control.id.clone(),
                control_title: control.title.clone(),
                domain: section.name.clone(),
                domain_code: section.code.clone(),
                priority: control.priority,
                severity,
                compliance_status: status,
                gap_description,
                impact_analysis: severity.impact().to_string(),
                remediation_effort: severity.effort(),
                estimated_cost_range: severity.cost_range().to_string(),
                due_date: (now + severity.remediation_window()).date_naive(),
                evidence: assessment.evidence_for(&control.id).to_vec(),
            })
        })
        .collect();

    // stable: ties keep traversal order
    findings.sort_by_key(|f| f.severity);
    for (i, finding) in findings.iter_mut().enumerate() {
        finding.id = format!("F-{:03}", i + 1);
    }

    tracing::debug!("Extracted {} findings", findings.len());
    findings
}
