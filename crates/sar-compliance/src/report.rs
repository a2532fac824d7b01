//! Report assembly

use crate::assessment::{AssessmentRecord, AssessorInfo};
use crate::catalogue::Catalogue;
use crate::domains::DomainAnalysis;
use crate::findings::Finding;
use crate::readiness::ComplianceStatus;
use crate::remediation::{NextStep, Recommendation};
use crate::risk::RiskAssessment;
use crate::summary::ExecutiveSummary;
use crate::ComplianceResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const DEFAULT_TITLE: &str = "Security Self-Assessment Report";
const DEFAULT_SCOPE: &str = "All systems processing controlled information";

/// Caller-supplied metadata for one report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub assessor: AssessorInfo,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl ReportRequest {
    pub fn new(assessor: AssessorInfo) -> Self {
        Self {
            assessor,
            title: None,
            scope: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }
}

/// Static or index-style supplementary section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appendix {
    pub title: String,
    pub content: String,
}

/// Complete self-assessment report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub assessor: AssessorInfo,
    pub scope: String,
    pub framework: String,
    pub assessment_id: Option<String>,
    pub assessment_date: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub executive_summary: ExecutiveSummary,
    pub domain_analyses: Vec<DomainAnalysis>,
    pub findings: Vec<Finding>,
    pub risk_assessment: RiskAssessment,
    pub recommendations: Vec<Recommendation>,
    pub compliance_status: ComplianceStatus,
    pub next_steps: Vec<NextStep>,
    pub appendices: Vec<Appendix>,
}

impl Report {
    /// Hex SHA-256 over the report's JSON form
    pub fn fingerprint(&self) -> ComplianceResult<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    pub fn to_json(&self) -> ComplianceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn finding(&self, id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.id == id)
    }
}

/// Pipeline outputs handed to [`assemble`]
pub(crate) struct Sections {
    pub executive_summary: ExecutiveSummary,
    pub domain_analyses: Vec<DomainAnalysis>,
    pub findings: Vec<Finding>,
    pub risk_assessment: RiskAssessment,
    pub recommendations: Vec<Recommendation>,
    pub compliance_status: ComplianceStatus,
    pub next_steps: Vec<NextStep>,
}

pub(crate) fn assemble(
    catalogue: &Catalogue,
    assessment: &AssessmentRecord,
    request: &ReportRequest,
    sections: Sections,
    now: DateTime<Utc>,
) -> Report {
    let appendices = appendices(catalogue, assessment);

    Report {
        id: format!("sar-{}", now.timestamp_millis()),
        title: request.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        organization: request.assessor.organization.clone(),
        assessor: request.assessor.clone(),
        scope: request.scope.clone().unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
        framework: format!("{} {}", catalogue.name(), catalogue.version()).trim().to_string(),
        assessment_id: assessment.id.clone(),
        assessment_date: assessment.assessed_at().unwrap_or(now),
        generated_at: now,
        executive_summary: sections.executive_summary,
        domain_analyses: sections.domain_analyses,
        findings: sections.findings,
        risk_assessment: sections.risk_assessment,
        recommendations: sections.recommendations,
        compliance_status: sections.compliance_status,
        next_steps: sections.next_steps,
        appendices,
    }
}

fn appendices(catalogue: &Catalogue, assessment: &AssessmentRecord) -> Vec<Appendix> {
    let mut appendices = vec![
        Appendix {
            title: "Methodology".to_string(),
            content: "Each control in the framework catalogue was answered as implemented, \
                partially implemented, not implemented or not applicable. Unanswered controls \
                are treated as not implemented. Every control that is not fully implemented \
                produces one finding."
                .to_string(),
        },
        Appendix {
            title: "Scoring Model".to_string(),
            content: "Domain score = 100 x (implemented + 0.5 x partial) / applicable controls. \
                Not-applicable controls are excluded; a domain with no applicable controls \
                scores 100. The overall score is the unweighted mean of domain scores. \
                Maturity: 5 at 95+, 4 at 85+, 3 at 70+, 2 at 50+, otherwise 1."
                .to_string(),
        },
        Appendix {
            title: "Severity Definitions".to_string(),
            content: "Critical: critical-priority control not implemented (30-day target). \
                High: high-priority control not implemented, or critical-priority control \
                partially implemented (60 days). Medium: any other gap (90 days). \
                Low: minor gap (180 days)."
                .to_string(),
        },
    ];

    let evidence: Vec<_> = catalogue
        .controls()
        .filter_map(|(_, control)| {
            let labels = assessment.evidence_for(&control.id);
            (!labels.is_empty()).then(|| format!("{}: {}", control.id, labels.join(", ")))
        })
        .collect();
    if !evidence.is_empty() {
        appendices.push(Appendix {
            title: "Evidence Index".to_string(),
            content: evidence.join("\n"),
        });
    }

    appendices
}
