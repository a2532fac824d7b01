//! Remediation planning
//!
//! Recommendations come from critical findings (one each) followed by weak
//! domains (one each), which is already priority order. The scheduler turns
//! the head of that list into a dated action plan.

use crate::domains::DomainAnalysis;
use crate::findings::{Finding, Severity};
use crate::readiness::severity_investment;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Domains scoring below this get a short-term recommendation
const WEAK_DOMAIN_THRESHOLD: f64 = 70.0;
/// Recommendations carried into the action plan
pub const MAX_NEXT_STEPS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationPriority {
    Immediate,
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl RecommendationPriority {
    pub fn phase(&self) -> Phase {
        match self {
            RecommendationPriority::Immediate => Phase::Immediate,
            RecommendationPriority::ShortTerm => Phase::Phase1,
            RecommendationPriority::MediumTerm => Phase::Phase2,
            RecommendationPriority::LongTerm => Phase::Phase3,
        }
    }

    pub fn due_offset(&self) -> Duration {
        match self {
            RecommendationPriority::Immediate => Duration::days(30),
            RecommendationPriority::ShortTerm => Duration::days(90),
            RecommendationPriority::MediumTerm => Duration::days(180),
            RecommendationPriority::LongTerm => Duration::days(365),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationPriority::Immediate => "Immediate",
            RecommendationPriority::ShortTerm => "Short-term",
            RecommendationPriority::MediumTerm => "Medium-term",
            RecommendationPriority::LongTerm => "Long-term",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Immediate,
    #[serde(rename = "phase-1")]
    Phase1,
    #[serde(rename = "phase-2")]
    Phase2,
    #[serde(rename = "phase-3")]
    Phase3,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Phase::Immediate => "immediate",
            Phase::Phase1 => "phase-1",
            Phase::Phase2 => "phase-2",
            Phase::Phase3 => "phase-3",
        })
    }
}

/// Remediation action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub priority: RecommendationPriority,
    pub category: String,
    pub title: String,
    pub description: String,
    pub affected_controls: Vec<String>,
    pub estimated_effort: String,
    pub estimated_cost: String,
    pub expected_benefit: String,
    pub timeline: String,
}

/// Dated step of the action plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    pub id: String,
    pub recommendation_id: String,
    pub action: String,
    pub phase: Phase,
    pub due_date: NaiveDate,
    pub affected_controls: Vec<String>,
}

pub fn plan_recommendations(
    findings: &[Finding],
    domains: &[DomainAnalysis],
) -> Vec<Recommendation> {
    let critical = findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .map(|f| Recommendation {
            id: String::new(),
            priority: RecommendationPriority::Immediate,
            category: f.domain.clone(),
            title: format!("Implement {}: {}", f.control_id, f.control_title),
            description: f.gap_description.clone(),
            affected_controls: vec![f.control_id.clone()],
            estimated_effort: "High".to_string(),
            estimated_cost: f.estimated_cost_range.clone(),
            expected_benefit: "Removes a certification-blocking gap".to_string(),
            timeline: "30 days".to_string(),
        });

    let weak = domains
        .iter()
        .filter(|d| !d.no_applicable_controls && d.overall_score < WEAK_DOMAIN_THRESHOLD)
        .map(|d| {
            let gaps: Vec<_> = findings.iter().filter(|f| f.domain_code == d.code).collect();
            let cost: u64 = gaps.iter().map(|f| severity_investment(f.severity)).sum();
            let effort = match gaps.len() {
                n if n > 5 => "High",
                n if n > 2 => "Medium",
                _ => "Low",
            };

            Recommendation {
                id: String::new(),
                priority: RecommendationPriority::ShortTerm,
                category: d.domain.clone(),
                title: format!("Strengthen the {} program", d.domain),
                description: format!(
                    "{} scores {:.1}% with {} open gaps; remediate them as a coordinated workstream.",
                    d.domain,
                    d.overall_score,
                    gaps.len()
                ),
                affected_controls: gaps.iter().map(|f| f.control_id.clone()).collect(),
                estimated_effort: effort.to_string(),
                estimated_cost: format!("${}", group_thousands(cost)),
                expected_benefit: format!(
                    "Raises {} above the {:.0}% readiness threshold",
                    d.domain, WEAK_DOMAIN_THRESHOLD
                ),
                timeline: "90 days".to_string(),
            }
        });

    let mut recommendations: Vec<_> = critical.chain(weak).collect();
    for (i, rec) in recommendations.iter_mut().enumerate() {
        rec.id = format!("REC-{:03}", i + 1);
    }
    tracing::debug!("Planned {} recommendations", recommendations.len());
    recommendations
}

/// Action plan from the first [`MAX_NEXT_STEPS`] recommendations
pub fn schedule_next_steps(
    recommendations: &[Recommendation],
    now: DateTime<Utc>,
) -> Vec<NextStep> {
    recommendations
        .iter()
        .take(MAX_NEXT_STEPS)
        .enumerate()
        .map(|(i, rec)| NextStep {
            id: format!("NS-{:03}", i + 1),
            recommendation_id: rec.id.clone(),
            action: rec.title.clone(),
            phase: rec.priority.phase(),
            due_date: (now + rec.priority.due_offset()).date_naive(),
            affected_controls: rec.affected_controls.clone(),
        })
        .collect()
}

/// 1234567 -> "1,234,567"
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
