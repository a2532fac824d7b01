//! Self-Assessment Report Engine (SAR)
//!
//! Turns answers to a fixed catalogue of security-control questions into a
//! gap analysis report.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                      SELF-ASSESSMENT ENGINE                           │
//! │                                                                       │
//! │   Catalogue + AssessmentRecord                                        │
//! │          │                                                            │
//! │   ┌──────▼───────┐   ┌──────────────┐                                 │
//! │   │   Findings   │──▶│   Domains    │                                 │
//! │   └──────┬───────┘   └──────┬───────┘                                 │
//! │          │                  │                                         │
//! │   ┌──────▼───────┐  ┌───────▼──────┐  ┌──────────────┐  ┌──────────┐ │
//! │   │     Risk     │  │   Summary    │  │ Remediation  │  │Readiness │ │
//! │   └──────┬───────┘  └───────┬──────┘  └──────┬───────┘  └────┬─────┘ │
//! │          └──────────────────┴──────┬─────────┴───────────────┘       │
//! │                             ┌──────▼───────┐                          │
//! │                             │    Report    │──▶ render (HTML / text)  │
//! │                             └──────────────┘                          │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stage is a pure function over immutable inputs. The only ambient
//! input is the [`Clock`], which tests pin with [`FixedClock`].

#![warn(clippy::all)]

pub mod assessment;
pub mod catalogue;
pub mod clock;
pub mod domains;
pub mod findings;
pub mod frameworks;
pub mod readiness;
pub mod remediation;
pub mod render;
pub mod report;
pub mod risk;
pub mod summary;

use thiserror::Error;

pub use assessment::{Answer, AssessmentRecord, AssessorInfo};
pub use catalogue::{Catalogue, Category, Control, Priority, Section};
pub use clock::{Clock, FixedClock, SystemClock};
pub use domains::{analyze_domains, DomainAnalysis};
pub use findings::{extract_findings, Finding, FindingStatus, Severity};
pub use readiness::{evaluate_readiness, CertificationReadiness, ComplianceStatus};
pub use remediation::{plan_recommendations, schedule_next_steps, NextStep, Recommendation};
pub use render::{render_html, render_plain_text};
pub use report::{Appendix, Report, ReportRequest};
pub use risk::{assess_risk, RiskAssessment, RiskLevel, RiskMatrixEntry};
pub use summary::{summarize, ComplianceLevel, ExecutiveSummary};

/// Compliance error types
#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("catalogue has no sections")]
    EmptyCatalogue,
    #[error("duplicate control id: {0}")]
    DuplicateControl(String),
    #[error("duplicate section code: {0}")]
    DuplicateSectionCode(String),
    #[error("control without id in section {section}")]
    MissingControlId { section: String },
    #[error("assessor {0} is required")]
    InvalidAssessor(&'static str),
    #[error("report is missing required field: {0}")]
    MissingField(&'static str),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the compliance engine
pub type ComplianceResult<T> = Result<T, ComplianceError>;

/// Report pipeline bound to one catalogue
pub struct ReportEngine<C: Clock = SystemClock> {
    catalogue: Catalogue,
    clock: C,
}

impl ReportEngine<SystemClock> {
    pub fn new(catalogue: Catalogue) -> Self {
        Self::with_clock(catalogue, SystemClock)
    }
}

impl<C: Clock> ReportEngine<C> {
    pub fn with_clock(catalogue: Catalogue, clock: C) -> Self {
        tracing::info!(
            "Report engine ready for {} ({} controls)",
            catalogue.name(),
            catalogue.control_count()
        );
        Self { catalogue, clock }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Run the full pipeline for one assessment
    pub fn generate(
        &self,
        assessment: &AssessmentRecord,
        request: &ReportRequest,
    ) -> ComplianceResult<Report> {
        request.assessor.validate()?;

        let unknown = assessment.unknown_controls(&self.catalogue);
        if !unknown.is_empty() {
            tracing::warn!(
                "Ignoring {} answers for controls not in the catalogue: {}",
                unknown.len(),
                unknown.join(", ")
            );
        }

        let now = self.clock.now();
        let findings = extract_findings(&self.catalogue, assessment, now);
        let domain_analyses = analyze_domains(&self.catalogue, assessment);
        tracing::debug!("Analyzed {} domains", domain_analyses.len());
        let executive_summary = summarize(&findings, &domain_analyses);
        let risk_assessment = assess_risk(&findings);
        let recommendations = plan_recommendations(&findings, &domain_analyses);
        let compliance_status = evaluate_readiness(&findings, &domain_analyses);
        let next_steps = schedule_next_steps(&recommendations, now);

        let report = report::assemble(
            &self.catalogue,
            assessment,
            request,
            report::Sections {
                executive_summary,
                domain_analyses,
                findings,
                risk_assessment,
                recommendations,
                compliance_status,
                next_steps,
            },
            now,
        );

        tracing::info!(
            "Generated report {}: {} findings, overall score {:.1}%",
            report.id,
            report.findings.len(),
            report.executive_summary.overall_score
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    fn request() -> ReportRequest {
        ReportRequest::new(AssessorInfo {
            name: "Dana Reyes".into(),
            organization: "Acme Defense".into(),
            credentials: vec!["CCP".into()],
            contact_info: "dana@acme.example".into(),
        })
    }

    fn single_section(controls: Vec<Control>) -> Catalogue {
        Catalogue::new(
            "test",
            "1",
            vec![Section {
                name: "Access Control".into(),
                code: "AC".into(),
                categories: vec![Category { name: "General".into(), questions: controls }],
            }],
        )
        .unwrap()
    }

    fn engine(catalogue: Catalogue) -> ReportEngine<FixedClock> {
        ReportEngine::with_clock(catalogue, FixedClock(at()))
    }

    #[test]
    fn test_unanswered_critical_control() {
        let cat = single_section(vec![Control::new("AC.1", "Access", "", Priority::Critical)]);
        let report = engine(cat).generate(&AssessmentRecord::new(at()), &request()).unwrap();

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Critical);
        assert_eq!(report.domain_analyses[0].overall_score, 0.0);
        assert_eq!(report.executive_summary.overall_score, 0.0);
        assert_eq!(report.executive_summary.compliance_level, ComplianceLevel::NonCompliant);
        assert_eq!(report.executive_summary.compliance_level.to_string(), "Non-Compliant");
    }

    #[test]
    fn test_answered_critical_control() {
        let cat = single_section(vec![Control::new("AC.1", "Access", "", Priority::Critical)]);
        let assessment = AssessmentRecord::new(at()).with_answer("AC.1", Answer::Yes);
        let report = engine(cat).generate(&assessment, &request()).unwrap();

        assert!(report.findings.is_empty());
        assert_eq!(report.domain_analyses[0].overall_score, 100.0);
        assert_eq!(report.domain_analyses[0].maturity_level, 5);
    }

    #[test]
    fn test_not_applicable_excluded_from_denominator() {
        let controls = (0..10)
            .map(|i| Control::new(&format!("AC.{}", i), "c", "", Priority::High))
            .collect();
        let mut assessment = AssessmentRecord::new(at()).with_answer("AC.0", Answer::NotApplicable);
        for i in 1..10 {
            assessment = assessment.with_answer(&format!("AC.{}", i), Answer::Yes);
        }
        let report = engine(single_section(controls)).generate(&assessment, &request()).unwrap();

        assert_eq!(report.domain_analyses[0].overall_score, 100.0);
        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_mean_of_domains_not_weighted() {
        let section = |code: &str, n: usize| Section {
            name: code.to_string(),
            code: code.to_string(),
            categories: vec![Category {
                name: String::new(),
                questions: (0..n)
                    .map(|i| Control::new(&format!("{}.{}", code, i), "c", "", Priority::Low))
                    .collect(),
            }],
        };
        let cat = Catalogue::new("t", "1", vec![section("AA", 20), section("BB", 20)]).unwrap();
        let mut assessment = AssessmentRecord::new(at());
        for i in 0..19 {
            assessment = assessment.with_answer(&format!("AA.{}", i), Answer::Yes);
        }
        for i in 0..12 {
            assessment = assessment.with_answer(&format!("BB.{}", i), Answer::Yes);
        }
        let report = engine(cat).generate(&assessment, &request()).unwrap();

        assert_eq!(report.domain_analyses[0].overall_score, 95.0);
        assert_eq!(report.domain_analyses[1].overall_score, 60.0);
        assert_eq!(report.executive_summary.overall_score, 77.5);
        assert_eq!(report.compliance_status.current_readiness, 77.5);
    }

    #[test]
    fn test_sixth_critical_finding_escalates_risk() {
        let controls = |n: usize| {
            (0..n)
                .map(|i| Control::new(&format!("AC.{}", i), "c", "", Priority::Critical))
                .collect::<Vec<_>>()
        };
        let five = engine(single_section(controls(5)))
            .generate(&AssessmentRecord::new(at()), &request())
            .unwrap();
        assert_eq!(five.risk_assessment.overall_risk_level, RiskLevel::High);

        let six = engine(single_section(controls(6)))
            .generate(&AssessmentRecord::new(at()), &request())
            .unwrap();
        assert_eq!(six.risk_assessment.risk_matrix.len(), 6);
        assert_eq!(six.risk_assessment.overall_risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_deterministic_with_fixed_clock() {
        let cat = frameworks::cmmc_level1().unwrap();
        let assessment = AssessmentRecord::new(at())
            .with_answer("AC.L1-3.1.1", Answer::Partial)
            .with_answer("SC.L1-3.13.1", Answer::Yes)
            .with_evidence("SC.L1-3.13.1", "firewall-rules.txt");
        let engine = engine(cat);

        let a = engine.generate(&assessment, &request()).unwrap();
        let b = engine.generate(&assessment, &request()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_eq!(a.id, format!("sar-{}", at().timestamp_millis()));
        assert!(a.appendices.iter().any(|x| x.title == "Evidence Index"));
    }

    #[test]
    fn test_assessment_date_falls_back_to_clock() {
        let cat = single_section(vec![Control::new("AC.1", "Access", "", Priority::High)]);
        let bare = AssessmentRecord::from_json(r#"{"responses": {"AC.1": true}}"#).unwrap();
        let report = engine(cat.clone()).generate(&bare, &request()).unwrap();
        assert_eq!(report.assessment_date, at());
        assert_eq!(report.findings.len(), 1);

        let created = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let dated =
            AssessmentRecord::from_json(r#"{"createdAt": "2024-05-01T00:00:00Z"}"#).unwrap();
        let report = engine(cat).generate(&dated, &request()).unwrap();
        assert_eq!(report.assessment_date, created);
    }

    #[test]
    fn test_invalid_assessor_rejected() {
        let mut req = request();
        req.assessor.name = String::new();
        let err = engine(frameworks::cmmc_level1().unwrap())
            .generate(&AssessmentRecord::new(at()), &req)
            .unwrap_err();
        assert!(matches!(err, ComplianceError::InvalidAssessor("name")));
    }

    #[test]
    fn test_unknown_answers_ignored() {
        let cat = single_section(vec![Control::new("AC.1", "Access", "", Priority::High)]);
        let assessment = AssessmentRecord::new(at())
            .with_answer("AC.1", Answer::Yes)
            .with_answer("ZZ.9", Answer::No);
        let report = engine(cat).generate(&assessment, &request()).unwrap();
        assert!(report.findings.is_empty());
    }

    fn answer_strategy() -> impl Strategy<Value = Answer> {
        prop_oneof![
            Just(Answer::Yes),
            Just(Answer::Partial),
            Just(Answer::No),
            Just(Answer::NotApplicable),
        ]
    }

    fn assessment_from(answers: &[Answer]) -> AssessmentRecord {
        let cat = frameworks::cmmc_level1().unwrap();
        cat.controls()
            .zip(answers)
            .fold(AssessmentRecord::new(at()), |record, ((_, control), answer)| {
                record.with_answer(&control.id, *answer)
            })
    }

    /// Raise each answer to at least `floor` on the no < partial < yes scale
    fn raise(answer: Answer, floor: Answer) -> Answer {
        match (answer.rank(), floor.rank()) {
            (Some(a), Some(f)) if f > a => floor,
            _ => answer,
        }
    }

    proptest! {
        #[test]
        fn prop_coverage_and_partition(answers in prop::collection::vec(answer_strategy(), 17)) {
            let cat = frameworks::cmmc_level1().unwrap();
            let assessment = assessment_from(&answers);
            let report = engine(cat.clone()).generate(&assessment, &request()).unwrap();

            let with_finding: HashSet<_> =
                report.findings.iter().map(|f| f.control_id.as_str()).collect();
            prop_assert_eq!(with_finding.len(), report.findings.len());
            for (_, control) in cat.controls() {
                let expects =
                    matches!(assessment.answer(&control.id), Answer::No | Answer::Partial);
                prop_assert_eq!(with_finding.contains(control.id.as_str()), expects);
            }

            for d in &report.domain_analyses {
                prop_assert_eq!(
                    d.compliant + d.partial + d.non_compliant + d.not_applicable,
                    d.total_controls
                );
                prop_assert!((0.0..=100.0).contains(&d.overall_score));
                prop_assert!((1..=5).contains(&d.maturity_level));
            }
            prop_assert!((0.0..=100.0).contains(&report.executive_summary.overall_score));
            prop_assert_eq!(report.risk_assessment.risk_matrix.len(), report.findings.len());
            for rec in &report.recommendations {
                for id in &rec.affected_controls {
                    prop_assert!(cat.contains(id));
                }
            }
        }

        #[test]
        fn prop_score_monotonic(
            answers in prop::collection::vec(answer_strategy(), 17),
            floors in prop::collection::vec(answer_strategy(), 17),
        ) {
            let cat = frameworks::cmmc_level1().unwrap();
            let better: Vec<_> = answers.iter().zip(&floors).map(|(a, f)| raise(*a, *f)).collect();

            let engine = engine(cat);
            let low = engine.generate(&assessment_from(&answers), &request()).unwrap();
            let high = engine.generate(&assessment_from(&better), &request()).unwrap();
            prop_assert!(
                high.executive_summary.overall_score >= low.executive_summary.overall_score
            );
        }
    }
}
