//! Per-domain compliance statistics

use crate::assessment::{Answer, AssessmentRecord};
use crate::catalogue::Catalogue;
use serde::{Deserialize, Serialize};

/// Compliance statistics for one catalogue section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAnalysis {
    pub domain: String,
    pub code: String,
    pub total_controls: usize,
    pub compliant: usize,
    pub partial: usize,
    pub non_compliant: usize,
    pub not_applicable: usize,
    pub overall_score: f64,
    pub maturity_level: u8,
    /// Set when every control is not-applicable (or the section is empty)
    pub no_applicable_controls: bool,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl DomainAnalysis {
    pub fn applicable_controls(&self) -> usize {
        self.total_controls - self.not_applicable
    }
}

/// Score in [0, 100]; not-applicable controls are outside the denominator
pub fn domain_score(compliant: usize, partial: usize, applicable: usize) -> f64 {
    if applicable == 0 {
        return 100.0;
    }
    100.0 * (compliant as f64 + 0.5 * partial as f64) / applicable as f64
}

/// Maturity tier 1..=5 for a score
pub fn maturity_level(score: f64) -> u8 {
    match score {
        s if s >= 95.0 => 5,
        s if s >= 85.0 => 4,
        s if s >= 70.0 => 3,
        s if s >= 50.0 => 2,
        _ => 1,
    }
}

/// One analysis per section, in catalogue order
pub fn analyze_domains(
    catalogue: &Catalogue,
    assessment: &AssessmentRecord,
) -> Vec<DomainAnalysis> {
    catalogue
        .sections()
        .iter()
        .map(|section| {
            let (mut compliant, mut partial, mut non_compliant, mut not_applicable) = (0, 0, 0, 0);
            for control in section.controls() {
                match assessment.answer(&control.id) {
                    Answer::Yes => compliant += 1,
                    Answer::Partial => partial += 1,
                    Answer::No => non_compliant += 1,
                    Answer::NotApplicable => not_applicable += 1,
                }
            }

            let total_controls = section.control_count();
            let applicable = total_controls - not_applicable;
            let overall_score = domain_score(compliant, partial, applicable);

            let mut strengths = Vec::new();
            let mut weaknesses = Vec::new();
            if applicable > 0 {
                if overall_score >= 90.0 {
                    strengths.push(format!("Strong compliance posture in {}", section.name));
                }
                if compliant == applicable {
                    strengths.push("All applicable controls fully implemented".to_string());
                }
                if non_compliant as f64 > 0.3 * total_controls as f64 {
                    weaknesses.push(format!(
                        "Significant gaps: {} of {} controls not implemented",
                        non_compliant, total_controls
                    ));
                }
                if partial > 0 {
                    weaknesses.push(format!("{} controls only partially implemented", partial));
                }
                if overall_score < 70.0 {
                    weaknesses.push("Below the certification readiness threshold".to_string());
                }
            }

            DomainAnalysis {
                domain: section.name.clone(),
                code: section.code.clone(),
                total_controls,
                compliant,
                partial,
                non_compliant,
                not_applicable,
                overall_score,
                maturity_level: maturity_level(overall_score),
                no_applicable_controls: applicable == 0,
                strengths,
                weaknesses,
            }
        })
        .collect()
}
