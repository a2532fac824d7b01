//! Assessment records and assessor metadata
//!
//! Answers are normalized when they enter the crate: anything that is not a
//! recognised affirmative, partial or not-applicable answer (including a
//! missing entry, a JSON `null` or a non-string value) is a [`Answer::No`].
//! Downstream stages never see an "absent" state. Malformed evidence entries
//! are dropped rather than failing the load.

use crate::catalogue::Catalogue;
use crate::{ComplianceError, ComplianceResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Answer to a single control question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Answer {
    Yes,
    Partial,
    No,
    NotApplicable,
}

impl Answer {
    /// Lenient parse; unrecognised input counts as `No`
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "compliant" => Answer::Yes,
            "partial" | "partially" | "partially-compliant" => Answer::Partial,
            "not-applicable" | "not_applicable" | "na" | "n/a" => Answer::NotApplicable,
            _ => Answer::No,
        }
    }

    /// Position on the no < partial < yes scale, `None` for not-applicable
    pub fn rank(&self) -> Option<u8> {
        match self {
            Answer::No => Some(0),
            Answer::Partial => Some(1),
            Answer::Yes => Some(2),
            Answer::NotApplicable => None,
        }
    }
}

impl<'de> Deserialize<'de> for Answer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let answer = match Value::deserialize(deserializer)? {
            Value::String(raw) => Answer::normalize(&raw),
            _ => Answer::No,
        };
        Ok(answer)
    }
}

/// Keeps the string labels of each evidence list, ignores everything else
fn lenient_evidence<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => return Ok(BTreeMap::new()),
    };
    Ok(entries
        .into_iter()
        .map(|(control_id, labels)| {
            let labels = match labels {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(label) => Some(label),
                        _ => None,
                    })
                    .collect(),
                Value::String(label) => vec![label],
                _ => Vec::new(),
            };
            (control_id, labels)
        })
        .filter(|(_, labels)| !labels.is_empty())
        .collect())
}

/// RFC 3339 timestamp, `None` when absent or unparseable
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|at| at.with_timezone(&Utc)),
        _ => None,
    })
}

/// Answers and evidence collected for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub responses: BTreeMap<String, Answer>,
    #[serde(default, deserialize_with = "lenient_evidence")]
    pub evidence: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl AssessmentRecord {
    /// Empty record; every control reads as `No`
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            responses: BTreeMap::new(),
            evidence: BTreeMap::new(),
            created_at: Some(created_at),
            last_modified: Some(created_at),
        }
    }

    /// Last modification time, falling back to creation time
    pub fn assessed_at(&self) -> Option<DateTime<Utc>> {
        self.last_modified.or(self.created_at)
    }

    pub fn from_json(json: &str) -> ComplianceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Record an answer
    pub fn with_answer(mut self, control_id: &str, answer: Answer) -> Self {
        self.responses.insert(control_id.to_string(), answer);
        self
    }

    /// Attach an evidence label to a control
    pub fn with_evidence(mut self, control_id: &str, label: &str) -> Self {
        self.evidence
            .entry(control_id.to_string())
            .or_default()
            .push(label.to_string());
        self
    }

    /// Answer for a control, `No` when nothing was recorded
    pub fn answer(&self, control_id: &str) -> Answer {
        self.responses.get(control_id).copied().unwrap_or(Answer::No)
    }

    pub fn evidence_for(&self, control_id: &str) -> &[String] {
        self.evidence
            .get(control_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Answered ids that the catalogue does not define
    pub fn unknown_controls(&self, catalogue: &Catalogue) -> Vec<String> {
        self.responses
            .keys()
            .filter(|id| !catalogue.contains(id))
            .cloned()
            .collect()
    }
}

/// Person or firm performing the assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessorInfo {
    pub name: String,
    pub organization: String,
    #[serde(default)]
    pub credentials: Vec<String>,
    #[serde(default)]
    pub contact_info: String,
}

impl AssessorInfo {
    /// Presence check only; contents are passed through verbatim
    pub fn validate(&self) -> ComplianceResult<()> {
        if self.name.trim().is_empty() {
            return Err(ComplianceError::InvalidAssessor("name"));
        }
        if self.organization.trim().is_empty() {
            return Err(ComplianceError::InvalidAssessor("organization"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_answer_normalization() {
        assert_eq!(Answer::normalize("YES"), Answer::Yes);
        assert_eq!(Answer::normalize(" partial "), Answer::Partial);
        assert_eq!(Answer::normalize("n/a"), Answer::NotApplicable);
        assert_eq!(Answer::normalize("not_applicable"), Answer::NotApplicable);
        assert_eq!(Answer::normalize("maybe"), Answer::No);
        assert_eq!(Answer::normalize(""), Answer::No);
    }

    #[test]
    fn test_json_nulls_and_missing_fields() {
        let json = r#"{
            "responses": {"AC.1": "yes", "AC.2": null, "AC.3": "bogus", "AC.4": "not-applicable"},
            "createdAt": "2024-01-01T00:00:00Z",
            "lastModified": "2024-01-02T00:00:00Z"
        }"#;
        let record = AssessmentRecord::from_json(json).unwrap();
        assert_eq!(record.answer("AC.1"), Answer::Yes);
        assert_eq!(record.answer("AC.2"), Answer::No);
        assert_eq!(record.answer("AC.3"), Answer::No);
        assert_eq!(record.answer("AC.4"), Answer::NotApplicable);
        assert_eq!(record.answer("AC.5"), Answer::No);
        assert!(record.evidence_for("AC.1").is_empty());
    }

    #[test]
    fn test_non_string_answers_read_as_no() {
        let json = r#"{
            "responses": {
                "AC.1": true,
                "AC.2": "yes",
                "AC.3": 1,
                "AC.4": {"value": "yes"},
                "AC.5": ["yes"]
            },
            "createdAt": "2024-01-01T00:00:00Z",
            "lastModified": "2024-01-02T00:00:00Z"
        }"#;
        let record = AssessmentRecord::from_json(json).unwrap();
        assert_eq!(record.answer("AC.1"), Answer::No);
        assert_eq!(record.answer("AC.2"), Answer::Yes);
        assert_eq!(record.answer("AC.3"), Answer::No);
        assert_eq!(record.answer("AC.4"), Answer::No);
        assert_eq!(record.answer("AC.5"), Answer::No);
    }

    #[test]
    fn test_malformed_evidence_dropped() {
        let json = r#"{
            "responses": {"AC.1": "yes"},
            "evidence": {"AC.1": ["policy.pdf", 7, null], "AC.2": "scan.txt", "AC.3": 12}
        }"#;
        let record = AssessmentRecord::from_json(json).unwrap();
        assert_eq!(record.evidence_for("AC.1"), ["policy.pdf"]);
        assert_eq!(record.evidence_for("AC.2"), ["scan.txt"]);
        assert!(record.evidence_for("AC.3").is_empty());

        let record = AssessmentRecord::from_json(r#"{"evidence": null}"#).unwrap();
        assert!(record.evidence.is_empty());
    }

    #[test]
    fn test_timestamps_optional() {
        let record = AssessmentRecord::from_json(r#"{"responses":{"AC.1":"yes"}}"#).unwrap();
        assert_eq!(record.answer("AC.1"), Answer::Yes);
        assert_eq!(record.assessed_at(), None);

        let record =
            AssessmentRecord::from_json(r#"{"createdAt": "2024-01-01T00:00:00Z"}"#).unwrap();
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(record.assessed_at(), Some(created));

        let record = AssessmentRecord::from_json(
            r#"{"createdAt": "2024-01-01T00:00:00Z", "lastModified": "2024-02-01T00:00:00Z"}"#,
        )
        .unwrap();
        let modified = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(record.assessed_at(), Some(modified));

        let record = AssessmentRecord::from_json(
            r#"{"createdAt": "2024-01-01T00:00:00Z", "lastModified": "yesterday"}"#,
        )
        .unwrap();
        assert_eq!(record.assessed_at(), Some(created));
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Answer::No.rank() < Answer::Partial.rank());
        assert!(Answer::Partial.rank() < Answer::Yes.rank());
        assert_eq!(Answer::NotApplicable.rank(), None);
    }

    #[test]
    fn test_assessor_presence() {
        let mut assessor = AssessorInfo {
            name: "J. Doe".into(),
            organization: "Acme".into(),
            credentials: vec![],
            contact_info: String::new(),
        };
        assert!(assessor.validate().is_ok());
        assessor.organization = "  ".into();
        assert!(matches!(
            assessor.validate(),
            Err(ComplianceError::InvalidAssessor("organization"))
        ));
    }

    #[test]
    fn test_evidence_builder() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record = AssessmentRecord::new(at)
            .with_evidence("AC.1", "policy.pdf")
            .with_evidence("AC.1", "screenshot.png");
        assert_eq!(record.evidence_for("AC.1"), ["policy.pdf", "screenshot.png"]);
    }
}
