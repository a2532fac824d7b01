//! Framework Catalogue
//!
//! Static Section → Category → Control tree. A [`Catalogue`] can only be
//! obtained through validation, so code holding one may assume control ids
//! are unique and at least one section exists.

use crate::{ComplianceError, ComplianceResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Control priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.pad(s)
    }
}

/// A single auditable requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub guidance: String,
    pub priority: Priority,
}

impl Control {
    pub fn new(id: &str, title: &str, guidance: &str, priority: Priority) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            guidance: guidance.to_string(),
            priority,
        }
    }
}

/// Group of related controls inside a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,
    pub questions: Vec<Control>,
}

/// Domain of the catalogue (e.g. "Access Control", code "AC")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub code: String,
    pub categories: Vec<Category>,
}

impl Section {
    /// Controls of this section in traversal order
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.categories.iter().flat_map(|c| c.questions.iter())
    }

    pub fn control_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }
}

/// Validated framework catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalogue")]
pub struct Catalogue {
    name: String,
    version: String,
    sections: Vec<Section>,
}

#[derive(Deserialize)]
struct RawCatalogue {
    name: String,
    #[serde(default)]
    version: String,
    sections: Vec<Section>,
}

impl TryFrom<RawCatalogue> for Catalogue {
    type Error = ComplianceError;

    fn try_from(raw: RawCatalogue) -> Result<Self, Self::Error> {
        Catalogue::new(&raw.name, &raw.version, raw.sections)
    }
}

impl Catalogue {
    /// Build a catalogue, failing fast on integrity errors
    pub fn new(name: &str, version: &str, sections: Vec<Section>) -> ComplianceResult<Self> {
        validate(&sections)?;
        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            sections,
        })
    }

    /// Parse and validate a JSON catalogue
    pub fn from_json(json: &str) -> ComplianceResult<Self> {
        let catalogue: Self = serde_json::from_str(json)?;
        tracing::debug!(
            "Loaded catalogue {} with {} controls",
            catalogue.name,
            catalogue.control_count()
        );
        Ok(catalogue)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All controls in traversal order, paired with their section
    pub fn controls(&self) -> impl Iterator<Item = (&Section, &Control)> {
        self.sections
            .iter()
            .flat_map(|s| s.controls().map(move |c| (s, c)))
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls().map(|(_, c)| c).find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.control(id).is_some()
    }

    pub fn section_by_code(&self, code: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.code == code)
    }

    pub fn control_count(&self) -> usize {
        self.sections.iter().map(Section::control_count).sum()
    }
}

fn validate(sections: &[Section]) -> ComplianceResult<()> {
    if sections.is_empty() {
        return Err(ComplianceError::EmptyCatalogue);
    }

    let mut codes = HashSet::new();
    let mut ids = HashSet::new();
    for section in sections {
        if !codes.insert(section.code.as_str()) {
            return Err(ComplianceError::DuplicateSectionCode(section.code.clone()));
        }
        for control in section.controls() {
            if control.id.trim().is_empty() {
                return Err(ComplianceError::MissingControlId {
                    section: section.name.clone(),
                });
            }
            if !ids.insert(control.id.as_str()) {
                return Err(ComplianceError::DuplicateControl(control.id.clone()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(code: &str, ids: &[&str]) -> Section {
        Section {
            name: format!("Domain {}", code),
            code: code.to_string(),
            categories: vec![Category {
                name: "General".into(),
                questions: ids
                    .iter()
                    .map(|id| Control::new(id, "Control", "", Priority::Medium))
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_empty_catalogue_rejected() {
        let err = Catalogue::new("empty", "1", Vec::new()).unwrap_err();
        assert!(matches!(err, ComplianceError::EmptyCatalogue));
    }

    #[test]
    fn test_duplicate_control_across_sections() {
        let err = Catalogue::new(
            "dup",
            "1",
            vec![section("AC", &["X.1"]), section("IA", &["X.1"])],
        )
        .unwrap_err();
        assert!(matches!(err, ComplianceError::DuplicateControl(id) if id == "X.1"));
    }

    #[test]
    fn test_duplicate_section_code() {
        let err = Catalogue::new("dup", "1", vec![section("AC", &["A"]), section("AC", &["B"])])
            .unwrap_err();
        assert!(matches!(err, ComplianceError::DuplicateSectionCode(code) if code == "AC"));
    }

    #[test]
    fn test_blank_control_id() {
        let err = Catalogue::new("blank", "1", vec![section("AC", &[" "])]).unwrap_err();
        assert!(matches!(err, ComplianceError::MissingControlId { .. }));
    }

    #[test]
    fn test_json_deserialization_validates() {
        let json = r#"{
            "name": "bad",
            "sections": [
                {"name": "A", "code": "A", "categories": [
                    {"questions": [
                        {"id": "A.1", "title": "t", "priority": "high"},
                        {"id": "A.1", "title": "t", "priority": "low"}
                    ]}
                ]}
            ]
        }"#;
        assert!(Catalogue::from_json(json).is_err());
    }

    #[test]
    fn test_traversal_order_and_lookup() {
        let cat = Catalogue::new(
            "ok",
            "1",
            vec![section("AC", &["AC.1", "AC.2"]), section("IA", &["IA.1"])],
        )
        .unwrap();
        let ids: Vec<_> = cat.controls().map(|(_, c)| c.id.as_str()).collect();
        assert_eq!(ids, vec!["AC.1", "AC.2", "IA.1"]);
        assert_eq!(cat.control_count(), 3);
        assert!(cat.contains("IA.1"));
        assert!(!cat.contains("SC.1"));
        assert_eq!(cat.section_by_code("IA").map(|s| s.control_count()), Some(1));
    }
}
