//! Built-in framework catalogues

use crate::catalogue::Priority::{Critical, High, Low, Medium};
use crate::catalogue::{Catalogue, Category, Control, Priority, Section};
use crate::ComplianceResult;

const CMMC_L1_DOMAINS: &[(&str, &str)] = &[
    ("AC", "Access Control"),
    ("IA", "Identification and Authentication"),
    ("MP", "Media Protection"),
    ("PE", "Physical Protection"),
    ("SC", "System and Communications Protection"),
    ("SI", "System and Information Integrity"),
];

/// (domain code, category, id, title, guidance, priority)
type PracticeRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    Priority,
);

const CMMC_L1_PRACTICES: &[PracticeRow] = &[
    (
        "AC",
        "Authorized Access",
        "AC.L1-3.1.1",
        "Authorized Access Control",
        "Limit system access to authorized users, processes acting on behalf of authorized users, and devices.",
        Critical,
    ),
    (
        "AC",
        "Authorized Access",
        "AC.L1-3.1.2",
        "Transaction & Function Control",
        "Limit system access to the types of transactions and functions that authorized users are permitted to execute.",
        Critical,
    ),
    (
        "AC",
        "External Connections",
        "AC.L1-3.1.20",
        "External Connections",
        "Verify and control/limit connections to and use of external systems.",
        High,
    ),
    (
        "AC",
        "External Connections",
        "AC.L1-3.1.22",
        "Control Public Information",
        "Control information posted or processed on publicly accessible systems.",
        Medium,
    ),
    (
        "IA",
        "Identity",
        "IA.L1-3.5.1",
        "Identification",
        "Identify system users, processes acting on behalf of users, and devices.",
        Critical,
    ),
    (
        "IA",
        "Identity",
        "IA.L1-3.5.2",
        "Authentication",
        "Authenticate the identities of users, processes, or devices as a prerequisite to allowing access.",
        Critical,
    ),
    (
        "MP",
        "Sanitization",
        "MP.L1-3.8.3",
        "Media Disposal",
        "Sanitize or destroy system media containing FCI before disposal or release for reuse.",
        High,
    ),
    (
        "PE",
        "Facility Access",
        "PE.L1-3.10.1",
        "Limit Physical Access",
        "Limit physical access to systems, equipment, and operating environments to authorized individuals.",
        High,
    ),
    (
        "PE",
        "Facility Access",
        "PE.L1-3.10.3",
        "Escort Visitors",
        "Escort visitors and monitor visitor activity.",
        Medium,
    ),
    (
        "PE",
        "Facility Access",
        "PE.L1-3.10.4",
        "Physical Access Logs",
        "Maintain audit logs of physical access.",
        Medium,
    ),
    (
        "PE",
        "Facility Access",
        "PE.L1-3.10.5",
        "Manage Physical Access",
        "Control and manage physical access devices.",
        Low,
    ),
    (
        "SC",
        "Boundary Protection",
        "SC.L1-3.13.1",
        "Boundary Protection",
        "Monitor, control, and protect communications at the external and key internal boundaries of systems.",
        Critical,
    ),
    (
        "SC",
        "Boundary Protection",
        "SC.L1-3.13.5",
        "Public-Access System Separation",
        "Implement subnetworks for publicly accessible system components separated from internal networks.",
        High,
    ),
    (
        "SI",
        "Flaw Remediation",
        "SI.L1-3.14.1",
        "Flaw Remediation",
        "Identify, report, and correct system flaws in a timely manner.",
        High,
    ),
    (
        "SI",
        "Malicious Code Protection",
        "SI.L1-3.14.2",
        "Malicious Code Protection",
        "Provide protection from malicious code at designated locations within systems.",
        Critical,
    ),
    (
        "SI",
        "Malicious Code Protection",
        "SI.L1-3.14.4",
        "Update Malicious Code Protection",
        "Update malicious code protection mechanisms when new releases are available.",
        High,
    ),
    (
        "SI",
        "Malicious Code Protection",
        "SI.L1-3.14.5",
        "System & File Scanning",
        "Perform periodic scans of systems and real-time scans of files from external sources.",
        Medium,
    ),
];

/// CMMC 2.0 Level 1 (FAR 52.204-21 basic safeguarding), 17 practices
pub fn cmmc_level1() -> ComplianceResult<Catalogue> {
    let sections = CMMC_L1_DOMAINS
        .iter()
        .map(|(code, name)| section(name, code, CMMC_L1_PRACTICES))
        .collect();
    Catalogue::new("CMMC 2.0 Level 1", "2.0", sections)
}

/// Section from the rows tagged with `code`; categories keep first-seen order
fn section(name: &str, code: &str, rows: &[PracticeRow]) -> Section {
    let mut categories: Vec<Category> = Vec::new();
    for &(_, category, id, title, guidance, priority) in rows.iter().filter(|row| row.0 == code) {
        let control = Control::new(id, title, guidance, priority);
        match categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.questions.push(control),
            None => categories.push(Category {
                name: category.to_string(),
                questions: vec![control],
            }),
        }
    }

    Section {
        name: name.to_string(),
        code: code.to_string(),
        categories,
    }
}
