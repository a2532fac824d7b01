//! Report rendering
//!
//! Pure formatting over an assembled [`Report`]. Nothing here computes a
//! score or a count; every number printed is read from the report.

use crate::findings::{Finding, Severity};
use crate::report::Report;
use crate::{ComplianceError, ComplianceResult};

/// Recommendations shown in the rendered document
const TOP_RECOMMENDATIONS: usize = 10;

/// Self-contained HTML document (inline CSS, no external resources)
pub fn render_html(report: &Report) -> ComplianceResult<String> {
    check_required(report)?;
    let fingerprint = report.fingerprint()?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {org}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="container">
{header}
{summary}
{domains}
{findings}
{risk}
{recommendations}
{readiness}
{next_steps}
{appendices}
{footer}
    </div>
</body>
</html>
"#,
        title = escape_html(&report.title),
        org = escape_html(&report.organization),
        css = CSS,
        header = html_header(report),
        summary = html_summary(report),
        domains = html_domains(report),
        findings = html_findings(report),
        risk = html_risk(report),
        recommendations = html_recommendations(report),
        readiness = html_readiness(report),
        next_steps = html_next_steps(report),
        appendices = html_appendices(report),
        footer = html_footer(report, &fingerprint),
    ))
}

/// Plain-text summary for lightweight consumers
pub fn render_plain_text(report: &Report) -> ComplianceResult<String> {
    check_required(report)?;
    let summary = &report.executive_summary;
    let status = &report.compliance_status;
    let rule = "=".repeat(72);

    let mut out = String::new();
    out.push_str(&format!("{}\n{}\n{}\n", rule, report.title.to_uppercase(), rule));
    out.push_str(&format!("Report ID:     {}\n", report.id));
    out.push_str(&format!("Organization:  {}\n", report.organization));
    out.push_str(&format!("Framework:     {}\n", report.framework));
    out.push_str(&format!("Scope:         {}\n", report.scope));
    out.push_str(&format!(
        "Assessor:      {} ({})\n",
        report.assessor.name, report.assessor.organization
    ));
    out.push_str(&format!("Assessed:      {}\n", report.assessment_date.format("%Y-%m-%d")));
    out.push_str(&format!(
        "Generated:     {}\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str("EXECUTIVE SUMMARY\n-----------------\n");
    out.push_str(&format!("Overall score:       {:.1}%\n", summary.overall_score));
    out.push_str(&format!("Compliance level:    {}\n", summary.compliance_level));
    out.push_str(&format!("Overall risk:        {}\n", report.risk_assessment.overall_risk_level));
    out.push_str(&format!("Readiness:           {}\n", status.certification_readiness.label()));
    out.push_str(&format!(
        "Findings:            {} (critical {}, high {}, medium {}, low {})\n",
        summary.total_findings,
        summary.critical_findings,
        summary.high_findings,
        summary.medium_findings,
        summary.low_findings
    ));
    out.push_str(&format!("Remediation time:    {}\n", summary.estimated_remediation_time));
    out.push_str(&format!("Investment:          {}\n", status.required_investment));
    out.push_str(&format!("{}\n\n", summary.readiness_assessment));

    out.push_str("DOMAINS\n-------\n");
    for d in &report.domain_analyses {
        out.push_str(&format!(
            "{:<4} {:<40} {:>6.1}%  L{}  ({}/{}/{}/{} yes/partial/no/na)\n",
            d.code,
            d.domain,
            d.overall_score,
            d.maturity_level,
            d.compliant,
            d.partial,
            d.non_compliant,
            d.not_applicable
        ));
    }

    out.push_str("\nFINDINGS\n--------\n");
    if report.findings.is_empty() {
        out.push_str("No findings.\n");
    }
    for f in &report.findings {
        out.push_str(&format!(
            "{} [{}] {} - {} (due {})\n",
            f.id,
            f.severity,
            f.control_id,
            f.gap_description,
            f.due_date
        ));
    }

    out.push_str("\nTOP RECOMMENDATIONS\n-------------------\n");
    for r in report.recommendations.iter().take(TOP_RECOMMENDATIONS) {
        out.push_str(&format!("{} [{}] {}\n", r.id, r.priority.label(), r.title));
    }

    out.push_str("\nNEXT STEPS\n----------\n");
    for s in &report.next_steps {
        out.push_str(&format!("{} {:<10} due {}  {}\n", s.id, s.phase, s.due_date, s.action));
    }

    Ok(out)
}

fn check_required(report: &Report) -> ComplianceResult<()> {
    let required = [
        ("id", report.id.as_str()),
        ("title", report.title.as_str()),
        ("organization", report.organization.as_str()),
        ("assessor.name", report.assessor.name.as_str()),
        ("framework", report.framework.as_str()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(ComplianceError::MissingField(*field));
    }
    if report.domain_analyses.is_empty() {
        return Err(ComplianceError::MissingField("domain_analyses"));
    }
    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "sev-critical",
        Severity::High => "sev-high",
        Severity::Medium => "sev-medium",
        Severity::Low => "sev-low",
    }
}

const CSS: &str = r#"        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.5; color: #1f2937; background: #f3f4f6; margin: 0; padding: 20px; }
        .container { max-width: 1100px; margin: 0 auto; }
        .header { background: #1e3a8a; color: #fff; padding: 2rem; border-radius: 8px; margin-bottom: 1.5rem; }
        .header h1 { margin: 0 0 0.5rem 0; }
        .section { background: #fff; padding: 1.5rem; margin-bottom: 1.5rem; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
        .metrics { display: flex; flex-wrap: wrap; gap: 1rem; }
        .metric { flex: 1 1 150px; background: #f9fafb; border-radius: 6px; padding: 1rem; text-align: center; }
        .metric .value { font-size: 1.75rem; font-weight: bold; }
        table { width: 100%; border-collapse: collapse; margin: 0.75rem 0; }
        th, td { padding: 0.5rem 0.75rem; text-align: left; border-bottom: 1px solid #e5e7eb; vertical-align: top; }
        th { background: #f9fafb; font-weight: 600; }
        .sev-critical { color: #b91c1c; font-weight: bold; }
        .sev-high { color: #c2410c; font-weight: bold; }
        .sev-medium { color: #b45309; }
        .sev-low { color: #15803d; }
        .footer { color: #6b7280; font-size: 0.85rem; text-align: center; padding: 1rem; }
        pre { white-space: pre-wrap; }
        @media print { body { background: #fff; } .section { box-shadow: none; } }"#;

fn html_header(report: &Report) -> String {
    let credentials = if report.assessor.credentials.is_empty() {
        String::new()
    } else {
        format!(", {}", escape_html(&report.assessor.credentials.join(", ")))
    };
    format!(
        r#"        <div class="header">
            <h1>{}</h1>
            <div>{} &middot; {}</div>
            <div>Assessor: {}{} ({}) {}</div>
            <div>Scope: {}</div>
            <div>Assessed {} &middot; Generated {} &middot; Report {}</div>
        </div>"#,
        escape_html(&report.title),
        escape_html(&report.organization),
        escape_html(&report.framework),
        escape_html(&report.assessor.name),
        credentials,
        escape_html(&report.assessor.organization),
        escape_html(&report.assessor.contact_info),
        escape_html(&report.scope),
        report.assessment_date.format("%Y-%m-%d"),
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        escape_html(&report.id),
    )
}

fn html_summary(report: &Report) -> String {
    let s = &report.executive_summary;
    let list = |items: &[String]| {
        if items.is_empty() {
            "<li>None</li>".to_string()
        } else {
            items.iter().map(|i| format!("<li>{}</li>", escape_html(i))).collect()
        }
    };
    format!(
        r#"        <div class="section">
            <h2>Executive Summary</h2>
            <div class="metrics">
                <div class="metric"><div class="value">{:.1}%</div>Overall Score</div>
                <div class="metric"><div class="value">{}</div>Compliance Level</div>
                <div class="metric"><div class="value">{}</div>Findings</div>
                <div class="metric"><div class="value sev-critical">{}</div>Critical</div>
                <div class="metric"><div class="value sev-high">{}</div>High</div>
                <div class="metric"><div class="value">{}</div>Overall Risk</div>
            </div>
            <p>{}</p>
            <p>Controls: {} total, {} implemented, {} partial, {} not implemented, {} not applicable. Estimated remediation time: {}.</p>
            <h3>Key Strengths</h3><ul>{}</ul>
            <h3>Key Weaknesses</h3><ul>{}</ul>
        </div>"#,
        s.overall_score,
        s.compliance_level,
        s.total_findings,
        s.critical_findings,
        s.high_findings,
        report.risk_assessment.overall_risk_level,
        escape_html(&s.readiness_assessment),
        s.total_controls,
        s.compliant_controls,
        s.partial_controls,
        s.non_compliant_controls,
        s.not_applicable_controls,
        escape_html(&s.estimated_remediation_time),
        list(&s.key_strengths),
        list(&s.key_weaknesses),
    )
}

fn html_domains(report: &Report) -> String {
    let rows: String = report
        .domain_analyses
        .iter()
        .map(|d| {
            let notes: Vec<_> = d
                .strengths
                .iter()
                .chain(&d.weaknesses)
                .map(|n| escape_html(n))
                .collect();
            format!(
                "<tr><td>{}</td><td>{}</td><td>{:.1}%</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&d.code),
                escape_html(&d.domain),
                d.overall_score,
                d.maturity_level,
                d.compliant,
                d.partial,
                d.non_compliant,
                d.not_applicable,
                notes.join("<br>"),
            )
        })
        .collect();
    format!(
        r#"        <div class="section">
            <h2>Domain Analysis</h2>
            <table>
                <tr><th>Code</th><th>Domain</th><th>Score</th><th>Maturity</th><th>Yes</th><th>Partial</th><th>No</th><th>N/A</th><th>Notes</th></tr>
{}            </table>
        </div>"#,
        rows
    )
}

fn finding_row(f: &Finding) -> String {
    format!(
        "<tr><td>{}</td><td>{}<br><small>{}</small></td><td>{}</td><td>{}<br><small>{}</small></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        escape_html(&f.id),
        escape_html(&f.control_id),
        escape_html(&f.control_title),
        f.compliance_status.label(),
        escape_html(&f.gap_description),
        escape_html(&f.impact_analysis),
        escape_html(&f.estimated_cost_range),
        f.due_date,
        if f.evidence.is_empty() { "-".to_string() } else { escape_html(&f.evidence.join(", ")) },
    )
}

fn html_findings(report: &Report) -> String {
    let mut body = String::new();
    if report.findings.is_empty() {
        body.push_str("            <p>No findings. Every applicable control is fully implemented.</p>\n");
    }
    for severity in Severity::ALL {
        let rows: String = report
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .map(finding_row)
            .collect();
        if rows.is_empty() {
            continue;
        }
        body.push_str(&format!(
            r#"            <h3 class="{}">{} Severity</h3>
            <table>
                <tr><th>ID</th><th>Control</th><th>Status</th><th>Gap</th><th>Est. Cost</th><th>Due</th><th>Evidence</th></tr>
{}            </table>
"#,
            severity_class(severity),
            severity,
            rows
        ));
    }
    format!(
        "        <div class=\"section\">\n            <h2>Findings</h2>\n{}        </div>",
        body
    )
}

fn html_risk(report: &Report) -> String {
    let risk = &report.risk_assessment;
    let categories: String = risk
        .risk_categories
        .iter()
        .map(|c| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&c.name),
                c.risk_level,
                c.finding_count,
                escape_html(&c.description),
                escape_html(&c.mitigation_strategies.join("; ")),
            )
        })
        .collect();
    format!(
        r#"        <div class="section">
            <h2>Risk Assessment</h2>
            <p>Overall risk level: <strong>{}</strong> ({} critical, {} high, {} medium, {} low risk entries)</p>
            <table>
                <tr><th>Category</th><th>Level</th><th>Findings</th><th>Description</th><th>Mitigation</th></tr>
{}            </table>
        </div>"#,
        risk.overall_risk_level,
        risk.summary.critical,
        risk.summary.high,
        risk.summary.medium,
        risk.summary.low,
        categories
    )
}

fn html_recommendations(report: &Report) -> String {
    let rows: String = report
        .recommendations
        .iter()
        .take(TOP_RECOMMENDATIONS)
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}<br><small>{}</small></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&r.id),
                r.priority.label(),
                escape_html(&r.title),
                escape_html(&r.description),
                escape_html(&r.estimated_effort),
                escape_html(&r.estimated_cost),
                escape_html(&r.timeline),
            )
        })
        .collect();
    format!(
        r#"        <div class="section">
            <h2>Top Recommendations</h2>
            <table>
                <tr><th>ID</th><th>Priority</th><th>Action</th><th>Effort</th><th>Cost</th><th>Timeline</th></tr>
{}            </table>
        </div>"#,
        rows
    )
}

fn html_readiness(report: &Report) -> String {
    let c = &report.compliance_status;
    format!(
        r#"        <div class="section">
            <h2>Certification Readiness</h2>
            <p><strong>{}</strong> at {:.1}% readiness. Open gaps: {} critical, {} high, {} medium, {} low.</p>
            <p>Time to readiness: {}. Required investment: {}.</p>
        </div>"#,
        c.certification_readiness.label(),
        c.current_readiness,
        c.critical_gaps,
        c.high_gaps,
        c.medium_gaps,
        c.low_gaps,
        escape_html(&c.time_to_readiness),
        escape_html(&c.required_investment),
    )
}

fn html_next_steps(report: &Report) -> String {
    let rows: String = report
        .next_steps
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&s.id),
                s.phase,
                escape_html(&s.action),
                s.due_date,
            )
        })
        .collect();
    format!(
        r#"        <div class="section">
            <h2>Next Steps</h2>
            <table>
                <tr><th>ID</th><th>Phase</th><th>Action</th><th>Due</th></tr>
{}            </table>
        </div>"#,
        rows
    )
}

fn html_appendices(report: &Report) -> String {
    report
        .appendices
        .iter()
        .enumerate()
        .map(|(i, a)| {
            format!(
                "        <div class=\"section\">\n            <h2>Appendix {}: {}</h2>\n            <pre>{}</pre>\n        </div>\n",
                (b'A' + i as u8) as char,
                escape_html(&a.title),
                escape_html(&a.content),
            )
        })
        .collect()
}

fn html_footer(report: &Report, fingerprint: &str) -> String {
    format!(
        "        <div class=\"footer\">{} &middot; SHA-256 {}</div>",
        escape_html(&report.id),
        fingerprint
    )
}
