//! # HTML Report Renderer
//!
//! Builds the report in a fixed section order:
//!
//! 1. Header: client id, submission id, creation time.
//! 2. Executive summary table, one row per tracked standard.
//! 3. N/A notes list for each standard that has any.
//! 4. Detailed responses table, one row per catalog question.
//!
//! All interpolated text is escaped with [`escape_html`].

use std::collections::HashMap;

use cqs_core::{Answer, Question, StandardKey, Submission};

const STYLE: &str = "\
body { font-family: sans-serif; margin: 20px; }
h1, h2 { color: #333; }
table { border-collapse: collapse; width: 100%; margin-bottom: 20px; }
th, td { border: 1px solid #ccc; padding: 8px; text-align: left; }
th { background-color: #f4f4f4; }
.status-compliant { color: green; font-weight: bold; }
.status-non_compliant { color: red; font-weight: bold; }
.status-partial { color: orange; font-weight: bold; }
.status-not_applicable { color: gray; }
.status-unknown { color: blue; }
";

/// Placeholder answer for a question the client did not answer.
const UNANSWERED: &str = "-";

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the report for `submission`.
///
/// Reads the submission's id, client, timestamp, answers and summary; the
/// `report` field itself is ignored. `standards` fixes the row order of the
/// executive table and of each question's standards column.
pub fn render_report(
    submission: &Submission,
    catalog: &[Question],
    standards: &[StandardKey],
) -> String {
    let client_id = escape_html(&submission.client_id);
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str(&format!("<title>Compliance Report - {client_id}</title>\n"));
    out.push_str(&format!("<style>\n{STYLE}</style>\n"));
    out.push_str("</head>\n<body>\n");

    // Header
    out.push_str("<h1>Compliance Report</h1>\n");
    out.push_str(&format!("<p><strong>Client ID:</strong> {client_id}</p>\n"));
    out.push_str(&format!(
        "<p><strong>Submission ID:</strong> {}</p>\n",
        submission.submission_id
    ));
    out.push_str(&format!(
        "<p><strong>Date:</strong> {}</p>\n",
        submission.created_at.to_rfc3339()
    ));

    // Executive summary
    out.push_str("<h2>Executive Summary</h2>\n<table>\n<thead>\n<tr>");
    for heading in ["Standard", "Status", "Total", "Yes", "No", "N/A", "Unanswered"] {
        out.push_str(&format!("<th>{heading}</th>"));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for key in standards {
        let Some(data) = submission.summary.get(key) else {
            continue;
        };
        let c = &data.counts;
        out.push_str(&format!(
            "<tr><td>{}</td><td class=\"status-{status}\">{status}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(key.as_str()),
            c.total,
            c.yes,
            c.no,
            c.na,
            c.unanswered,
            status = data.status,
        ));
    }
    out.push_str("</tbody>\n</table>\n");

    // N/A notes
    for key in standards {
        let Some(data) = submission.summary.get(key) else {
            continue;
        };
        if data.na_notes.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "<h3>N/A Notes for {}</h3>\n<ul>\n",
            escape_html(key.as_str())
        ));
        for note in &data.na_notes {
            out.push_str(&format!("<li>{}</li>\n", escape_html(note)));
        }
        out.push_str("</ul>\n");
    }

    // Detailed responses
    let answers: HashMap<&str, &Answer> = submission
        .answers
        .iter()
        .map(|a| (a.question_id.as_str(), a))
        .collect();
    out.push_str("<h2>Detailed Responses</h2>\n<table>\n<thead>\n<tr>");
    for heading in ["ID", "Question", "Standards", "Answer", "Notes"] {
        out.push_str(&format!("<th>{heading}</th>"));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for question in catalog {
        let answer = answers.get(question.question_id.as_str());
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&question.question_id),
            escape_html(&question.question_text),
            escape_html(&standards_cell(question, standards)),
            escape_html(answer.map_or(UNANSWERED, |a| a.value.as_str())),
            escape_html(answer.and_then(|a| a.notes()).unwrap_or("")),
        ));
    }
    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");

    out
}

/// `KEY: reference` pairs for the standards a question maps to, comma-joined.
fn standards_cell(question: &Question, standards: &[StandardKey]) -> String {
    standards
        .iter()
        .filter_map(|key| {
            question
                .control_reference(key)
                .map(|reference| format!("{key}: {reference}"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cqs_core::{
        ComplianceStatus, ComplianceSummary, StandardSummary, StatusCounts, SubmissionId,
    };

    fn key(s: &str) -> StandardKey {
        StandardKey::new(s).unwrap()
    }

    fn catalog() -> Vec<Question> {
        vec![
            Question::new("Q-001", "Do you have MFA?")
                .with_standard(key("ISO"), "A.9.4.1")
                .with_standard(key("NIST"), "IA-2"),
            Question::new("Q-002", "Is data <encrypted>?").with_standard(key("ISO"), "A.10.1"),
        ]
    }

    fn submission(answers: Vec<Answer>, summary: ComplianceSummary) -> Submission {
        Submission {
            submission_id: SubmissionId::new(),
            client_id: "acme & co".into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            answers,
            summary,
            report: String::new(),
        }
    }

    fn partial_summary() -> ComplianceSummary {
        let mut summary = ComplianceSummary::new();
        summary.insert(
            key("ISO"),
            StandardSummary {
                status: ComplianceStatus::Partial,
                counts: StatusCounts {
                    total: 2,
                    yes: 1,
                    no: 0,
                    na: 1,
                    unanswered: 0,
                },
                na_notes: vec!["Q-002: not needed".into()],
            },
        );
        summary.insert(key("NIST"), StandardSummary::not_applicable());
        summary
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn header_carries_identity() {
        let s = submission(vec![], partial_summary());
        let html = render_report(&s, &catalog(), &[key("ISO"), key("NIST")]);
        assert!(html.contains("<title>Compliance Report - acme &amp; co</title>"));
        assert!(html.contains(&s.submission_id.to_string()));
        assert!(html.contains("2024-03-01T12:00:00+00:00"));
    }

    #[test]
    fn executive_rows_follow_standard_order() {
        let s = submission(vec![], partial_summary());
        let html = render_report(&s, &catalog(), &[key("NIST"), key("ISO")]);
        let nist = html.find("<tr><td>NIST</td>").unwrap();
        let iso = html.find("<tr><td>ISO</td>").unwrap();
        assert!(nist < iso);
        assert!(html.contains(r#"<td class="status-partial">partial</td><td>2</td><td>1</td><td>0</td><td>1</td><td>0</td>"#));
        assert!(html.contains(r#"<td class="status-not_applicable">not_applicable</td>"#));
    }

    #[test]
    fn notes_section_only_when_present() {
        let s = submission(vec![], partial_summary());
        let html = render_report(&s, &catalog(), &[key("ISO"), key("NIST")]);
        assert!(html.contains("<h3>N/A Notes for ISO</h3>"));
        assert!(html.contains("<li>Q-002: not needed</li>"));
        assert!(!html.contains("N/A Notes for NIST"));
    }

    #[test]
    fn detail_rows_cover_whole_catalog() {
        let answers = vec![Answer::new("Q-002", "na").with_notes("not needed")];
        let s = submission(answers, partial_summary());
        let html = render_report(&s, &catalog(), &[key("ISO"), key("NIST")]);
        assert!(html.contains(
            "<tr><td>Q-001</td><td>Do you have MFA?</td><td>ISO: A.9.4.1, NIST: IA-2</td><td>-</td><td></td></tr>"
        ));
        assert!(html.contains(
            "<tr><td>Q-002</td><td>Is data &lt;encrypted&gt;?</td><td>ISO: A.10.1</td><td>na</td><td>not needed</td></tr>"
        ));
    }

    #[test]
    fn section_order_is_fixed() {
        let s = submission(vec![], partial_summary());
        let html = render_report(&s, &catalog(), &[key("ISO"), key("NIST")]);
        let exec = html.find("Executive Summary").unwrap();
        let notes = html.find("N/A Notes for").unwrap();
        let detail = html.find("Detailed Responses").unwrap();
        assert!(exec < notes && notes < detail);
    }
}
