//! Static HTML report with one tab per archetype.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use super::{cells, ensure_parent, format_percentile, format_rating, headers, ExportError, ExportValue};
use crate::models::{AnalysisReport, ArchetypeResult};

const STYLE: &str = "\
body { font-family: sans-serif; margin: 1.5rem; }
nav a { margin-right: 0.75rem; }
section { display: none; }
section:target, section.default { display: block; }
section:target ~ section.default { display: none; }
table { border-collapse: collapse; margin-top: 1rem; }
th, td { border: 1px solid #ccc; padding: 0.25rem 0.5rem; }
th { background: #f0f0f0; }
td.num { text-align: right; }
";

/// Render the report as a standalone HTML page.
///
/// Tabs are plain anchors; the first archetype is shown until another is
/// selected.
pub fn render_html(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Archetype Report</title>\n");
    let _ = writeln!(out, "<style>\n{}</style>", STYLE);
    out.push_str("</head>\n<body>\n<h1>Archetype Report</h1>\n");
    let _ = writeln!(
        out,
        "<p>Generated {} from {} players.</p>",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.summary.rows_scored
    );

    if report.archetypes.is_empty() {
        out.push_str("<p>No archetype had any eligible players.</p>\n");
    } else {
        out.push_str("<nav>\n");
        for (idx, result) in report.archetypes.iter().enumerate() {
            let _ = writeln!(
                out,
                "<a href=\"#{}\">{}</a>",
                anchor(idx),
                escape(&result.archetype)
            );
        }
        out.push_str("</nav>\n");

        // The default tab goes last so `:target ~ .default` can hide it.
        for (idx, result) in report.archetypes.iter().enumerate().skip(1) {
            render_section(&mut out, idx, result, false);
        }
        render_section(&mut out, 0, &report.archetypes[0], true);
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_section(out: &mut String, idx: usize, result: &ArchetypeResult, default: bool) {
    let class = if default { " class=\"default\"" } else { "" };
    let _ = writeln!(out, "<section id=\"{}\"{}>", anchor(idx), class);
    let _ = writeln!(
        out,
        "<h2>{} <small>({} players)</small></h2>",
        escape(&result.archetype),
        result.records.len()
    );

    out.push_str("<table>\n<thead><tr>");
    for header in headers(result) {
        let _ = write!(out, "<th>{}</th>", escape(&header));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for record in &result.records {
        out.push_str("<tr>");
        for value in cells(record) {
            match value {
                ExportValue::Text(s) => {
                    let _ = write!(out, "<td>{}</td>", escape(s));
                }
                ExportValue::Rating(n) => {
                    let _ = write!(out, "<td class=\"num\">{}</td>", format_rating(n));
                }
                ExportValue::Percentile(n) => {
                    let _ = write!(out, "<td class=\"num\">{}</td>", format_percentile(n));
                }
            }
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n</section>\n");
}

fn anchor(idx: usize) -> String {
    format!("archetype-{}", idx)
}

/// Escape text for HTML element content and attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render and write the HTML report.
pub fn write_html(report: &AnalysisReport, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    fs::write(path, render_html(report))?;

    info!("Wrote HTML report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support;
    use tempfile::TempDir;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_render_contains_tabs_and_rows() {
        let html = render_html(&test_support::report());

        assert!(html.contains("<a href=\"#archetype-0\">Sweeper Keeper</a>"));
        assert!(html.contains("<th>Adjusted SK Rating</th>"));
        assert!(html.contains("Alisson &lt;GK&gt;"));
        assert!(!html.contains("Alisson <GK>"));
        assert!(html.contains("<td class=\"num\">0.40</td>"));
        assert!(html.contains("<td class=\"num\">100%</td>"));
        assert!(html.contains("section id=\"archetype-0\" class=\"default\""));
    }

    #[test]
    fn test_render_empty_report() {
        let mut report = test_support::report();
        report.archetypes.clear();

        let html = render_html(&report);
        assert!(html.contains("No archetype had any eligible players."));
        assert!(!html.contains("<nav>"));
    }

    #[test]
    fn test_write_html() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.html");

        write_html(&test_support::report(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<!DOCTYPE html>"));
    }
}
