use std::fmt::Write;

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::workflow::{Detail, Group, Report};

/// Pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn write_group(out: &mut String, group: &Group, id_width: usize) {
    let _ = writeln!(out, "{} ({})", group.label, group.count);
    for row in &group.rows {
        let marker = if row.selected { ">" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {}  {}  {}",
            pad(&row.id, id_width),
            row.title,
            row.url
        );
    }
}

fn write_detail(out: &mut String, detail: &Detail) {
    let label_width = detail
        .fields
        .iter()
        .map(|(name, _)| name.width())
        .max()
        .unwrap_or(0);
    let _ = writeln!(out, "{}", detail.id);
    for (name, value) in &detail.fields {
        let _ = writeln!(out, "  {}  {value}", pad(name, label_width));
    }
}

/// Format the report as aligned plain text.
pub(crate) fn format_plain(report: &Report) -> String {
    let mut out = String::new();
    if !report.query.trim().is_empty() {
        let _ = writeln!(out, "Query: {}", report.query);
    }
    if !report.filters.is_empty() {
        let _ = writeln!(out, "Filters: {}", report.filters.join(", "));
    }
    let _ = writeln!(out, "{}", report.summary);

    let id_width = report
        .groups
        .iter()
        .flat_map(|group| &group.rows)
        .map(|row| row.id.width())
        .max()
        .unwrap_or(0);
    for group in &report.groups {
        let _ = writeln!(out);
        write_group(&mut out, group, id_width);
    }

    if !report.details.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Expanded:");
        for detail in &report.details {
            write_detail(&mut out, detail);
        }
    }

    for (facet, options) in &report.options {
        let choices: Vec<String> = options
            .iter()
            .map(|(value, count)| format!("{value} ({count})"))
            .collect();
        let _ = writeln!(out);
        let _ = writeln!(out, "{facet}: {}", choices.join(", "));
    }

    if let Some(scroll) = &report.scroll {
        let _ = writeln!(out);
        let _ = writeln!(out, "Deep link: {scroll}");
    }
    if let Some(open) = report.palette_open {
        let _ = writeln!(out);
        let _ = writeln!(out, "Palette: {}", if open { "open" } else { "closed" });
    }
    if let Some(url) = &report.navigate {
        let _ = writeln!(out, "Navigate: {url}");
    }
    out
}

/// Print a plain-text representation of the report.
pub(crate) fn print_plain(report: &Report) {
    print!("{}", format_plain(report));
}

/// Format the report as a JSON string.
pub(crate) fn format_report_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Print the JSON representation of the report.
pub(crate) fn print_json(report: &Report) -> Result<()> {
    println!("{}", format_report_json(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use ara_finder::RecordKind;
    use serde_json::Value;

    use super::*;
    use crate::workflow::Row;

    fn row(id: &str, title: &str, selected: bool) -> Row {
        Row {
            kind: RecordKind::Control,
            id: id.into(),
            title: title.into(),
            url: format!("/standard/v1.0/acr/{id}"),
            selected,
        }
    }

    fn report() -> Report {
        Report {
            surface: "palette",
            query: "red".into(),
            summary: "Showing 2 of 2 results".into(),
            groups: vec![Group {
                kind: RecordKind::Control,
                label: "Controls",
                count: 2,
                rows: vec![
                    row("ACR-7.05", "Independent Red Team", true),
                    row("ACR-10.01", "Longer Id", false),
                ],
            }],
            palette_open: Some(true),
            ..Report::default()
        }
    }

    #[test]
    fn plain_output_aligns_ids() {
        let text = format_plain(&report());
        assert!(text.contains("> ACR-7.05   Independent Red Team"));
        assert!(text.contains("  ACR-10.01  Longer Id"));
        assert!(text.contains("Controls (2)"));
        assert!(text.contains("Palette: open"));
    }

    #[test]
    fn pad_counts_display_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("日本", 5), "日本 ");
        assert_eq!(pad("longer", 2), "longer");
    }

    #[test]
    fn json_omits_empty_sections() {
        let json = format_report_json(&report()).expect("json");
        let value: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["surface"], "palette");
        assert_eq!(value["groups"][0]["kind"], "control");
        assert_eq!(value["groups"][0]["rows"][0]["selected"], true);
        assert!(value["groups"][0]["rows"][1].get("selected").is_none());
        assert!(value.get("details").is_none());
        assert!(value.get("navigate").is_none());
    }
}
