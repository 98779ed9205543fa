//! Output formatting for catalogs, reports and filter lists.

use serde::{Deserialize, Serialize};

use handle_feed_core::{Catalog, FilterCount, Record};

use crate::report::ParseReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a catalog in the requested output format.
pub fn format_catalog(catalog: &Catalog, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(catalog)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(catalog).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(catalog_to_markdown(catalog)),
        OutputFormat::Table => Ok(catalog_to_table(catalog)),
    }
}

/// Formats a parse report in the requested output format.
pub fn format_report(report: &ParseReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

/// Formats the available filter list in the requested output format.
pub fn format_filters(filters: &[FilterCount], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(filters)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(filters).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => {
            let mut out = String::from("| Filter | Count |\n|--------|-------|\n");
            for entry in filters {
                out.push_str(&format!("| {} | {} |\n", entry.filter, entry.count));
            }
            Ok(out)
        }
        OutputFormat::Table => {
            let width = filters
                .iter()
                .map(|entry| entry.filter.label().len())
                .max()
                .unwrap_or(6);
            let mut out = String::new();
            for entry in filters {
                out.push_str(&format!(
                    "{:<width$}  {}\n",
                    entry.filter.label(),
                    entry.count
                ));
            }
            Ok(out)
        }
    }
}

fn flags(record: &Record) -> String {
    let mut flags = Vec::new();
    if record.is_new {
        flags.push("new");
    }
    if record.is_hot {
        flags.push("hot");
    }
    if record.is_sold {
        flags.push("sold");
    }
    flags.join(",")
}

fn catalog_to_markdown(catalog: &Catalog) -> String {
    let mut out = String::new();

    out.push_str("# Listings\n\n");
    out.push_str(&format!("**Generated:** {}\n\n", catalog.generated_at));
    if catalog.global_discount > 0 {
        out.push_str(&format!(
            "**Storewide discount:** {}%\n\n",
            catalog.global_discount
        ));
    }

    if catalog.records.is_empty() {
        out.push_str("_No listings._\n");
        return out;
    }

    out.push_str("| Handle | Price | Category | Flags | Description |\n");
    out.push_str("|--------|-------|----------|-------|-------------|\n");
    for record in &catalog.records {
        out.push_str(&format!(
            "| `{}` | {} | {} | {} | {} |\n",
            record.handle,
            record.price.replace('|', "\\|"),
            record.category,
            flags(record),
            record.description.replace('|', "\\|")
        ));
    }
    out.push('\n');

    out
}

fn catalog_to_table(catalog: &Catalog) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Listings: {}  Sold: {}",
        catalog.record_count(),
        catalog.sold_count()
    ));
    if catalog.global_discount > 0 {
        out.push_str(&format!("  Discount: {}%", catalog.global_discount));
    }
    out.push('\n');

    if catalog.records.is_empty() {
        return out;
    }

    let handle_width = catalog
        .records
        .iter()
        .map(|r| r.handle.len())
        .max()
        .unwrap_or(6);
    let price_width = catalog
        .records
        .iter()
        .map(|r| r.price.len())
        .max()
        .unwrap_or(5);

    out.push('\n');
    for record in &catalog.records {
        let line = format!(
            "  {:<handle_width$}  {:<price_width$}  {:<14}  {:<12}  {}",
            record.handle,
            record.price,
            record.category.label(),
            flags(record),
            record.description
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn report_to_markdown(report: &ParseReport) -> String {
    let mut out = String::new();

    out.push_str("# Parse Report\n\n");
    out.push_str(&format!("**Feed SHA-256:** `{}`\n\n", report.feed_sha256));
    out.push_str(&format!(
        "**Records:** {} from {} line(s), coverage {:.0}%\n\n",
        report.record_count,
        report.record_lines,
        report.coverage * 100.0
    ));

    if let Some(ref directive) = report.directive {
        match directive.percent {
            Some(percent) => out.push_str(&format!("**Discount directive:** {percent}%\n\n")),
            None => out.push_str(&format!(
                "**Discount directive:** malformed (`{}`)\n\n",
                directive.text
            )),
        }
    }

    if !report.skipped_lines.is_empty() {
        out.push_str("## Skipped Lines\n\n");
        out.push_str("| Line | Text |\n");
        out.push_str("|------|------|\n");
        for skipped in &report.skipped_lines {
            out.push_str(&format!("| {} | `{}` |\n", skipped.line, skipped.text.trim()));
        }
        out.push('\n');
    }

    if !report.duplicate_handles.is_empty() {
        out.push_str("## Duplicate Handles\n\n");
        for handle in &report.duplicate_handles {
            out.push_str(&format!("- `{handle}`\n"));
        }
        out.push('\n');
    }

    if !report.warnings.is_empty() {
        out.push_str("## Warnings\n\n");
        for warning in &report.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
        out.push('\n');
    }

    out
}

fn report_to_table(report: &ParseReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Records: {}  Lines: {}/{}  Coverage: {:.0}%  Discount: {}%\n",
        report.record_count,
        report.recognized_lines,
        report.record_lines,
        report.coverage * 100.0,
        report.global_discount
    ));

    for hit in &report.grammar_hits {
        out.push_str(&format!("  {:<16} {}\n", hit.grammar, hit.lines));
    }

    for skipped in &report.skipped_lines {
        out.push_str(&format!("  skipped line {}: {}\n", skipped.line, skipped.text.trim()));
    }

    for warning in &report.warnings {
        out.push_str(&format!("  warning: {warning}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use handle_feed_core::{Category, Filter};

    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new("2026-02-07T00:00:00Z");
        catalog.global_discount = 20;
        catalog.records.push(
            Record::available("@abc", "$32 (20% off $40)", Category::ThreeLetter)
                .with_description("a | b"),
        );
        catalog.records.push(Record::sold("@gone", ""));
        catalog
    }

    #[test]
    fn test_markdown_catalog_escapes_pipes() {
        let out = format_catalog(&sample_catalog(), OutputFormat::Markdown).unwrap();
        assert!(out.contains("**Storewide discount:** 20%"));
        assert!(out.contains("| `@abc` | $32 (20% off $40) | 3 letter |  | a \\| b |"));
        assert!(out.contains("| `@gone` | SOLD | Sold | sold |  |"));
    }

    #[test]
    fn test_markdown_catalog_escapes_pipes_in_passthrough_price() {
        let mut catalog = Catalog::new("2026-02-07T00:00:00Z");
        catalog
            .records
            .push(Record::available("@abcd", "ask | offer", Category::FourLetter));
        let out = format_catalog(&catalog, OutputFormat::Markdown).unwrap();
        assert!(out.contains("| `@abcd` | ask \\| offer | 4 letter |  |  |"));
    }

    #[test]
    fn test_table_catalog_header() {
        let out = format_catalog(&sample_catalog(), OutputFormat::Table).unwrap();
        assert!(out.starts_with("Listings: 2  Sold: 1  Discount: 20%\n"));
        assert!(out.contains("@gone"));
    }

    #[test]
    fn test_json_catalog_uses_contract_keys() {
        let out = format_catalog(&sample_catalog(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["globalDiscount"], 20);
        assert_eq!(value["records"][1]["category"], "Sold");
    }

    #[test]
    fn test_filters_table_aligns_labels() {
        let filters = [
            FilterCount {
                filter: Filter::All,
                count: 3,
            },
            FilterCount {
                filter: Filter::Category(Category::SemiUsernames),
                count: 2,
            },
        ];
        let out = format_filters(&filters, OutputFormat::Table).unwrap();
        assert_eq!(out, "All             3\nSemi usernames  2\n");
    }

    #[test]
    fn test_output_format_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&OutputFormat::Markdown).unwrap(),
            "\"markdown\""
        );
    }
}
