//! Markdown report generation
//!
//! This module writes an audit report as a markdown document: run metadata,
//! statistics, the two difference lists and the timing table.

use crate::output::report::{
    AuditReport, OutputResult, CRAWLED_NOT_IN_SITEMAP_HEADER, SITEMAP_NOT_CRAWLED_HEADER,
};
use crate::state::WebPage;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report to `output_path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn write_markdown_report(report: &AuditReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats an audit report as markdown
pub fn format_markdown_report(report: &AuditReport) -> String {
    let mut md = String::new();

    md.push_str("# Sitemap Audit Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Root URL**: {}\n", report.root_url));
    md.push_str(&format!("- **Origin**: {}\n", report.origin));
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.to_rfc3339()
    ));
    if let Some(hash) = &report.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    md.push_str("## Statistics\n\n");
    md.push_str(&format!(
        "- **Urls found after crawling**: {}\n",
        report.stats.crawled_count
    ));
    md.push_str(&format!(
        "- **Urls found in sitemap**: {}\n\n",
        report.stats.sitemap_count
    ));

    push_url_list(&mut md, CRAWLED_NOT_IN_SITEMAP_HEADER, &report.crawled_not_in_sitemap);
    push_url_list(&mut md, SITEMAP_NOT_CRAWLED_HEADER, &report.sitemap_not_crawled);

    md.push_str("## Timing\n\n");
    if report.timings.is_empty() {
        md.push_str("_None_\n\n");
    } else {
        md.push_str("| # | URL | Timing (ms) |\n");
        md.push_str("|---|-----|-------------|\n");
        for (index, page) in report.timings.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                index + 1,
                page.url(),
                page.measurement.value()
            ));
        }
        md.push('\n');
    }

    md
}

fn push_url_list(md: &mut String, title: &str, pages: &[WebPage]) {
    md.push_str(&format!("## {}\n\n", title));

    if pages.is_empty() {
        md.push_str("_None_\n\n");
        return;
    }

    for (index, page) in pages.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", index + 1, page.url()));
    }
    md.push('\n');
}
