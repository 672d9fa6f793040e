//! Fixed-width console tables
//!
//! Every line is exactly [`TABLE_WIDTH`] characters. Long URLs wrap onto
//! continuation rows; only the first row of a page carries its number, and
//! in the timing table only the last row carries the measurement.

use crate::state::WebPage;

/// Total width of every table line
pub const TABLE_WIDTH: usize = 150;

const NUMBER_WIDTH: usize = 6;
const TIMING_WIDTH: usize = 27;

/// URL column width in page tables: borders, number column and one space
const PAGE_URL_WIDTH: usize = TABLE_WIDTH - NUMBER_WIDTH - 3;

/// URL column width in the timing table, which also carries a timing column
const TIMING_URL_WIDTH: usize = PAGE_URL_WIDTH - TIMING_WIDTH - 1;

fn boundary() -> String {
    "-".repeat(TABLE_WIDTH)
}

/// Splits `url` into chunks of at most `width` characters
fn wrap(url: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = url.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}

/// Renders a numbered list of pages under a single-cell header
///
/// # Example
///
/// ```
/// use sitemap_audit::output::render_page_table;
/// use sitemap_audit::WebPage;
///
/// let table = render_page_table("Pages", &[WebPage::new("http://example.com/a")]);
/// assert!(table.lines().all(|line| line.chars().count() == 150));
/// ```
pub fn render_page_table(header: &str, pages: &[WebPage]) -> String {
    let mut out = String::new();
    let line = boundary();

    out.push_str(&line);
    out.push('\n');
    out.push_str(&format!("|{:<width$}|\n", header, width = TABLE_WIDTH - 2));
    out.push_str(&line);
    out.push('\n');

    for (index, page) in pages.iter().enumerate() {
        let number = format!("{})", index + 1);
        for (row, part) in wrap(page.url(), PAGE_URL_WIDTH).iter().enumerate() {
            let label = if row == 0 { number.as_str() } else { "" };
            out.push_str(&format!(
                "|{:<nw$} {:<uw$}|\n",
                label,
                part,
                nw = NUMBER_WIDTH,
                uw = PAGE_URL_WIDTH
            ));
        }
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Renders the timing report with a `Timing (ms)` column
pub fn render_timing_table(pages: &[WebPage]) -> String {
    let mut out = String::new();
    let line = boundary();

    out.push_str(&line);
    out.push('\n');
    out.push_str(&format!(
        "|{:<uw$}|{:<tw$}|\n",
        "Url",
        "Timing (ms)",
        uw = NUMBER_WIDTH + 1 + TIMING_URL_WIDTH,
        tw = TIMING_WIDTH
    ));
    out.push_str(&line);
    out.push('\n');

    for (index, page) in pages.iter().enumerate() {
        let number = format!("{})", index + 1);
        let parts = wrap(page.url(), TIMING_URL_WIDTH);
        let last = parts.len() - 1;

        for (row, part) in parts.iter().enumerate() {
            let label = if row == 0 { number.as_str() } else { "" };
            let timing = if row == last {
                page.measurement.to_string()
            } else {
                String::new()
            };
            out.push_str(&format!(
                "|{:<nw$} {:<uw$}|{:<tw$}|\n",
                label,
                part,
                timing,
                nw = NUMBER_WIDTH,
                uw = TIMING_URL_WIDTH,
                tw = TIMING_WIDTH
            ));
        }
        out.push_str(&line);
        out.push('\n');
    }

    out
}
