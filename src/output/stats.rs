//! Crawl statistics
//!
//! Counts of the two page sets produced by one audit, and their console form.

/// Sizes of the crawled and sitemap sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages recorded by crawling
    pub crawled_count: usize,

    /// Pages listed by the sitemap
    pub sitemap_count: usize,
}

/// Formats statistics as the two summary lines printed after the tables
pub fn format_statistics(stats: &CrawlStats) -> String {
    format!(
        "Urls found after crawling a website: {}\nUrls found in sitemap: {}\n",
        stats.crawled_count, stats.sitemap_count
    )
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &CrawlStats) {
    print!("{}", format_statistics(stats));
}
