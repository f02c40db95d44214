use owo_colors::OwoColorize;
use w3scrape_core::PageTopics;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "w3scrape".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Extract tutorial topics from W3Schools pages\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print the topics found on one page
pub fn print_page_summary(page: &PageTopics) {
    eprintln!("  {} {}", "Page:".dimmed(), page.url.bright_white().underline());

    for topic in &page.topics {
        if topic.is_excluded() {
            eprintln!("    {} {}", "-".dimmed(), topic.header.dimmed());
        } else {
            eprintln!(
                "    {} {} {}",
                "•".cyan(),
                topic.header.bright_white(),
                format!("({} segments)", topic.segments.len()).dimmed()
            );
        }
    }
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
