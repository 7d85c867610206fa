//! Output helpers shared by the `kathalu` binary.

use kathalu_core::models::{Contribution, FileStatus, SubmissionReport};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Human readable file size, e.g. `1.50 MB`. Sizes past GB stay in GB.
pub fn format_file_size(size_bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if size_bytes == 0 {
        return "0B".to_string();
    }

    let mut value = size_bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// One-line outcome of a submission.
pub fn summary_line(report: &SubmissionReport) -> String {
    if report.is_text_only() {
        return "Festival story submitted (text only)".to_string();
    }

    let mut line = format!(
        "{} of {} file(s) shared successfully",
        report.succeeded_files, report.attempted_files
    );
    let upload_failed = report.count_with_status(FileStatus::UploadFailed);
    let finalize_failed = report.count_with_status(FileStatus::FinalizeFailed);
    if upload_failed > 0 {
        line.push_str(&format!(", {} failed to upload", upload_failed));
    }
    if finalize_failed > 0 {
        line.push_str(&format!(", {} failed to finalize", finalize_failed));
    }
    line
}

/// Contributions as a fixed-width table.
pub fn contributions_table(contributions: &[Contribution]) -> String {
    if contributions.is_empty() {
        return "No festival stories found.".to_string();
    }

    let mut out = format!(
        "{:<40} {:<6} {:<28} {:>20}\n",
        "Title", "Type", "Location", "Shared At"
    );
    out.push_str(&"-".repeat(97));
    out.push('\n');

    for item in contributions {
        let location = item
            .location
            .map(|loc| format!("Lat: {}, Lon: {}", loc.latitude, loc.longitude))
            .unwrap_or_else(|| "Not specified".to_string());
        let timestamp = item
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "Recently".to_string());
        out.push_str(&format!(
            "{:<40} {:<6} {:<28} {:>20}\n",
            truncate_string(&item.title, 40),
            item.media_type,
            truncate_string(&location, 28),
            timestamp
        ));
    }

    out.push_str(&format!("\nTotal: {} stories", contributions.len()));
    out
}

/// Initialize tracing for the CLI. `RUST_LOG` wins over the `debug` flag.
pub fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
