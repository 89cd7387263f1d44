//! Best-effort classification of failed transactions from program log text.
//!
//! The network exposes no structured error codes for a failed transaction's
//! inner programs; the only stable marker is the `Error: <message>` text a
//! program prints before aborting. The scrape is isolated here so it can be
//! swapped out if the remote ever reports structured errors.

use lazy_regex::*;

/// Example: `Program log: Error: insufficient funds`
static PROGRAM_ERROR_PATTERN: &lazy_regex::Lazy<lazy_regex::Regex> = regex!(r"Error: (.*)");

/// Extracts every `Error: <message>` occurrence from the log lines, in order.
pub fn extract_program_errors(log_messages: &[String]) -> Vec<String> {
    log_messages
        .iter()
        .filter_map(|log| {
            PROGRAM_ERROR_PATTERN
                .captures(log.trim())
                .map(|cap| cap[1].to_string())
        })
        .collect()
}
