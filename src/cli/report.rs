//! Terminal output helpers shared by the commands.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{FlatEntry, consent::CookiePreferences};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Warning mark for consistent output formatting.
pub const WARNING_MARK: &str = "\u{26a0}"; // ⚠

pub fn print_key_table(entries: &[FlatEntry]) {
    print_key_table_to(entries, &mut io::stdout().lock());
}

/// Print `key  value` rows with the values aligned on display width.
pub fn print_key_table_to<W: Write>(entries: &[FlatEntry], writer: &mut W) {
    let width = entries
        .iter()
        .map(|e| UnicodeWidthStr::width(e.key.as_str()))
        .max()
        .unwrap_or(0);

    for entry in entries {
        let pad = width - UnicodeWidthStr::width(entry.key.as_str());
        let _ = writeln!(
            writer,
            "{}{}  {}",
            entry.key.cyan(),
            " ".repeat(pad),
            single_line(&entry.value)
        );
    }
}

pub fn print_consent(prefs: &CookiePreferences) {
    print_consent_to(prefs, &mut io::stdout().lock());
}

pub fn print_consent_to<W: Write>(prefs: &CookiePreferences, writer: &mut W) {
    let rows = [
        ("necessary", prefs.necessary),
        ("preferences", prefs.preferences),
        ("statistics", prefs.statistics),
        ("marketing", prefs.marketing),
    ];
    for (name, on) in rows {
        let state = if on { "on".green() } else { "off".dimmed() };
        let _ = writeln!(writer, "{:<12} {}", name, state);
    }
}

/// Keep multi-line translations on one output row.
fn single_line(value: &str) -> String {
    value.replace('\n', "\\n")
}
