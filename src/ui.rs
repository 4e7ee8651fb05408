//! Diagnostic output on stderr. Stdout is reserved for the computed tag.

use console::style;
use std::fmt::Display;

pub fn display_error(message: impl Display) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Lines for `list`, one version per line
pub fn format_version_list<T: Display>(prefix: &str, versions: &[T]) -> String {
    versions
        .iter()
        .map(|v| format!("{}{}", prefix, v))
        .collect::<Vec<_>>()
        .join("\n")
}
