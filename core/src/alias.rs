//! Alias extraction from free-form option declarations.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::lexical::split_option;

static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+|,+|;+").expect("static regex must compile"));

/// Extracts the distinct option names from a declaration string.
///
/// The declaration is split on runs of whitespace, `,` or `;`. Parts that do
/// not look like an option are dropped silently, an inline `=value` is
/// discarded, and repeated names keep their first position.
///
/// # Examples
///
/// ```
/// use argbind_core::extract_aliases;
///
/// let aliases = extract_aliases("-f, -friend,--qw;--flag -f");
/// assert_eq!(aliases, vec!["-f", "-friend", "--qw", "--flag"]);
/// ```
pub fn extract_aliases(declaration: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut aliases = Vec::new();

    for part in DELIMITER.split(declaration) {
        let split = split_option(part);
        if !split.is_option {
            continue;
        }
        if seen.insert(split.name) {
            aliases.push(split.name.to_string());
        }
    }

    aliases
}
