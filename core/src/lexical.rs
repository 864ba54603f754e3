//! Token classification shared by alias extraction and the parsing engine.
//!
//! A token names an option when it starts with `-` or `--` followed by a
//! character accepted by [`is_name_start`]. Everything else is data, which
//! keeps negative numbers such as `-1` or `-1.5` usable as values.

/// Returns `true` for characters that may follow the leading dashes of an
/// option name (alphabetic or `_`).
pub fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

/// Returns `true` if `token` names an option rather than carrying a value.
///
/// # Examples
///
/// ```
/// use argbind_core::check_prefix;
///
/// assert!(check_prefix("-x"));
/// assert!(check_prefix("--xy"));
/// assert!(!check_prefix("-1.5"));
/// assert!(!check_prefix("--"));
/// ```
pub fn check_prefix(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('-'), Some('-'), Some(third)) => is_name_start(third),
        (Some('-'), Some(second), _) => is_name_start(second),
        _ => false,
    }
}

/// A token split at its first `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOption<'t> {
    /// Text before the first `=`, or the whole token.
    pub name: &'t str,
    /// Text after the first `=`; empty when the token has none.
    pub value: &'t str,
    /// [`check_prefix`] applied to the whole token.
    pub is_option: bool,
}

/// Splits `token` into an option name and an inline value.
///
/// ```text
/// --d=1   => name: --d    value: 1
/// -d      => name: -d     value:
/// -data=1 => name: -data  value: 1
/// ```
///
/// # Examples
///
/// ```
/// use argbind_core::split_option;
///
/// let split = split_option("-d=1");
/// assert_eq!((split.name, split.value), ("-d", "1"));
/// assert!(split.is_option);
/// ```
pub fn split_option(token: &str) -> SplitOption<'_> {
    let (name, value) = token.split_once('=').unwrap_or((token, ""));
    SplitOption {
        name,
        value,
        is_option: check_prefix(token),
    }
}
