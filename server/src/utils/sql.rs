//! LIKE pattern helpers

/// Escape LIKE metacharacters (%, _, \) in user input
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Substring-containment pattern: `%<escaped value>%`
///
/// ```
/// use bookshelf_server::utils::sql::contains_pattern;
///
/// assert_eq!(contains_pattern("Harry Potter"), "%Harry Potter%");
/// assert_eq!(contains_pattern("100%"), "%100\\%%");
/// ```
pub fn contains_pattern(s: &str) -> String {
    format!("%{}%", escape_like_pattern(s))
}
