//! Allowlist matching.
//!
//! Decides whether a piece of template text still carries meaningful content
//! once every allowlisted substring (punctuation, HTML entities, ...) has been
//! stripped from it.

/// Strings that never need a translation on their own.
pub const DEFAULT_ALLOWLIST: &[&str] = &[
    "(", ")", ",", ".", "&", "+", "-", "=", "*", "/", "#", "%", "!", "?", ":", "[", "]", "{", "}",
    "<", ">", "•", "—", " ", "|", "&lpar;", "&rpar;", "&comma;", "&period;", "&amp;", "&AMP;",
    "&plus;", "&minus;", "&equals;", "&ast;", "&midast;", "&sol;", "&num;", "&percnt;", "&excl;",
    "&quest;", "&colon;", "&lsqb;", "&lbrack;", "&rsqb;", "&rbrack;", "&lcub;", "&lbrace;",
    "&rcub;", "&rbrace;", "&lt;", "&LT;", "&gt;", "&GT;", "&bull;", "&bullet;", "&mdash;",
    "&emsp;", "&ensp;", "&nbsp;", "&vert;", "&verbar;", "&VerticalLine;",
];

/// Drop empty entries and order the rest longest first.
///
/// The sort is stable, so entries of equal length keep their relative order.
/// Longer entries have to go first: `&amp;` must be stripped before `&`,
/// otherwise `amp;` would be left behind.
///
/// # Examples
///
/// ```
/// use bare_strings::allowlist::sanitize;
///
/// assert_eq!(sanitize(&["&", "", "&amp;", "."]), vec!["&amp;", "&", "."]);
/// ```
pub fn sanitize<S: AsRef<str>>(allowlist: &[S]) -> Vec<String> {
    let mut entries: Vec<String> = allowlist
        .iter()
        .map(AsRef::as_ref)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect();
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.chars().count()));
    entries
}

/// Returns `raw` unchanged if it contains anything besides allowlisted
/// strings and whitespace, `None` otherwise.
///
/// Entries are stripped one after another in the given order. Each entry is
/// removed repeatedly until it no longer occurs, since removing it can join
/// its neighbors into a new occurrence. This is a plain textual strip: word
/// boundaries are not considered.
///
/// # Examples
///
/// ```
/// use bare_strings::allowlist::{find_bare_text, sanitize};
///
/// let allowlist = sanitize(&["&amp;", "&", "-"]);
/// assert_eq!(find_bare_text(" &amp; - ", &allowlist), None);
/// assert_eq!(find_bare_text("Tom & Jerry", &allowlist), Some("Tom & Jerry"));
/// ```
pub fn find_bare_text<'a>(raw: &'a str, allowlist: &[String]) -> Option<&'a str> {
    let mut residual = raw.to_owned();
    for entry in allowlist {
        while residual.contains(entry.as_str()) {
            residual = residual.replace(entry.as_str(), "");
        }
    }

    if residual.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}
