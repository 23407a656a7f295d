//! Tag handling: #-prefixed tokens embedded in record descriptions.

use regex::Regex;

/// Pattern for a tag token: '#' followed by letters, digits, dashes or
/// underscores.
pub fn tag_regex() -> Regex {
    Regex::new(r"#[\w\-]+").unwrap()
}

/// All tags in a description, case-folded to lowercase, in order of
/// appearance.
pub fn extract_tags(description: &str) -> Vec<String> {
    tag_regex()
        .find_iter(description)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Wrap every tag in the description with the given ANSI color code.
pub fn colorize_tags(description: &str, color: &str, reset: &str) -> String {
    tag_regex()
        .replace_all(description, |caps: &regex::Captures| {
            format!("{}{}{}", color, &caps[0], reset)
        })
        .into_owned()
}
