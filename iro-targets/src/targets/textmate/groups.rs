//! Capture-group heuristic
//!
//! TextMate maps capture indices to scopes, so a rule with N styles has to have N capture
//! groups. Rather than parse the regex, the count is approximated textually:
//!
//! 1. Replace every innermost group, a `(` followed by one or more characters that are neither
//!    `(` nor `)` and then a `)`, by a single placeholder character.
//! 2. Repeat until no such group is left.
//! 3. Split what remains on `|` and count the pieces.
//!
//! So the count is really the number of top-level alternatives, and grammars are written with
//! one alternative per style. Escaped parentheses, non-capturing groups and purely grouping
//! parentheses are counted the same as capturing groups, empty groups `()` are never collapsed,
//! and an escaped `\|` still splits. Grammars in the wild rely on exactly this behavior.

use once_cell::sync::Lazy;
use regex::Regex;

static INNERMOST_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()]+\)").unwrap());

const PLACEHOLDER: &str = "x";

/// Heuristic number of capture groups in `regex`
pub fn count_groups(regex: &str) -> usize {
    let mut text = regex.to_string();
    while INNERMOST_GROUP.is_match(&text) {
        text = INNERMOST_GROUP.replace_all(&text, PLACEHOLDER).into_owned();
    }
    text.split('|').count()
}

/// Whether `regex` has as many heuristic groups as there are styles
pub fn groups_match(style_count: usize, regex: &str) -> bool {
    count_groups(regex) == style_count
}
