//! SQL LIKE pattern translation.
//!
//! Tantivy has no LIKE operator; patterns are rewritten into the anchored
//! regex syntax `RegexQuery` accepts. `%` becomes `.*`, `_` becomes `.`,
//! backslash escapes a wildcard so it matches itself, and every regex
//! metacharacter in the pattern is escaped.

/// Regex metacharacters that need escaping when taken literally.
const META: &str = "\\.+*?()|[]{}^$";

/// Translates a SQL LIKE pattern into an equivalent anchored regex.
pub(crate) fn like_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            '\\' => match chars.next() {
                // An escaped wildcard (or backslash) matches itself.
                Some(escaped @ ('%' | '_' | '\\')) => push_literal(&mut regex, escaped),
                // A backslash before anything else is literal.
                Some(other) => {
                    push_literal(&mut regex, '\\');
                    push_literal(&mut regex, other);
                }
                None => push_literal(&mut regex, '\\'),
            },
            other => push_literal(&mut regex, other),
        }
    }

    regex
}

/// Appends one literal character, escaping regex metacharacters.
fn push_literal(regex: &mut String, c: char) {
    if META.contains(c) {
        regex.push('\\');
    }
    regex.push(c);
}
