//! Config template rendering
//! Stateless placeholder substitution for daemon config files

use std::collections::HashMap;

/// Render a config template by substituting `%name%` placeholders
///
/// Total function: every placeholder whose inner name has an entry in
/// `substitutions` is replaced with the value; all other text, including
/// placeholders with no matching key, passes through verbatim. The scan is
/// single-pass, so substituted values are never re-scanned. Callers render
/// exactly once, since re-rendering already-rendered text is not guaranteed
/// to be a no-op.
pub fn render(template: &str, substitutions: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('%') {
            Some(end) => {
                let key = &after[..end];
                if let Some(value) = substitutions.get(key) {
                    out.push_str(value);
                    rest = &after[end + 1..];
                } else {
                    // Unknown placeholder: emit the opening '%' and keep
                    // scanning from the next character, so the closing '%'
                    // may still open a later placeholder.
                    out.push('%');
                    rest = after;
                }
            }
            None => {
                // Dangling '%' with no closer: the remainder is literal.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}
