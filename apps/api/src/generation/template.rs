//! Single-pass placeholder substitution for prompt templates.
//!
//! `str::replace` chains re-scan text that was already substituted, so a resume
//! containing `{domain}` would be rewritten by the next pass. `fill` walks the
//! template once and copies substituted values without looking at them again.

/// Replaces every `{key}` in `template` for which `lookup` returns a value.
/// Unknown `{...}` sequences and unmatched braces are copied through as-is.
pub fn fill<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) if is_placeholder_name(&after[..close]) => {
                let key = &after[..close];
                match lookup(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn is_placeholder_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}
