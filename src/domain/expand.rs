//! `$VAR` / `${VAR}` references in env file values
//!
//! References are resolved against an [`EnvSnapshot`] instead of the
//! process environment. Before the file text reaches the dotenv parser,
//! every `$` that the parser would substitute is replaced with
//! [`REFERENCE_MARK`], so the parser keeps it as a plain character. After
//! parsing, [`expand_references`] resolves the marked references.

use crate::domain::EnvSnapshot;

/// Stands in for an expandable `$` between parsing and expansion
pub const REFERENCE_MARK: char = '\u{E000}';

/// Replace each expandable `$` in raw env file text with [`REFERENCE_MARK`].
///
/// Follows the parser's quoting rules: `$` inside single quotes, after a
/// backslash, or inside a comment stays as it is.
pub fn mark_references(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut strong = false;
    let mut weak = false;
    let mut comment = false;
    let mut escaped = false;
    let mut after_space = true;

    for c in raw.chars() {
        if comment {
            if c == '\n' {
                comment = false;
                after_space = true;
            }
            out.push(c);
            continue;
        }
        if escaped {
            escaped = false;
            after_space = false;
            out.push(c);
            continue;
        }

        match c {
            '\\' if !strong => escaped = true,
            '\'' if !weak => strong = !strong,
            '"' if !strong => weak = !weak,
            '#' if !strong && !weak && after_space => comment = true,
            '$' if !strong => {
                out.push(REFERENCE_MARK);
                after_space = false;
                continue;
            }
            _ => {}
        }

        after_space = c.is_whitespace();
        out.push(c);
    }

    out
}

/// Resolve marked references in a parsed value. Unknown names expand to
/// the empty string; a mark not followed by a name becomes a literal `$`.
pub fn expand_references(value: &str, vars: &EnvSnapshot) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != REFERENCE_MARK {
            out.push(c);
            continue;
        }

        let name: String = if chars.peek() == Some(&'{') {
            chars.next();
            chars.by_ref().take_while(|&n| n != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(&n) = chars.peek() {
                if !(n.is_ascii_alphanumeric() || n == '_') {
                    break;
                }
                name.push(n);
                chars.next();
            }
            name
        };

        if name.is_empty() {
            out.push('$');
        } else {
            out.push_str(vars.get(&name).unwrap_or(""));
        }
    }

    out
}
