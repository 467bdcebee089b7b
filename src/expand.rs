//! Shell-style `$NAME` / `${NAME}` expansion.

use std::iter;

/// Expand `$NAME`, `${NAME}` and single-character special names
/// (`$$`, `$*`, `$1`, ...) in `text`, resolving names through `lookup`.
///
/// Unknown names resolve to the empty string. A `$` that cannot start a
/// name is kept literally, an unterminated `${` swallows the rest of the
/// text, and `${}` expands to nothing. A backslash escapes a following `$`;
/// in a run of backslashes before `$` every pair collapses to one backslash.
///
/// ```
/// use envfile_rs::expand;
///
/// let out = expand("${GREETING}, $NAME! \\$5", |name| match name {
///     "GREETING" => Some("Hello".to_string()),
///     "NAME" => Some("world".to_string()),
///     _ => None,
/// });
/// assert_eq!(out, "Hello, world! $5");
/// ```
#[must_use]
pub fn expand<F>(text: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '\\' => {
                let run = rest.bytes().take_while(|&b| b == b'\\').count();
                let after = &rest[run..];
                if let Some(tail) = after.strip_prefix('$') {
                    out.extend(iter::repeat_n('\\', run / 2));
                    if run % 2 == 1 {
                        out.push('$');
                        rest = tail;
                    } else {
                        rest = after;
                    }
                } else {
                    out.push_str(&rest[..run]);
                    rest = after;
                }
            }
            '$' => {
                let after = &rest[1..];
                let (reference, consumed) = scan_reference(after);
                match reference {
                    Reference::Name(name) => {
                        if let Some(value) = lookup(name) {
                            out.push_str(&value);
                        }
                    }
                    Reference::Invalid => {}
                    Reference::Literal => out.push('$'),
                }
                rest = &after[consumed..];
            }
            _ => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out
}

/// Single-character names usable as `$c` (`$$`, `$*`, `$#`, `$1`, ...).
#[must_use]
pub const fn is_special_name(ch: char) -> bool {
    matches!(ch, '*' | '#' | '$' | '@' | '!' | '?' | '-') || ch.is_ascii_digit()
}

enum Reference<'a> {
    Name(&'a str),
    /// Malformed braces; consumed without output.
    Invalid,
    /// Nothing that can be a name follows `$`.
    Literal,
}

/// Classify the text following a `$`, returning the reference and the
/// number of bytes it spans.
fn scan_reference(after: &str) -> (Reference<'_>, usize) {
    if let Some(braced) = after.strip_prefix('{') {
        return match braced.find('}') {
            None => (Reference::Invalid, after.len()),
            Some(0) => (Reference::Invalid, 2),
            Some(end) => (Reference::Name(&braced[..end]), end + 2),
        };
    }

    match after.chars().next() {
        Some(ch) if is_special_name(ch) => (Reference::Name(&after[..1]), 1),
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
            let len = after
                .bytes()
                .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
                .count();
            (Reference::Name(&after[..len]), len)
        }
        _ => (Reference::Literal, 0),
    }
}
