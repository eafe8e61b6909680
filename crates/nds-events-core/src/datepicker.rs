//! Translation of PHP `date()` patterns into jQuery UI Datepicker patterns.
//!
//! The site stores its date format in PHP `date()` vocabulary (`F j, Y`),
//! while the admin date picker expects the Datepicker vocabulary
//! (`MM d, yy`). [`php_to_datepicker`] keeps both in step.
//!
//! # Example
//!
//! ```rust
//! use nds_events_core::datepicker::php_to_datepicker;
//!
//! assert_eq!(php_to_datepicker("Y-m-d").unwrap(), "yy-mm-dd");
//! assert_eq!(php_to_datepicker(r"j \o\f F Y").unwrap(), "d 'of' MM yy");
//! ```

use thiserror::Error;
use tracing::debug;

/// The PHP `date()` escape character.
pub const ESCAPE: char = '\\';

/// The Datepicker literal delimiter.
pub const QUOTE: char = '\'';

/// PHP tokens and their Datepicker equivalents.
///
/// An empty mapping means the Datepicker has no equivalent and the token is
/// dropped. Characters not listed pass through unchanged.
const TOKENS: &[(char, &str)] = &[
    // Day
    ('d', "dd"),
    ('D', "D"),
    ('j', "d"),
    ('l', "DD"),
    ('N', ""),
    ('S', ""),
    ('w', ""),
    ('z', "o"),
    // Week
    ('W', ""),
    // Month
    ('F', "MM"),
    ('m', "mm"),
    ('M', "M"),
    ('n', "m"),
    ('t', ""),
    // Year
    ('L', ""),
    ('o', ""),
    ('Y', "yy"),
    ('y', "y"),
    // Time
    ('a', ""),
    ('A', ""),
    ('B', ""),
    ('g', ""),
    ('G', ""),
    ('h', ""),
    ('H', ""),
    ('i', ""),
    ('s', ""),
    ('u', ""),
];

/// Errors produced while reading a PHP date pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The pattern ends with an escape character that escapes nothing.
    #[error("invalid format string: trailing escape character at position {position}")]
    TrailingEscape { position: usize },
}

/// Looks up the Datepicker equivalent of a PHP date token.
///
/// Returns `None` for characters that are not tokens, and `Some("")` for
/// tokens the Datepicker cannot express.
pub fn datepicker_token(c: char) -> Option<&'static str> {
    TOKENS
        .iter()
        .find(|(token, _)| *token == c)
        .map(|(_, mapped)| *mapped)
}

/// Translates a PHP `date()` pattern into a jQuery UI Datepicker pattern.
///
/// Escaped characters become quoted literals; consecutive escaped characters
/// share a single quoted run, which is always closed before the result is
/// returned.
///
/// # Errors
///
/// Returns [`TranslateError::TrailingEscape`] if the pattern ends with a
/// lone `\`.
pub fn php_to_datepicker(php_format: &str) -> Result<String, TranslateError> {
    let mut out = String::with_capacity(php_format.len() * 2);
    let mut in_literal = false;
    let mut chars = php_format.char_indices();

    while let Some((position, c)) = chars.next() {
        if c == ESCAPE {
            let Some((_, literal)) = chars.next() else {
                return Err(TranslateError::TrailingEscape { position });
            };
            if !in_literal {
                out.push(QUOTE);
                in_literal = true;
            }
            if literal == QUOTE {
                out.push(QUOTE);
            }
            out.push(literal);
            continue;
        }

        if in_literal {
            out.push(QUOTE);
            in_literal = false;
        }
        match datepicker_token(c) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(c),
        }
    }

    if in_literal {
        out.push(QUOTE);
    }

    debug!(php_format, datepicker_format = %out, "translated date format");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_tokens_translate_to_their_expansion() {
        for (token, mapped) in TOKENS.iter().filter(|(_, m)| !m.is_empty()) {
            assert_eq!(
                php_to_datepicker(&token.to_string()).unwrap(),
                *mapped,
                "token {token}"
            );
        }
    }

    #[test]
    fn unsupported_tokens_are_dropped() {
        for (token, _) in TOKENS.iter().filter(|(_, m)| m.is_empty()) {
            assert_eq!(php_to_datepicker(&token.to_string()).unwrap(), "");
        }
    }

    #[test]
    fn unmapped_characters_pass_through() {
        for c in ['-', '/', '.', ',', ' ', 'x', 'Q', 'é'] {
            assert_eq!(php_to_datepicker(&c.to_string()).unwrap(), c.to_string());
        }
    }

    #[test]
    fn iso_date() {
        assert_eq!(php_to_datepicker("Y-m-d").unwrap(), "yy-mm-dd");
    }

    #[test]
    fn common_site_formats() {
        assert_eq!(php_to_datepicker("F j, Y").unwrap(), "MM d, yy");
        assert_eq!(php_to_datepicker("m/d/Y").unwrap(), "mm/dd/yy");
        assert_eq!(php_to_datepicker("d/m/Y").unwrap(), "dd/mm/yy");
        assert_eq!(php_to_datepicker("l, F jS, Y").unwrap(), "DD, MM d, yy");
    }

    #[test]
    fn escaped_character_is_quoted_not_expanded() {
        assert_eq!(php_to_datepicker(r"\d").unwrap(), "'d'");
        assert_eq!(php_to_datepicker(r"Y\Ym").unwrap(), "yy'Y'mm");
    }

    #[test]
    fn consecutive_escapes_share_one_literal_run() {
        assert_eq!(php_to_datepicker(r"j \o\f F Y").unwrap(), "d 'of' MM yy");
        assert_eq!(php_to_datepicker(r"\d\a\y j").unwrap(), "'day' d");
    }

    #[test]
    fn literal_run_at_end_is_closed() {
        assert_eq!(php_to_datepicker(r"Y\h").unwrap(), "yy'h'");
    }

    #[test]
    fn escaped_quote_is_doubled() {
        assert_eq!(php_to_datepicker(r"\'y").unwrap(), "''''y");
    }

    #[test]
    fn escaped_backslash_is_literal() {
        assert_eq!(php_to_datepicker(r"Y\\m").unwrap(), r"yy'\'mm");
    }

    #[test]
    fn trailing_escape_is_an_error() {
        assert_eq!(
            php_to_datepicker(r"Y-m-d\"),
            Err(TranslateError::TrailingEscape { position: 5 })
        );
        assert_eq!(
            php_to_datepicker(r"\"),
            Err(TranslateError::TrailingEscape { position: 0 })
        );
    }

    #[test]
    fn trailing_escape_position_is_a_byte_offset() {
        let err = php_to_datepicker("é\\").unwrap_err();
        assert_eq!(err, TranslateError::TrailingEscape { position: 2 });
        assert_eq!(
            err.to_string(),
            "invalid format string: trailing escape character at position 2"
        );
    }

    #[test]
    fn empty_pattern() {
        assert_eq!(php_to_datepicker("").unwrap(), "");
    }

    #[test]
    fn token_lookup() {
        assert_eq!(datepicker_token('Y'), Some("yy"));
        assert_eq!(datepicker_token('H'), Some(""));
        assert_eq!(datepicker_token('-'), None);
    }
}
