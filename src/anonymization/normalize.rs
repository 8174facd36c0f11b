//! Line-break normalization
//!
//! Scanned and re-flowed documents often break a name after its salutation
//! ("Herrn\nMax Müller") or inside a hyphenated surname ("Müller-\nHoffmann").
//! Rejoining these lets a single rule see the whole name. Offsets reported by
//! the pipeline refer to the normalized text.

use crate::anonymization::cached_regex;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

static SALUTATION_BREAK: OnceLock<Option<Regex>> = OnceLock::new();
static HYPHEN_BREAK: OnceLock<Option<Regex>> = OnceLock::new();

/// Salutation or title at a line end, capitalized word on the next line
const SALUTATION_BREAK_PATTERN: &str =
    r"\b(Herrn?|Frau|Hr\.|Fr\.|Dr\.|Prof\.)[ \t]*\r?\n[ \t]*([A-ZÄÖÜ])";

/// Hyphen at a line end between a letter and a capital
const HYPHEN_BREAK_PATTERN: &str = r"(\p{L})-[ \t]*\r?\n[ \t]*([A-ZÄÖÜ])";

/// Rejoin broken names; borrows the input when nothing changes
pub fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    let rules = [
        (&SALUTATION_BREAK, SALUTATION_BREAK_PATTERN, "$1 $2"),
        (&HYPHEN_BREAK, HYPHEN_BREAK_PATTERN, "$1-$2"),
    ];

    let mut current = Cow::Borrowed(text);
    for (cell, pattern, replacement) in rules {
        let Some(re) = cached_regex(cell, pattern) else {
            continue;
        };
        let joined = match re.replace_all(&current, replacement) {
            Cow::Owned(joined) => Some(joined),
            Cow::Borrowed(_) => None,
        };
        if let Some(joined) = joined {
            current = Cow::Owned(joined);
        }
    }

    current
}
