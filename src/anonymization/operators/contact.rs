//! Email addresses and phone numbers

use crate::anonymization::cached_regex;
use regex::Regex;
use std::sync::OnceLock;

/// Minimum number of placeholder digits, so short numbers do not reveal
/// their length
const MIN_MASKED_DIGITS: usize = 6;

static PHONE_PREFIX: OnceLock<Option<Regex>> = OnceLock::new();

/// `"k.meier@firma.de"` becomes `"***@***.de"`
pub(super) fn email_tld(text: &str) -> Option<String> {
    let (local, domain) = text.trim().rsplit_once('@')?;
    let (host, tld) = domain.rsplit_once('.')?;
    if local.is_empty() || host.is_empty() || tld.len() < 2 {
        return None;
    }
    if !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(format!("***@***.{tld}"))
}

/// `"030 555-1234"` becomes `"030 XXXXXXX"`
///
/// The prefix is an international code (`+49`), a bracketed area code
/// (`(030)`) or an area code followed by a separator (`030 `).
pub(super) fn phone_prefix(text: &str) -> Option<String> {
    let text = text.trim();
    let re = cached_regex(
        &PHONE_PREFIX,
        r"^(\+\d{1,3}|\(0\d{2,4}\)|0\d{2,4})(?:[\s\-/(]|$)",
    )?;
    let prefix = re.captures(text)?.get(1)?;

    let remaining = text[prefix.end()..]
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    if remaining == 0 {
        return None;
    }

    Some(format!(
        "{} {}",
        prefix.as_str(),
        "X".repeat(remaining.max(MIN_MASKED_DIGITS))
    ))
}
