//! IBANs, dates, case numbers and postal codes

use crate::anonymization::cached_regex;
use regex::Regex;
use std::sync::OnceLock;

static DATE_ISO: OnceLock<Option<Regex>> = OnceLock::new();
static DATE_NUMERIC: OnceLock<Option<Regex>> = OnceLock::new();
static DATE_MONTH_NAME: OnceLock<Option<Regex>> = OnceLock::new();
static CASE_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();
static POSTAL_CODE: OnceLock<Option<Regex>> = OnceLock::new();

/// `"DE89 3704 0044 0532 0130 00"` becomes `"DE** **** ****"`
pub(super) fn iban_country(text: &str) -> Option<String> {
    let mut chars = text.chars().filter(|c| !c.is_whitespace());
    let country: String = chars.by_ref().take(2).collect();
    let check: String = chars.take(2).collect();

    let country_ok = country.len() == 2 && country.chars().all(|c| c.is_ascii_uppercase());
    let check_ok = check.len() == 2 && check.chars().all(|c| c.is_ascii_digit());
    if !country_ok || !check_ok {
        return None;
    }
    Some(format!("{country}** **** ****"))
}

/// Hide the day, keep month and year
///
/// `15.03.2024` → `XX.03.2024`, `2024-03-15` → `2024-03-XX`,
/// `15. März 2024` → `XX. März 2024`
pub(super) fn date_day(text: &str) -> Option<String> {
    let text = text.trim();

    if let Some(caps) = cached_regex(&DATE_ISO, r"^(\d{4})-(\d{1,2})-(\d{1,2})$")?.captures(text) {
        return Some(format!("{}-{}-XX", &caps[1], &caps[2]));
    }

    let numeric = cached_regex(&DATE_NUMERIC, r"^(\d{1,2})([./])(\d{1,2})([./])(\d{2,4})$")?;
    if let Some(caps) = numeric.captures(text) {
        if caps[2] != caps[4] {
            return None;
        }
        return Some(format!("XX{}{}{}{}", &caps[2], &caps[3], &caps[4], &caps[5]));
    }

    let month_name = cached_regex(&DATE_MONTH_NAME, r"^(\d{1,2})\.(\s*)(\p{L}+)(\s+)(\d{4})$")?;
    let caps = month_name.captures(text)?;
    Some(format!("XX.{}{}{}{}", &caps[2], &caps[3], &caps[4], &caps[5]))
}

/// Keep the label, register and year; star out every other digit
///
/// `Az.: 1 Js 123/21` → `Az.: * Js ***/21`
pub(super) fn case_number_digits(text: &str) -> Option<String> {
    let re = cached_regex(
        &CASE_NUMBER,
        r"^((?:Az|Aktenzeichen|Gz)\.?:?\s*)?(.*?\d.*?)(/\d{2,4})$",
    )?;
    let caps = re.captures(text.trim())?;
    let label = caps.get(1).map_or("", |m| m.as_str());
    let body: String = caps[2]
        .chars()
        .map(|c| if c.is_ascii_digit() { '*' } else { c })
        .collect();
    Some(format!("{label}{body}{}", &caps[3]))
}

/// `10115 Berlin` → `***** B.`, `PLZ: 10115` → `PLZ: *****`
pub(super) fn postal_code(text: &str) -> Option<String> {
    let re = cached_regex(
        &POSTAL_CODE,
        r"^(PLZ:?\s*)?(\d{4,5})(?:(\s+)(\p{L}).*)?$",
    )?;
    let caps = re.captures(text.trim())?;

    let label = caps.get(1).map_or("", |m| m.as_str());
    let code = "*".repeat(caps[2].len());
    match (caps.get(3), caps.get(4)) {
        (Some(sep), Some(initial)) => Some(format!(
            "{label}{code}{}{}.",
            sep.as_str(),
            initial.as_str().to_uppercase()
        )),
        _ => Some(format!("{label}{code}")),
    }
}
