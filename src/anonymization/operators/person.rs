//! Person names: keep salutations and titles, reduce the name to the
//! surname initial.

/// Salutations and academic titles kept in front of the initial
const TITLES: &[&str] = &[
    "herr", "herrn", "frau", "hr.", "fr.", "dr.", "prof.", "med.", "jur.", "rer.", "nat.",
    "rer.nat.", "dipl.-ing.", "h.c.", "mag.", "mr", "mr.", "mrs", "mrs.", "ms", "ms.", "miss",
    "mx", "mx.",
];

fn is_title(token: &str) -> bool {
    let lowered = token.to_lowercase();
    TITLES.contains(&lowered.as_str())
}

/// `"Herr Dr. Klaus Meier"` becomes `"Herr Dr. M."`
///
/// A match consisting only of titles becomes its first letter.
pub(super) fn surname_initial(text: &str) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let title_count = tokens.iter().take_while(|t| is_title(t)).count();
    let (titles, names) = tokens.split_at(title_count);

    let Some(surname) = names.last() else {
        let first = text.chars().find(|c| c.is_alphabetic())?;
        return Some(format!("{first}."));
    };

    let initial: String = surname
        .chars()
        .find(|c| c.is_alphabetic())?
        .to_uppercase()
        .collect();

    if titles.is_empty() {
        Some(format!("{initial}."))
    } else {
        Some(format!("{} {initial}.", titles.join(" ")))
    }
}
