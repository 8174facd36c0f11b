//! Masking operators
//!
//! Every entity type maps to exactly one [`MaskingStrategy`]. Structured
//! strategies keep the parts of a value a reader needs for orientation
//! (salutation, dialling prefix, country code, month and year) and hide the
//! identifying rest. When a strategy cannot parse its input the type's
//! sentinel is used instead; masking never returns the original text.
//!
//! | Type            | Strategy        | Example output            | Fallback          |
//! |-----------------|-----------------|---------------------------|-------------------|
//! | person          | surname initial | `Herr Dr. M.`             | `<PERSON>`        |
//! | email           | keep TLD        | `***@***.de`              | `<EMAIL>`         |
//! | phone           | keep prefix     | `030 XXXXXXX`             | `<TELEFON>`       |
//! | iban            | keep country    | `DE** **** ****`          | `<IBAN>`          |
//! | date            | hide day        | `XX.03.2024`              | `<DATUM>`         |
//! | case number     | hide digits     | `Az.: * Js ***/21`        | `<AKTENZEICHEN>`  |
//! | location        | hide code       | `***** B.`                | `<ORT>`           |
//! | everything else | sentinel        | `<ADRESSE>`, `<URL>`, ... |                   |

mod contact;
mod person;
mod structured;

use crate::domain::EntityType;

/// Replacement rule for one entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskingStrategy {
    SurnameInitial,
    EmailTld,
    PhonePrefix,
    IbanCountry,
    DateDay,
    CaseNumberDigits,
    PostalCode,
    /// Full replacement by the type's sentinel
    Sentinel,
}

impl MaskingStrategy {
    /// The strategy table
    pub fn for_entity(entity_type: EntityType) -> Self {
        match entity_type {
            EntityType::Person => Self::SurnameInitial,
            EntityType::Email => Self::EmailTld,
            EntityType::Phone => Self::PhonePrefix,
            EntityType::Iban => Self::IbanCountry,
            EntityType::Date => Self::DateDay,
            EntityType::CaseNumber => Self::CaseNumberDigits,
            EntityType::Location => Self::PostalCode,
            EntityType::StreetAddress
            | EntityType::AccountNumber
            | EntityType::TaxId
            | EntityType::SocialSecurityId
            | EntityType::GovernmentId
            | EntityType::PropertyRef
            | EntityType::LandParcel
            | EntityType::CreditCard
            | EntityType::IpAddress
            | EntityType::Url => Self::Sentinel,
        }
    }

    /// Apply to a matched value; `None` if the value cannot be parsed
    fn apply(&self, text: &str) -> Option<String> {
        match self {
            Self::SurnameInitial => person::surname_initial(text),
            Self::EmailTld => contact::email_tld(text),
            Self::PhonePrefix => contact::phone_prefix(text),
            Self::IbanCountry => structured::iban_country(text),
            Self::DateDay => structured::date_day(text),
            Self::CaseNumberDigits => structured::case_number_digits(text),
            Self::PostalCode => structured::postal_code(text),
            Self::Sentinel => None,
        }
    }
}

/// Fixed replacement token of a type
pub fn sentinel(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Person => "<PERSON>",
        EntityType::Email => "<EMAIL>",
        EntityType::Phone => "<TELEFON>",
        EntityType::StreetAddress => "<ADRESSE>",
        EntityType::Location => "<ORT>",
        EntityType::Date => "<DATUM>",
        EntityType::Iban => "<IBAN>",
        EntityType::AccountNumber => "<KONTONUMMER>",
        EntityType::TaxId => "<STEUER-ID>",
        EntityType::SocialSecurityId => "<SV-NUMMER>",
        EntityType::GovernmentId => "<AUSWEIS-NR>",
        EntityType::CaseNumber => "<AKTENZEICHEN>",
        EntityType::PropertyRef => "<GRUNDBUCH>",
        EntityType::LandParcel => "<FLURSTÜCK>",
        EntityType::CreditCard => "<KREDITKARTE>",
        EntityType::IpAddress => "<IP-ADRESSE>",
        EntityType::Url => "<URL>",
    }
}

/// Result of masking one span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked {
    pub replacement: String,
    /// A structured strategy could not parse the value
    pub fell_back: bool,
}

/// Mask a matched value, reporting whether the sentinel fallback was used
pub fn mask_detailed(entity_type: EntityType, matched_text: &str) -> Masked {
    let strategy = MaskingStrategy::for_entity(entity_type);
    match strategy.apply(matched_text) {
        Some(replacement) if replacement != matched_text => Masked {
            replacement,
            fell_back: false,
        },
        _ => Masked {
            replacement: sentinel(entity_type).to_string(),
            fell_back: strategy != MaskingStrategy::Sentinel,
        },
    }
}

/// Mask a matched value
pub fn mask(entity_type: EntityType, matched_text: &str) -> String {
    mask_detailed(entity_type, matched_text).replacement
}
