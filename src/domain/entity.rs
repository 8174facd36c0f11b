//! Entity type catalog
//!
//! Every detectable PII category is a variant of [`EntityType`]. The variant
//! order is significant: it is the final tie-break key when two candidates of
//! equal confidence and length compete for the same span.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// PII entity categories recognized by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Personal names, optionally with salutation and academic titles
    Person,
    /// Email addresses
    Email,
    /// Telephone and fax numbers
    Phone,
    /// Street name with house number
    StreetAddress,
    /// Postal code with city
    Location,
    /// Calendar dates
    Date,
    /// International bank account numbers
    Iban,
    /// Domestic bank account numbers
    AccountNumber,
    /// Tax identification numbers
    TaxId,
    /// Social security (pension insurance) numbers
    SocialSecurityId,
    /// Identity card and passport numbers
    GovernmentId,
    /// Court case / docket numbers (Aktenzeichen)
    CaseNumber,
    /// Land register references (Grundbuch sheets)
    PropertyRef,
    /// Cadastral parcels (Flur / Flurstück)
    LandParcel,
    /// Payment card numbers
    CreditCard,
    /// IPv4 addresses
    IpAddress,
    /// Web addresses
    Url,
}

/// Threshold bucket used by the confidence filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdCategory {
    /// Heuristic name matches
    Person,
    /// Structured-format matches
    Other,
}

/// How the whitelist applies to an entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitelistPolicy {
    /// Structured identifiers: whitelist is ignored entirely
    AlwaysBypass,
    /// Natural-language entities: exact match or whole-word containment exempts
    Eligible,
    /// Exact match exempts, containment does not
    ExactOnly,
}

impl EntityType {
    /// All entity types in ordinal order
    pub const ALL: [EntityType; 17] = [
        Self::Person,
        Self::Email,
        Self::Phone,
        Self::StreetAddress,
        Self::Location,
        Self::Date,
        Self::Iban,
        Self::AccountNumber,
        Self::TaxId,
        Self::SocialSecurityId,
        Self::GovernmentId,
        Self::CaseNumber,
        Self::PropertyRef,
        Self::LandParcel,
        Self::CreditCard,
        Self::IpAddress,
        Self::Url,
    ];

    /// Canonical configuration label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::StreetAddress => "STREET_ADDRESS",
            Self::Location => "LOCATION",
            Self::Date => "DATE",
            Self::Iban => "IBAN",
            Self::AccountNumber => "ACCOUNT_NUMBER",
            Self::TaxId => "TAX_ID",
            Self::SocialSecurityId => "SOCIAL_SECURITY_ID",
            Self::GovernmentId => "GOVERNMENT_ID",
            Self::CaseNumber => "CASE_NUMBER",
            Self::PropertyRef => "PROPERTY_REF",
            Self::LandParcel => "LAND_PARCEL",
            Self::CreditCard => "CREDIT_CARD",
            Self::IpAddress => "IP_ADDRESS",
            Self::Url => "URL",
        }
    }

    /// Position in [`EntityType::ALL`]
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Which confidence threshold applies to this type
    pub fn threshold_category(&self) -> ThresholdCategory {
        match self {
            Self::Person => ThresholdCategory::Person,
            _ => ThresholdCategory::Other,
        }
    }

    /// How whitelist terms interact with this type
    pub fn whitelist_policy(&self) -> WhitelistPolicy {
        match self {
            Self::Person | Self::Location | Self::StreetAddress => WhitelistPolicy::Eligible,
            Self::Date | Self::CaseNumber | Self::PropertyRef | Self::LandParcel => {
                WhitelistPolicy::ExactOnly
            }
            Self::Email
            | Self::Phone
            | Self::Iban
            | Self::AccountNumber
            | Self::TaxId
            | Self::SocialSecurityId
            | Self::GovernmentId
            | Self::CreditCard
            | Self::IpAddress
            | Self::Url => WhitelistPolicy::AlwaysBypass,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityType {
    type Err = String;

    /// Accepts canonical labels and the aliases used by older rule catalogs
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "PERSON" | "NAME" => Ok(Self::Person),
            "EMAIL" | "EMAIL_ADDRESS" => Ok(Self::Email),
            "PHONE" | "PHONE_NUMBER" | "FAX" => Ok(Self::Phone),
            "STREET_ADDRESS" | "ADDRESS" => Ok(Self::StreetAddress),
            "LOCATION" => Ok(Self::Location),
            "DATE" | "DATE_TIME" => Ok(Self::Date),
            "IBAN" | "IBAN_CODE" => Ok(Self::Iban),
            "ACCOUNT_NUMBER" | "ACCOUNT" => Ok(Self::AccountNumber),
            "TAX_ID" => Ok(Self::TaxId),
            "SOCIAL_SECURITY_ID" | "SOCIAL_SECURITY_NUMBER" | "SOCIAL_SECURITY" => {
                Ok(Self::SocialSecurityId)
            }
            "GOVERNMENT_ID" | "ID_NUMBER" => Ok(Self::GovernmentId),
            "CASE_NUMBER" => Ok(Self::CaseNumber),
            "PROPERTY_REF" => Ok(Self::PropertyRef),
            "LAND_PARCEL" => Ok(Self::LandParcel),
            "CREDIT_CARD" => Ok(Self::CreditCard),
            "IP_ADDRESS" => Ok(Self::IpAddress),
            "URL" => Ok(Self::Url),
            _ => Err(format!("Unknown entity type: {s}")),
        }
    }
}
