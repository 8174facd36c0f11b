//! Audit logging module
//!
//! Opt-in JSON-lines trail of anonymization calls: counts, entity types,
//! rule ids, offsets and warnings. Matched values are never written.

pub mod logger;

pub use logger::AuditLogger;
