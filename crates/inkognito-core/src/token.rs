//! Deterministic placeholder tokens.
//!
//! `token_for` is a pure function of (type, normalized value): identical
//! values of the same type yield byte-identical tokens anywhere in a batch,
//! across batches and across processes. That property is what links
//! repeated mentions without any persisted table.

use crate::types::PiiType;
use sha2::{Digest, Sha256};

/// Case/whitespace normalization applied before hashing, per type.
///
/// Structured identifiers reduce to their canonical character stream so
/// that `DE89 3704 ...` and `DE893704...` map to one token; free-text
/// types fold case and collapse runs of whitespace.
pub fn normalize(pii_type: PiiType, raw: &str) -> String {
    match pii_type {
        PiiType::Iban => raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase(),
        PiiType::CreditCard | PiiType::Phone | PiiType::TaxId | PiiType::Age(_) => {
            raw.chars().filter(|c| c.is_ascii_digit()).collect()
        }
        PiiType::Passport | PiiType::DriverLicense => raw.trim().to_ascii_uppercase(),
        PiiType::Email | PiiType::Url => raw.trim().to_lowercase(),
        PiiType::Person
        | PiiType::Address
        | PiiType::MedicalCondition
        | PiiType::MedicalMedication
        | PiiType::MedicalProcedure => raw
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase(),
    }
}

/// Token template `[PII:{TYPE}_ID_{digest8}]`, a durable wire contract.
///
/// `digest8` is the first eight hex characters of SHA-256 over the type
/// string and the normalized value. Eight hex chars are kept for wire
/// compatibility; the digest only needs to be stable and well distributed,
/// not secret.
pub fn token_for(pii_type: PiiType, raw: &str) -> String {
    let normalized = normalize(pii_type, raw);
    let digest = Sha256::digest(format!("{}\n{}", pii_type.as_str(), normalized).as_bytes());
    format!(
        "[PII:{}_ID_{}]",
        pii_type.as_str(),
        hex::encode(&digest[..4])
    )
}
