//! Canonical domain entities assembled by the normalization engine.
//! Cross-entity references are plain string identifiers resolved by the
//! referential-integrity validator, never live object links, so a CreditFile
//! is trivially serializable.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vocab::{
    AccountStatus, AccountType, AddressRole, ElectoralChangeType, PaymentStatus, SearchType,
    SearchVisibility, SourceSystem,
};

/// One import batch: the unit of attribution grouping all entities derived
/// from one source system's data within one run. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub import_id: String,
    pub source_system: SourceSystem,
    /// Capture timestamp of the originating extraction (the run's clock)
    pub imported_at: DateTime<Utc>,
    pub adapter_id: String,
    pub content_hash: Option<String>,
}

/// One canonical credit account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tradeline {
    pub tradeline_id: String,
    pub source_import_id: String,
    pub furnisher_name: String,
    pub account_type: AccountType,
    /// Raw account-type text preserved when canonicalization fell back
    pub account_type_raw: Option<String>,
    pub account_status: AccountStatus,
    pub account_status_raw: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_status_raw: Option<String>,
    pub account_number: Option<String>,
    /// Balance in minor currency units (pence for GBP)
    pub balance_minor: Option<i64>,
    pub credit_limit_minor: Option<i64>,
    pub currency_code: String,
    /// ISO calendar dates (YYYY-MM-DD)
    pub opened_date: Option<String>,
    pub updated_date: Option<String>,
}

/// A physical address, deduplicated by normalized content across all source
/// systems. Per-CRA mentions live in [`AddressAssociation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub address_id: String,
    pub lines: Vec<String>,
    pub postcode: Option<String>,
    /// Canonicalized content used as the dedup key
    pub normalized: String,
    /// Hex digest of the normalized content
    pub signature: String,
}

/// Attribution of one per-CRA address mention: role plus references to the
/// shared Address and the originating import batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressAssociation {
    pub association_id: String,
    pub address_id: String,
    pub source_import_id: String,
    pub role: AddressRole,
    pub role_raw: Option<String>,
}

/// One recorded credit check, always attributed to exactly one CRA batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Search {
    pub search_id: String,
    pub source_import_id: String,
    pub organisation: String,
    pub search_type: SearchType,
    pub search_type_raw: Option<String>,
    pub visibility: SearchVisibility,
    pub date: Option<String>,
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditScore {
    pub score_id: String,
    pub source_import_id: String,
    pub provider: String,
    pub value: i64,
    pub scale_max: Option<i64>,
    pub band: Option<String>,
    pub date: Option<String>,
}

/// Court judgment / insolvency style public record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicRecord {
    pub record_id: String,
    pub source_import_id: String,
    pub record_type: String,
    pub court_name: Option<String>,
    pub amount_minor: Option<i64>,
    pub date: Option<String>,
    pub status: Option<String>,
}

/// Protective-registration style fraud marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudMarker {
    pub marker_id: String,
    pub source_import_id: String,
    pub marker_type: String,
    pub supplier_name: Option<String>,
    pub date: Option<String>,
}

/// Subject-level identity data, seeded from composite sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub subject_id: String,
    pub source_import_id: String,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub electoral_history: Vec<ElectoralEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectoralEntry {
    pub change: ElectoralChangeType,
    pub change_raw: Option<String>,
    pub date: Option<String>,
}

/// The normalized output aggregate for one engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditFile {
    pub file_id: String,
    pub generated_at: DateTime<Utc>,
    pub currency_code: String,
    pub imports: Vec<ImportBatch>,
    pub subjects: Vec<Subject>,
    pub tradelines: Vec<Tradeline>,
    pub addresses: Vec<Address>,
    pub address_associations: Vec<AddressAssociation>,
    pub searches: Vec<Search>,
    pub credit_scores: Vec<CreditScore>,
    pub public_records: Vec<PublicRecord>,
    pub fraud_markers: Vec<FraudMarker>,
}

impl CreditFile {
    /// Entity-kind → count map for the run summary.
    pub fn summary(&self) -> Summary {
        let mut summary = BTreeMap::new();
        summary.insert(EntityKind::Imports, self.imports.len());
        summary.insert(EntityKind::Subjects, self.subjects.len());
        summary.insert(EntityKind::Tradelines, self.tradelines.len());
        summary.insert(EntityKind::Addresses, self.addresses.len());
        summary.insert(
            EntityKind::AddressAssociations,
            self.address_associations.len(),
        );
        summary.insert(EntityKind::Searches, self.searches.len());
        summary.insert(EntityKind::CreditScores, self.credit_scores.len());
        summary.insert(EntityKind::PublicRecords, self.public_records.len());
        summary.insert(EntityKind::FraudMarkers, self.fraud_markers.len());
        summary
    }
}

/// Kinds of entities a CreditFile holds, used as summary keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Imports,
    Subjects,
    Tradelines,
    Addresses,
    AddressAssociations,
    Searches,
    CreditScores,
    PublicRecords,
    FraudMarkers,
}

pub type Summary = BTreeMap<EntityKind, usize>;

/// Severity of a normalization warning. Error-severity entries flip the
/// run's `success` flag; everything else is advisory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A diagnostic attached wherever a mapper or builder could not confidently
/// canonicalize a value. Collected, never thrown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalisationWarning {
    pub domain: String,
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl NormalisationWarning {
    pub fn new(domain: &str, field: &str, message: String, severity: Severity) -> Self {
        Self {
            domain: domain.to_string(),
            field: field.to_string(),
            message,
            severity,
        }
    }
}

/// The engine's full output: the (possibly partial) CreditFile plus the run
/// summary and the severity-split warning lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalisationResult {
    pub success: bool,
    pub credit_file: Option<CreditFile>,
    pub summary: Summary,
    pub errors: Vec<NormalisationWarning>,
    pub warnings: Vec<NormalisationWarning>,
}
