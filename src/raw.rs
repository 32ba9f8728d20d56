use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw per-section, per-field records handed over by a site-specific
/// extraction adapter. The engine never sees a DOM or a PDF, only this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawExtractedData {
    pub metadata: RawMetadata,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

/// Provenance of one extraction run, as reported by the adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMetadata {
    /// Identifier of the adapter that produced this extraction
    pub adapter_id: String,
    pub adapter_version: String,
    /// When the page/PDF was captured; reused as the deterministic run clock
    pub captured_at: DateTime<Utc>,
    /// Source page URL or file identity
    pub source_identity: String,
    /// Content hash of the captured payload, if the adapter computed one
    pub content_hash: Option<String>,
    /// Source-system names the adapter detected on the page
    #[serde(default)]
    pub detected_sources: Vec<String>,
}

/// One extracted report section: a domain tag, an optional owning source
/// system, and the field rows scraped from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSection {
    pub domain: SectionDomain,
    /// Raw source-system tag as written by the adapter; None for
    /// subject-level data not attributed to any single CRA
    pub source_system: Option<String>,
    /// Heading text captured near the section, when available
    pub heading: Option<String>,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// Report domains the engine knows how to build entities from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionDomain {
    PersonalInfo,
    Tradelines,
    Addresses,
    Searches,
    CreditScores,
    PublicRecords,
    FraudMarkers,
    /// Anything an adapter emits that this engine version does not recognize
    #[serde(other)]
    Unknown,
}

impl SectionDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionDomain::PersonalInfo => "personal_info",
            SectionDomain::Tradelines => "tradelines",
            SectionDomain::Addresses => "addresses",
            SectionDomain::Searches => "searches",
            SectionDomain::CreditScores => "credit_scores",
            SectionDomain::PublicRecords => "public_records",
            SectionDomain::FraudMarkers => "fraud_markers",
            SectionDomain::Unknown => "unknown",
        }
    }
}

/// One extracted field row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawField {
    pub name: String,
    pub value: String,
    /// Rows sharing a group key describe the same underlying entity instance
    pub group_key: Option<String>,
    pub confidence: Option<Confidence>,
    /// Positional index of the table/card the row was scraped from
    pub table_index: Option<u32>,
}

impl RawField {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            group_key: None,
            confidence: None,
            table_index: None,
        }
    }

    pub fn with_group(name: &str, value: &str, group_key: &str) -> Self {
        Self {
            group_key: Some(group_key.to_string()),
            ..Self::new(name, value)
        }
    }

    pub fn with_table_index(name: &str, value: &str, table_index: u32) -> Self {
        Self {
            table_index: Some(table_index),
            ..Self::new(name, value)
        }
    }
}

/// Adapter-reported confidence in an extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}
