//! Domain-specific entity builders. One builder per section domain; every
//! builder is attributed to an import batch and never raises. Missing or
//! malformed values degrade to warnings and defaults.

pub mod addresses;
pub mod fraud_markers;
pub mod public_records;
pub mod scores;
pub mod searches;
pub mod subject;
pub mod tradelines;
