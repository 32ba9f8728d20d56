pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod mappers;
pub mod parse;
pub mod raw;
pub mod validate;
pub mod vocab;

pub use config::{NormalizerConfig, PageInfo};
pub use domain::{CreditFile, NormalisationResult, NormalisationWarning, Severity};
pub use engine::NormalizationEngine;
pub use error::{NormalizerError, Result};
pub use raw::RawExtractedData;
