//! Independent quality gates over a finished CreditFile. Neither validator
//! mutates anything and neither is invoked by the engine itself; callers
//! compose them (either, both, or none) after normalization.

pub mod referential;
pub mod schema;

use serde::{Deserialize, Serialize};

/// One validation finding. Every finding is reported individually; the
/// validators never stop at the first problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Entity kind the finding concerns (e.g. "tradeline")
    pub entity: String,
    pub entity_id: String,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(entity: &str, entity_id: &str, field: &str, message: String) -> Self {
        Self {
            entity: entity.to_string(),
            entity_id: entity_id.to_string(),
            field: field.to_string(),
            message,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} ({})",
            self.entity, self.entity_id, self.message, self.field
        )
    }
}
