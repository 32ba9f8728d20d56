//! Referential-integrity validation: every foreign key held by an entity
//! must resolve against the corresponding collection. References are plain
//! identifier strings, so resolution is an explicit lookup against id sets
//! built up front. Every dangling reference is reported individually.

use std::collections::HashSet;

use crate::domain::CreditFile;

use super::ValidationError;

pub fn validate(file: &CreditFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let import_ids: HashSet<&str> = file
        .imports
        .iter()
        .map(|batch| batch.import_id.as_str())
        .collect();
    let address_ids: HashSet<&str> = file
        .addresses
        .iter()
        .map(|address| address.address_id.as_str())
        .collect();

    let mut check_import = |entity: &str, entity_id: &str, import_id: &str, errors: &mut Vec<ValidationError>| {
        if !import_ids.contains(import_id) {
            errors.push(ValidationError::new(
                entity,
                entity_id,
                "source_import_id",
                format!("references unknown import batch \"{import_id}\""),
            ));
        }
    };

    for subject in &file.subjects {
        check_import("subject", &subject.subject_id, &subject.source_import_id, &mut errors);
    }
    for tradeline in &file.tradelines {
        check_import(
            "tradeline",
            &tradeline.tradeline_id,
            &tradeline.source_import_id,
            &mut errors,
        );
    }
    for association in &file.address_associations {
        check_import(
            "address_association",
            &association.association_id,
            &association.source_import_id,
            &mut errors,
        );
        if !address_ids.contains(association.address_id.as_str()) {
            errors.push(ValidationError::new(
                "address_association",
                &association.association_id,
                "address_id",
                format!("references unknown address \"{}\"", association.address_id),
            ));
        }
    }
    for search in &file.searches {
        check_import("search", &search.search_id, &search.source_import_id, &mut errors);
    }
    for score in &file.credit_scores {
        check_import("credit_score", &score.score_id, &score.source_import_id, &mut errors);
    }
    for record in &file.public_records {
        check_import(
            "public_record",
            &record.record_id,
            &record.source_import_id,
            &mut errors,
        );
    }
    for marker in &file.fraud_markers {
        check_import(
            "fraud_marker",
            &marker.marker_id,
            &marker.source_import_id,
            &mut errors,
        );
    }

    errors
}
